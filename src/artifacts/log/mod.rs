//! History walking
//!
//! - [`file_history`]: the commits that changed one file, newest first

pub mod file_history;
