//! Follow one syntax node backward through a file's git history.
//!
//! The library is organized in three layers:
//!
//! - [`areas`]: the collaborators a run talks to (git repository, parse service)
//! - [`artifacts`]: the data structures and algorithms (git objects, syntax
//!   trees, tree matching, history traversal, diffing, the tracking walk)
//! - [`commands`]: the user-facing operations wired together by the binary

pub mod areas;
pub mod artifacts;
pub mod commands;
