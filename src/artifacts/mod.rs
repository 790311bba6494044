//! Domain artifacts
//!
//! - [`objects`]: git's blob, tree, and commit objects
//! - [`log`]: walking a file's history
//! - [`syntax`]: parsed trees and their structural fingerprints
//! - [`matching`]: pairing nodes across two revisions
//! - [`tracking`]: the backward walk and the records it emits
//! - [`diff`]: line diffing and hunk grouping for the output

pub mod diff;
pub mod log;
pub mod matching;
pub mod objects;
pub mod syntax;
pub mod tracking;
