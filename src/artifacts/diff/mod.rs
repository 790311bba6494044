//! Line diffing
//!
//! - `myers`: Myers' shortest-edit-script algorithm
//! - `hunk`: grouping edit scripts into unified-diff hunks with context
//!
//! The same edit script machinery backs both the rendered output and the
//! child-alignment recovery step of tree matching.

pub mod hunk;
pub mod myers;
