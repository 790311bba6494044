//! Following one node backward through a file's history
//!
//! - [`tracker`]: the walk itself, behind its revision-source and parser seams
//! - [`record`]: revisions, node versions, and the change records the walk emits
//! - [`timings`]: per-phase wall-clock accounting for `--timing`

pub mod record;
pub mod timings;
pub mod tracker;
