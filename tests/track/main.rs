#[path = "../common/mod.rs"]
mod common;

mod deterministic_output;
mod excludes_merge_commits;
mod prints_timing_table;
mod reports_failures;
mod single_structural_change;
mod skips_isomorphic_revisions;
mod stops_when_node_disappears;
