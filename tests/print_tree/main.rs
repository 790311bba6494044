#[path = "../common/mod.rs"]
mod common;

mod lists_node_ids;
