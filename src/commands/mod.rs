//! The operations behind the command line
//!
//! - [`track`]: follow one node backward and print its change records
//! - [`print_tree`]: list the node ids of the file at HEAD

pub mod print_tree;
pub mod track;
