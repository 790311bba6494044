//! Pairing nodes across two parsed revisions
//!
//! - [`store`]: the one-to-one mapping between source and destination nodes
//! - [`matcher`]: the greedy anchor/container/recovery matching algorithm

pub mod matcher;
pub mod store;
