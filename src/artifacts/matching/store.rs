//! Bidirectional node mapping between two trees

use crate::artifacts::syntax::tree::NodeId;
use std::collections::HashMap;

/// One matched pair: a node of the older tree and one of the newer tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mapping {
    pub src: NodeId,
    pub dst: NodeId,
}

/// A one-to-one mapping between the nodes of a source and destination tree
///
/// Both directions are kept so lookups from either side stay cheap; inserts
/// that would break the one-to-one property are refused.
#[derive(Debug, Default, Clone)]
pub struct MappingStore {
    src_to_dst: HashMap<NodeId, NodeId>,
    dst_to_src: HashMap<NodeId, NodeId>,
}

impl MappingStore {
    /// Record a pair; returns false when either side is already mapped
    pub fn insert(&mut self, src: NodeId, dst: NodeId) -> bool {
        if self.src_to_dst.contains_key(&src) || self.dst_to_src.contains_key(&dst) {
            return false;
        }
        self.src_to_dst.insert(src, dst);
        self.dst_to_src.insert(dst, src);
        true
    }

    pub fn dst_for(&self, src: NodeId) -> Option<NodeId> {
        self.src_to_dst.get(&src).copied()
    }

    pub fn src_for(&self, dst: NodeId) -> Option<NodeId> {
        self.dst_to_src.get(&dst).copied()
    }

    pub fn has_src(&self, src: NodeId) -> bool {
        self.src_to_dst.contains_key(&src)
    }

    pub fn has_dst(&self, dst: NodeId) -> bool {
        self.dst_to_src.contains_key(&dst)
    }

    pub fn len(&self) -> usize {
        self.src_to_dst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src_to_dst.is_empty()
    }

    /// All pairs, sorted by source node for stable iteration
    pub fn pairs(&self) -> Vec<Mapping> {
        let mut pairs: Vec<Mapping> = self
            .src_to_dst
            .iter()
            .map(|(&src, &dst)| Mapping { src, dst })
            .collect();
        pairs.sort();
        pairs
    }
}
