//! Greedy top-down/bottom-up tree matching
//!
//! Produces a one-to-one mapping between the nodes of two parsed revisions of
//! the same file. The mapping is what lets the walk say "this node over here
//! is that node over there" across a commit boundary.
//!
//! ## Phases
//!
//! 1. **Anchor**: subtrees with equal fingerprints are paired, tallest first.
//!    A fingerprint that appears several times on a side is paired
//!    positionally in post-order, which keeps the result deterministic.
//! 2. **Containers**: unmatched internal nodes are paired bottom-up with the
//!    same-label candidate sharing the most mapped descendants, measured by
//!    the dice coefficient against a fixed threshold. Roots with equal labels
//!    always pair, so a file never loses its own top node.
//! 3. **Recovery**: when a container pair is made, their still-unmatched
//!    children are aligned by running Myers over the two label sequences;
//!    equal labels pair directly and delete/insert runs pair positionally,
//!    so a renamed child maps as an update instead of vanishing.
//!
//! Every decision ties to post-order position, never hash iteration order,
//! so matching the same two trees twice gives the same mapping.

use crate::artifacts::diff::myers::{Edit, MyersDiff};
use crate::artifacts::matching::store::MappingStore;
use crate::artifacts::syntax::fingerprint::Fingerprint;
use crate::artifacts::syntax::tree::{NodeId, SyntaxTree};
use std::collections::HashMap;

/// Minimum dice coefficient for a container pair
const DICE_THRESHOLD: f64 = 0.5;

/// How two revisions' trees get paired up
pub trait TreeMatcher {
    fn match_trees(&self, src: &SyntaxTree, dst: &SyntaxTree) -> MappingStore;

    /// Whether two nodes root structurally identical subtrees
    fn isomorphic(
        &self,
        src: &SyntaxTree,
        src_node: NodeId,
        dst: &SyntaxTree,
        dst_node: NodeId,
    ) -> bool;
}

#[derive(Debug, Clone)]
pub struct GreedyMatcher {
    dice_threshold: f64,
}

impl Default for GreedyMatcher {
    fn default() -> Self {
        GreedyMatcher {
            dice_threshold: DICE_THRESHOLD,
        }
    }
}

impl TreeMatcher for GreedyMatcher {
    fn match_trees(&self, src: &SyntaxTree, dst: &SyntaxTree) -> MappingStore {
        let mut store = MappingStore::default();
        self.anchor_identical_subtrees(src, dst, &mut store);
        self.match_containers(src, dst, &mut store);
        store
    }

    fn isomorphic(
        &self,
        src: &SyntaxTree,
        src_node: NodeId,
        dst: &SyntaxTree,
        dst_node: NodeId,
    ) -> bool {
        src.node(src_node).fingerprint() == dst.node(dst_node).fingerprint()
    }
}

impl GreedyMatcher {
    /// Phase 1: pair equal-fingerprint subtrees, tallest first
    fn anchor_identical_subtrees(
        &self,
        src: &SyntaxTree,
        dst: &SyntaxTree,
        store: &mut MappingStore,
    ) {
        let max_height = src
            .node(src.root())
            .height()
            .max(dst.node(dst.root()).height());

        for height in (0..=max_height).rev() {
            let src_groups = group_by_fingerprint(src, height, |id| store.has_src(id));
            let dst_groups = group_by_fingerprint(dst, height, |id| store.has_dst(id));
            let dst_index: HashMap<Fingerprint, &Vec<NodeId>> = dst_groups
                .iter()
                .map(|(fingerprint, nodes)| (*fingerprint, nodes))
                .collect();

            for (fingerprint, src_nodes) in &src_groups {
                let Some(dst_nodes) = dst_index.get(fingerprint) else {
                    continue;
                };
                // duplicates pair positionally; leftovers stay for phase 2
                for (&s, &d) in src_nodes.iter().zip(dst_nodes.iter()) {
                    map_subtrees(src, dst, s, d, store);
                }
            }
        }
    }

    /// Phase 2: pair unmatched internal nodes by shared mapped descendants
    fn match_containers(&self, src: &SyntaxTree, dst: &SyntaxTree, store: &mut MappingStore) {
        for index in 0..src.len() {
            let s = NodeId::new(index);
            let node = src.node(s);
            if node.is_leaf() || store.has_src(s) {
                continue;
            }

            let mut best: Option<(f64, NodeId)> = None;
            for dst_index in 0..dst.len() {
                let d = NodeId::new(dst_index);
                let candidate = dst.node(d);
                if candidate.is_leaf() || store.has_dst(d) || candidate.label() != node.label() {
                    continue;
                }

                let dice = dice_coefficient(src, s, dst, d, store);
                // strict improvement keeps the first (lowest post-order) on ties
                if best.is_none_or(|(score, _)| dice > score) {
                    best = Some((dice, d));
                }
            }

            if let Some((score, d)) = best
                && score >= self.dice_threshold
            {
                store.insert(s, d);
                self.align_children(src, dst, s, d, store);
            }
        }

        // roots pair unconditionally when their labels agree
        let (src_root, dst_root) = (src.root(), dst.root());
        if !store.has_src(src_root)
            && !store.has_dst(dst_root)
            && src.node(src_root).label() == dst.node(dst_root).label()
        {
            store.insert(src_root, dst_root);
            self.align_children(src, dst, src_root, dst_root, store);
        }
    }

    /// Phase 3: align the unmatched children of a fresh container pair
    fn align_children(
        &self,
        src: &SyntaxTree,
        dst: &SyntaxTree,
        s: NodeId,
        d: NodeId,
        store: &mut MappingStore,
    ) {
        let src_rest: Vec<NodeId> = src
            .node(s)
            .children()
            .iter()
            .copied()
            .filter(|&child| !store.has_src(child))
            .collect();
        let dst_rest: Vec<NodeId> = dst
            .node(d)
            .children()
            .iter()
            .copied()
            .filter(|&child| !store.has_dst(child))
            .collect();
        if src_rest.is_empty() || dst_rest.is_empty() {
            return;
        }

        let src_labels: Vec<&str> = src_rest.iter().map(|&c| src.node(c).label()).collect();
        let dst_labels: Vec<&str> = dst_rest.iter().map(|&c| dst.node(c).label()).collect();
        let edits = MyersDiff::new(&src_labels, &dst_labels).diff();

        let (mut i, mut j) = (0, 0);
        let mut pending_del: Vec<usize> = Vec::new();
        let mut pending_ins: Vec<usize> = Vec::new();
        for edit in &edits {
            match edit {
                Edit::Equal { .. } => {
                    self.pair_pending_runs(
                        src,
                        dst,
                        &src_rest,
                        &dst_rest,
                        &mut pending_del,
                        &mut pending_ins,
                        store,
                    );
                    self.pair_nodes(src, dst, src_rest[i], dst_rest[j], store);
                    i += 1;
                    j += 1;
                }
                Edit::Delete { .. } => {
                    pending_del.push(i);
                    i += 1;
                }
                Edit::Insert { .. } => {
                    pending_ins.push(j);
                    j += 1;
                }
            }
        }
        self.pair_pending_runs(
            src,
            dst,
            &src_rest,
            &dst_rest,
            &mut pending_del,
            &mut pending_ins,
            store,
        );
    }

    /// A delete run facing an insert run is a replacement: pair positionally
    #[allow(clippy::too_many_arguments)]
    fn pair_pending_runs(
        &self,
        src: &SyntaxTree,
        dst: &SyntaxTree,
        src_rest: &[NodeId],
        dst_rest: &[NodeId],
        pending_del: &mut Vec<usize>,
        pending_ins: &mut Vec<usize>,
        store: &mut MappingStore,
    ) {
        for (&del, &ins) in pending_del.iter().zip(pending_ins.iter()) {
            self.pair_nodes(src, dst, src_rest[del], dst_rest[ins], store);
        }
        pending_del.clear();
        pending_ins.clear();
    }

    fn pair_nodes(
        &self,
        src: &SyntaxTree,
        dst: &SyntaxTree,
        s: NodeId,
        d: NodeId,
        store: &mut MappingStore,
    ) {
        if src.node(s).fingerprint() == dst.node(d).fingerprint() {
            // isomorphic pair: take the whole subtrees
            map_subtrees(src, dst, s, d, store);
        } else if store.insert(s, d) {
            self.align_children(src, dst, s, d, store);
        }
    }
}

/// Map two isomorphic subtrees node by node
fn map_subtrees(
    src: &SyntaxTree,
    dst: &SyntaxTree,
    s: NodeId,
    d: NodeId,
    store: &mut MappingStore,
) {
    if !store.insert(s, d) {
        return;
    }
    let src_children = src.node(s).children();
    let dst_children = dst.node(d).children();
    for (&sc, &dc) in src_children.iter().zip(dst_children.iter()) {
        map_subtrees(src, dst, sc, dc, store);
    }
}

/// Nodes of `tree` at exactly `height`, grouped by fingerprint in post-order
fn group_by_fingerprint(
    tree: &SyntaxTree,
    height: u32,
    taken: impl Fn(NodeId) -> bool,
) -> Vec<(Fingerprint, Vec<NodeId>)> {
    let mut groups: Vec<(Fingerprint, Vec<NodeId>)> = Vec::new();
    let mut slots: HashMap<Fingerprint, usize> = HashMap::new();

    for node in tree
        .nodes()
        .filter(|node| node.height() == height && !taken(node.id()))
    {
        match slots.get(&node.fingerprint()) {
            Some(&slot) => groups[slot].1.push(node.id()),
            None => {
                slots.insert(node.fingerprint(), groups.len());
                groups.push((node.fingerprint(), vec![node.id()]));
            }
        }
    }

    groups
}

/// 2 * shared mapped descendants / (src descendants + dst descendants)
fn dice_coefficient(
    src: &SyntaxTree,
    s: NodeId,
    dst: &SyntaxTree,
    d: NodeId,
    store: &MappingStore,
) -> f64 {
    let src_descendants = (src.node(s).size() - 1) as f64;
    let dst_descendants = (dst.node(d).size() - 1) as f64;
    if src_descendants + dst_descendants == 0.0 {
        return 0.0;
    }

    let shared = src
        .descendants(s)
        .filter(|&sd| store.dst_for(sd).is_some_and(|dd| dst.is_within(dd, d)))
        .count();

    2.0 * shared as f64 / (src_descendants + dst_descendants)
}
