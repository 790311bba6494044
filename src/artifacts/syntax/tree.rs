//! Arena-backed syntax trees
//!
//! A [`SyntaxTree`] stores its nodes in a flat vector in post-order: children
//! always precede their parent, and the root sits last. Node IDs are indices
//! into that vector, which makes the post-order position and the ID the same
//! number and keeps every subtree a contiguous index range.
//!
//! Trees are assembled once by a [`TreeBuilder`] and never mutated after
//! [`TreeBuilder::finish`]; derived data (fingerprint, size, height) is
//! computed as nodes are added, children first.

use crate::artifacts::syntax::fingerprint::Fingerprint;
use derive_new::new;

/// Index of a node inside its tree, equal to its post-order position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open byte range `[start, end)` into the revision's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

/// One node of a parsed file
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    id: NodeId,
    label: String,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    fingerprint: Fingerprint,
    /// Number of nodes in this subtree, itself included
    size: u32,
    /// Longest downward path; leaves have height 0
    height: u32,
}

impl SyntaxNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An immutable parsed file
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        // builder guarantees at least one node, root last
        NodeId::new(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in post-order
    pub fn nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.nodes.iter()
    }

    /// Locate a node by its raw post-order ID
    ///
    /// A full traversal rather than an index probe: IDs arrive from the
    /// command line and may name nothing in this revision's tree.
    pub fn find_by_id(&self, raw_id: u32) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.id().as_u32() == raw_id)
            .map(|node| node.id())
    }

    /// Proper descendants of `id`, in post-order
    ///
    /// Post-order layout makes a subtree the contiguous index range
    /// `[id - size + 1, id]`, so no pointer chasing is needed.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        let first = id.index() + 1 - self.node(id).size() as usize;
        (first..id.index()).map(NodeId::new)
    }

    /// Whether `id` lies strictly inside the subtree rooted at `ancestor`
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let first = ancestor.index() + 1 - self.node(ancestor).size() as usize;
        first <= id.index() && id.index() < ancestor.index()
    }

    /// Visit every node in pre-order with its depth
    pub fn walk(&self, mut visit: impl FnMut(usize, &SyntaxNode)) {
        self.walk_from(self.root(), 0, &mut visit);
    }

    fn walk_from(&self, id: NodeId, depth: usize, visit: &mut impl FnMut(usize, &SyntaxNode)) {
        let node = self.node(id);
        visit(depth, node);
        for &child in node.children() {
            self.walk_from(child, depth + 1, visit);
        }
    }
}

/// Assembles a [`SyntaxTree`] bottom-up
///
/// Children must be added before their parent; the last node added becomes
/// the root.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node whose children were already added, returning its ID
    pub fn add_node(&mut self, label: String, span: Span, children: Vec<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());

        let fingerprint = Fingerprint::of_node(
            &label,
            children.iter().map(|child| self.nodes[child.index()].fingerprint),
        );

        let mut size = 1;
        let mut height = 0;
        for &child in &children {
            let child_node = &self.nodes[child.index()];
            size += child_node.size;
            height = height.max(child_node.height + 1);
        }
        for &child in &children {
            self.nodes[child.index()].parent = Some(id);
        }

        self.nodes.push(SyntaxNode {
            id,
            label,
            span,
            parent: None,
            children,
            fingerprint,
            size,
            height,
        });

        id
    }

    /// Seal the tree, checking that the nodes form exactly one tree
    pub fn finish(self) -> anyhow::Result<SyntaxTree> {
        let Some(root) = self.nodes.last() else {
            return Err(anyhow::anyhow!("tree has no nodes"));
        };
        if root.size as usize != self.nodes.len() {
            return Err(anyhow::anyhow!(
                "{} nodes were added but the last one roots a subtree of {}",
                self.nodes.len(),
                root.size
            ));
        }

        Ok(SyntaxTree { nodes: self.nodes })
    }
}
