// src/core/indexing/kdtree/tree.rs

//! Defines the core KD-Tree structures: `KdNode` and `KdTree`.

/// Identifies a node slot inside the tree's arena.
pub type NodeId = usize;

/// A node in the KD-Tree arena.
///
/// Each node holds exactly one point: the exact median on its split axis at
/// the depth where it was created. Points are identified by their original
/// position in the input sequence; the node never copies coordinates, it
/// refers back to the point store owned by the index.
#[derive(Debug)]
pub struct KdNode {
    /// Original input position of this node's point.
    pub point_index: usize,
    /// Splitting axis, in `[0, dimension)`.
    pub axis: usize,
    /// Arena id of the left subtree (points at or below the median on `axis`).
    pub left: Option<NodeId>,
    /// Arena id of the right subtree (points at or above the median on `axis`).
    pub right: Option<NodeId>,
}

/// A balanced KD-Tree stored as an arena of nodes.
///
/// The arena owns every node; children are addressed by integer id rather
/// than owning pointers, which keeps ownership flat and cycle-free and keeps
/// tree shape independent of call-stack depth during construction. The tree
/// stores only point indices; the coordinate data lives in the index that
/// owns the tree.
#[derive(Debug)]
pub struct KdTree {
    /// All nodes, in creation order.
    pub(super) nodes: Vec<KdNode>,
    /// Arena id of the root node, `None` for an empty tree.
    pub(super) root: Option<NodeId>,
    /// Dimensionality of the indexed points.
    pub(super) dimension: u32,
}

impl KdTree {
    /// Creates a new, empty KD-Tree for a given dimension.
    /// The actual tree structure is built by `builder::build_kdtree`.
    #[must_use]
    pub fn new(dimension: u32) -> Self {
        Self { nodes: Vec::new(), root: None, dimension }
    }

    /// Returns the dimensionality of the points this tree indexes.
    #[must_use]
    pub const fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Arena id of the root node, `None` for an empty tree.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of nodes (one per indexed point).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node stored at `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &KdNode {
        &self.nodes[id]
    }

    /// Appends a node to the arena and returns its id. Used by the builder.
    pub(super) fn push_node(&mut self, node: KdNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Patches a child link on an existing node. Used by the builder.
    pub(super) fn link_child(&mut self, parent: NodeId, right_side: bool, child: NodeId) {
        if right_side {
            self.nodes[parent].right = Some(child);
        } else {
            self.nodes[parent].left = Some(child);
        }
    }

    /// Sets the root node of the tree. Used by the builder.
    pub(super) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }
}
