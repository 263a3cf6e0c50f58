/// An index into the node arena of a [`SplayTree`](crate::SplayTree).
///
/// Identifiers are only stable between mutations of the tree: removing a node
/// relocates the last node in the arena into the freed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Child node links.
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// Non-owning back-link, [`None`] for the root (and for subtree roots
    /// that are temporarily detached during a removal).
    pub(crate) parent: Option<NodeId>,

    pub(crate) value: T,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            left: None,
            right: None,
            parent: None,
            value,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A read-only handle to a node within a [`SplayTree`](crate::SplayTree).
///
/// A [`NodeRef`] borrows the tree it was obtained from, so the tree cannot be
/// mutated while the handle (or any handle derived from it) is alive.
#[derive(Debug)]
pub struct NodeRef<'a, T> {
    nodes: &'a [Node<T>],
    id: NodeId,
}

// Manual impls: deriving would require `T: Clone`.
impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], id: NodeId) -> Self {
        Self { nodes, id }
    }

    fn node(&self) -> &'a Node<T> {
        &self.nodes[self.id.index()]
    }

    fn relative(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.nodes, id))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    pub fn left(&self) -> Option<Self> {
        self.relative(self.node().left)
    }

    pub fn right(&self) -> Option<Self> {
        self.relative(self.node().right)
    }

    /// The parent of this node, or [`None`] if this node is the root.
    pub fn parent(&self) -> Option<Self> {
        self.relative(self.node().parent)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}
