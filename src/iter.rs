use crate::node::{Node, NodeId, NodeRef};

/// An in-order (ascending) iterator over the nodes of a
/// [`SplayTree`](crate::SplayTree).
///
/// Iteration does not splay; the tree shape is unchanged.
#[derive(Debug)]
pub(crate) struct RefIter<'a, T> {
    nodes: &'a [Node<T>],
    stack: Vec<NodeId>,
}

impl<'a, T> RefIter<'a, T> {
    pub(crate) fn new(nodes: &'a [Node<T>], root: Option<NodeId>) -> Self {
        let mut this = Self {
            nodes,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        this.push_subtree(root);

        this
    }

    fn push_subtree(&mut self, subtree_root: Option<NodeId>) {
        let mut ptr = subtree_root;

        while let Some(id) = ptr {
            self.stack.push(id);
            ptr = self.nodes[id.index()].left;
        }
    }
}

impl<'a, T> Iterator for RefIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        self.push_subtree(self.nodes[id.index()].right);

        Some(NodeRef::new(self.nodes, id))
    }
}
