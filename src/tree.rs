use std::{cmp::Ordering, collections::TryReserveError, fmt::Debug};

use log::trace;

use crate::{
    error::Error,
    iter::RefIter,
    key::Keyed,
    node::{Node, NodeId, NodeRef},
};

/// A callback invoked after every single rotation with the current root.
type RotationObserver<T> = Box<dyn FnMut(NodeRef<'_, T>)>;

/// A self-adjusting binary search tree.
///
/// Every lookup, insertion and removal splays the touched node (or, on a
/// miss, the closest node visited) to the root, so recently accessed values
/// are cheap to reach again. Operations run in amortized `O(log n)` time with
/// no worst-case bound for any single operation.
///
/// Nodes live in an arena owned by the tree and link to each other by index,
/// including a back-link to their parent.
pub struct SplayTree<T> {
    /// Node arena.
    ///
    /// The arena is kept compact: every slot holds a node reachable from
    /// `root`, so its length is the node count.
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,

    observer: Option<RotationObserver<T>>,
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            observer: None,
        }
    }
}

impl<T> Debug for SplayTree<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplayTree")
            .field("nodes", &self.nodes)
            .field("root", &self.root)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Deep copies the tree, preserving both the values and the shape.
///
/// The copy does not inherit the rotation observer of the source.
impl<T> Clone for SplayTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            observer: None,
        }
    }

    /// Replace the contents of `self` with a copy of `source`, retaining the
    /// rotation observer of `self`.
    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
        self.root = source.root;
    }
}

/// The outcome of a non-splaying descent from the root.
#[derive(Debug, Clone, Copy)]
struct Descent {
    /// The node holding the probed value, if any.
    found: Option<NodeId>,

    /// The last node visited before the matching node, or before falling off
    /// the tree on a miss.
    last: Option<NodeId>,
}

impl<T> SplayTree<T> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// A handle to the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Install `observer` to be called synchronously after every rotation
    /// with a handle to the (new) root of the tree, replacing any existing
    /// observer.
    ///
    /// A single splay may rotate many times; the observer is called once per
    /// rotation. It receives a read-only view and cannot modify the tree.
    pub fn set_rotation_observer<F>(&mut self, observer: F)
    where
        F: FnMut(NodeRef<'_, T>) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the rotation observer, if any.
    pub fn clear_rotation_observer(&mut self) {
        self.observer = None;
    }

    /// Iterate over the values in ascending order.
    ///
    /// Iteration does not restructure the tree.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        RefIter::new(&self.nodes, self.root).map(|v| v.value())
    }

    /// Return all values in ascending order.
    pub fn collect_ordered(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Return the values of all leaf nodes (nodes without children) in
    /// ascending order.
    pub fn leaf_values(&self) -> Vec<T>
    where
        T: Clone,
    {
        RefIter::new(&self.nodes, self.root)
            .filter(|v| v.is_leaf())
            .map(|v| v.value().clone())
            .collect()
    }

    /// The number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty tree has a height of 0, a tree with a single node a height
    /// of 1.
    pub fn height(&self) -> usize {
        let mut max = 0;

        // Splayed trees can degrade into long chains, so walk the tree with an
        // explicit stack rather than recursing.
        let mut stack = self.root.map(|v| (v, 1)).into_iter().collect::<Vec<_>>();
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);

            let n = self.node(id);
            stack.extend(n.left.iter().chain(n.right.iter()).map(|&c| (c, depth + 1)));
        }

        max
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.index()]
    }

    fn notify_rotation(&mut self) {
        if let (Some(observer), Some(root)) = (self.observer.as_mut(), self.root) {
            observer(NodeRef::new(&self.nodes, root));
        }
    }

    /// Point the child link of `parent` that currently references `old` at
    /// `new`, or make `new` the root if there is no parent.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            Some(p) => {
                let p = self.node_mut(p);
                if p.left == Some(old) {
                    p.left = Some(new);
                } else {
                    debug_assert_eq!(p.right, Some(old));
                    p.right = Some(new);
                }
            }
            None => self.root = Some(new),
        }
    }

    /// Right rotate the subtree rooted at `y`, promoting its left child `x`.
    ///
    /// ```text
    ///          y
    ///         / \                           x
    ///        x   3        zig(y)          /   \
    ///       / \      --------------->    1     y
    ///      1   2                              / \
    ///                                        2   3
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `y` has no left child (cannot be rotated).
    fn zig(&mut self, y: NodeId) {
        let x = self.node(y).left.expect("zig requires a left child");

        // Move the inner subtree "2" across.
        let inner = self.node(x).right;
        self.node_mut(y).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(y);
        }

        // Link "x" into the position previously held by "y".
        let parent = self.node(y).parent;
        self.node_mut(x).parent = parent;
        self.replace_child(parent, y, x);

        self.node_mut(x).right = Some(y);
        self.node_mut(y).parent = Some(x);

        self.notify_rotation();
    }

    /// Left rotate the subtree rooted at `x`, promoting its right child `y`.
    ///
    /// ```text
    ///      x
    ///     / \                               y
    ///    1   y            zag(x)          /   \
    ///       / \      --------------->    x     3
    ///      2   3                        / \
    ///                                  1   2
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `x` has no right child (cannot be rotated).
    fn zag(&mut self, x: NodeId) {
        let y = self.node(x).right.expect("zag requires a right child");

        let inner = self.node(y).left;
        self.node_mut(x).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, y);

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);

        self.notify_rotation();
    }

    /// Rotate `n` up until it becomes the root of the tree.
    ///
    /// During a removal the "tree" may be a detached subtree temporarily
    /// installed as the root; the loop terminates when `n` has no parent.
    fn splay(&mut self, n: NodeId) {
        let mut rotations = 0;

        while let Some(p) = self.node(n).parent {
            let n_is_left = self.node(p).left == Some(n);

            match self.node(p).parent {
                // The parent is the root.
                None if n_is_left => {
                    self.zig(p);
                    rotations += 1;
                }
                None => {
                    self.zag(p);
                    rotations += 1;
                }
                Some(g) => {
                    let p_is_left = self.node(g).left == Some(p);

                    match (n_is_left, p_is_left) {
                        // zig-zig
                        (true, true) => {
                            self.zig(g);
                            self.zig(p);
                        }
                        // zag-zag
                        (false, false) => {
                            self.zag(g);
                            self.zag(p);
                        }
                        // zig-zag: "n" is the right child of a left child.
                        (false, true) => {
                            self.zag(p);
                            self.zig(g);
                        }
                        // zag-zig: "n" is the left child of a right child.
                        (true, false) => {
                            self.zig(p);
                            self.zag(g);
                        }
                    }
                    rotations += 2;
                }
            }
        }

        debug_assert_eq!(self.root, Some(n));
        trace!("splayed node to root in {rotations} rotations");
    }

    /// Walk down from the root without restructuring, steering by `probe`,
    /// which returns the ordering of the probe relative to the visited value.
    fn descend<F>(&self, mut probe: F) -> Descent
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut last = None;
        let mut ptr = self.root;

        while let Some(id) = ptr {
            let n = self.node(id);
            ptr = match probe(&n.value) {
                Ordering::Equal => {
                    return Descent {
                        found: Some(id),
                        last,
                    }
                }
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
            };
            last = Some(id);
        }

        Descent { found: None, last }
    }

    /// Return the right-most (maximum) node of the subtree rooted at `id`.
    fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Allocate a detached node holding `value`, using `reserve` to make room
    /// for it in the arena.
    ///
    /// Fails without modifying the arena if the reservation fails.
    fn alloc<R>(&mut self, value: T, reserve: R) -> Result<NodeId, Error>
    where
        R: FnOnce(&mut Vec<Node<T>>) -> Result<(), TryReserveError>,
    {
        reserve(&mut self.nodes)?;
        self.nodes.push(Node::new(value));
        Ok(NodeId::new(self.nodes.len() - 1))
    }

    /// Splay `target` to the root and remove it from the tree, returning its
    /// value.
    ///
    /// If the node had two subtrees, its in-order predecessor is splayed to
    /// the top of the left subtree and becomes the new root, adopting the
    /// right subtree.
    fn remove_node(&mut self, target: NodeId) -> T {
        self.splay(target);

        // Detach both subtrees of the root.
        let n = self.node(target);
        let (left, right) = (n.left, n.right);
        for child in left.into_iter().chain(right) {
            self.node_mut(child).parent = None;
        }

        self.root = match (left, right) {
            (None, None) => None,
            (Some(only), None) | (None, Some(only)) => Some(only),
            (Some(left), Some(right)) => {
                // Install the left subtree as the tree so the predecessor
                // splays to its top.
                self.root = Some(left);

                let pred = self.subtree_max(left);
                if pred != left {
                    self.splay(pred);
                }

                // Invariant: the predecessor is the maximum of the left
                // subtree, so it has no right child once at the top.
                debug_assert!(self.node(pred).right.is_none());

                self.node_mut(pred).right = Some(right);
                self.node_mut(right).parent = Some(pred);
                Some(pred)
            }
        };

        self.release(target)
    }

    /// Remove the fully unlinked node `id` from the arena, returning its
    /// value.
    ///
    /// The last node of the arena is moved into the freed slot and the links
    /// referencing it are updated.
    fn release(&mut self, id: NodeId) -> T {
        let removed = self.nodes.swap_remove(id.index());

        let moved_from = NodeId::new(self.nodes.len());
        if moved_from != id {
            let n = self.node(id);
            let (parent, left, right) = (n.parent, n.left, n.right);

            self.replace_child(parent, moved_from, id);
            for child in left.into_iter().chain(right) {
                self.node_mut(child).parent = Some(id);
            }
        }

        removed.value
    }
}

impl<T> SplayTree<T>
where
    T: Ord,
{
    /// Insert `value` into the tree and splay it to the root.
    ///
    /// If an equal value is already stored, `value` is discarded, the
    /// existing node is splayed to the root and `false` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the node cannot be allocated, in which case
    /// the tree is left unmodified.
    pub fn insert(&mut self, value: T) -> Result<bool, Error> {
        self.insert_with(value, |nodes| nodes.try_reserve(1))
    }

    /// Insert `value`, calling `reserve` to make room for a new node.
    fn insert_with<R>(&mut self, value: T, reserve: R) -> Result<bool, Error>
    where
        R: FnOnce(&mut Vec<Node<T>>) -> Result<(), TryReserveError>,
    {
        let Descent { found, last } = self.descend(|v| value.cmp(v));

        if let Some(existing) = found {
            trace!("discarding duplicate insert");
            self.splay(existing);
            return Ok(false);
        }

        let id = self.alloc(value, reserve)?;

        match last {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(id);
            }
            Some(parent) => {
                self.node_mut(id).parent = Some(parent);
                if self.node(id).value < self.node(parent).value {
                    self.node_mut(parent).left = Some(id);
                } else {
                    self.node_mut(parent).right = Some(id);
                }
                self.splay(id);
            }
        }

        Ok(true)
    }

    /// Search for `value`, returning a handle to the matching node.
    ///
    /// A match is splayed to the root. On a miss, the last node visited is
    /// splayed to the root instead, biasing the tree towards the probed
    /// region.
    pub fn search(&mut self, value: &T) -> Option<NodeRef<'_, T>> {
        let id = self.splay_search(value)?;
        Some(NodeRef::new(&self.nodes, id))
    }

    /// Returns true if `value` is stored in the tree.
    ///
    /// Has the same restructuring effects as [`SplayTree::search()`].
    pub fn contains(&mut self, value: &T) -> bool {
        self.splay_search(value).is_some()
    }

    /// Replace the stored value equal to `value`, returning the old value.
    ///
    /// Has the same restructuring effects as [`SplayTree::search()`]. Returns
    /// [`None`] (and discards `value`) if no equal value is stored.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let id = self.splay_search(&value)?;
        Some(std::mem::replace(&mut self.node_mut(id).value, value))
    }

    /// Search for the value whose [`Keyed::key()`] equals `key`.
    ///
    /// A match is splayed to the root. Unlike [`SplayTree::search()`], a miss
    /// leaves the tree untouched.
    pub fn search_by_key(&mut self, key: &T::Key) -> Option<NodeRef<'_, T>>
    where
        T: Keyed,
    {
        let id = self.descend(|v| key.cmp(&v.key())).found?;
        self.splay(id);
        Some(NodeRef::new(&self.nodes, id))
    }

    /// Remove `value` from the tree, returning true if it was present.
    ///
    /// See [`SplayTree::take()`].
    pub fn erase(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove `value` from the tree, returning the stored value.
    ///
    /// The removed node is first splayed to the root and unlinked. If it had
    /// two subtrees, its in-order predecessor (the maximum of the left
    /// subtree) is splayed to the top of the left subtree and becomes the new
    /// root, adopting the right subtree.
    ///
    /// If `value` is not stored, the last node visited while searching for it
    /// is splayed to the root and [`None`] is returned.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let Descent { found, last } = self.descend(|v| value.cmp(v));

        let Some(target) = found else {
            trace!("removal target not found");
            if let Some(last) = last {
                self.splay(last);
            }
            return None;
        };

        Some(self.remove_node(target))
    }

    /// Remove the value whose [`Keyed::key()`] equals `key`, returning it.
    ///
    /// Restructures the tree as [`SplayTree::take()`] does on a match. A miss
    /// leaves the tree untouched, as with [`SplayTree::search_by_key()`].
    pub fn take_by_key(&mut self, key: &T::Key) -> Option<T>
    where
        T: Keyed,
    {
        let id = self.descend(|v| key.cmp(&v.key())).found?;
        Some(self.remove_node(id))
    }

    fn splay_search(&mut self, value: &T) -> Option<NodeId> {
        let Descent { found, last } = self.descend(|v| value.cmp(v));

        match (found, last) {
            (Some(id), _) => {
                self.splay(id);
                Some(id)
            }
            (None, Some(last)) => {
                self.splay(last);
                None
            }
            (None, None) => None,
        }
    }
}
