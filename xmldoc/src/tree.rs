//! Arena-backed rooted tree with parent back-references.
//!
//! All nodes live in one generational arena and refer to each other by
//! [`NodeId`] handles. Growing a child list never moves other nodes, so
//! handles stay valid until their node is erased; a handle to an erased node
//! is detected as stale instead of being dereferenced.

use generational_arena::{Arena, Index as ArenaIndex};
use tracing::{debug, instrument, trace};

use crate::errors::{XmlError, XmlResult};
use crate::index::{checked_at, Index};

/// Handle to a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(ArenaIndex);

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub data: T,
    /// Parent handle, None for the root
    parent: Option<NodeId>,
    /// Child handles in insertion order
    children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    fn new(data: T, parent: Option<NodeId>) -> Self {
        Self {
            data,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Rooted N-ary tree owning all of its nodes.
///
/// The root always exists. Cloning copies the arena as a whole: every handle
/// of the source addresses the corresponding node of the copy, and parent
/// links of the copy resolve within the copy.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    arena: Arena<TreeNode<T>>,
    root: NodeId,
}

impl<T: Default> Default for Tree<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Tree<T> {
    pub fn new(root: T) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode::new(root, None)));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<T>> {
        self.arena.get_mut(id.0)
    }

    /// Like [`Tree::get`], but a stale handle is a `NullReference`.
    pub fn node(&self, id: NodeId) -> XmlResult<&TreeNode<T>> {
        self.get(id)
            .ok_or_else(|| XmlError::null_reference(format!("node {id:?} does not exist")))
    }

    fn node_mut(&mut self, id: NodeId) -> XmlResult<&mut TreeNode<T>> {
        self.get_mut(id)
            .ok_or_else(|| XmlError::null_reference(format!("node {id:?} does not exist")))
    }

    pub fn data(&self, id: NodeId) -> XmlResult<&T> {
        self.node(id).map(|n| &n.data)
    }

    pub fn data_mut(&mut self, id: NodeId) -> XmlResult<&mut T> {
        self.node_mut(id).map(|n| &mut n.data)
    }

    pub fn parent(&self, id: NodeId) -> XmlResult<Option<NodeId>> {
        self.node(id).map(TreeNode::parent)
    }

    pub fn children(&self, id: NodeId) -> XmlResult<&[NodeId]> {
        self.node(id).map(TreeNode::children)
    }

    /// The `at`-th child of `id`; `OutOfRange` past the last child.
    pub fn child(&self, id: NodeId, at: impl Into<Index>) -> XmlResult<NodeId> {
        checked_at(self.children(id)?, at).copied()
    }

    /// The parent's children, this node included.
    #[instrument(level = "trace", skip(self))]
    pub fn siblings(&self, id: NodeId) -> XmlResult<&[NodeId]> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| XmlError::null_reference("Cannot retrieve siblings of the root node"))?;
        self.children(parent)
    }

    /// Position of `id` among its siblings, [`Index::INVALID`] for the root.
    pub fn position(&self, id: NodeId) -> XmlResult<Index> {
        match self.node(id)?.parent {
            None => Ok(Index::INVALID),
            Some(parent) => Ok(self
                .children(parent)?
                .iter()
                .position(|&c| c == id)
                .into()),
        }
    }

    /// Appends a new child under `parent` and returns its handle.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert<U: Into<T>>(&mut self, parent: NodeId, value: U) -> XmlResult<NodeId> {
        if !self.contains(parent) {
            return Err(XmlError::null_reference(format!(
                "cannot insert under missing node {parent:?}"
            )));
        }
        let id = NodeId(self.arena.insert(TreeNode::new(value.into(), Some(parent))));
        self.node_mut(parent)?.children.push(id);
        trace!(?id, "inserted node");
        Ok(id)
    }

    /// First node in pre-order whose data satisfies `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .find(|(_, node)| predicate(&node.data))
            .map(|(id, _)| id)
    }

    pub fn find_value(&self, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        self.find(|data| data == value)
    }

    /// Removes `id` together with its whole subtree.
    ///
    /// The remaining siblings keep their relative order.
    #[instrument(level = "debug", skip(self))]
    pub fn erase(&mut self, id: NodeId) -> XmlResult<()> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| XmlError::null_reference("Cannot erase the root node"))?;

        // Bottom-up, so no removed node is ever looked at again
        let doomed: Vec<NodeId> = self.descendants_postorder(id).map(|(n, _)| n).collect();

        self.node_mut(parent)?.children.retain(|&c| c != id);
        for n in &doomed {
            self.arena.remove(n.0);
        }
        debug!(removed = doomed.len(), "erased subtree");
        Ok(())
    }

    /// Removes every non-root node whose data satisfies `predicate`.
    ///
    /// Matches are collected first and erased afterwards; a match lying inside
    /// an already erased subtree is skipped. Returns the number of subtrees
    /// detached.
    #[instrument(level = "debug", skip_all)]
    pub fn erase_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let root = self.root;
        let matches: Vec<NodeId> = self
            .iter()
            .filter(|(id, node)| *id != root && predicate(&node.data))
            .map(|(id, _)| id)
            .collect();

        let mut detached = 0;
        for id in matches {
            if self.contains(id) && self.erase(id).is_ok() {
                detached += 1;
            }
        }
        debug!(detached, "erase_if finished");
        detached
    }

    /// Pre-order traversal of the whole tree.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    pub fn descendants(&self, id: NodeId) -> TreeIterator<'_, T> {
        TreeIterator::new(self, id)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self, self.root)
    }

    pub fn descendants_postorder(&self, id: NodeId) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self, id)
    }

    /// Number of levels; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((id, level)) = stack.pop() {
            if let Some(node) = self.get(id) {
                deepest = deepest.max(level);
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }
        deepest
    }

    /// Moves the contents out, leaving a tree with only a default root behind.
    pub fn take(&mut self) -> Self
    where
        T: Default,
    {
        std::mem::take(self)
    }

    /// Move-assignment: `self` takes over `source`, which is left with only a
    /// default root.
    pub fn move_from(&mut self, source: &mut Self) -> &mut Self
    where
        T: Default,
    {
        *self = source.take();
        self
    }
}

/// Applies `visitor` to every value in pre-order.
pub fn for_each<T, F>(tree: &Tree<T>, mut visitor: F)
where
    F: FnMut(&T),
{
    for (_, node) in tree.iter() {
        visitor(&node.data);
    }
}

pub fn for_each_mut<T, F>(tree: &mut Tree<T>, mut visitor: F)
where
    F: FnMut(&mut T),
{
    let order: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
    for id in order {
        if let Some(node) = tree.get_mut(id) {
            visitor(&mut node.data);
        }
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a Tree<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push((start, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      0
    //     / \
    //    1   4
    //   / \
    //  2   3
    fn sample() -> (Tree<i32>, Vec<NodeId>) {
        let mut tree = Tree::new(0);
        let root = tree.root();
        let n1 = tree.insert(root, 1).unwrap();
        let n2 = tree.insert(n1, 2).unwrap();
        let n3 = tree.insert(n1, 3).unwrap();
        let n4 = tree.insert(root, 4).unwrap();
        (tree, vec![root, n1, n2, n3, n4])
    }

    #[test]
    fn given_tree_when_iterating_then_visits_in_preorder() {
        let (tree, _) = sample();
        let values: Vec<i32> = tree.iter().map(|(_, n)| n.data).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn given_tree_when_postorder_iterating_then_children_come_first() {
        let (tree, _) = sample();
        let values: Vec<i32> = tree.iter_postorder().map(|(_, n)| n.data).collect();
        assert_eq!(values, vec![2, 3, 1, 4, 0]);
    }

    #[test]
    fn given_many_inserts_when_reading_early_handles_then_parents_still_resolve() {
        let mut tree = Tree::new(0);
        let first = tree.insert(tree.root(), 1).unwrap();
        let deep = tree.insert(first, 2).unwrap();
        for i in 0..1000 {
            tree.insert(tree.root(), 100 + i).unwrap();
        }
        assert_eq!(tree.parent(deep).unwrap(), Some(first));
        assert_eq!(tree.parent(first).unwrap(), Some(tree.root()));
    }

    #[test]
    fn given_node_when_erasing_then_handle_becomes_stale() {
        let (mut tree, ids) = sample();
        tree.erase(ids[1]).unwrap();
        assert!(!tree.contains(ids[1]));
        assert!(!tree.contains(ids[2]));
        assert!(matches!(tree.node(ids[2]), Err(XmlError::NullReference(_))));
        assert!(tree.erase(ids[1]).is_err());
    }

    #[test]
    fn given_stale_parent_when_inserting_then_null_reference() {
        let (mut tree, ids) = sample();
        tree.erase(ids[4]).unwrap();
        assert!(matches!(
            tree.insert(ids[4], 9),
            Err(XmlError::NullReference(_))
        ));
    }

    #[test]
    fn given_tree_when_child_by_index_then_checked() {
        let (tree, ids) = sample();
        assert_eq!(tree.child(ids[1], 1).unwrap(), ids[3]);
        assert!(matches!(
            tree.child(ids[1], 2),
            Err(XmlError::OutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn given_nodes_when_position_then_root_is_invalid() {
        let (tree, ids) = sample();
        assert!(!tree.position(ids[0]).unwrap().is_valid());
        assert_eq!(tree.position(ids[3]).unwrap(), Index::new(1));
        assert_eq!(tree.position(ids[4]).unwrap(), Index::new(1));
    }

    #[test]
    fn given_tree_when_depth_then_counts_levels() {
        let (tree, _) = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(Tree::new(0).depth(), 1);
    }

    #[test]
    fn given_long_parent_chain_when_depth_then_counts_without_recursion() {
        let mut tree = Tree::new(0);
        let mut current = tree.root();
        for i in 1..100_000 {
            current = tree.insert(current, i).unwrap();
        }

        assert_eq!(tree.depth(), 100_000);
        assert_eq!(tree.iter().count(), 100_000);
    }

    #[test]
    fn given_tree_when_for_each_mut_then_updates_every_value() {
        let (mut tree, _) = sample();
        for_each_mut(&mut tree, |v| *v *= 10);
        let mut seen = Vec::new();
        for_each(&tree, |v| seen.push(*v));
        assert_eq!(seen, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn given_tree_when_take_then_source_holds_default_root() {
        let (mut tree, _) = sample();
        let moved = tree.take();
        assert_eq!(moved.len(), 5);
        assert!(tree.is_empty());
        assert_eq!(*tree.data(tree.root()).unwrap(), 0);
    }
}
