use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Value stored in a tree node. Generated values are drawn from `[0, bound)`.
pub type Value = u32;

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Tree node in the arena-based binary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode {
    /// Payload of this node
    pub value: Value,
    /// Index of the left child in the arena, None for an empty slot
    pub left: Option<Index>,
    /// Index of the right child in the arena, None for an empty slot
    pub right: Option<Index>,
}

impl BinaryNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for BinaryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Arena-based binary tree.
///
/// Every node is exclusively owned by its parent slot; the arena owns the storage
/// and the whole tree is dropped together. Nodes are only inserted while a tree is
/// being built (see [`crate::domain::TreeBuilder`]), afterwards the tree is read-only.
/// An empty tree has no root.
#[derive(Debug, Default)]
pub struct BinaryTree {
    /// Arena storage for all tree nodes
    arena: Arena<BinaryNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    /// Inserts a leaf and links it into the given parent slot.
    ///
    /// Without a parent the node becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, value: Value, parent: Option<(Index, Side)>) -> Index {
        let node_idx = self.arena.insert(BinaryNode {
            value,
            left: None,
            right: None,
        });

        match parent {
            Some((parent_idx, side)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    match side {
                        Side::Left => parent.left = Some(node_idx),
                        Side::Right => parent.right = Some(node_idx),
                    }
                }
            }
            None => self.root = Some(node_idx),
        }

        node_idx
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&BinaryNode> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    pub fn get_node(&self, idx: Index) -> Option<&BinaryNode> {
        self.arena.get(idx)
    }

    /// Resolves an optional child slot to its node.
    pub fn slot(&self, slot: Option<Index>) -> Option<&BinaryNode> {
        slot.and_then(|idx| self.get_node(idx))
    }

    /// Number of real nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path counted in nodes: 0 for the empty tree, 1 for a
    /// single node.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((node_idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(node_idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_node_tree() -> BinaryTree {
        //   2
        //  / \
        // 1   3
        let mut tree = BinaryTree::new();
        let root = tree.insert_node(2, None);
        tree.insert_node(1, Some((root, Side::Left)));
        tree.insert_node(3, Some((root, Side::Right)));
        tree
    }

    #[test]
    fn given_empty_tree_when_depth_then_zero() {
        let tree = BinaryTree::new();
        assert_eq!(tree.depth(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root_node().is_none());
    }

    #[test]
    fn given_single_node_when_depth_then_one() {
        let mut tree = BinaryTree::new();
        tree.insert_node(7, None);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.len(), 1);
        assert!(tree.root_node().is_some_and(BinaryNode::is_leaf));
    }

    #[test]
    fn given_inserted_children_when_reading_then_linked_to_parent() {
        let tree = three_node_tree();
        let root = tree.root_node().unwrap();
        assert_eq!(root.value, 2);
        assert_eq!(tree.slot(root.left).unwrap().value, 1);
        assert_eq!(tree.slot(root.right).unwrap().value, 3);
        assert_eq!(tree.depth(), 2);
    }
}
