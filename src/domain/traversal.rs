//! Depth-first and breadth-first traversals over a [`BinaryTree`].
//!
//! All traversals are lazy iterators driven by an explicit stack or queue, so deep
//! trees do not exhaust the call stack. Visit order matches the recursive definitions.

use std::collections::VecDeque;
use std::fmt;

use generational_arena::Index;

use crate::domain::arena::{BinaryNode, BinaryTree, Value};
use crate::domain::error::DomainError;

/// Upper limit for preallocated queue slots; deeper trees grow the queue on demand.
const MAX_PREALLOCATED_SLOTS: usize = 1 << 16;

/// Maximum number of slots a level-order queue holds for a tree of `depth` levels:
/// `2^(depth+1)`, saturating at `usize::MAX`.
pub fn queue_capacity(depth: usize) -> usize {
    u32::try_from(depth + 1)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .unwrap_or(usize::MAX)
}

/// FIFO of child slots, seeded with the root slot of `tree`.
pub(crate) fn slot_queue(tree: &BinaryTree) -> VecDeque<Option<Index>> {
    let capacity = queue_capacity(tree.depth()).min(MAX_PREALLOCATED_SLOTS);
    let mut queue = VecDeque::with_capacity(capacity);
    queue.push_back(tree.root());
    queue
}

/// The four supported visit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl Traversal {
    pub const ALL: [Traversal; 4] = [
        Traversal::InOrder,
        Traversal::PreOrder,
        Traversal::PostOrder,
        Traversal::LevelOrder,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Traversal::InOrder => "in-order",
            Traversal::PreOrder => "pre-order",
            Traversal::PostOrder => "post-order",
            Traversal::LevelOrder => "level-order",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl BinaryTree {
    pub fn pre_order_nodes(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn in_order_nodes(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    pub fn post_order_nodes(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    pub fn level_order_nodes(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    /// Left subtree, node, right subtree. Ascending for a valid BST.
    pub fn in_order(&self) -> impl Iterator<Item = Value> + '_ {
        self.in_order_nodes().map(|node| node.value)
    }

    /// Node, left subtree, right subtree.
    pub fn pre_order(&self) -> impl Iterator<Item = Value> + '_ {
        self.pre_order_nodes().map(|node| node.value)
    }

    /// Left subtree, right subtree, node.
    pub fn post_order(&self) -> impl Iterator<Item = Value> + '_ {
        self.post_order_nodes().map(|node| node.value)
    }

    /// Breadth-first, left to right within a level.
    pub fn level_order(&self) -> impl Iterator<Item = Value> + '_ {
        self.level_order_nodes().map(|node| node.value)
    }

    /// Collects the values of the requested traversal.
    pub fn traverse(&self, order: Traversal) -> Vec<Value> {
        match order {
            Traversal::InOrder => self.in_order().collect(),
            Traversal::PreOrder => self.pre_order().collect(),
            Traversal::PostOrder => self.post_order().collect(),
            Traversal::LevelOrder => self.level_order().collect(),
        }
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = &'a BinaryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // right first so that the left subtree is popped next
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(node)
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = &'a BinaryNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.get_node(idx).and_then(|node| node.left);
        }
        let node = self.tree.get_node(self.stack.pop()?)?;
        self.current = node.right;
        Some(node)
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = &'a BinaryNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if visited {
                    return Some(node);
                }
                self.stack.push((current_idx, true));
                self.stack.extend(node.right.map(|idx| (idx, false)));
                self.stack.extend(node.left.map(|idx| (idx, false)));
            }
        }
        None
    }
}

/// Breadth-first iterator. Empty slots are dropped when dequeued and never expanded,
/// so the queue drains once the deepest level has been visited.
pub struct LevelOrderIterator<'a> {
    tree: &'a BinaryTree,
    queue: VecDeque<Option<Index>>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            queue: slot_queue(tree),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = &'a BinaryNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.queue.pop_front() {
            if let Some(node) = self.tree.slot(slot) {
                self.queue.push_back(node.left);
                self.queue.push_back(node.right);
                return Some(node);
            }
        }
        None
    }
}

/// Verifies that `values` never descend, reporting the first offending pair.
pub fn check_non_decreasing(values: &[Value]) -> Result<(), DomainError> {
    match values
        .windows(2)
        .position(|pair| pair[0] > pair[1])
    {
        Some(i) => Err(DomainError::UnsortedSequence {
            position: i + 1,
            previous: values[i],
            current: values[i + 1],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_depths_when_queue_capacity_then_power_of_two() {
        assert_eq!(queue_capacity(0), 2);
        assert_eq!(queue_capacity(1), 4);
        assert_eq!(queue_capacity(4), 32);
        assert_eq!(queue_capacity(usize::BITS as usize), usize::MAX);
    }

    #[test]
    fn given_sorted_values_when_checking_then_ok() {
        assert_eq!(check_non_decreasing(&[]), Ok(()));
        assert_eq!(check_non_decreasing(&[1, 1, 2, 5, 5, 9]), Ok(()));
    }

    #[test]
    fn given_descent_when_checking_then_reports_first_position() {
        assert_eq!(
            check_non_decreasing(&[1, 4, 3, 2]),
            Err(DomainError::UnsortedSequence {
                position: 2,
                previous: 4,
                current: 3,
            })
        );
    }

    #[test]
    fn given_empty_tree_when_traversing_then_all_orders_empty() {
        let tree = BinaryTree::new();
        for order in Traversal::ALL {
            assert!(tree.traverse(order).is_empty(), "{order} should be empty");
        }
    }
}
