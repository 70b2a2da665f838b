//! Random tree construction.
//!
//! Both constructors work off an explicit stack of pending child slots. Work items
//! are pushed right-then-left, so random draws happen in the same pre-order sequence
//! as the recursive formulation and a seeded builder is reproducible.

use generational_arena::Index;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::domain::arena::{BinaryTree, Side, Value};

/// Chooses the pivot index when splitting a sorted run into a BST node.
pub trait PivotPicker {
    /// Returns an index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniformly random pivot.
#[derive(Debug)]
pub struct RandomPivot<'a, R: Rng>(pub &'a mut R);

impl<R: Rng> PivotPicker for RandomPivot<'_, R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always the first element: sorted input becomes a right-leaning chain.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstPivot;

impl PivotPicker for FirstPivot {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Always the middle element: sorted input becomes a balanced tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct MiddlePivot;

impl PivotPicker for MiddlePivot {
    fn pick(&mut self, len: usize) -> usize {
        len / 2
    }
}

/// Builds a BST from `values` (sorted first), splitting each run at the pivot chosen
/// by `picker`. Equal values may end up on either side of a pivot.
#[instrument(level = "debug", skip(values, picker), fields(n = values.len()))]
pub fn build_bst<P: PivotPicker>(mut values: Vec<Value>, picker: &mut P) -> BinaryTree {
    values.sort_unstable();
    let mut tree = BinaryTree::with_capacity(values.len());
    // (run start, run end, parent slot)
    let mut stack: Vec<(usize, usize, Option<(Index, Side)>)> = vec![(0, values.len(), None)];

    while let Some((start, end, parent)) = stack.pop() {
        if start >= end {
            continue;
        }
        let pivot = start + picker.pick(end - start).min(end - start - 1);
        let node_idx = tree.insert_node(values[pivot], parent);

        stack.push((pivot + 1, end, Some((node_idx, Side::Right))));
        stack.push((start, pivot, Some((node_idx, Side::Left))));
    }

    debug!(nodes = tree.len(), depth = tree.depth(), "built bst");
    tree
}

/// Constructs random binary trees from a uniform random source.
#[derive(Debug)]
pub struct TreeBuilder<R: Rng = StdRng> {
    rng: R,
}

impl TreeBuilder<StdRng> {
    /// Deterministic builder: the same seed always yields the same trees.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Builder seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn with_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> TreeBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Random binary tree with at most `max_levels` levels.
    ///
    /// A slot with remaining budget `L` stays empty when `L == 0` or with probability
    /// `1/L`; otherwise it holds a value drawn from `[0, L)` and both children get
    /// budget `L - 1`.
    #[instrument(level = "debug", skip(self))]
    pub fn build_random_tree(&mut self, max_levels: u32) -> BinaryTree {
        let mut tree = BinaryTree::new();
        let mut stack: Vec<(u32, Option<(Index, Side)>)> = vec![(max_levels, None)];

        while let Some((budget, parent)) = stack.pop() {
            if budget == 0 || self.rng.gen_range(0..budget) == 0 {
                continue;
            }
            let value = self.rng.gen_range(0..budget);
            let node_idx = tree.insert_node(value, parent);

            stack.push((budget - 1, Some((node_idx, Side::Right))));
            stack.push((budget - 1, Some((node_idx, Side::Left))));
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "built random tree");
        tree
    }

    /// Random BST with fewer than `max_nodes` nodes, values drawn from `[0, max_nodes)`.
    #[instrument(level = "debug", skip(self))]
    pub fn build_random_bst(&mut self, max_nodes: u32) -> BinaryTree {
        let values = self.random_values(max_nodes);
        self.build_bst_from(values)
    }

    /// BST over the given multiset with uniformly random pivots.
    pub fn build_bst_from(&mut self, values: Vec<Value>) -> BinaryTree {
        build_bst(values, &mut RandomPivot(&mut self.rng))
    }

    /// Draws a count in `[0, bound)` and that many values in `[0, bound)`.
    fn random_values(&mut self, bound: u32) -> Vec<Value> {
        if bound == 0 {
            return Vec::new();
        }
        let n = self.rng.gen_range(0..bound);
        (0..n).map(|_| self.rng.gen_range(0..bound)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_zero_bound_when_drawing_values_then_empty() {
        let mut builder = TreeBuilder::from_seed(1);
        assert!(builder.random_values(0).is_empty());
    }

    #[test]
    fn given_bound_when_drawing_values_then_count_and_values_below_bound() {
        let mut builder = TreeBuilder::from_seed(7);
        for _ in 0..50 {
            let values = builder.random_values(10);
            assert!(values.len() < 10);
            assert!(values.iter().all(|&v| v < 10));
        }
    }

    #[test]
    fn given_out_of_range_picker_when_building_then_clamps_to_last() {
        struct Overshoot;
        impl PivotPicker for Overshoot {
            fn pick(&mut self, len: usize) -> usize {
                len + 10
            }
        }
        let tree = build_bst(vec![3, 1, 2], &mut Overshoot);
        // last element is always the pivot: a left-leaning chain
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(tree.depth(), 3);
    }
}
