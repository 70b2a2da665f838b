//! Property tests over randomly seeded builders

use proptest::collection::vec;
use proptest::prelude::*;

use bintree::domain::{
    build_bst, check_non_decreasing, level_slots, FirstPivot, MiddlePivot, Traversal, TreeBuilder,
};

fn sorted(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values
}

proptest! {
    #[test]
    fn prop_random_bst_in_order_is_sorted(seed in any::<u64>(), max_nodes in 0u32..64) {
        let tree = TreeBuilder::from_seed(seed).build_random_bst(max_nodes);
        let in_order = tree.traverse(Traversal::InOrder);

        prop_assert!(check_non_decreasing(&in_order).is_ok());
        prop_assert!(tree.len() <= max_nodes.saturating_sub(1) as usize);
        prop_assert!(tree.depth() <= max_nodes as usize);
    }

    #[test]
    fn prop_random_tree_depth_within_budget(seed in any::<u64>(), max_levels in 0u32..12) {
        let tree = TreeBuilder::from_seed(seed).build_random_tree(max_levels);
        prop_assert!(tree.depth() <= max_levels as usize);
    }

    #[test]
    fn prop_traversals_visit_same_multiset(seed in any::<u64>(), max_levels in 0u32..10) {
        let tree = TreeBuilder::from_seed(seed).build_random_tree(max_levels);
        let expected = sorted(tree.traverse(Traversal::PreOrder));

        prop_assert_eq!(expected.len(), tree.len());
        for order in Traversal::ALL {
            prop_assert_eq!(sorted(tree.traverse(order)), expected.clone());
        }
    }

    #[test]
    fn prop_level_slots_cover_depth(seed in any::<u64>(), max_levels in 0u32..8) {
        let tree = TreeBuilder::from_seed(seed).build_random_tree(max_levels);
        let levels = level_slots(&tree);

        // depth levels with nodes plus one trailing placeholder level
        prop_assert_eq!(levels.len(), tree.depth() + 1);
        prop_assert!(levels.last().unwrap().iter().all(Option::is_none));
        let real: Vec<u32> = levels.iter().flatten().flatten().copied().collect();
        prop_assert_eq!(real, tree.traverse(Traversal::LevelOrder));
    }

    #[test]
    fn prop_pivot_strategies_keep_values(values in vec(0u32..100, 0..64)) {
        let expected = sorted(values.clone());
        for tree in [build_bst(values.clone(), &mut FirstPivot), build_bst(values.clone(), &mut MiddlePivot)] {
            prop_assert_eq!(tree.traverse(Traversal::InOrder), expected.clone());
        }
    }
}
