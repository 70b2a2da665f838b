use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::BinaryTree;

pub trait OutlineRender {
    fn to_outline(&self, placeholder: &str) -> Tree<String>;
}

impl OutlineRender for BinaryTree {
    /// Box-drawing outline, left child first. A missing sibling of a present child
    /// shows as `placeholder`.
    #[instrument(level = "debug", skip(self))]
    fn to_outline(&self, placeholder: &str) -> Tree<String> {
        fn build(tree: &BinaryTree, node_idx: Index, placeholder: &str) -> Tree<String> {
            let Some(node) = tree.get_node(node_idx) else {
                return Tree::new(placeholder.to_string());
            };
            let mut outline = Tree::new(node.value.to_string());
            if node.is_leaf() {
                return outline;
            }
            for child in [node.left, node.right] {
                match child {
                    Some(child_idx) => outline.push(build(tree, child_idx, placeholder)),
                    None => outline.push(Tree::new(placeholder.to_string())),
                };
            }
            outline
        }

        match self.root() {
            Some(root_idx) => build(self, root_idx, placeholder),
            None => Tree::new(placeholder.to_string()),
        }
    }
}
