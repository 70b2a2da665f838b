//! Domain layer: binary trees, their construction, traversal and rendering
//!
//! This layer is independent of external concerns (no config loading, no CLI).

pub mod arena;
pub mod builder;
pub mod error;
pub mod outline;
pub mod printer;
pub mod traversal;

pub use arena::{BinaryNode, BinaryTree, Side, Value};
pub use builder::{build_bst, FirstPivot, MiddlePivot, PivotPicker, RandomPivot, TreeBuilder};
pub use error::DomainError;
pub use outline::OutlineRender;
pub use printer::{level_slots, walk_levels, LevelPrinter, PrintStyle, SlotRun};
pub use traversal::{check_non_decreasing, queue_capacity, Traversal};
