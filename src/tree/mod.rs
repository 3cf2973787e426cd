/// The owned, mutable binary-tree structure the traversal algorithms read.
pub mod model;

/// Step-sequence computation for tree traversals.
pub mod traversal;

pub use model::{TreeModel, TreeNode};
pub use traversal::{compute_tree_steps, inorder, level_order, postorder, preorder};
