//! AVL tree: balance-augmented nodes, rotation/fixup primitives and the
//! owning [`AvlTree`] map.

pub mod tree;
pub mod types;
pub mod util;

pub use tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_arena_len, assert_avl_tree, insert_fix, insert_left, insert_right, node_swap, print, remove, remove_fix,
    rotate_left, rotate_right,
};
