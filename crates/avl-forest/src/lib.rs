//! Arena-based AVL tree.
//!
//! An ordered key-value map with O(log n) insert, remove and lookup,
//! balanced by explicit rotations. Instead of raw pointers, all node links
//! are `Option<u32>` indices into a tree-owned `Vec` arena, and the
//! balancing primitives are plain functions over that arena so they can be
//! driven and inspected step by step.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits |
//! [`util`] | plain BST helpers: descent, stepping, structural `swap`, slot reclamation |
//! [`avl`] | [`AvlNode`], rotations, `insert_fix` / `remove_fix`, [`AvlTree`] |
//! [`equal_paths`] | leaf-depth check for plain binary trees |
//! [`error`] | [`AvlError`] reported by tree validation |
//!
//! # Example
//!
//! ```
//! use avl_forest::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert(10, "a");
//! tree.insert(20, "b");
//! tree.insert(30, "c");
//!
//! let root = tree.root_index().unwrap();
//! assert_eq!(tree.key(root), &20);
//! assert_eq!(tree.insert(20, "B"), Some("b"));
//! assert_eq!(tree.remove(&10), Some("a"));
//! tree.assert_valid().unwrap();
//! ```

pub mod avl;
pub mod equal_paths;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlNode, AvlNodeLike, AvlTree};
pub use equal_paths::{is_balanced_depth, BinaryNode};
pub use error::{AvlError, ChildSide};
pub use types::{KvNode, Node};
pub use util::InsertionPoint;
