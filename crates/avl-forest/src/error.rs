//! Invariant violations reported by tree validation.

use thiserror::Error;

/// Which child link of a node a check looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSide {
    Left,
    Right,
}

impl std::fmt::Display for ChildSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChildSide::Left => f.write_str("left"),
            ChildSide::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    #[error("root node {root} has a parent link")]
    RootHasParent { root: u32 },
    #[error("{side} child of node {node} does not link back to it")]
    BrokenParentLink { node: u32, side: ChildSide },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i64, actual: i8 },
    #[error("AVL balance violated at node {node}: bf={bf}")]
    Unbalanced { node: u32, bf: i8 },
    #[error("node order violated between nodes {prev} and {next}")]
    OrderViolated { prev: u32, next: u32 },
    #[error("tree holds {actual} nodes but length is {expected}")]
    LenMismatch { expected: usize, actual: usize },
}
