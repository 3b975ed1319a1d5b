//! Leaf-depth check for plain binary trees.

/// A plain binary tree node with owned child links and no payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryNode {
    pub left: Option<Box<BinaryNode>>,
    pub right: Option<Box<BinaryNode>>,
}

impl BinaryNode {
    pub fn leaf() -> Self {
        Self::default()
    }

    pub fn with_left(left: BinaryNode) -> Self {
        Self {
            left: Some(Box::new(left)),
            right: None,
        }
    }

    pub fn with_right(right: BinaryNode) -> Self {
        Self {
            left: None,
            right: Some(Box::new(right)),
        }
    }

    pub fn with_children(left: BinaryNode, right: BinaryNode) -> Self {
        Self {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Records the shallowest and deepest leaf depth seen under `node`.
fn leaf_depth_range(node: &BinaryNode, depth: usize, range: &mut Option<(usize, usize)>) {
    if node.is_leaf() {
        *range = Some(match *range {
            None => (depth, depth),
            Some((min, max)) => (min.min(depth), max.max(depth)),
        });
        return;
    }
    for child in [&node.left, &node.right].into_iter().flatten() {
        leaf_depth_range(child, depth + 1, range);
    }
}

/// Returns `true` when every leaf under `root` sits at the same depth.
///
/// An empty tree trivially qualifies.
///
/// ```
/// use avl_forest::{is_balanced_depth, BinaryNode};
///
/// let tree = BinaryNode::with_children(BinaryNode::leaf(), BinaryNode::leaf());
/// assert!(is_balanced_depth(Some(&tree)));
///
/// let lopsided = BinaryNode::with_children(BinaryNode::with_left(BinaryNode::leaf()), BinaryNode::leaf());
/// assert!(!is_balanced_depth(Some(&lopsided)));
/// ```
pub fn is_balanced_depth(root: Option<&BinaryNode>) -> bool {
    let Some(root) = root else {
        return true;
    };
    let mut range = None;
    leaf_depth_range(root, 0, &mut range);
    matches!(range, Some((min, max)) if min == max)
}
