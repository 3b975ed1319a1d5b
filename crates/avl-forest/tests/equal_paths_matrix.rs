use avl_forest::{is_balanced_depth, BinaryNode};

fn leaf() -> BinaryNode {
    BinaryNode::leaf()
}

#[test]
fn empty_tree_is_balanced_matrix() {
    assert!(is_balanced_depth(None));
}

#[test]
fn single_node_is_balanced_matrix() {
    assert!(is_balanced_depth(Some(&leaf())));
}

#[test]
fn all_leaves_at_depth_two_matrix() {
    let full = BinaryNode::with_children(
        BinaryNode::with_children(leaf(), leaf()),
        BinaryNode::with_children(leaf(), leaf()),
    );
    assert!(is_balanced_depth(Some(&full)));

    // Missing siblings do not matter as long as the leaves line up.
    let sparse = BinaryNode::with_children(
        BinaryNode::with_right(leaf()),
        BinaryNode::with_left(leaf()),
    );
    assert!(is_balanced_depth(Some(&sparse)));
}

#[test]
fn chain_has_a_single_leaf_matrix() {
    let chain = BinaryNode::with_left(BinaryNode::with_right(BinaryNode::with_left(leaf())));
    assert!(is_balanced_depth(Some(&chain)));
}

#[test]
fn leaves_at_depth_one_and_three_matrix() {
    let tree = BinaryNode::with_children(
        leaf(),
        BinaryNode::with_right(BinaryNode::with_left(leaf())),
    );
    assert!(!is_balanced_depth(Some(&tree)));
}

#[test]
fn leaves_at_depth_one_and_two_matrix() {
    let tree = BinaryNode::with_children(BinaryNode::with_children(leaf(), leaf()), leaf());
    assert!(!is_balanced_depth(Some(&tree)));
}
