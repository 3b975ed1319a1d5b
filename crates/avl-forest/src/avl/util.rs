use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::error::{AvlError, ChildSide};
use crate::util::{
    first, get_l, get_p, get_r, link_left, link_right, next, prev, replace_child, set_l, set_p,
    set_r, size, swap,
};
use crate::types::Node;

use super::types::AvlNodeLike;

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Promotes the right child `y` of `x` into `x`'s position.
///
/// `y`'s former left subtree becomes `x`'s right subtree. Only links are
/// touched; balance factors are left for the caller to set. No-op when `x`
/// has no right child. Returns the new root.
pub fn rotate_left<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let Some(y) = get_r(arena, x) else {
        return root;
    };
    let b = get_l(arena, y);
    let p = get_p(arena, x);

    set_p(arena, y, p);
    let root = match p {
        None => Some(y),
        Some(p) => {
            replace_child(arena, p, x, Some(y));
            root
        }
    };

    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));

    set_r(arena, x, b);
    if let Some(b) = b {
        set_p(arena, b, Some(x));
    }

    trace!(target: "avl_forest::rotate", pivot = x, promoted = y, "rotate left");
    root
}

/// Mirror of [`rotate_left`]: promotes the left child of `x`.
pub fn rotate_right<K, V, N>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let Some(y) = get_l(arena, x) else {
        return root;
    };
    let b = get_r(arena, y);
    let p = get_p(arena, x);

    set_p(arena, y, p);
    let root = match p {
        None => Some(y),
        Some(p) => {
            replace_child(arena, p, x, Some(y));
            root
        }
    };

    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));

    set_l(arena, x, b);
    if let Some(b) = b {
        set_p(arena, b, Some(x));
    }

    trace!(target: "avl_forest::rotate", pivot = x, promoted = y, "rotate right");
    root
}

/// Walks up from `parent` (whose subtree just grew through its child
/// `node`) adjusting balance factors until the height stops growing or a
/// rotation absorbs the growth. Returns the new root.
pub fn insert_fix<K, V, N>(arena: &mut [N], root: Option<u32>, parent: u32, node: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let Some(gp) = get_p(arena, parent) else {
        return root;
    };

    let parent_is_left = get_l(arena, gp) == Some(parent);
    // +1 when the left side of `gp` grew.
    let d: i8 = if parent_is_left { 1 } else { -1 };
    arena[gp as usize].update_bf(d);

    match bf(arena, gp) {
        0 => root,
        1 | -1 => insert_fix(arena, root, gp, parent),
        _ => {
            let node_is_left = get_l(arena, parent) == Some(node);
            if node_is_left == parent_is_left {
                let root = if parent_is_left {
                    rotate_right(arena, root, gp)
                } else {
                    rotate_left(arena, root, gp)
                };
                set_bf(arena, parent, 0);
                set_bf(arena, gp, 0);
                trace!(target: "avl_forest::insert", gp, parent, "single rotation");
                return root;
            }

            let nbf = bf(arena, node);
            let root = if parent_is_left {
                let root = rotate_left(arena, root, parent);
                rotate_right(arena, root, gp)
            } else {
                let root = rotate_right(arena, root, parent);
                rotate_left(arena, root, gp)
            };
            let (pbf, gbf) = match nbf {
                b if b == d => (0, -d),
                0 => (0, 0),
                _ => (d, 0),
            };
            set_bf(arena, parent, pbf);
            set_bf(arena, gp, gbf);
            set_bf(arena, node, 0);
            trace!(target: "avl_forest::insert", gp, parent, node, "double rotation");
            root
        }
    }
}

/// Attaches the detached node `n` as the left child of `p` and rebalances.
/// Returns the new root.
pub fn insert_left<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    link_left(arena, n, p);
    arena[p as usize].update_bf(1);
    if bf(arena, p) == 0 {
        root
    } else {
        insert_fix(arena, root, p, n)
    }
}

/// Attaches the detached node `n` as the right child of `p` and rebalances.
/// Returns the new root.
pub fn insert_right<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    link_right(arena, n, p);
    arena[p as usize].update_bf(-1);
    if bf(arena, p) == 0 {
        root
    } else {
        insert_fix(arena, root, p, n)
    }
}

/// Applies a subtree shrink to `node` and walks upward while the height
/// keeps decreasing.
///
/// `diff` is `-1` when the left subtree of `node` lost a level and `+1`
/// when the right one did. Returns the new root.
pub fn remove_fix<K, V, N>(arena: &mut [N], root: Option<u32>, node: u32, diff: i8) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let parent = get_p(arena, node);
    let next_diff: i8 = match parent {
        Some(p) if get_l(arena, p) == Some(node) => -1,
        _ => 1,
    };

    let nbf = bf(arena, node) + diff;
    if nbf.abs() <= 1 {
        set_bf(arena, node, nbf);
        return match parent {
            Some(p) if nbf == 0 => remove_fix(arena, root, p, next_diff),
            _ => root,
        };
    }

    // +1 when `node` is left-heavy.
    let s: i8 = nbf.signum();
    let heavy_left = s > 0;
    let c = if heavy_left {
        get_l(arena, node)
    } else {
        get_r(arena, node)
    }
    .expect("heavy side has a child");
    let cbf = bf(arena, c);

    let root = if cbf * s >= 0 {
        let root = if heavy_left {
            rotate_right(arena, root, node)
        } else {
            rotate_left(arena, root, node)
        };
        if cbf == 0 {
            set_bf(arena, node, s);
            set_bf(arena, c, -s);
            trace!(target: "avl_forest::remove", node, child = c, "single rotation, height kept");
            return root;
        }
        set_bf(arena, node, 0);
        set_bf(arena, c, 0);
        trace!(target: "avl_forest::remove", node, child = c, "single rotation");
        root
    } else {
        let g = if heavy_left {
            get_r(arena, c)
        } else {
            get_l(arena, c)
        }
        .expect("zig-zag grandchild exists");
        let gbf = bf(arena, g);
        let root = if heavy_left {
            let root = rotate_left(arena, root, c);
            rotate_right(arena, root, node)
        } else {
            let root = rotate_right(arena, root, c);
            rotate_left(arena, root, node)
        };
        let (node_bf, c_bf) = match gbf {
            b if b == s => (-s, 0),
            0 => (0, 0),
            _ => (0, s),
        };
        set_bf(arena, node, node_bf);
        set_bf(arena, c, c_bf);
        set_bf(arena, g, 0);
        trace!(target: "avl_forest::remove", node, child = c, grandchild = g, "double rotation");
        root
    };

    match parent {
        Some(p) => remove_fix(arena, root, p, next_diff),
        None => root,
    }
}

/// Swaps the tree positions of `n1` and `n2` together with their balance
/// factors, so each balance factor stays with the position it describes.
/// Returns the new root.
pub fn node_swap<K, V, N>(arena: &mut [N], root: Option<u32>, n1: u32, n2: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let root = swap(arena, root, n1, n2);
    let b1 = bf(arena, n1);
    let b2 = bf(arena, n2);
    set_bf(arena, n1, b2);
    set_bf(arena, n2, b1);
    root
}

/// Unlinks `n` from the tree and rebalances.
///
/// A node with two children first trades places with its in-order
/// predecessor so the splice always removes a node with at most one child.
/// `n` is left detached in the arena for the caller to reclaim. Returns the
/// new root.
pub fn remove<K, V, N>(arena: &mut [N], root: Option<u32>, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    if get_l(arena, n).is_some() && get_r(arena, n).is_some() {
        let pred = prev(arena, n).expect("node with a left subtree has a predecessor");
        root = node_swap(arena, root, n, pred);
    }

    let parent = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = child {
        set_p(arena, c, parent);
    }

    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    let Some(p) = parent else {
        trace!(target: "avl_forest::remove", node = n, "removed root");
        return child;
    };

    let diff = if get_l(arena, p) == Some(n) {
        set_l(arena, p, child);
        -1
    } else {
        set_r(arena, p, child);
        1
    };
    trace!(target: "avl_forest::remove", node = n, parent = p, diff, "spliced out");
    remove_fix(arena, root, p, diff)
}

/// Checks links and balance factors under `node`, returning its height.
fn validate_subtree<K, V, N>(arena: &[N], node: u32) -> Result<usize, AvlError>
where
    N: AvlNodeLike<K, V>,
{
    let l = get_l(arena, node);
    let r = get_r(arena, node);

    let mut lh = 0;
    if let Some(l) = l {
        if get_p(arena, l) != Some(node) {
            return Err(AvlError::BrokenParentLink {
                node,
                side: ChildSide::Left,
            });
        }
        lh = validate_subtree(arena, l)?;
    }
    let mut rh = 0;
    if let Some(r) = r {
        if get_p(arena, r) != Some(node) {
            return Err(AvlError::BrokenParentLink {
                node,
                side: ChildSide::Right,
            });
        }
        rh = validate_subtree(arena, r)?;
    }

    let expected = lh as i64 - rh as i64;
    let actual = bf(arena, node);
    if i64::from(actual) != expected {
        return Err(AvlError::BalanceMismatch {
            node,
            expected,
            actual,
        });
    }
    if !(-1..=1).contains(&actual) {
        return Err(AvlError::Unbalanced { node, bf: actual });
    }

    Ok(1 + lh.max(rh))
}

/// Verifies every AVL invariant of the tree under `root`: parent links,
/// stored balance factors against real heights, `|bf| <= 1` and strictly
/// increasing in-order keys.
pub fn assert_avl_tree<K, V, N, C>(arena: &[N], root: Option<u32>, comparator: &C) -> Result<(), AvlError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(AvlError::RootHasParent { root });
    }

    validate_subtree(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) != Ordering::Less {
                return Err(AvlError::OrderViolated { prev, next: i });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Checks that every node in `arena` is reachable from `root`, so no
/// removed node was left behind unreclaimed.
pub fn assert_arena_len<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), AvlError> {
    let actual = size(arena, root);
    if actual != arena.len() {
        return Err(AvlError::LenMismatch {
            expected: arena.len(),
            actual,
        });
    }
    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
