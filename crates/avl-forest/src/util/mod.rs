//! Plain binary-search-tree helpers over an index arena.
//!
//! These functions know nothing about balancing. They cover the structural
//! side of an ordered tree: descent, in-order stepping, linking a new leaf,
//! swapping two nodes' positions and reclaiming arena slots. Key-based
//! helpers take a `key_of` accessor closure so any node layout can be used.

pub mod swap;

use std::cmp::Ordering;

use crate::types::Node;

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Re-points whichever child link of `parent` holds `old` at `new`.
#[inline]
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else {
        set_r(arena, parent, new);
    }
}

/// Where a key lands in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertionPoint {
    /// The tree has no root.
    Empty,
    /// A node with an equal key already exists.
    Occupied(u32),
    /// The key belongs in the empty left slot of this node.
    Left(u32),
    /// The key belongs in the empty right slot of this node.
    Right(u32),
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
///
/// For a node with a left subtree this is the rightmost node of that
/// subtree, which is the case removal relies on.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Height of the subtree under `root`; an empty tree has height 0.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i))),
    }
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, key_of(&arena[i as usize])) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        match comparator(key_of(&arena[i as usize]), key) {
            Ordering::Equal => return Some(i),
            Ordering::Greater => curr = get_l(arena, i),
            Ordering::Less => {
                result = Some(i);
                curr = get_r(arena, i);
            }
        }
    }
    result
}

/// Standard descent for `key`: either the node already holding it or the
/// empty slot a new node would occupy.
pub fn insertion_search<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> InsertionPoint
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut curr) = root else {
        return InsertionPoint::Empty;
    };
    loop {
        match comparator(key, key_of(&arena[curr as usize])) {
            Ordering::Equal => return InsertionPoint::Occupied(curr),
            Ordering::Less => match get_l(arena, curr) {
                Some(l) => curr = l,
                None => return InsertionPoint::Left(curr),
            },
            Ordering::Greater => match get_r(arena, curr) {
                Some(r) => curr = r,
                None => return InsertionPoint::Right(curr),
            },
        }
    }
}

/// Attaches the detached `node` as the left child of `parent`, whose left
/// slot must be empty.
pub fn link_left<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    debug_assert!(get_l(arena, parent).is_none(), "left slot is occupied");
    set_l(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Attaches the detached `node` as the right child of `parent`, whose right
/// slot must be empty.
pub fn link_right<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    debug_assert!(get_r(arena, parent).is_none(), "right slot is occupied");
    set_r(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Takes the detached node `idx` out of the arena and reclaims its slot.
///
/// The last node of the arena moves into `idx` and every link that pointed
/// at it is rewritten. Returns the (possibly relocated) root together with
/// the removed node.
pub fn swap_remove<N: Node>(arena: &mut Vec<N>, root: Option<u32>, idx: u32) -> (Option<u32>, N) {
    let last = (arena.len() - 1) as u32;
    let removed = arena.swap_remove(idx as usize);
    if idx == last {
        return (root, removed);
    }

    if let Some(p) = get_p(arena, idx) {
        replace_child(arena, p, last, Some(idx));
    }
    if let Some(l) = get_l(arena, idx) {
        set_p(arena, l, Some(idx));
    }
    if let Some(r) = get_r(arena, idx) {
        set_p(arena, r, Some(idx));
    }

    let root = if root == Some(last) { Some(idx) } else { root };
    (root, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct N {
        key: i32,
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
    }

    impl Node for N {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    fn key_of(n: &N) -> &i32 {
        &n.key
    }

    /// Builds an unbalanced BST by plain leaf insertion.
    fn build(keys: &[i32]) -> (Vec<N>, Option<u32>) {
        let mut arena: Vec<N> = Vec::new();
        let mut root = None;
        for &key in keys {
            arena.push(N {
                key,
                ..Default::default()
            });
            let idx = (arena.len() - 1) as u32;
            match insertion_search(&arena, root, &key, key_of, i32::cmp) {
                InsertionPoint::Empty => root = Some(idx),
                InsertionPoint::Left(p) => link_left(&mut arena, idx, p),
                InsertionPoint::Right(p) => link_right(&mut arena, idx, p),
                InsertionPoint::Occupied(_) => panic!("duplicate key {key}"),
            }
        }
        (arena, root)
    }

    fn in_order(arena: &[N], root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i as usize].key);
            curr = next(arena, i);
        }
        out
    }

    fn check_links(arena: &[N], root: Option<u32>) {
        if let Some(root) = root {
            assert_eq!(arena[root as usize].p, None);
        }
        fn walk(arena: &[N], node: u32) {
            for c in [arena[node as usize].l, arena[node as usize].r].into_iter().flatten() {
                assert_eq!(arena[c as usize].p, Some(node));
                walk(arena, c);
            }
        }
        if let Some(root) = root {
            walk(arena, root);
        }
    }

    #[test]
    fn stepping_visits_keys_in_order() {
        let (arena, root) = build(&[50, 30, 70, 20, 40, 60, 80, 35]);
        assert_eq!(in_order(&arena, root), vec![20, 30, 35, 40, 50, 60, 70, 80]);

        let mut back = Vec::new();
        let mut curr = last(&arena, root);
        while let Some(i) = curr {
            back.push(arena[i as usize].key);
            curr = prev(&arena, i);
        }
        assert_eq!(back, vec![80, 70, 60, 50, 40, 35, 30, 20]);
        assert_eq!(size(&arena, root), 8);
        assert_eq!(height(&arena, root), 4);
    }

    #[test]
    fn predecessor_of_node_with_left_subtree_is_rightmost_of_it() {
        let (arena, root) = build(&[50, 30, 70, 20, 40, 35]);
        let n50 = find(&arena, root, &50, key_of, i32::cmp).unwrap();
        let n40 = find(&arena, root, &40, key_of, i32::cmp).unwrap();
        assert_eq!(prev(&arena, n50), Some(n40));
    }

    #[test]
    fn insertion_search_reports_slot_or_existing() {
        let (arena, root) = build(&[10, 5, 15]);
        let n5 = find(&arena, root, &5, key_of, i32::cmp).unwrap();
        let n15 = find(&arena, root, &15, key_of, i32::cmp).unwrap();
        assert_eq!(insertion_search(&arena, root, &3, key_of, i32::cmp), InsertionPoint::Left(n5));
        assert_eq!(insertion_search(&arena, root, &7, key_of, i32::cmp), InsertionPoint::Right(n5));
        assert_eq!(insertion_search(&arena, root, &20, key_of, i32::cmp), InsertionPoint::Right(n15));
        assert_eq!(insertion_search(&arena, root, &10, key_of, i32::cmp), InsertionPoint::Occupied(0));
        assert_eq!(insertion_search::<N, i32, _, _>(&[], None, &1, key_of, i32::cmp), InsertionPoint::Empty);
    }

    #[test]
    fn find_or_next_lower_matrix() {
        let (arena, root) = build(&[10, 5, 15]);
        let lower = |k: i32| find_or_next_lower(&arena, root, &k, key_of, i32::cmp).map(|i| arena[i as usize].key);
        assert_eq!(lower(4), None);
        assert_eq!(lower(5), Some(5));
        assert_eq!(lower(14), Some(10));
        assert_eq!(lower(99), Some(15));
    }

    #[test]
    fn swap_non_adjacent_nodes() {
        let (mut arena, root) = build(&[50, 30, 70, 20, 40, 60, 80]);
        let n30 = find(&arena, root, &30, key_of, i32::cmp).unwrap();
        let n80 = find(&arena, root, &80, key_of, i32::cmp).unwrap();
        let root = swap(&mut arena, root, n30, n80);
        check_links(&arena, root);
        assert_eq!(in_order(&arena, root), vec![20, 80, 40, 50, 60, 70, 30]);
    }

    #[test]
    fn swap_parent_and_child() {
        let (mut arena, root) = build(&[50, 30, 70, 20, 40]);
        let n50 = find(&arena, root, &50, key_of, i32::cmp).unwrap();
        let n30 = find(&arena, root, &30, key_of, i32::cmp).unwrap();
        let root = swap(&mut arena, root, n50, n30);
        assert_eq!(root, Some(n30));
        check_links(&arena, root);
        assert_eq!(in_order(&arena, root), vec![20, 50, 40, 30, 70]);

        // Swapping back restores the original shape.
        let root = swap(&mut arena, root, n30, n50);
        assert_eq!(root, Some(n50));
        check_links(&arena, root);
        assert_eq!(in_order(&arena, root), vec![20, 30, 40, 50, 70]);
    }

    #[test]
    fn swap_siblings() {
        let (mut arena, root) = build(&[50, 30, 70]);
        let n30 = find(&arena, root, &30, key_of, i32::cmp).unwrap();
        let n70 = find(&arena, root, &70, key_of, i32::cmp).unwrap();
        let root = swap(&mut arena, root, n70, n30);
        check_links(&arena, root);
        assert_eq!(in_order(&arena, root), vec![70, 50, 30]);
    }

    #[test]
    fn swap_remove_relocates_last_node() {
        let (mut arena, root) = build(&[50, 30, 70, 20]);
        // Detach leaf 70 (index 2) by hand, then reclaim its slot; 20 (index 3) moves in.
        set_r(&mut arena, 0, None);
        set_p(&mut arena, 2, None);
        let (root, removed) = swap_remove(&mut arena, root, 2);
        assert_eq!(removed.key, 70);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[2].key, 20);
        check_links(&arena, root);
        assert_eq!(in_order(&arena, root), vec![20, 30, 50]);
    }

    #[test]
    fn swap_remove_relocated_root() {
        let mut arena = vec![
            N { key: 1, ..Default::default() },
            N { key: 2, ..Default::default() },
        ];
        // Index 0 is a detached leftover; index 1 is the sole root.
        let (root, removed) = swap_remove(&mut arena, Some(1), 0);
        assert_eq!(removed.key, 1);
        assert_eq!(root, Some(0));
        assert_eq!(arena[0].key, 2);
    }
}
