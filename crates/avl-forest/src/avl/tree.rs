use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::error::AvlError;
use crate::types::KvNode;
use crate::util::{self, InsertionPoint};

use super::types::AvlNode;
use super::util::{assert_arena_len, assert_avl_tree, insert_left, insert_right, print, remove};

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Ordered map kept height-balanced by AVL rotations.
///
/// Nodes live in an arena owned by the tree and are addressed by `u32`
/// indices. Indices stay valid across inserts. A `remove` reclaims the
/// removed node's slot by moving the last arena node into it, so any index
/// obtained before a `remove` must be looked up again.
///
/// Indices are `u32`, which caps a tree at `u32::MAX + 1` nodes.
pub struct AvlTree<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K, V> AvlTree<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    /// Creates an empty tree ordered by `K: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_comparator::<K>)
    }
}

impl<K, V> Default for AvlTree<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// Creates an empty tree ordered by `comparator`, which must be a
    /// strict total order over `K`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        let idx = self.arena.len();
        debug_assert!(idx <= u32::MAX as usize, "arena index overflows u32");
        self.arena.push(AvlNode::new(key, value));
        idx as u32
    }

    /// Inserts `key` with `value`.
    ///
    /// An existing key has its value overwritten in place and the previous
    /// value is returned; the shape and balance factors are left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let point = util::insertion_search(
            &self.arena,
            self.root,
            &key,
            |n| n.key(),
            |a, b| (self.comparator)(a, b),
        );
        match point {
            InsertionPoint::Occupied(i) => Some(self.arena[i as usize].set_value(value)),
            InsertionPoint::Empty => {
                let idx = self.push_node(key, value);
                self.root = Some(idx);
                None
            }
            InsertionPoint::Left(p) => {
                let idx = self.push_node(key, value);
                self.root = insert_left(&mut self.arena, self.root, idx, p);
                trace!(target: "avl_forest::insert", node = idx, parent = p, "inserted left");
                None
            }
            InsertionPoint::Right(p) => {
                let idx = self.push_node(key, value);
                self.root = insert_right(&mut self.arena, self.root, idx, p);
                trace!(target: "avl_forest::insert", node = idx, parent = p, "inserted right");
                None
            }
        }
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        let root = remove(&mut self.arena, self.root, node);
        let (root, removed) = util::swap_remove(&mut self.arena, root, node);
        self.root = root;
        Some(removed.into_entry())
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Arena index of the node holding `key`.
    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(
            &self.arena,
            self.root,
            key,
            |n| n.key(),
            |a, b| (self.comparator)(a, b),
        )
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.value(i))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(self.value_mut(idx))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Node holding `key`, or the one with the greatest key below it.
    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        util::find_or_next_lower(
            &self.arena,
            self.root,
            key,
            |n| n.key(),
            |a, b| (self.comparator)(a, b),
        )
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path counted in nodes; 0 for an empty tree.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    /// Arena index of the root node.
    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    /// Index of the node with the smallest key.
    pub fn first(&self) -> Option<u32> {
        util::first(&self.arena, self.root)
    }

    /// Index of the node with the largest key.
    pub fn last(&self) -> Option<u32> {
        util::last(&self.arena, self.root)
    }

    /// In-order successor of node `curr`.
    ///
    /// ```
    /// use avl_forest::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for k in [3, 1, 2] {
    ///     tree.insert(k, ());
    /// }
    /// let mut keys = Vec::new();
    /// let mut curr = tree.first();
    /// while let Some(i) = curr {
    ///     keys.push(*tree.key(i));
    ///     curr = tree.next(i);
    /// }
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn next(&self, curr: u32) -> Option<u32> {
        util::next(&self.arena, curr)
    }

    /// In-order predecessor of node `curr`.
    pub fn prev(&self, curr: u32) -> Option<u32> {
        util::prev(&self.arena, curr)
    }

    /// Smallest entry.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.first().map(|i| self.entry(i))
    }

    pub fn max(&self) -> Option<(&K, &V)> {
        self.last().map(|i| self.entry(i))
    }

    /// Node at arena index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        self.node(idx).key()
    }

    pub fn value(&self, idx: u32) -> &V {
        self.node(idx).value()
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        self.arena[idx as usize].value_mut()
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        (self.key(idx), self.value(idx))
    }

    /// Visits every node in key order.
    pub fn for_each<G: FnMut(u32, &AvlNode<K, V>)>(&self, mut f: G) {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, &self.arena[i as usize]);
            curr = self.next(i);
        }
    }

    /// Checks every structural invariant: parent links, stored balance
    /// factors, `|bf| <= 1`, key order and that no arena slot is orphaned.
    pub fn assert_valid(&self) -> Result<(), AvlError> {
        assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        assert_arena_len(&self.arena, self.root)
    }

    /// Multi-line dump of the tree with balance factors, for debugging.
    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        print(&self.arena, self.root, "")
    }
}
