/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! An ordered map implemented as a top-down splay tree in safe rust.
//!
//! Every access that looks a key up by splaying ([`SplayTree::find`],
//! [`SplayTree::insert`], [`SplayTree::remove`], ...) restructures the tree
//! so that the touched node ends up at the root. Search, insertion,
//! deletion, split and merge are amortized O(log n); a single operation
//! can still cost O(n).
//!
//! Keys are ordered by an injected [`Compare`] implementation. The
//! default, [`Ascending`], orders any `PartialOrd` key.
//!
//! ```
//! use splay_map::SplayTree;
//!
//! let mut tree = SplayTree::new();
//! tree.insert(3, "c");
//! tree.insert(1, "a");
//! tree.insert(2, "b");
//! assert_eq!(tree.find(&2).map(|n| *n.value()), Some("b"));
//! assert_eq!(tree.root().map(|n| *n.key()), Some(2));
//! assert_eq!(tree.keys(), vec![&1, &2, &3]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bulk;
mod print;
mod splay;
mod traverse;


pub use compare::Compare;
pub use traverse::Iter;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

use splay::Link;

/// A tree node: a key, its payload and two owned children.
pub struct Node<K, V> {
    c: [Option<Box<Node<K, V>>>; 2],
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Node<K, V> {
        Node {
            c: [None, None],
            key,
            value,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn left(&self) -> Option<&Node<K, V>> {
        self.c[0].as_deref()
    }
    pub fn right(&self) -> Option<&Node<K, V>> {
        self.c[1].as_deref()
    }

    #[allow(clippy::boxed_local)]
    fn into_entry(self: Box<Self>) -> (K, V) {
        let node = *self;
        (node.key, node.value)
    }
}

/// Ascending three-way order over `PartialOrd` keys.
///
/// Pairs that are not comparable, such as a NaN against anything, compare
/// as equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ascending;

impl<K: PartialOrd + ?Sized> Compare<K> for Ascending {
    fn compare(&self, l: &K, r: &K) -> Ordering {
        l.partial_cmp(r).unwrap_or(Ordering::Equal)
    }
}

/// Drops a subtree without recursing, since a splay tree may be a path.
fn free_link<K, V>(root: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.c[0].take());
        stack.extend(node.c[1].take());
    }
}

/// A self-adjusting binary search tree mapping `K` to `V`, ordered by `C`.
///
/// Duplicate keys are allowed through [`SplayTree::insert`];
/// [`SplayTree::add`] keeps keys unique. The tree has no interior
/// synchronization, and even lookups restructure it, so every access
/// that splays takes `&mut self`.
pub struct SplayTree<K, V = (), C = Ascending> {
    root: Link<K, V>,
    size: usize,
    cmp: C,
}

impl<K: PartialOrd, V> SplayTree<K, V> {
    pub fn new() -> SplayTree<K, V> {
        SplayTree::with_comparator(Ascending)
    }
}

impl<K: PartialOrd, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Drop for SplayTree<K, V, C> {
    fn drop(&mut self) {
        free_link(self.root.take());
    }
}

impl<K, V, C> SplayTree<K, V, C> {
    pub fn len(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes every node.
    pub fn clear(&mut self) -> &mut Self {
        tracing::trace!(size = self.size, "clear");
        free_link(self.root.take());
        self.size = 0;
        self
    }
}

impl<K, V, C: Compare<K>> SplayTree<K, V, C> {
    pub fn with_comparator(cmp: C) -> SplayTree<K, V, C> {
        SplayTree {
            root: None,
            size: 0,
            cmp,
        }
    }

    // Splays the root on `key`. Returns whether the new root compares
    // equal to `key`.
    fn splay(&mut self, key: &K) -> bool {
        let root = match self.root.take() {
            Some(root) => root,
            None => return false,
        };
        let cmp = &self.cmp;
        let root = splay::splay_by(root, |k| cmp.compare(key, k));
        let found = cmp.compares_eq(key, &root.key);
        self.root = Some(root);
        found
    }

    /// Inserts a new node even if an equal key is already present. The new
    /// node becomes the root.
    pub fn insert(&mut self, key: K, value: V) {
        let cmp = &self.cmp;
        let node = Box::new(Node::new(key, value));
        let root = splay::insert_node(self.root.take(), node, |l, r| {
            cmp.compare(l, r)
        });
        self.root = Some(root);
        self.size += 1;
    }

    /// Inserts only if no equal key is present. Returns whether a node was
    /// created. Either way the tree is splayed on `key`.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let mut t = match self.root.take() {
            Some(root) => root,
            None => {
                self.root = Some(Box::new(Node::new(key, value)));
                self.size += 1;
                return true;
            }
        };
        let cmp = &self.cmp;
        t = splay::splay_by(t, |k| cmp.compare(&key, k));
        let side = match cmp.compare(&key, &t.key) {
            Ordering::Equal => {
                self.root = Some(t);
                return false;
            }
            res => res == Ordering::Greater,
        };
        let mut node = Box::new(Node::new(key, value));
        node.c[side as usize] = t.c[side as usize].take();
        node.c[!side as usize] = Some(t);
        self.root = Some(node);
        self.size += 1;
        true
    }

    /// Removes a node whose key compares equal to `key`.
    ///
    /// The tree is splayed on `key` first, so its shape changes even when
    /// nothing is removed.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        if !self.splay(key) {
            return None;
        }
        let root = self.root.take()?;
        Some(self.take_root(root))
    }

    fn take_root(&mut self, root: Box<Node<K, V>>) -> (K, V) {
        let (rest, node) = splay::detach_root(root);
        self.root = rest;
        self.size -= 1;
        node.into_entry()
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop(&mut self) -> Option<(K, V)> {
        let root = splay::splay_min(self.root.take()?);
        Some(self.take_root(root))
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_max(&mut self) -> Option<(K, V)> {
        let root = splay::splay_max(self.root.take()?);
        Some(self.take_root(root))
    }

    /// Splits the tree into the keys ordering before `key` and the keys
    /// ordering after it. If the splay surfaces a node equal to `key`, that
    /// node is dropped and belongs to neither half.
    ///
    /// Sizing the halves walks the left one, so this is O(n) rather than
    /// amortized O(log n). [`SplayTree::update`] splits internally without
    /// sizing the halves and stays amortized O(log n).
    pub fn split(mut self, key: &K) -> (Self, Self)
    where
        C: Clone,
    {
        let cmp = &self.cmp;
        let (left, right, matched) =
            splay::split_link(self.root.take(), key, |l, r| cmp.compare(l, r));
        let left_len = traverse::Walk::new(left.as_deref()).count();
        let right_len = self.size - left_len - matched.is_some() as usize;
        tracing::debug!(left_len, right_len, matched = matched.is_some(), "split");
        let right = SplayTree {
            root: right,
            size: right_len,
            cmp: self.cmp.clone(),
        };
        self.root = left;
        self.size = left_len;
        (self, right)
    }

    /// Joins two trees. The result keeps `left`'s comparator.
    ///
    /// Every key in `left` must order before every key in `right`. This is
    /// not checked; violating it leaves a tree whose in-order sequence is
    /// not sorted, and later lookups on it give unspecified results.
    pub fn merge(mut left: Self, mut right: Self) -> Self {
        tracing::debug!(left_len = left.size, right_len = right.size, "merge");
        left.root = splay::merge_links(left.root.take(), right.root.take());
        left.size += right.size;
        left
    }

    /// Replaces the entry for `key` with `(new_key, new_value)`, keeping
    /// the tree ordered. Returns the replaced entry; if there was none the
    /// new entry is simply added.
    pub fn update(&mut self, key: &K, new_key: K, new_value: V) -> Option<(K, V)> {
        let cmp = &self.cmp;
        let (mut left, mut right, matched) =
            splay::split_link(self.root.take(), key, |l, r| cmp.compare(l, r));
        let node = Box::new(Node::new(new_key, new_value));
        if cmp.compares_lt(key, &node.key) {
            right = Some(splay::insert_node(right, node, |l, r| cmp.compare(l, r)));
        } else {
            left = Some(splay::insert_node(left, node, |l, r| cmp.compare(l, r)));
        }
        self.root = splay::merge_links(left, right);
        tracing::trace!(replaced = matched.is_some(), "update");
        match matched {
            Some(node) => Some(node.into_entry()),
            None => {
                self.size += 1;
                None
            }
        }
    }

    /// Checks the ordering and size invariants, panicking on a violation.
    /// Only for DEBUG.
    #[doc(hidden)]
    pub fn check_sanity(&self) {
        let mut count = 0;
        let mut prev: Option<&K> = None;
        for node in traverse::Walk::new(self.root.as_deref()) {
            if let Some(prev) = prev {
                assert!(
                    !self.cmp.compares_gt(prev, &node.key),
                    "in-order keys out of order"
                );
            }
            prev = Some(&node.key);
            count += 1;
        }
        assert_eq!(count, self.size, "size does not match node count");
    }
}

impl<K: PartialOrd, V> FromIterator<(K, V)> for SplayTree<K, V> {
    /// Collects with a sorting bulk load.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        tree.load_pairs(iter.into_iter().collect(), true);
        tree
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for SplayTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
