/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Batch construction. The tree is flattened into a sorted run of
//! detached nodes, merged with the incoming run, and rebuilt with
//! near-minimal height.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

use compare::Compare;

use crate::splay::Link;
use crate::{Node, SplayTree};

/// Nodes in key order with both child slots empty. Only lives for the
/// duration of a bulk operation; the tree shape is rebuilt from it.
pub(crate) type Run<K, V> = Vec<Box<Node<K, V>>>;

/// Consumes the tree shape into a sorted run.
pub(crate) fn linearize<K, V>(root: Link<K, V>) -> Run<K, V> {
    let mut run = Vec::new();
    let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
    let mut next = root;
    loop {
        while let Some(mut node) = next {
            next = node.c[0].take();
            stack.push(node);
        }
        let mut node = match stack.pop() {
            Some(node) => node,
            None => break,
        };
        next = node.c[1].take();
        run.push(node);
    }
    run
}

/// Two-way merge of sorted runs. On equal keys the node from `b` goes
/// first.
pub(crate) fn merge_sorted<K, V, C: Compare<K>>(
    a: Run<K, V>,
    b: Run<K, V>,
    cmp: &C,
) -> Run<K, V> {
    let mut run = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    loop {
        let from_a = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => cmp.compares_lt(&x.key, &y.key),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        run.extend(if from_a { a.next() } else { b.next() });
    }
    run
}

/// Builds a tree of height ceil(log2(n + 1)) from a sorted run in O(n).
pub(crate) fn rebuild_balanced<K, V>(run: Run<K, V>) -> Link<K, V> {
    let len = run.len();
    build(&mut run.into_iter(), 0, len)
}

// Takes exactly `end - start` nodes off the front of `head`: the left
// subtree first, then the root, then the right subtree.
fn build<K, V, I>(head: &mut I, start: usize, end: usize) -> Link<K, V>
where
    I: Iterator<Item = Box<Node<K, V>>>,
{
    if end <= start {
        return None;
    }
    let middle = start + (end - start) / 2;
    let left = build(head, start, middle);
    let mut root = head.next()?;
    root.c[0] = left;
    root.c[1] = build(head, middle + 1, end);
    Some(root)
}

/// Quicksort with a Hoare partition around the middle element. Runs of
/// equal keys stop both scans, so duplicates do not degrade it.
pub(crate) fn sort_pairs<K, V, C: Compare<K>>(items: &mut [(K, V)], cmp: &C) {
    if items.len() < 2 {
        return;
    }
    let mut pivot = (items.len() - 1) / 2;
    let mut i = 0;
    let mut j = items.len() - 1;
    let split = loop {
        while cmp.compare(&items[i].0, &items[pivot].0) == Ordering::Less {
            i += 1;
        }
        while cmp.compare(&items[j].0, &items[pivot].0) == Ordering::Greater {
            j -= 1;
        }
        if i >= j {
            break j;
        }
        items.swap(i, j);
        // Follow the pivot value if it was one of the swapped slots.
        if pivot == i {
            pivot = j;
        } else if pivot == j {
            pivot = i;
        }
        i += 1;
        j -= 1;
    };
    let (left, right) = items.split_at_mut(split + 1);
    sort_pairs(left, cmp);
    sort_pairs(right, cmp);
}

impl<K, V, C: Compare<K>> SplayTree<K, V, C> {
    /// Bulk-loads `keys`, pairing the i-th key with the i-th value; keys
    /// without a value get `V::default()`.
    ///
    /// See [`SplayTree::load_pairs`].
    pub fn load(&mut self, keys: Vec<K>, values: Vec<V>, presort: bool) -> &mut Self
    where
        V: Default,
    {
        let mut values = values.into_iter();
        let pairs = keys
            .into_iter()
            .map(|key| (key, values.next().unwrap_or_default()))
            .collect();
        self.load_pairs(pairs, presort)
    }

    /// Bulk-loads `pairs` and rebuilds the whole tree balanced.
    ///
    /// Unless `presort` is set the pairs must already be in order. Loading
    /// into a non-empty tree merges the incoming run with the existing
    /// entries, so the result holds both, duplicates included.
    pub fn load_pairs(&mut self, mut pairs: Vec<(K, V)>, presort: bool) -> &mut Self {
        if presort {
            sort_pairs(&mut pairs, &self.cmp);
        }
        let incoming = pairs.len();
        let run: Run<K, V> = pairs
            .into_iter()
            .map(|(key, value)| Box::new(Node::new(key, value)))
            .collect();
        let run = match self.root.take() {
            None => run,
            Some(root) => merge_sorted(linearize(Some(root)), run, &self.cmp),
        };
        tracing::debug!(existing = self.size, incoming, presort, "bulk load");
        self.size += incoming;
        self.root = rebuild_balanced(run);
        self
    }

    /// Consumes the tree into its entries, in order.
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        linearize(self.root.take())
            .into_iter()
            .map(Node::into_entry)
            .collect()
    }
}
