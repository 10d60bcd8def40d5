/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::ControlFlow;

use compare::Compare;

use crate::{Node, SplayTree};

/// In-order walk over borrowed nodes, driven by an explicit stack of the
/// pending left spine instead of recursion.
pub(crate) struct Walk<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Walk<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        Walk {
            stack: Vec::new(),
            next: root,
        }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.next {
            self.stack.push(node);
            self.next = node.left();
        }
        let node = self.stack.pop()?;
        self.next = node.right();
        Some(node)
    }
}

impl<K, V> Node<K, V> {
    /// Leftmost node of the subtree rooted here.
    pub fn min_node(&self) -> &Node<K, V> {
        let mut t = self;
        while let Some(left) = t.left() {
            t = left;
        }
        t
    }
    /// Rightmost node of the subtree rooted here.
    pub fn max_node(&self) -> &Node<K, V> {
        let mut t = self;
        while let Some(right) = t.right() {
            t = right;
        }
        t
    }
}

/// Ordered iteration over `(position, node)` pairs, starting at the
/// minimum. Can be rewound with [`Iter::reset`].
pub struct Iter<'a, K, V> {
    root: Option<&'a Node<K, V>>,
    walk: Walk<'a, K, V>,
    position: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>) -> Self {
        Iter {
            root,
            walk: Walk::new(root),
            position: 0,
        }
    }

    /// Restarts from the minimum node.
    pub fn reset(&mut self) {
        self.walk = Walk::new(self.root);
        self.position = 0;
    }

    /// Position the next yielded node will carry.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (usize, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.walk.next()?;
        let position = self.position;
        self.position += 1;
        Some((position, node))
    }
}

impl<'a, K, V, C> IntoIterator for &'a SplayTree<K, V, C> {
    type Item = (usize, &'a Node<K, V>);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.root.as_deref())
    }
}

impl<K, V, C> SplayTree<K, V, C> {
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref())
    }

    pub fn min_node(&self) -> Option<&Node<K, V>> {
        self.root.as_deref().map(Node::min_node)
    }
    pub fn max_node(&self) -> Option<&Node<K, V>> {
        self.root.as_deref().map(Node::max_node)
    }
    pub fn min(&self) -> Option<&K> {
        self.min_node().map(Node::key)
    }
    pub fn max(&self) -> Option<&K> {
        self.max_node().map(Node::key)
    }

    /// Node at zero-based in-order position `index`.
    pub fn at(&self, index: usize) -> Option<&Node<K, V>> {
        Walk::new(self.root.as_deref()).nth(index)
    }

    /// Visits every node in order without restructuring the tree.
    pub fn for_each<F>(&self, visitor: F) -> &Self
    where
        F: FnMut(&Node<K, V>),
    {
        Walk::new(self.root.as_deref()).for_each(visitor);
        self
    }

    pub fn keys(&self) -> Vec<&K> {
        Walk::new(self.root.as_deref()).map(Node::key).collect()
    }
    pub fn values(&self) -> Vec<&V> {
        Walk::new(self.root.as_deref()).map(Node::value).collect()
    }
}

impl<K, V, C: Compare<K>> SplayTree<K, V, C> {
    /// Looks `key` up by splaying. On a hit the found node is the new root.
    /// On a miss `None` is returned, but the tree has still been
    /// restructured around the nearest node.
    pub fn find(&mut self, key: &K) -> Option<&Node<K, V>> {
        if self.splay(key) {
            self.root.as_deref()
        } else {
            None
        }
    }

    /// Like [`SplayTree::find`], handing out the payload for mutation.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.splay(key) {
            self.root.as_deref_mut().map(|root| &mut root.value)
        } else {
            None
        }
    }

    /// Plain binary search. Leaves the shape, and the root, untouched.
    pub fn find_static(&self, key: &K) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_deref();
        while let Some(t) = cur {
            cur = match self.cmp.compare(key, &t.key) {
                Ordering::Equal => return Some(t),
                Ordering::Less => t.left(),
                Ordering::Greater => t.right(),
            };
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_static(key).is_some()
    }

    /// In-order successor of `node`, which must belong to this tree.
    ///
    /// Nodes carry no parent links, so when `node` has no right child the
    /// search restarts from the root: each call is O(depth), and walking
    /// the whole tree this way is not amortized. Among duplicate keys the
    /// answer is whatever the descent meets first.
    pub fn successor<'a>(&'a self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        if let Some(right) = node.right() {
            return Some(right.min_node());
        }
        let mut successor = None;
        let mut cur = self.root.as_deref();
        while let Some(t) = cur {
            match self.cmp.compare(&node.key, &t.key) {
                Ordering::Equal => break,
                Ordering::Less => {
                    successor = Some(t);
                    cur = t.left();
                }
                Ordering::Greater => cur = t.right(),
            }
        }
        successor
    }

    /// In-order predecessor of `node`. Same cost as
    /// [`SplayTree::successor`].
    pub fn predecessor<'a>(&'a self, node: &'a Node<K, V>) -> Option<&'a Node<K, V>> {
        if let Some(left) = node.left() {
            return Some(left.max_node());
        }
        let mut predecessor = None;
        let mut cur = self.root.as_deref();
        while let Some(t) = cur {
            match self.cmp.compare(&node.key, &t.key) {
                Ordering::Equal => break,
                Ordering::Less => cur = t.left(),
                Ordering::Greater => {
                    predecessor = Some(t);
                    cur = t.right();
                }
            }
        }
        predecessor
    }

    /// Visits, in order, the nodes with `low <= key <= high`.
    ///
    /// The walk stops at the first key above `high`, or as soon as
    /// `visitor` breaks, in which case the break value is returned.
    pub fn range<B, F>(&self, low: &K, high: &K, mut visitor: F) -> Option<B>
    where
        F: FnMut(&Node<K, V>) -> ControlFlow<B>,
    {
        for node in Walk::new(self.root.as_deref()) {
            if self.cmp.compares_gt(&node.key, high) {
                break;
            }
            if self.cmp.compares_ge(&node.key, low) {
                if let ControlFlow::Break(b) = visitor(node) {
                    return Some(b);
                }
            }
        }
        None
    }
}
