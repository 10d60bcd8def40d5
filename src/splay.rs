/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Top-down splay: one pass from the root towards the target, linking
//! every passed node into one of two side chains, then reassembling the
//! chains around the node where the descent stopped.

use alloc::boxed::Box;
use core::cmp::Ordering;

use crate::Node;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K, V> Node<K, V> {
    // y is the parent of x, and x is on side `side_x` of y.
    // x takes y's place: y becomes x's child on the other side.
    fn rotate_up(
        &mut self, // x
        mut y: Box<Node<K, V>>,
        side_x: bool,
    ) {
        y.c[side_x as usize] = self.c[!side_x as usize].take();
        self.c[!side_x as usize] = Some(y);
    }
}

/// Splays `t` towards a target described by `dir`.
///
/// `dir` is called with the key of a node on the search path and returns
/// where the target lies relative to that node: `Less` to go left,
/// `Greater` to go right, `Equal` to stop. The returned subtree is rooted
/// at the node where `dir` said `Equal`, or, if the descent fell off the
/// tree, at the last node visited.
///
/// Runs in O(depth) with no allocation: the two side chains are grown
/// through a tail slot each.
pub(crate) fn splay_by<K, V, F>(mut t: Box<Node<K, V>>, mut dir: F) -> Box<Node<K, V>>
where
    F: FnMut(&K) -> Ordering,
{
    // Nodes smaller than the final root, chained through their right slots.
    let mut small: Link<K, V> = None;
    // Nodes larger than the final root, chained through their left slots.
    let mut large: Link<K, V> = None;
    let mut small_tail = &mut small;
    let mut large_tail = &mut large;
    loop {
        match dir(&t.key) {
            Ordering::Equal => break,
            Ordering::Less => {
                let mut y = match t.c[0].take() {
                    Some(y) => y,
                    None => break,
                };
                if dir(&y.key) == Ordering::Less {
                    // zig-zig
                    y.rotate_up(t, false);
                    t = y;
                    y = match t.c[0].take() {
                        Some(y) => y,
                        None => break,
                    };
                }
                large_tail = &mut large_tail.insert(t).c[0];
                t = y;
            }
            Ordering::Greater => {
                let mut y = match t.c[1].take() {
                    Some(y) => y,
                    None => break,
                };
                if dir(&y.key) == Ordering::Greater {
                    y.rotate_up(t, true);
                    t = y;
                    y = match t.c[1].take() {
                        Some(y) => y,
                        None => break,
                    };
                }
                small_tail = &mut small_tail.insert(t).c[1];
                t = y;
            }
        }
    }
    *small_tail = t.c[0].take();
    *large_tail = t.c[1].take();
    t.c[0] = small;
    t.c[1] = large;
    t
}

/// Leftmost node becomes the root, with an empty left slot.
pub(crate) fn splay_min<K, V>(t: Box<Node<K, V>>) -> Box<Node<K, V>> {
    splay_by(t, |_| Ordering::Less)
}

/// Rightmost node becomes the root, with an empty right slot.
pub(crate) fn splay_max<K, V>(t: Box<Node<K, V>>) -> Box<Node<K, V>> {
    splay_by(t, |_| Ordering::Greater)
}

/// Links `node` in as the new root of `root`. Equal keys go to the right
/// of the existing ones.
pub(crate) fn insert_node<K, V, F>(
    root: Link<K, V>,
    mut node: Box<Node<K, V>>,
    mut cmp: F,
) -> Box<Node<K, V>>
where
    F: FnMut(&K, &K) -> Ordering,
{
    let t = match root {
        Some(t) => t,
        None => return node,
    };
    let mut t = splay_by(t, |k| cmp(&node.key, k));
    let side = cmp(&node.key, &t.key) != Ordering::Less;
    node.c[side as usize] = t.c[side as usize].take();
    node.c[!side as usize] = Some(t);
    node
}

/// Splits on `key`. A node comparing equal to `key`, if the splay surfaces
/// one, is handed back separately with both slots emptied.
pub(crate) fn split_link<K, V, F>(
    root: Link<K, V>,
    key: &K,
    mut cmp: F,
) -> (Link<K, V>, Link<K, V>, Link<K, V>)
where
    F: FnMut(&K, &K) -> Ordering,
{
    let v = match root {
        Some(v) => v,
        None => return (None, None, None),
    };
    let mut v = splay_by(v, |k| cmp(key, k));
    match cmp(&v.key, key) {
        Ordering::Equal => {
            let left = v.c[0].take();
            let right = v.c[1].take();
            (left, right, Some(v))
        }
        Ordering::Less => {
            let right = v.c[1].take();
            (Some(v), right, None)
        }
        Ordering::Greater => {
            let left = v.c[0].take();
            (left, Some(v), None)
        }
    }
}

/// Every key of `left` must order before every key of `right`.
pub(crate) fn merge_links<K, V>(left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    match (left, right) {
        (left, None) => left,
        (None, right) => right,
        (Some(left), Some(right)) => {
            let mut right = splay_min(right);
            right.c[0] = Some(left);
            Some(right)
        }
    }
}

/// Unlinks the root of `t`, returning the remaining tree and the detached
/// node. The left subtree's maximum takes the root's place.
pub(crate) fn detach_root<K, V>(mut t: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
    let rest = match t.c[0].take() {
        None => t.c[1].take(),
        Some(left) => {
            let mut x = splay_max(left);
            x.c[1] = t.c[1].take();
            Some(x)
        }
    };
    (rest, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn leaf(key: i32) -> Box<Node<i32, ()>> {
        Box::new(Node::new(key, ()))
    }

    // Left spine: n-1 at the root, 0 at the bottom.
    fn left_spine(n: i32) -> Box<Node<i32, ()>> {
        let mut root = leaf(0);
        for key in 1..n {
            let mut node = leaf(key);
            node.c[0] = Some(root);
            root = node;
        }
        root
    }

    fn depth(t: &Link<i32, ()>) -> usize {
        match t {
            None => 0,
            Some(n) => 1 + depth(&n.c[0]).max(depth(&n.c[1])),
        }
    }

    fn keys(t: &Link<i32, ()>, out: &mut Vec<i32>) {
        if let Some(n) = t {
            keys(&n.c[0], out);
            out.push(n.key);
            keys(&n.c[1], out);
        }
    }

    #[test]
    fn splay_brings_target_to_root() {
        let t = splay_by(left_spine(8), |k| 0.cmp(k));
        assert_eq!(t.key, 0);
        let mut out = Vec::new();
        keys(&Some(t), &mut out);
        assert_eq!(out, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn zig_zig_halves_the_path() {
        let t = Some(splay_by(left_spine(16), |k| 0.cmp(k)));
        assert!(depth(&t) <= 10);
    }

    #[test]
    fn missing_key_surfaces_neighbor() {
        let t = splay_by(left_spine(8), |k| 100.cmp(k));
        assert_eq!(t.key, 7);
        let mut t = left_spine(8);
        t = splay_by(t, |k| (-5).cmp(k));
        assert_eq!(t.key, 0);
        assert!(t.c[0].is_none());
    }

    #[test]
    fn extremes() {
        let t = splay_min(left_spine(5));
        assert_eq!(t.key, 0);
        assert!(t.c[0].is_none());
        let t = splay_max(t);
        assert_eq!(t.key, 4);
        assert!(t.c[1].is_none());
    }
}
