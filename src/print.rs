/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::traverse::Walk;
use crate::{Node, SplayTree};

impl<K, V, C> SplayTree<K, V, C> {
    /// Renders the tree shape as an indented outline, one node per line,
    /// left child before right child:
    ///
    /// ```text
    /// └── 1
    ///     ├── 0
    ///     └── 2
    /// ```
    ///
    /// A left child is always drawn with `├── `, a right child with `└── `.
    pub fn render_with<F>(&self, mut print_node: F) -> String
    where
        F: FnMut(&Node<K, V>) -> String,
    {
        let mut out = String::new();
        // (node, prefix, is_tail)
        let mut stack: Vec<(&Node<K, V>, String, bool)> = Vec::new();
        if let Some(root) = self.root() {
            stack.push((root, String::new(), true));
        }
        while let Some((node, prefix, is_tail)) = stack.pop() {
            out.push_str(&prefix);
            out.push_str(if is_tail { "└── " } else { "├── " });
            out.push_str(&print_node(node));
            out.push('\n');
            let indent = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
            if let Some(right) = node.right() {
                stack.push((right, indent.clone(), true));
            }
            if let Some(left) = node.left() {
                stack.push((left, indent, false));
            }
        }
        out
    }
}

impl<K: fmt::Display, V, C> fmt::Display for SplayTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|node| format!("{}", node.key())))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SplayTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(Walk::new(self.root()).map(|node| (node.key(), node.value())))
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::SplayTree;

    #[test]
    fn empty_tree_renders_nothing() {
        let tree = SplayTree::<i32>::new();
        assert_eq!(tree.to_string(), "");
    }

    #[test]
    fn custom_formatter() {
        let mut tree = SplayTree::new();
        tree.insert(1, "one");
        tree.insert(2, "two");
        let out = tree.render_with(|node| format!("{}={}", node.key(), node.value()));
        assert_eq!(out, "└── 2=two\n    ├── 1=one\n");
    }

    #[test]
    fn debug_lists_entries_in_order() {
        let mut tree = SplayTree::new();
        for key in [3, 1, 2] {
            tree.insert(key, key * 10);
        }
        assert_eq!(format!("{:?}", tree), "{1: 10, 2: 20, 3: 30}");
    }
}
