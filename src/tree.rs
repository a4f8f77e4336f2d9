// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binomial tree nodes and the tree merge primitive.
//!
//! A binomial tree of order `k` has `2^k` nodes. Its root has `k` children and,
//! because every merge appends the absorbed tree as the root's *last* child,
//! the `i`-th child is itself the root of an order-`i` tree. Children are kept
//! in merge order, not sorted by key.

use std::fmt::{self, Display};

use compare::Compare;
use slotmap::{new_key_type, SlotMap};

use crate::heap::NodeHandle;
use crate::list::Sequence;

new_key_type! {
    /// Arena key of a node within one heap.
    pub struct NodeKey;

    /// Identity of a payload within one heap. Moves with the payload when
    /// nodes swap contents.
    pub(crate) struct EntryKey;
}

/// Node storage of a single heap.
pub(crate) type Arena<T, P> = SlotMap<NodeKey, Node<T, P>>;

/// A heap node: one item, its priority, and its place in a binomial tree.
///
/// `parent` and `children` are arena keys of the same heap. `counterpart`
/// refers to a node of some other heap and is never followed by this one.
/// `entry` travels with the item.
#[derive(Clone, Debug)]
pub struct Node<T, P> {
    pub(crate) item: T,
    pub(crate) priority: P,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Sequence<NodeKey>,
    pub(crate) counterpart: Option<NodeHandle>,
    pub(crate) entry: EntryKey,
}

impl<T, P> Node<T, P> {
    pub(crate) fn new(item: T, priority: P, entry: EntryKey) -> Node<T, P> {
        Node {
            item,
            priority,
            parent: None,
            children: Sequence::new(),
            counterpart: None,
            entry,
        }
    }

    /// Returns the node's item.
    pub fn item(&self) -> &T { &self.item }

    /// Returns the node's priority.
    pub fn priority(&self) -> &P { &self.priority }

    /// Returns the node in the opposite heap holding the same entry, if linked.
    pub fn counterpart(&self) -> Option<NodeHandle> { self.counterpart }

    /// Returns the number of children, which is the order of the subtree
    /// rooted here.
    pub fn degree(&self) -> usize { self.children.len() }

    /// Returns `true` if the node has no parent.
    pub fn is_root(&self) -> bool { self.parent.is_none() }

    /// Consumes the node and returns its item and priority.
    pub fn into_entry(self) -> (T, P) { (self.item, self.priority) }
}

/// A binomial tree: a root key (or nothing) and its order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tree {
    root: Option<NodeKey>,
    order: usize,
}

impl Tree {
    pub(crate) fn new(root: NodeKey, order: usize) -> Tree {
        Tree { root: Some(root), order }
    }

    pub(crate) fn singleton(root: NodeKey) -> Tree {
        Tree::new(root, 0)
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Tree {
        Tree { root: None, order: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool { self.root.is_none() }

    pub(crate) fn order(&self) -> usize { self.order }

    pub(crate) fn root(&self) -> Option<NodeKey> { self.root }
}

/// Merges two trees of equal order into one of the next order.
///
/// The root that compares less than or equal to the other wins, so `a` wins
/// ties. The loser's root becomes the winner's last child. If either tree is
/// empty the other is returned unchanged.
///
/// Merging trees of different order produces a tree that is not binomial; this
/// trips a debug assertion.
pub(crate) fn merge<T, P, C: Compare<P>>(nodes: &mut Arena<T, P>, cmp: &C, a: Tree, b: Tree) -> Tree {
    let (a_root, b_root) = match (a.root, b.root) {
        (None, _) => return b,
        (_, None) => return a,
        (Some(a_root), Some(b_root)) => (a_root, b_root),
    };
    debug_assert_eq!(a.order, b.order, "merging binomial trees of unequal order");

    let (winner, loser) = if cmp.compares_le(&nodes[a_root].priority, &nodes[b_root].priority) {
        (a_root, b_root)
    } else {
        (b_root, a_root)
    };
    nodes[loser].parent = Some(winner);
    nodes[winner].children.push_back(loser);
    Tree::new(winner, a.order + 1)
}

/// Checks the subtree rooted at `key` and returns its order.
///
/// Returns `None` if a child does not point back at its parent, orders a key
/// before its parent, or if the `i`-th child is not an order-`i` tree.
pub(crate) fn subtree_order<T, P, C: Compare<P>>(nodes: &Arena<T, P>, cmp: &C, key: NodeKey)
                                                 -> Option<usize> {
    let node = nodes.get(key)?;
    for (i, &child) in node.children.iter().enumerate() {
        let child_node = nodes.get(child)?;
        if child_node.parent != Some(key) || cmp.compares_gt(&node.priority, &child_node.priority) {
            return None;
        }
        if subtree_order(nodes, cmp, child)? != i {
            return None;
        }
    }
    Some(node.children.len())
}

/// Writes the subtree rooted at `key`, one node per line, indented by depth.
pub(crate) fn fmt_subtree<T: Display, P: Display>(nodes: &Arena<T, P>, key: NodeKey, depth: usize,
                                                  f: &mut fmt::Formatter) -> fmt::Result {
    let node = match nodes.get(key) {
        Some(node) => node,
        None => return Ok(()),
    };
    writeln!(f, "{:indent$}{} (priority {})", "", node.item, node.priority, indent = depth * 2)?;
    for &child in node.children.iter() {
        fmt_subtree(nodes, child, depth + 1, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};

    use super::{merge, subtree_order, Arena, EntryKey, Node, Tree};

    fn singleton(nodes: &mut Arena<&'static str, i32>, item: &'static str, priority: i32) -> Tree {
        Tree::singleton(nodes.insert(Node::new(item, priority, EntryKey::default())))
    }

    #[test]
    fn test_merge_smaller_root_wins() {
        let mut nodes = Arena::with_key();
        let a = singleton(&mut nodes, "a", 5);
        let b = singleton(&mut nodes, "b", 2);

        let tree = merge(&mut nodes, &natural(), a, b);
        assert_eq!(tree.order(), 1);
        assert_eq!(tree.root(), b.root());

        let root = &nodes[tree.root().unwrap()];
        assert_eq!(root.item, "b");
        assert_eq!(root.children.iter().cloned().collect::<Vec<_>>(), vec![a.root().unwrap()]);
        assert_eq!(nodes[a.root().unwrap()].parent, b.root());
    }

    #[test]
    fn test_merge_left_wins_ties() {
        let mut nodes = Arena::with_key();
        let a = singleton(&mut nodes, "a", 3);
        let b = singleton(&mut nodes, "b", 3);
        assert_eq!(merge(&mut nodes, &natural(), a, b).root(), a.root());

        let c = singleton(&mut nodes, "c", 3);
        let d = singleton(&mut nodes, "d", 3);
        assert_eq!(merge(&mut nodes, &natural(), d, c).root(), d.root());
    }

    #[test]
    fn test_merge_reversed_comparator() {
        let mut nodes = Arena::with_key();
        let a = singleton(&mut nodes, "a", 5);
        let b = singleton(&mut nodes, "b", 2);
        let tree = merge(&mut nodes, &natural().rev(), a, b);
        assert_eq!(tree.root(), a.root());
    }

    #[test]
    fn test_merge_appends_last_child() {
        let mut nodes = Arena::with_key();
        let cmp = natural();
        let t0 = singleton(&mut nodes, "w", 1);
        let t1 = singleton(&mut nodes, "x", 2);
        let t2 = singleton(&mut nodes, "y", 3);
        let t3 = singleton(&mut nodes, "z", 4);

        let left = merge(&mut nodes, &cmp, t0, t1);
        let right = merge(&mut nodes, &cmp, t2, t3);
        let tree = merge(&mut nodes, &cmp, left, right);

        assert_eq!(tree.order(), 2);
        let children: Vec<_> = nodes[tree.root().unwrap()].children.iter().cloned().collect();
        assert_eq!(children, vec![t1.root().unwrap(), t2.root().unwrap()]);
        assert_eq!(subtree_order(&nodes, &cmp, tree.root().unwrap()), Some(2));
    }

    #[test]
    fn test_merge_with_empty() {
        let mut nodes = Arena::with_key();
        let a = singleton(&mut nodes, "a", 1);
        assert_eq!(merge(&mut nodes, &natural(), a, Tree::empty()), a);
        assert_eq!(merge(&mut nodes, &natural(), Tree::empty(), a), a);
        assert!(merge(&mut nodes, &natural(), Tree::empty(), Tree::empty()).is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unequal order")]
    fn test_merge_unequal_orders_panics() {
        let mut nodes = Arena::with_key();
        let a = singleton(&mut nodes, "a", 1);
        let b = singleton(&mut nodes, "b", 2);
        let c = singleton(&mut nodes, "c", 3);
        let ab = merge(&mut nodes, &natural(), a, b);
        merge(&mut nodes, &natural(), ab, c);
    }

    #[test]
    fn test_subtree_order_detects_heap_violation() {
        let mut nodes = Arena::with_key();
        let cmp = natural();
        let a = singleton(&mut nodes, "a", 1);
        let b = singleton(&mut nodes, "b", 2);
        let tree = merge(&mut nodes, &cmp, a, b);
        assert_eq!(subtree_order(&nodes, &cmp, tree.root().unwrap()), Some(1));
        assert_eq!(subtree_order(&nodes, &cmp.rev(), tree.root().unwrap()), None);
    }
}
