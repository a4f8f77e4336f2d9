// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A binomial heap over an arena of nodes.
//!
//! The heap is a list of binomial trees with strictly increasing, pairwise
//! distinct orders. A heap of `n` items holds a tree of order `i` exactly when
//! bit `i` of `n` is set, so there are at most `log2(n) + 1` trees.
//!
//! Orientation comes from the comparator: with `Natural<P>` the best root is
//! the smallest priority, with `Rev<Natural<P>>` it is the largest.
//!
//! Items are addressed through [`NodeHandle`]s. A handle names an item rather
//! than an arena slot: removals move payloads between slots, and each heap
//! keeps a table from items to the slots currently holding them. A handle
//! stays valid until its own item is popped or removed, and carries the id of
//! the heap that issued it so that handles of other heaps are rejected instead
//! of aliasing some node.

use std::fmt::{self, Debug, Display};
use std::mem;
use std::sync::atomic::{self, AtomicUsize};

use compare::{natural, Compare, Natural};
use log::trace;
use slotmap::{basic, SecondaryMap, SlotMap};

use crate::error::HeapError;
use crate::list::{Link, Sequence};
use crate::tree::{self, Arena, EntryKey, Node, NodeKey, Tree};

static NEXT_HEAP_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct HeapId(usize);

impl HeapId {
    fn fresh() -> HeapId {
        HeapId(NEXT_HEAP_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

/// Reference to an item of a particular heap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    heap: HeapId,
    entry: EntryKey,
}

/// A list of trees sorted by strictly increasing order.
#[derive(Clone, Debug, Default)]
struct TreeList {
    trees: Sequence<Tree>,
}

impl TreeList {
    /// An empty tree list, used to collect trees before merging them in.
    fn scratch() -> TreeList {
        TreeList { trees: Sequence::new() }
    }

    fn singleton(tree: Tree) -> TreeList {
        debug_assert!(!tree.is_empty());
        let mut list = TreeList::scratch();
        list.trees.push_back(tree);
        list
    }
}

/// Merges two tree lists like adding two binary numbers.
///
/// Both lists are walked from the lowest order up with a one-tree carry. At
/// each order there are up to three trees (one from each list plus the carry):
/// a lone tree is emitted, a pair is merged into the next carry, and with
/// three the carry is emitted and the other two become the next carry.
fn merge_lists<T, P, C: Compare<P>>(nodes: &mut Arena<T, P>, cmp: &C, mut a: TreeList,
                                    mut b: TreeList) -> TreeList {
    let mut out = TreeList::scratch();
    let mut carry: Option<Tree> = None;
    let mut next_a = a.trees.pop_front();
    let mut next_b = b.trees.pop_front();

    loop {
        let order = match [next_a, next_b, carry].iter().flatten().map(Tree::order).min() {
            Some(order) => order,
            None => break,
        };

        let left = next_a.filter(|tree| tree.order() == order);
        if left.is_some() {
            next_a = a.trees.pop_front();
        }
        let right = next_b.filter(|tree| tree.order() == order);
        if right.is_some() {
            next_b = b.trees.pop_front();
        }
        let pending = match carry {
            Some(tree) if tree.order() == order => carry.take(),
            _ => None,
        };

        match (left, right, pending) {
            (Some(l), Some(r), Some(c)) => {
                trace!("carry through order {}", order);
                out.trees.push_back(c);
                carry = Some(tree::merge(nodes, cmp, l, r));
            }
            (Some(x), Some(y), None) | (Some(x), None, Some(y)) | (None, Some(x), Some(y)) => {
                trace!("carry from order {}", order);
                carry = Some(tree::merge(nodes, cmp, x, y));
            }
            (Some(t), None, None) | (None, Some(t), None) | (None, None, Some(t)) => {
                out.trees.push_back(t);
            }
            (None, None, None) => unreachable!("no tree of the minimum order"),
        }
    }

    out
}

/// A binomial heap of items ordered by priority.
///
/// It is a logic error for a priority to be modified in such a way that its
/// ordering relative to any other priority, as determined by the heap's
/// comparator, changes while it is in the heap.
pub struct BinomialHeap<T, P, C: Compare<P> = Natural<P>> {
    id: HeapId,
    nodes: Arena<T, P>,
    entries: SlotMap<EntryKey, NodeKey>,
    roots: TreeList,
    cmp: C,
}

impl<T, P: Ord> BinomialHeap<T, P> {
    /// Returns a heap holding a single item, ordered so that the smallest
    /// priority comes out first.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::heap::BinomialHeap;
    ///
    /// let mut heap = BinomialHeap::singleton("b", 2);
    /// heap.push("a", 1);
    /// assert_eq!(heap.peek(), Some(&"a"));
    /// assert_eq!(heap.len(), 2);
    /// ```
    pub fn singleton(item: T, priority: P) -> BinomialHeap<T, P> {
        Self::singleton_with_comparator(item, priority, natural())
    }
}

impl<T, P, C: Compare<P>> BinomialHeap<T, P, C> {
    /// Returns a heap holding a single item and ordered according to the given
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::heap::BinomialHeap;
    /// use compare::{natural, Compare};
    ///
    /// let mut heap = BinomialHeap::singleton_with_comparator("a", 1, natural().rev());
    /// heap.push("b", 2);
    /// assert_eq!(heap.peek(), Some(&"b"));
    /// ```
    pub fn singleton_with_comparator(item: T, priority: P, cmp: C) -> BinomialHeap<T, P, C> {
        let mut heap = Self::scratch(cmp, 1);
        heap.push(item, priority);
        heap
    }

    /// An empty heap. Only the queue starts out from one.
    pub(crate) fn scratch(cmp: C, capacity: usize) -> BinomialHeap<T, P, C> {
        BinomialHeap {
            id: HeapId::fresh(),
            nodes: Arena::with_capacity_and_key(capacity),
            entries: SlotMap::with_capacity_and_key(capacity),
            roots: TreeList::scratch(),
            cmp,
        }
    }

    pub(crate) fn id(&self) -> HeapId {
        self.id
    }

    /// Returns a handle to the item currently held by the node at `key`.
    fn handle(&self, key: NodeKey) -> NodeHandle {
        NodeHandle { heap: self.id, entry: self.nodes[key].entry }
    }

    /// Returns the key of the node currently holding the handle's item.
    fn resolve(&self, handle: NodeHandle) -> Result<NodeKey, HeapError> {
        if handle.heap != self.id {
            return Err(HeapError::ForeignNode);
        }
        self.entries.get(handle.entry).copied().ok_or(HeapError::StaleNode)
    }

    /// Returns the number of items in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the heap contains no items.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reserves capacity for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
        self.entries.reserve(additional);
    }

    /// Removes all items from the heap. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.entries.clear();
        self.roots.trees.clear();
    }

    /// Returns the orders of the heap's trees, lowest first.
    ///
    /// These are the positions of the set bits of `len()`.
    pub fn orders(&self) -> Vec<usize> {
        self.roots.trees.iter().map(Tree::order).collect()
    }

    /// Returns the handles of the tree roots, lowest order first.
    pub fn roots(&self) -> Vec<NodeHandle> {
        self.roots.trees.iter().filter_map(Tree::root).map(|key| self.handle(key)).collect()
    }

    /// Returns the node holding the item behind `handle`, or `None` if the
    /// handle is foreign or stale.
    pub fn node(&self, handle: NodeHandle) -> Option<&Node<T, P>> {
        let key = self.resolve(handle).ok()?;
        self.nodes.get(key)
    }

    /// Returns the parent of the node behind `handle`.
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let parent = self.node(handle)?.parent?;
        Some(self.handle(parent))
    }

    /// Returns the children of the node behind `handle`, in merge order.
    pub fn children(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        match self.node(handle) {
            Some(node) => node.children.iter().map(|&key| self.handle(key)).collect(),
            None => Vec::new(),
        }
    }

    /// Points the counterpart link of the node behind `handle` at `counterpart`.
    pub fn set_counterpart(&mut self, handle: NodeHandle, counterpart: Option<NodeHandle>)
                           -> Result<(), HeapError> {
        let key = self.resolve(handle)?;
        self.nodes[key].counterpart = counterpart;
        Ok(())
    }

    /// Rewrites every counterpart link to point into the heap with the given id.
    pub(crate) fn retarget_counterparts(&mut self, heap: HeapId) {
        for (_, node) in self.nodes.iter_mut() {
            if let Some(ref mut counterpart) = node.counterpart {
                counterpart.heap = heap;
            }
        }
    }

    /// Returns an iterator visiting all nodes in the heap in arbitrary order.
    pub fn iter(&self) -> Iter<T, P> {
        Iter { heap: self.id, inner: self.nodes.iter() }
    }

    /// Finds the best root: its link in the tree list and its node key.
    ///
    /// On ties the tree of lowest order wins.
    fn best_root(&self) -> Option<(Link, NodeKey)> {
        let mut best: Option<(Link, NodeKey)> = None;
        for link in self.roots.trees.links() {
            let key = match self.roots.trees[link].root() {
                Some(key) => key,
                None => continue,
            };
            best = match best {
                Some((_, best_key))
                    if !self.cmp.compares_lt(&self.nodes[key].priority, &self.nodes[best_key].priority) => best,
                _ => Some((link, key)),
            };
        }
        best
    }

    /// Returns a reference to the item with the best priority.
    ///
    /// Returns `None` if the heap is empty.
    pub fn peek(&self) -> Option<&T> {
        self.best_root().map(|(_, key)| &self.nodes[key].item)
    }

    /// Returns a handle to the node with the best priority.
    ///
    /// Returns `None` if the heap is empty.
    pub fn peek_node(&self) -> Option<NodeHandle> {
        self.best_root().map(|(_, key)| self.handle(key))
    }

    /// Inserts an item and returns a handle to its node.
    ///
    /// The item is wrapped in an order-0 tree and unioned in, so this is
    /// `O(log n)`.
    pub fn push(&mut self, item: T, priority: P) -> NodeHandle {
        let nodes = &mut self.nodes;
        let entry = self.entries.insert_with_key(|entry| nodes.insert(Node::new(item, priority, entry)));
        let key = self.entries[entry];
        self.union_trees(TreeList::singleton(Tree::singleton(key)));
        debug_assert!(self.is_valid());
        NodeHandle { heap: self.id, entry }
    }

    fn union_trees(&mut self, other: TreeList) {
        let mine = mem::take(&mut self.roots);
        self.roots = merge_lists(&mut self.nodes, &self.cmp, mine, other);
    }

    /// Moves all items of `other` into this heap.
    ///
    /// Every node of `other` is re-keyed into this heap's arena, so this is
    /// `O(|other|)` plus the `O(log n)` tree-list merge. Handles issued by
    /// `other` no longer resolve. Counterpart links are carried over
    /// unchanged.
    pub fn union(&mut self, mut other: BinomialHeap<T, P, C>) {
        let mut remap = SecondaryMap::with_capacity(other.nodes.len());
        let mut moved = Vec::with_capacity(other.nodes.len());
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for key in moved {
            let entry = self.entries.insert(key);
            let node = &mut self.nodes[key];
            node.entry = entry;
            node.parent = node.parent.map(|parent| remap[parent]);
            node.children = mem::take(&mut node.children).into_iter().map(|child| remap[child]).collect();
        }
        let trees = mem::take(&mut other.roots.trees)
            .into_iter()
            .filter_map(|tree| tree.root().map(|root| Tree::new(remap[root], tree.order())))
            .collect();
        self.union_trees(TreeList { trees });
        debug_assert!(self.is_valid());
    }

    /// Removes the node with the best priority and returns it.
    ///
    /// The node comes back detached, with its counterpart link intact. Returns
    /// `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<Node<T, P>> {
        let (link, key) = self.best_root()?;
        self.roots.trees.remove(link);
        let node = self.detach_root(key);
        debug_assert!(self.is_valid());
        node
    }

    /// Removes a root that is already unlinked from the tree list. Its children
    /// are binomial trees of orders `0..k`, which are unioned back in.
    fn detach_root(&mut self, key: NodeKey) -> Option<Node<T, P>> {
        let mut node = self.nodes.remove(key)?;
        self.entries.remove(node.entry);
        let mut orphans = TreeList::scratch();
        for child in mem::take(&mut node.children) {
            let child_node = &mut self.nodes[child];
            child_node.parent = None;
            orphans.trees.push_back(Tree::new(child, child_node.children.len()));
        }
        self.union_trees(orphans);
        Some(node)
    }

    /// Removes the item behind `handle` and returns its node.
    ///
    /// The item's payload (item, priority and counterpart) is swapped with its
    /// parent's until it reaches a root, which is then removed like [`pop`].
    /// Node positions stay put; only payloads move, and handles follow their
    /// payloads, so every other handle keeps naming the same item.
    ///
    /// # Errors
    ///
    /// `HeapError::ForeignNode` if the handle was issued by another heap,
    /// `HeapError::StaleNode` if its item was already removed.
    ///
    /// [`pop`]: #method.pop
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<Node<T, P>, HeapError> {
        let mut current = self.resolve(handle)?;
        let mut depth = 0;

        while let Some(parent) = self.nodes[current].parent {
            let (lower, upper) = match self.nodes.get_disjoint_mut([current, parent]) {
                Some([lower, upper]) => {
                    mem::swap(&mut lower.item, &mut upper.item);
                    mem::swap(&mut lower.priority, &mut upper.priority);
                    mem::swap(&mut lower.counterpart, &mut upper.counterpart);
                    mem::swap(&mut lower.entry, &mut upper.entry);
                    (lower.entry, upper.entry)
                }
                None => unreachable!("node is its own parent"),
            };
            self.entries[lower] = current;
            self.entries[upper] = parent;
            current = parent;
            depth += 1;
        }
        trace!("bubbled removed node up {} levels", depth);

        let tree = Tree::new(current, self.nodes[current].children.len());
        let link = match self.roots.trees.find(&tree) {
            Some(link) => link,
            None => unreachable!("bubbled node is not a tree root"),
        };
        self.roots.trees.remove(link);
        let node = match self.detach_root(current) {
            Some(node) => node,
            None => unreachable!("bubbled node missing from the arena"),
        };
        debug_assert!(self.is_valid());
        Ok(node)
    }

    /// Checks if the heap is valid.
    ///
    /// The heap is valid if:
    ///
    /// 1. Tree orders strictly increase along the tree list, AND
    /// 2. Every tree is a binomial tree of its recorded order whose nodes
    ///    satisfy the heap property under the comparator, AND
    /// 3. The trees together hold every node of the arena, AND
    /// 4. The entry table maps every item to the node holding it.
    pub(crate) fn is_valid(&self) -> bool {
        if self.entries.len() != self.nodes.len() ||
           !self.nodes.iter().all(|(key, node)| self.entries.get(node.entry) == Some(&key)) {
            return false;
        }

        let mut counted = 0;
        let mut last_order = None;
        for tree in self.roots.trees.iter() {
            let root = match tree.root() {
                Some(root) => root,
                None => return false,
            };
            if last_order.map_or(false, |last| last >= tree.order()) {
                return false;
            }
            last_order = Some(tree.order());
            if !self.nodes.get(root).map_or(false, Node::is_root) {
                return false;
            }
            match tree::subtree_order(&self.nodes, &self.cmp, root) {
                Some(order) if order == tree.order() => counted += 1 << order,
                _ => return false,
            }
        }
        counted == self.nodes.len()
    }
}

impl<T: Clone, P: Clone, C: Compare<P> + Clone> Clone for BinomialHeap<T, P, C> {
    /// Clones the heap under a new id: handles into the original do not
    /// resolve in the clone.
    fn clone(&self) -> BinomialHeap<T, P, C> {
        BinomialHeap {
            id: HeapId::fresh(),
            nodes: self.nodes.clone(),
            entries: self.entries.clone(),
            roots: self.roots.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<T: Debug, P: Debug, C: Compare<P>> Debug for BinomialHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, node)| (&node.item, &node.priority))).finish()
    }
}

impl<T: Display, P: Display, C: Compare<P>> Display for BinomialHeap<T, P, C> {
    /// Renders every tree, lowest order first, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty)");
        }
        for tree in self.roots.trees.iter() {
            writeln!(f, "order {}:", tree.order())?;
            if let Some(root) = tree.root() {
                tree::fmt_subtree(&self.nodes, root, 1, f)?;
            }
        }
        Ok(())
    }
}

/// An iterator over the nodes of a `BinomialHeap` in arbitrary order.
///
/// Acquire through [`BinomialHeap::iter`](struct.BinomialHeap.html#method.iter).
pub struct Iter<'a, T: 'a, P: 'a> {
    heap: HeapId,
    inner: basic::Iter<'a, NodeKey, Node<T, P>>,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = (NodeHandle, &'a Node<T, P>);

    fn next(&mut self) -> Option<(NodeHandle, &'a Node<T, P>)> {
        let heap = self.heap;
        self.inner.next().map(|(_, node)| (NodeHandle { heap, entry: node.entry }, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

#[cfg(test)]
mod test {
    use compare::{natural, Compare};
    use rand::{thread_rng, Rng};

    use super::{BinomialHeap, NodeHandle};
    use crate::error::HeapError;

    fn bits(n: usize) -> Vec<usize> {
        (0..usize::BITS as usize).filter(|&i| n & (1 << i) != 0).collect()
    }

    #[test]
    fn test_singleton() {
        let heap = BinomialHeap::singleton("x", 4);
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.orders(), vec![0]);
        assert_eq!(heap.peek(), Some(&"x"));
        assert!(heap.is_valid());
    }

    #[test]
    fn test_orders_follow_binary_digits_of_len() {
        let mut heap = BinomialHeap::singleton(0, 0);
        for i in 1..100 {
            heap.push(i, (i * 37) % 101);
            assert_eq!(heap.orders(), bits(heap.len()));
        }
        while heap.pop().is_some() {
            assert_eq!(heap.orders(), bits(heap.len()));
        }
    }

    #[test]
    fn test_peek_node_and_node() {
        let mut heap = BinomialHeap::singleton("b", 2);
        let a = heap.push("a", 1);
        heap.push("c", 3);

        assert_eq!(heap.peek_node(), Some(a));
        let node = heap.node(a).unwrap();
        assert_eq!(node.item(), &"a");
        assert_eq!(node.priority(), &1);
        assert!(node.is_root());
        assert_eq!(node.counterpart(), None);
    }

    #[test]
    fn test_pop_on_emptied_heap() {
        let mut heap = BinomialHeap::singleton((), 1);
        assert_eq!(heap.pop().map(|node| *node.priority()), Some(1));
        assert!(heap.is_empty());
        assert!(heap.pop().is_none());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.peek_node(), None);
        assert!(heap.orders().is_empty());
    }

    #[test]
    fn fuzz_pop_sorted() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let mut heap = BinomialHeap::singleton(0u32, 0u32);
            for _ in 0..100 {
                let x: u32 = rng.gen();
                heap.push(x, x);
            }
            let mut last = None;
            while let Some(node) = heap.pop() {
                let (item, priority) = node.into_entry();
                assert_eq!(item, priority);
                if let Some(prev) = last {
                    assert!(prev <= priority);
                }
                last = Some(priority);
            }
        }
    }

    #[test]
    fn fuzz_pop_sorted_reversed() {
        let mut rng = thread_rng();
        let mut heap = BinomialHeap::singleton_with_comparator(0i64, 0i64, natural().rev());
        for _ in 0..200 {
            let x = rng.gen_range(-1000..1000);
            heap.push(x, x);
        }
        let mut last = None;
        while let Some(node) = heap.pop() {
            let priority = *node.priority();
            if let Some(prev) = last {
                assert!(prev >= priority);
            }
            last = Some(priority);
        }
    }

    #[test]
    fn test_pop_detaches_node_and_keeps_counterpart() {
        let mut heap = BinomialHeap::singleton("a", 1);
        let other = BinomialHeap::singleton("z", 0);
        let foreign = other.peek_node().unwrap();
        heap.push("b", 2);
        heap.push("c", 3);
        let a = heap.peek_node().unwrap();
        heap.set_counterpart(a, Some(foreign)).unwrap();

        let node = heap.pop().unwrap();
        assert!(node.is_root());
        assert_eq!(node.degree(), 0);
        assert_eq!(node.counterpart(), Some(foreign));
        assert_eq!(heap.node(a).map(|n| *n.item()), None);
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_remove_node_arbitrary() {
        let mut heap = BinomialHeap::singleton(0, 0);
        let handles: Vec<NodeHandle> = (1..32).map(|i| heap.push(i, i)).collect();

        let removed = heap.remove_node(handles[30]).unwrap();
        assert_eq!(removed.into_entry(), (31, 31));
        assert_eq!(heap.len(), 31);
        assert!(heap.is_valid());

        let mut out = Vec::new();
        while let Some(node) = heap.pop() {
            out.push(*node.item());
        }
        assert_eq!(out, (0..31).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_every_node_in_random_order() {
        let mut rng = thread_rng();
        let mut heap = BinomialHeap::singleton(0u32, rng.gen::<u32>());
        let mut handles = vec![heap.peek_node().unwrap()];
        for i in 1..64u32 {
            handles.push(heap.push(i, rng.gen()));
        }

        while !handles.is_empty() {
            let index = rng.gen_range(0..handles.len());
            let victim = handles.swap_remove(index);
            let expected = heap.node(victim).map(|node| *node.item());
            let removed = heap.remove_node(victim).unwrap();
            assert!(heap.is_valid());
            assert_eq!(Some(*removed.item()), expected);
            assert_eq!(heap.remove_node(victim).err(), Some(HeapError::StaleNode));
            assert_eq!(heap.len(), handles.len());
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_remove_node_keeps_other_handles() {
        let mut heap = BinomialHeap::singleton(0, 0);
        let mut handles = vec![heap.peek_node().unwrap()];
        handles.extend((1..16).map(|i| heap.push(i, i)));

        // The deepest node of the order-4 tree, with three ancestors above it.
        let deepest = handles[15];
        let mut ancestors = Vec::new();
        let mut cursor = heap.parent(deepest);
        while let Some(ancestor) = cursor {
            ancestors.push(ancestor);
            cursor = heap.parent(ancestor);
        }
        assert_eq!(ancestors.len(), 4);

        assert_eq!(*heap.remove_node(deepest).unwrap().item(), 15);
        for (i, &handle) in handles.iter().enumerate().take(15) {
            assert_eq!(heap.node(handle).map(|node| *node.item()), Some(i));
        }
        for &ancestor in &ancestors {
            assert!(heap.node(ancestor).is_some());
        }
        assert!(heap.node(deepest).is_none());
    }

    #[test]
    fn test_counterpart_follows_its_item_through_removal() {
        let mut heap = BinomialHeap::singleton("root", 0);
        let leaf = heap.push("leaf", 1);

        let marker = BinomialHeap::singleton("m", 0);
        let counterpart = marker.peek_node().unwrap();
        let root = heap.parent(leaf).unwrap();
        heap.set_counterpart(root, Some(counterpart)).unwrap();

        let removed = heap.remove_node(leaf).unwrap();
        assert_eq!(*removed.item(), "leaf");
        assert_eq!(removed.counterpart(), None);

        let survivor = heap.node(root).unwrap();
        assert_eq!(*survivor.item(), "root");
        assert_eq!(survivor.counterpart(), Some(counterpart));
        assert!(survivor.is_root());
        assert_eq!(heap.roots(), vec![root]);
    }

    #[test]
    fn test_remove_node_rejects_foreign_and_stale_handles() {
        let mut heap = BinomialHeap::singleton(1, 1);
        let other = BinomialHeap::singleton(1, 1);
        let foreign = other.peek_node().unwrap();
        assert_eq!(heap.remove_node(foreign).err(), Some(HeapError::ForeignNode));
        assert_eq!(heap.set_counterpart(foreign, None), Err(HeapError::ForeignNode));
        assert!(heap.node(foreign).is_none());

        let two = heap.push(2, 2);
        assert_eq!(heap.remove_node(two).unwrap().into_entry(), (2, 2));
        assert!(heap.node(two).is_none());
        assert_eq!(heap.remove_node(two).err(), Some(HeapError::StaleNode));
        assert_eq!(heap.set_counterpart(two, None), Err(HeapError::StaleNode));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek(), Some(&1));
    }

    #[test]
    fn test_union() {
        let mut a = BinomialHeap::singleton(1, 1);
        for i in [9, 4, 7] {
            a.push(i, i);
        }
        let mut b = BinomialHeap::singleton(3, 3);
        for i in [8, 2] {
            b.push(i, i);
        }
        let stale = b.peek_node().unwrap();

        a.union(b);
        assert_eq!(a.len(), 7);
        assert_eq!(a.orders(), vec![0, 1, 2]);
        assert!(a.node(stale).is_none());

        let mut out = Vec::new();
        while let Some(node) = a.pop() {
            out.push(*node.item());
        }
        assert_eq!(out, vec![1, 2, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn test_clone_has_fresh_handles() {
        let mut heap = BinomialHeap::singleton('a', 1);
        let b = heap.push('b', 2);
        let copy = heap.clone();
        assert_eq!(copy.len(), 2);
        assert!(copy.node(b).is_none());
        assert_eq!(copy.peek(), Some(&'a'));
        assert!(copy.is_valid());
    }

    #[test]
    fn test_children_and_parent() {
        let mut heap = BinomialHeap::singleton("a", 1);
        let b = heap.push("b", 2);
        let c = heap.push("c", 3);
        let d = heap.push("d", 4);

        let root = heap.roots()[0];
        assert_eq!(heap.children(root), vec![b, c]);
        assert_eq!(heap.children(c), vec![d]);
        assert_eq!(heap.parent(d), Some(c));
        assert_eq!(heap.parent(root), None);
    }

    #[test]
    fn test_display() {
        let mut heap = BinomialHeap::singleton("a", 1);
        heap.push("b", 2);
        heap.push("c", 3);
        let rendered = heap.to_string();
        assert_eq!(rendered,
                   "order 0:\n  c (priority 3)\norder 1:\n  a (priority 1)\n    b (priority 2)\n");
    }
}
