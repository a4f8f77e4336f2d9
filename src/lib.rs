// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A double-ended priority queue built from two binomial heaps.
//!
//! A `PriorityQueue` keeps every entry twice: once in a heap ordered by
//! ascending priority and once in a heap ordered by descending priority. The
//! two nodes of an entry point at each other, so popping an entry from one
//! heap finds and removes its twin in the other without a search.
//!
//! Enqueueing and dequeueing at either end are `O(log n)`. Retrieving the
//! smallest or greatest item scans the `O(log n)` tree roots of one heap.
//!
//! Entries with equal priorities come out in an unspecified order.
//!
//! # Examples
//!
//! ```
//! use binomial_depq::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("Hello", 4);
//! queue.enqueue("my", 1);
//! queue.enqueue("name", 5);
//! assert_eq!(queue.min(), Some(&"my"));
//! assert_eq!(queue.max(), Some(&"name"));
//!
//! queue.dequeue_min();
//! assert_eq!(queue.min(), Some(&"Hello"));
//! assert_eq!(queue.len(), 2);
//! ```

use std::fmt::{self, Debug, Display};

use compare::{natural, Compare, Natural, Rev};
use log::debug;

pub mod error;
pub mod heap;
pub mod list;
pub mod tree;

pub use error::HeapError;
pub use heap::{BinomialHeap, NodeHandle};
pub use tree::Node;

/// The ascending side of a queue.
pub type MinHeap<V, P> = BinomialHeap<V, P, Natural<P>>;

/// The descending side of a queue.
pub type MaxHeap<V, P> = BinomialHeap<V, P, Rev<Natural<P>>>;

/// Removes the twin behind `counterpart` from `side`.
fn evict<V, P, C: Compare<P>>(side: &mut BinomialHeap<V, P, C>, counterpart: Option<NodeHandle>) {
    let handle = match counterpart {
        Some(handle) => handle,
        None => unreachable!("queue entry without a counterpart"),
    };
    if let Err(err) = side.remove_node(handle) {
        unreachable!("counterpart missing from the opposite heap: {}", err);
    }
}

fn link<V, P, C: Compare<P>>(heap: &mut BinomialHeap<V, P, C>, node: NodeHandle, counterpart: NodeHandle) {
    if let Err(err) = heap.set_counterpart(node, Some(counterpart)) {
        unreachable!("cannot link counterpart: {}", err);
    }
}

/// A double-ended priority queue built from two cross-linked binomial heaps.
///
/// Each entry is a value with a priority. Values are cloned once on
/// enqueue since both heaps hold a copy.
pub struct PriorityQueue<V, P: Ord = i64> {
    min: MinHeap<V, P>,
    max: MaxHeap<V, P>,
}

impl<V, P: Ord> Default for PriorityQueue<V, P> {
    #[inline]
    fn default() -> PriorityQueue<V, P> {
        PriorityQueue::new()
    }
}

impl<V, P: Ord> PriorityQueue<V, P> {
    /// Returns an empty queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::PriorityQueue;
    ///
    /// let queue = PriorityQueue::<&str>::new();
    /// assert!(queue.is_empty());
    /// assert_eq!(queue.min(), None);
    /// ```
    pub fn new() -> PriorityQueue<V, P> {
        Self::with_capacity(0)
    }

    /// Returns an empty queue able to hold `capacity` entries without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> PriorityQueue<V, P> {
        PriorityQueue {
            min: BinomialHeap::scratch(natural(), capacity),
            max: BinomialHeap::scratch(natural().rev(), capacity),
        }
    }

    /// Returns the number of entries in the queue.
    pub fn len(&self) -> usize {
        self.min.len()
    }

    /// Returns `true` if the queue contains no entries.
    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.min.reserve(additional);
        self.max.reserve(additional);
    }

    /// Removes all entries from the queue.
    pub fn clear(&mut self) {
        self.min.clear();
        self.max.clear();
    }

    /// Returns a reference to the value with the smallest priority.
    ///
    /// Returns `None` if the queue is empty.
    pub fn min(&self) -> Option<&V> {
        self.min.peek()
    }

    /// Returns a reference to the value with the greatest priority.
    ///
    /// Returns `None` if the queue is empty.
    pub fn max(&self) -> Option<&V> {
        self.max.peek()
    }

    /// Returns references to the values with the smallest and greatest
    /// priorities.
    ///
    /// Returns `None` if the queue is empty.
    pub fn min_max(&self) -> Option<(&V, &V)> {
        self.min().zip(self.max())
    }

    /// Returns the smallest priority in the queue.
    pub fn min_priority(&self) -> Option<&P> {
        let handle = self.min.peek_node()?;
        self.min.node(handle).map(Node::priority)
    }

    /// Returns the greatest priority in the queue.
    pub fn max_priority(&self) -> Option<&P> {
        let handle = self.max.peek_node()?;
        self.max.node(handle).map(Node::priority)
    }

    /// Returns the ascending heap, for inspection.
    pub fn min_heap(&self) -> &MinHeap<V, P> {
        &self.min
    }

    /// Returns the descending heap, for inspection.
    pub fn max_heap(&self) -> &MaxHeap<V, P> {
        &self.max
    }

    /// Returns an iterator visiting all entries in arbitrary order.
    pub fn iter(&self) -> Iter<V, P> {
        Iter(self.min.iter())
    }

    /// Removes the entry with the smallest priority and returns it.
    ///
    /// Returns `None` if the queue was empty.
    pub fn pop_min(&mut self) -> Option<(V, P)> {
        debug_assert!(self.is_valid());
        let node = self.min.pop()?;
        evict(&mut self.max, node.counterpart());
        debug!("dequeued minimum, {} entries left", self.len());
        debug_assert!(self.is_valid());
        Some(node.into_entry())
    }

    /// Removes the entry with the greatest priority and returns it.
    ///
    /// Returns `None` if the queue was empty.
    pub fn pop_max(&mut self) -> Option<(V, P)> {
        debug_assert!(self.is_valid());
        let node = self.max.pop()?;
        evict(&mut self.min, node.counterpart());
        debug!("dequeued maximum, {} entries left", self.len());
        debug_assert!(self.is_valid());
        Some(node.into_entry())
    }

    /// Removes the entry with the smallest priority.
    ///
    /// Does nothing if the queue is empty. Read [`min`](#method.min) first to
    /// observe the value, or use [`pop_min`](#method.pop_min).
    pub fn dequeue_min(&mut self) {
        self.pop_min();
    }

    /// Removes the entry with the greatest priority.
    ///
    /// Does nothing if the queue is empty.
    pub fn dequeue_max(&mut self) {
        self.pop_max();
    }

    /// Consumes the queue and returns its entries sorted by ascending priority.
    pub fn into_sorted_vec(mut self) -> Vec<(V, P)> {
        let mut vec = Vec::with_capacity(self.len());
        while let Some(entry) = self.pop_min() {
            vec.push(entry);
        }
        vec
    }

    /// Checks if the queue is valid.
    ///
    /// The queue is valid if both heaps hold the same number of nodes and every
    /// node of the ascending heap is linked to a node of the descending heap
    /// that links back and has the same priority. The heaps check their own
    /// shape.
    fn is_valid(&self) -> bool {
        self.min.len() == self.max.len() &&
        self.min.iter().all(|(handle, node)| {
            node.counterpart()
                .and_then(|twin| self.max.node(twin))
                .map_or(false, |twin| {
                    twin.counterpart() == Some(handle) && twin.priority() == node.priority()
                })
        })
    }
}

impl<V: Clone, P: Ord + Clone> PriorityQueue<V, P> {
    /// Adds an entry to the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::PriorityQueue;
    ///
    /// let mut queue = PriorityQueue::new();
    /// queue.enqueue('a', 3);
    /// queue.enqueue('b', -2);
    /// assert_eq!(queue.min_max(), Some((&'b', &'a')));
    /// ```
    pub fn enqueue(&mut self, value: V, priority: P) {
        let low = self.min.push(value.clone(), priority.clone());
        let high = self.max.push(value, priority);
        link(&mut self.min, low, high);
        link(&mut self.max, high, low);
        debug!("enqueued entry, {} entries live", self.len());
        debug_assert!(self.is_valid());
    }
}

impl<V: Clone, P: Ord + Clone> Clone for PriorityQueue<V, P> {
    fn clone(&self) -> PriorityQueue<V, P> {
        let mut min = self.min.clone();
        let mut max = self.max.clone();
        min.retarget_counterparts(max.id());
        max.retarget_counterparts(min.id());
        PriorityQueue { min, max }
    }
}

impl<V: Debug, P: Ord + Debug> Debug for PriorityQueue<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<V: Display, P: Ord + Display> Display for PriorityQueue<V, P> {
    /// Renders the trees of both heaps.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "min heap:")?;
        write!(f, "{}", self.min)?;
        writeln!(f, "max heap:")?;
        write!(f, "{}", self.max)
    }
}

impl<V: Clone, P: Ord + Clone> FromIterator<(V, P)> for PriorityQueue<V, P> {
    fn from_iter<I: IntoIterator<Item = (V, P)>>(iter: I) -> PriorityQueue<V, P> {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}

impl<V: Clone, P: Ord + Clone> Extend<(V, P)> for PriorityQueue<V, P> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

/// An iterator over the entries of a `PriorityQueue` in arbitrary order.
///
/// Acquire through [`PriorityQueue::iter`](struct.PriorityQueue.html#method.iter).
pub struct Iter<'a, V: 'a, P: 'a>(heap::Iter<'a, V, P>);

impl<'a, V, P> Iterator for Iter<'a, V, P> {
    type Item = (&'a V, &'a P);

    #[inline]
    fn next(&mut self) -> Option<(&'a V, &'a P)> {
        self.0.next().map(|(_, node)| (node.item(), node.priority()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, V, P: Ord> IntoIterator for &'a PriorityQueue<V, P> {
    type Item = (&'a V, &'a P);
    type IntoIter = Iter<'a, V, P>;
    fn into_iter(self) -> Iter<'a, V, P> { self.iter() }
}
