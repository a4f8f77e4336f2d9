// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A circular doubly linked sequence with owned elements.
//!
//! Elements live in a `SlotMap` and are chained through `prev`/`next` links. The
//! last element's `next` is the first element and the first element's `prev` is
//! the last, so both ends are reachable in `O(1)` from the `first` link alone.
//!
//! Appending hands back a [`Link`] that removes the element in `O(1)`. An element
//! knows its neighbours but not its position, so index-based removal seeks from
//! the front in `O(n)`.

use std::fmt::{self, Debug};
use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an element of a [`Sequence`].
    ///
    /// Only meaningful for the sequence that issued it.
    pub struct Link;
}

#[derive(Clone)]
struct Entry<T> {
    value: T,
    prev: Link,
    next: Link,
}

/// A circular doubly linked list.
#[derive(Clone)]
pub struct Sequence<T> {
    entries: SlotMap<Link, Entry<T>>,
    first: Option<Link>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Sequence<T> {
        Sequence::new()
    }
}

impl<T> Sequence<T> {
    /// Returns an empty sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::list::Sequence;
    ///
    /// let seq = Sequence::<u32>::new();
    /// assert!(seq.is_empty());
    /// assert_eq!(seq.first(), None);
    /// ```
    pub fn new() -> Sequence<T> {
        Sequence { entries: SlotMap::with_key(), first: None }
    }

    /// Returns an empty sequence able to hold `capacity` elements without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Sequence<T> {
        Sequence { entries: SlotMap::with_capacity_and_key(capacity), first: None }
    }

    /// Returns the number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the sequence contains no elements.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Returns the link of the first element.
    pub fn first(&self) -> Option<Link> {
        self.first
    }

    /// Returns the link of the last element.
    pub fn last(&self) -> Option<Link> {
        self.first.map(|first| self.entries[first].prev)
    }

    /// Returns the link following `link`, or `None` if `link` is the last
    /// element or not part of this sequence.
    pub fn next(&self, link: Link) -> Option<Link> {
        let next = self.entries.get(link)?.next;
        if Some(next) == self.first { None } else { Some(next) }
    }

    /// Returns the link preceding `link`, or `None` if `link` is the first
    /// element or not part of this sequence.
    pub fn prev(&self, link: Link) -> Option<Link> {
        let prev = self.entries.get(link)?.prev;
        if Some(link) == self.first { None } else { Some(prev) }
    }

    /// Returns a reference to the element behind `link`.
    pub fn get(&self, link: Link) -> Option<&T> {
        self.entries.get(link).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the element behind `link`.
    pub fn get_mut(&mut self, link: Link) -> Option<&mut T> {
        self.entries.get_mut(link).map(|entry| &mut entry.value)
    }

    /// Appends an element and returns its link.
    ///
    /// # Examples
    ///
    /// ```
    /// use binomial_depq::list::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// let a = seq.push_back('a');
    /// let b = seq.push_back('b');
    /// assert_eq!(seq.first(), Some(a));
    /// assert_eq!(seq.last(), Some(b));
    /// assert_eq!(seq[b], 'b');
    /// ```
    pub fn push_back(&mut self, value: T) -> Link {
        match self.first {
            None => {
                let link = self.entries.insert_with_key(|link| Entry { value, prev: link, next: link });
                self.first = Some(link);
                link
            }
            Some(first) => {
                let last = self.entries[first].prev;
                let link = self.entries.insert(Entry { value, prev: last, next: first });
                self.entries[last].next = link;
                self.entries[first].prev = link;
                link
            }
        }
    }

    /// Removes the element behind `link` and returns it.
    ///
    /// Returns `None` if `link` is not part of this sequence.
    pub fn remove(&mut self, link: Link) -> Option<T> {
        let entry = self.entries.remove(link)?;
        if self.entries.is_empty() {
            self.first = None;
        } else {
            self.entries[entry.prev].next = entry.next;
            self.entries[entry.next].prev = entry.prev;
            if self.first == Some(link) {
                self.first = Some(entry.next);
            }
        }
        Some(entry.value)
    }

    /// Removes the element at position `index`, seeking from the front.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let link = self.links().nth(index)?;
        self.remove(link)
    }

    /// Removes the first element and returns it.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.first?;
        self.remove(first)
    }

    /// Returns the link of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<Link>
        where T: PartialEq
    {
        self.links().find(|&link| self.entries[link].value == *value)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.first = None;
    }

    /// Returns an iterator over the links of the sequence, front to back.
    pub fn links(&self) -> Links<T> {
        Links { seq: self, cursor: self.first, remaining: self.len() }
    }

    /// Returns an iterator over the elements of the sequence, front to back.
    pub fn iter(&self) -> Iter<T> {
        Iter(self.links())
    }
}

impl<T> Index<Link> for Sequence<T> {
    type Output = T;

    fn index(&self, link: Link) -> &T {
        &self.entries[link].value
    }
}

impl<T> IndexMut<Link> for Sequence<T> {
    fn index_mut(&mut self, link: Link) -> &mut T {
        &mut self.entries[link].value
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Sequence<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Sequence<T> {
        let mut seq = Sequence::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

/// An iterator over the links of a `Sequence`, front to back.
///
/// Acquire through [`Sequence::links`].
pub struct Links<'a, T: 'a> {
    seq: &'a Sequence<T>,
    cursor: Option<Link>,
    remaining: usize,
}

impl<'a, T> Clone for Links<'a, T> {
    fn clone(&self) -> Links<'a, T> {
        Links { seq: self.seq, cursor: self.cursor, remaining: self.remaining }
    }
}

impl<'a, T> Iterator for Links<'a, T> {
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        let link = self.cursor?;
        self.cursor = self.seq.next(link);
        self.remaining -= 1;
        Some(link)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Links<'a, T> {}

/// An iterator over the elements of a `Sequence`, front to back.
///
/// Acquire through [`Sequence::iter`].
pub struct Iter<'a, T: 'a>(Links<'a, T>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let seq = self.0.seq;
        self.0.next().map(move |link| &seq.entries[link].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A consuming iterator over a `Sequence`, front to back.
pub struct IntoIter<T>(Sequence<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> { self.0.pop_front() }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.0.len(), Some(self.0.len())) }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter(self) }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}
