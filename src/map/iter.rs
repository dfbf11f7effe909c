//! Borrowing iteration over a [`LongMap`](super::LongMap).

use std::iter::FusedIterator;

use super::chain::{Entry, Link};

/// An iterator over the `(key, value)` pairs of a [`LongMap`](super::LongMap).
///
/// Entries are visited slot by slot in ascending order and, within a slot,
/// from the head of the chain to its tail. Absent values are yielded as
/// `None`.
pub struct LongMapIterator<'a, V> {
    slots: std::slice::Iter<'a, Link<V>>,
    current: Option<&'a Entry<V>>,
    remaining: usize,
}

impl<'a, V> LongMapIterator<'a, V> {
    pub(super) fn new(table: &'a [Link<V>], size: usize) -> Self {
        Self {
            slots: table.iter(),
            current: None,
            remaining: size,
        }
    }
}

impl<'a, V> Iterator for LongMapIterator<'a, V> {
    type Item = (i64, Option<&'a V>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current.is_none() {
            self.current = self.slots.next()?.as_deref();
        }
        let entry = self.current?;
        self.current = entry.next.as_deref();
        self.remaining -= 1;
        Some((entry.key, entry.value.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for LongMapIterator<'_, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<V> FusedIterator for LongMapIterator<'_, V> {}
