//! Separately chained hash map keyed by `i64`.
//!
//! This module provides [`LongMap`], a mutable associative container whose
//! keys are 64-bit signed integers.
//!
//! # Overview
//!
//! The map owns a table of slots. Each slot is either empty or the head of a
//! singly linked chain of entries whose keys derive the same slot through
//! [`slot_index`]. The table doubles when the load factor reaches
//! [`RESIZE_THRESHOLD`], up to [`MAXIMUM_CAPACITY`] slots; past that chains
//! simply grow longer.
//!
//! - O(1) average `get`, `put`, `remove` below the maximum capacity
//! - O(size) growth, amortized across puts
//! - O(capacity + size) `keys`, `values`, `contains_value`
//!
//! # Absent values
//!
//! A key may be mapped to an absent value (`None`). Such a key is reported by
//! [`LongMap::contains_mapping`] but not by [`LongMap::contains_key`], and
//! [`LongMap::get`] returns `None` for it just as for a missing key.
//!
//! # Examples
//!
//! ```rust
//! use longmap::LongMap;
//!
//! let mut map: LongMap<&str> = LongMap::new();
//! assert_eq!(map.put(1, "one"), None);
//! assert_eq!(map.put(1, "uno"), Some("one"));
//! assert_eq!(map.get(1), Some(&"uno"));
//! assert_eq!(map.remove(1), Some("uno"));
//! assert!(map.is_empty());
//! ```

mod chain;
mod iter;

pub use iter::LongMapIterator;

use std::fmt;

use chain::{Link, Placement};

use crate::error::InvalidArgumentError;

// =============================================================================
// Constants
// =============================================================================

/// Table length of a map built with [`LongMap::new`] or reset by
/// [`LongMap::clear`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Upper bound on the table length (2^20).
pub const MAXIMUM_CAPACITY: usize = 1 << 20;

/// Load factor at which `put` grows the table.
pub const RESIZE_THRESHOLD: f64 = 1.0;

// =============================================================================
// Index derivation
// =============================================================================

/// Derives the slot of `key` in a table of `length` slots.
///
/// The result is `|key rem length|` with truncating remainder, computed on the
/// unsigned magnitude of the key so that no key overflows. For `i64::MIN` the
/// magnitude is 2^63, hence `slot_index(i64::MIN, length)` is
/// `2^63 mod length`: zero for every power-of-two length.
///
/// # Panics
///
/// Panics if `length` is zero.
///
/// # Examples
///
/// ```rust
/// use longmap::slot_index;
///
/// assert_eq!(slot_index(11, 8), 3);
/// assert_eq!(slot_index(-11, 8), 3);
/// assert_eq!(slot_index(i64::MIN, 8), 0);
/// assert_eq!(slot_index(i64::MIN, 3), 2);
/// ```
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn slot_index(key: i64, length: usize) -> usize {
    // The remainder is below `length`, so it fits back into `usize`.
    (key.unsigned_abs() % length as u64) as usize
}

// =============================================================================
// LongMap Definition
// =============================================================================

/// A hash map from `i64` keys to values of type `V`, resolving collisions by
/// separate chaining.
///
/// # Time Complexity
///
/// | Operation        | Complexity                 |
/// |------------------|----------------------------|
/// | `new`            | O(1)                       |
/// | `get`            | O(1) average               |
/// | `put`            | O(1) amortized             |
/// | `remove`         | O(1) average               |
/// | `contains_value` | O(capacity + size)         |
/// | `keys`/`values`  | O(capacity + size)         |
/// | `size`           | O(1)                       |
/// | `clear`          | O(capacity + size)         |
///
/// Chains degrade to linear scans once the table has reached
/// [`MAXIMUM_CAPACITY`] and the map keeps growing.
///
/// # Examples
///
/// ```rust
/// use longmap::LongMap;
///
/// let map: LongMap<&str> = [(3, "three"), (1, "one")].into_iter().collect();
/// assert_eq!(map.size(), 2);
/// assert_eq!(map.keys(), vec![1, 3]);
/// ```
pub struct LongMap<V> {
    /// Slots, each holding an optional chain head
    table: Vec<Link<V>>,
    /// Number of entries across all chains
    size: usize,
}

impl<V> LongMap<V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::{DEFAULT_CAPACITY, LongMap};
    ///
    /// let map: LongMap<i32> = LongMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: empty_table(DEFAULT_CAPACITY),
            size: 0,
        }
    }

    /// Creates an empty map with `capacity` slots, clamped to
    /// [`MAXIMUM_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::NonPositiveCapacity`] if `capacity` is
    /// zero or negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::{LongMap, MAXIMUM_CAPACITY};
    ///
    /// let map: LongMap<i32> = LongMap::with_capacity(33).unwrap();
    /// assert_eq!(map.capacity(), 33);
    ///
    /// let map: LongMap<i32> = LongMap::with_capacity(i64::MAX).unwrap();
    /// assert_eq!(map.capacity(), MAXIMUM_CAPACITY);
    ///
    /// assert!(LongMap::<i32>::with_capacity(-2).is_err());
    /// ```
    pub fn with_capacity(capacity: i64) -> Result<Self, InvalidArgumentError> {
        if capacity <= 0 {
            return Err(InvalidArgumentError::NonPositiveCapacity(capacity));
        }
        let length = usize::try_from(capacity).map_or(MAXIMUM_CAPACITY, |length| {
            length.min(MAXIMUM_CAPACITY)
        });
        Ok(Self {
            table: empty_table(length),
            size: 0,
        })
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current number of slots in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<char> = LongMap::with_capacity(2).unwrap();
    /// map.put(1, 'a');
    /// map.put(2, 'b');
    /// map.put(3, 'c');
    /// assert_eq!(map.capacity(), 4);
    /// ```
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Maps `key` to `value`, returning the value previously stored under
    /// `key`.
    ///
    /// `value` may be a `V` or an `Option<V>`; storing `None` keeps the key
    /// in the map with an absent value. The return is `None` both for a new
    /// key and for a key whose previous value was absent.
    ///
    /// The table grows, when due, before the entry is placed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<String> = LongMap::new();
    /// assert_eq!(map.put(25, "Old value".to_string()), None);
    /// assert_eq!(map.put(25, "New value".to_string()), Some("Old value".to_string()));
    /// assert_eq!(map.size(), 1);
    ///
    /// map.put(7, None);
    /// assert!(map.contains_mapping(7));
    /// ```
    pub fn put(&mut self, key: i64, value: impl Into<Option<V>>) -> Option<V> {
        self.grow_if_needed();
        self.place(key, value.into())
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Returns `None` if `key` is missing or mapped to an absent value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.put(3, "Correct value");
    /// assert_eq!(map.get(3), Some(&"Correct value"));
    /// assert_eq!(map.get(100), None);
    /// ```
    pub fn get(&self, key: i64) -> Option<&V> {
        chain::find(&self.table[self.slot_of(key)], key)?.value.as_ref()
    }

    /// Removes `key` from the map, returning its stored value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.put(1, "value");
    /// assert_eq!(map.remove(1), Some("value"));
    /// assert_eq!(map.remove(1), None);
    /// assert_eq!(map.size(), 0);
    /// ```
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let slot = self.slot_of(key);
        let mut removed = chain::unlink(&mut self.table[slot], key)?;
        self.size -= 1;
        removed.value.take()
    }

    /// Returns `true` if `key` maps to a present value.
    ///
    /// A key mapped to an absent value reports `false`; use
    /// [`contains_mapping`](Self::contains_mapping) to test for the entry
    /// itself.
    #[inline]
    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Returns `true` if the map has an entry for `key`, whatever its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<i32> = LongMap::new();
    /// map.put(5, None);
    /// assert!(!map.contains_key(5));
    /// assert!(map.contains_mapping(5));
    /// ```
    pub fn contains_mapping(&self, key: i64) -> bool {
        chain::find(&self.table[self.slot_of(key)], key).is_some()
    }

    /// Returns every key, ordered by slot and then by position in the chain.
    ///
    /// An empty map yields an empty vector.
    pub fn keys(&self) -> Vec<i64> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns every stored value in the same order as [`keys`](Self::keys).
    ///
    /// **An empty map yields `None`, not an empty vector.** Absent values
    /// appear as `None` elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<i32> = LongMap::new();
    /// assert_eq!(map.values(), None);
    /// assert!(map.keys().is_empty());
    ///
    /// map.put(1, 12);
    /// map.put(2, 13);
    /// assert_eq!(map.values(), Some(vec![Some(&12), Some(&13)]));
    /// ```
    pub fn values(&self) -> Option<Vec<Option<&V>>> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().map(|(_, value)| value).collect())
    }

    /// Discards every entry and restores a [`DEFAULT_CAPACITY`] table.
    pub fn clear(&mut self) {
        tracing::trace!(
            size = self.size,
            capacity = self.table.len(),
            "clearing long map"
        );
        self.table = empty_table(DEFAULT_CAPACITY);
        self.size = 0;
    }

    /// Returns an iterator over `(key, value)` pairs in slot and chain order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.put(2, "b");
    /// map.put(1, None);
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, vec![(1, None), (2, Some(&"b"))]);
    /// ```
    pub fn iter(&self) -> LongMapIterator<'_, V> {
        LongMapIterator::new(&self.table, self.size)
    }

    /// Maps a missing key to an error, then stores `value` like
    /// [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::NullKey`] if `key` is `None`.
    pub fn try_put(
        &mut self,
        key: Option<i64>,
        value: impl Into<Option<V>>,
    ) -> Result<Option<V>, InvalidArgumentError> {
        Ok(self.put(require_key(key, "put")?, value))
    }

    /// Maps a missing key to an error, then looks it up like
    /// [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::NullKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::{InvalidArgumentError, LongMap};
    ///
    /// let map: LongMap<i32> = LongMap::new();
    /// assert_eq!(map.try_get(Some(1)), Ok(None));
    /// assert_eq!(
    ///     map.try_get(None),
    ///     Err(InvalidArgumentError::NullKey { operation: "get" })
    /// );
    /// ```
    pub fn try_get(&self, key: Option<i64>) -> Result<Option<&V>, InvalidArgumentError> {
        Ok(self.get(require_key(key, "get")?))
    }

    /// Maps a missing key to an error, then removes it like
    /// [`remove`](Self::remove).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::NullKey`] if `key` is `None`.
    pub fn try_remove(&mut self, key: Option<i64>) -> Result<Option<V>, InvalidArgumentError> {
        Ok(self.remove(require_key(key, "remove")?))
    }

    /// Maps a missing key to an error, then tests it like
    /// [`contains_key`](Self::contains_key).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::NullKey`] if `key` is `None`.
    pub fn try_contains_key(&self, key: Option<i64>) -> Result<bool, InvalidArgumentError> {
        Ok(self.contains_key(require_key(key, "contains_key")?))
    }

    #[inline]
    fn slot_of(&self, key: i64) -> usize {
        slot_index(key, self.table.len())
    }

    /// Places an entry into the current table without checking growth.
    fn place(&mut self, key: i64, value: Option<V>) -> Option<V> {
        let slot = self.slot_of(key);
        match chain::put(&mut self.table[slot], key, value) {
            Placement::Replaced(previous) => previous,
            Placement::Inserted => {
                self.size += 1;
                None
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn grow_if_needed(&mut self) {
        let length = self.table.len();
        if length != MAXIMUM_CAPACITY && self.size as f64 / length as f64 >= RESIZE_THRESHOLD {
            self.rehash(length.saturating_mul(2).min(MAXIMUM_CAPACITY));
        }
    }

    /// Rebuilds the table with `new_length` slots, re-placing every entry in
    /// slot order and then chain order.
    fn rehash(&mut self, new_length: usize) {
        let old_table = std::mem::replace(&mut self.table, empty_table(new_length));
        let old_length = old_table.len();
        let old_size = std::mem::take(&mut self.size);

        for head in old_table {
            for (key, value) in chain::drain(head) {
                self.place(key, value);
            }
        }
        debug_assert_eq!(self.size, old_size);

        tracing::debug!(
            from = old_length,
            to = new_length,
            size = self.size,
            "grew long map table"
        );
        if new_length == MAXIMUM_CAPACITY {
            tracing::debug!(
                capacity = MAXIMUM_CAPACITY,
                "long map reached maximum capacity; chains grow from here"
            );
        }
    }
}

impl<V: PartialEq> LongMap<V> {
    /// Returns `true` if some entry stores `value`.
    ///
    /// `None` matches entries holding an absent value; `Some(v)` matches
    /// entries holding a value equal to `v`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use longmap::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// assert!(!map.contains_value(None));
    ///
    /// map.put(1, "Some value");
    /// map.put(2, None);
    /// assert!(map.contains_value(Some(&"Some value")));
    /// assert!(map.contains_value(None));
    /// assert!(!map.contains_value(Some(&"Value")));
    /// ```
    pub fn contains_value(&self, value: Option<&V>) -> bool {
        self.iter().any(|(_, stored)| stored == value)
    }
}

fn empty_table<V>(length: usize) -> Vec<Link<V>> {
    std::iter::repeat_with(|| None).take(length).collect()
}

const fn require_key(
    key: Option<i64>,
    operation: &'static str,
) -> Result<i64, InvalidArgumentError> {
    match key {
        Some(key) => Ok(key),
        None => Err(InvalidArgumentError::NullKey { operation }),
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<V> Default for LongMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for LongMap<V> {
    fn clone(&self) -> Self {
        let mut table = empty_table(self.table.len());
        for (slot, head) in table.iter_mut().zip(&self.table) {
            for entry in chain::entries(head) {
                let placement = chain::put(slot, entry.key, entry.value.clone());
                debug_assert!(matches!(placement, Placement::Inserted));
            }
        }
        Self {
            table,
            size: self.size,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for LongMap<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<V> FromIterator<(i64, V)> for LongMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> Extend<(i64, V)> for LongMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, V> IntoIterator for &'a LongMap<V> {
    type Item = (i64, Option<&'a V>);
    type IntoIter = LongMapIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_creates_empty() {
        let map: LongMap<String> = LongMap::new();
        assert!(map.is_empty());
        assert_eq!(map.size(), 0);
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(33, 33)]
    #[case(1 << 20, MAXIMUM_CAPACITY)]
    #[case((1 << 20) + 1, MAXIMUM_CAPACITY)]
    fn test_with_capacity_clamps(#[case] requested: i64, #[case] expected: usize) {
        let map: LongMap<u8> = LongMap::with_capacity(requested).unwrap();
        assert_eq!(map.capacity(), expected);
    }

    #[rstest]
    #[case(11, 8, 3)]
    #[case(-11, 8, 3)]
    #[case(0, 8, 0)]
    #[case(i64::MAX, 8, 7)]
    #[case(i64::MIN, 8, 0)]
    #[case(i64::MIN, 3, 2)]
    #[case(i64::MIN + 1, 8, 7)]
    fn test_slot_index(#[case] key: i64, #[case] length: usize, #[case] expected: usize) {
        assert_eq!(slot_index(key, length), expected);
    }

    #[rstest]
    fn test_growth_happens_before_placement() {
        let mut map: LongMap<&str> = LongMap::with_capacity(2).unwrap();
        map.put(0, "a");
        map.put(1, "b");
        assert_eq!(map.capacity(), 2);

        // Load is 1.0 here; the third put grows first and lands in slot 2.
        map.put(2, "c");
        assert_eq!(map.capacity(), 4);
        assert_eq!(chain::entries(&map.table[2]).count(), 1);
        assert_eq!(map.keys(), vec![0, 1, 2]);
    }

    #[rstest]
    fn test_chain_forms_at_maximum_capacity() {
        let mut map: LongMap<i64> = LongMap::with_capacity(1 << 20).unwrap();
        let step = i64::try_from(MAXIMUM_CAPACITY).unwrap();
        for multiple in 0..3 {
            map.put(multiple * step, multiple);
        }
        map.put(i64::MAX, 0);
        assert_eq!(map.capacity(), MAXIMUM_CAPACITY);
        assert_eq!(chain::entries(&map.table[0]).count(), 3);
    }

    #[rstest]
    fn test_no_growth_past_maximum_capacity_when_overloaded() {
        let mut map: LongMap<i64> = LongMap::with_capacity(1 << 20).unwrap();
        let length = i64::try_from(MAXIMUM_CAPACITY).unwrap();
        for key in 0..length {
            map.put(key, key);
        }
        assert_eq!(map.size(), MAXIMUM_CAPACITY);

        // Load factor is 1.0 and then above it; the table stays at the maximum.
        for key in length..length + 3 {
            map.put(key, key);
            assert_eq!(map.capacity(), MAXIMUM_CAPACITY);
        }
        assert_eq!(map.size(), MAXIMUM_CAPACITY + 3);
        assert_eq!(chain::entries(&map.table[0]).count(), 2);
        assert_eq!(map.get(length + 2), Some(&(length + 2)));
    }

    #[rstest]
    fn test_clone_preserves_chain_order() {
        let mut map: LongMap<i64> = LongMap::with_capacity(4).unwrap();
        for key in [0, 4, 8] {
            map.put(key, key);
        }
        let cloned = map.clone();
        assert_eq!(cloned.size(), 3);
        assert_eq!(
            chain::entries(&cloned.table[0]).map(|entry| entry.key).collect::<Vec<_>>(),
            vec![0, 4, 8]
        );
    }

    #[rstest]
    fn test_rehash_keeps_chain_order_within_slot() {
        let mut map: LongMap<i64> = LongMap::with_capacity(4).unwrap();
        for key in [0, 4, 8, 12] {
            map.put(key, key);
        }
        map.put(1, 1);
        assert_eq!(map.capacity(), 8);
        assert_eq!(
            chain::entries(&map.table[0]).map(|entry| entry.key).collect::<Vec<_>>(),
            vec![0, 8]
        );
        assert_eq!(
            chain::entries(&map.table[4]).map(|entry| entry.key).collect::<Vec<_>>(),
            vec![4, 12]
        );
    }

    #[rstest]
    fn test_clone_is_independent() {
        let mut original: LongMap<String> = (0..40).map(|key| (key, key.to_string())).collect();
        let cloned = original.clone();
        original.put(0, "changed".to_string());

        assert_eq!(cloned.get(0), Some(&"0".to_string()));
        assert_eq!(cloned.keys(), original.keys());
        assert_eq!(cloned.capacity(), original.capacity());
    }

    #[rstest]
    fn test_debug_format() {
        let mut map: LongMap<&str> = LongMap::new();
        map.put(1, "a");
        map.put(2, None);
        assert_eq!(format!("{map:?}"), r#"{1: Some("a"), 2: None}"#);
    }
}
