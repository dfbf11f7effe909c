//! Bucket chains: singly linked lists of entries sharing one slot.

/// A link to the next entry of a chain, or the head held by a table slot.
pub(super) type Link<V> = Option<Box<Entry<V>>>;

/// One key/value pair of a chain.
///
/// The slot owns the head entry and every entry owns its successor.
pub(super) struct Entry<V> {
    pub(super) key: i64,
    /// `None` is a stored absent value, distinct from a missing key.
    pub(super) value: Option<V>,
    pub(super) next: Link<V>,
}

impl<V> Entry<V> {
    pub(super) const fn new(key: i64, value: Option<V>) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }
}

// Unlink successors one at a time; the derived drop would recurse once per
// entry and chains are unbounded once the table stops growing.
impl<V> Drop for Entry<V> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut entry) = next {
            next = entry.next.take();
        }
    }
}

/// Finds the entry holding `key` in the chain starting at `head`.
pub(super) fn find<V>(head: &Link<V>, key: i64) -> Option<&Entry<V>> {
    let mut current = head.as_deref();
    while let Some(entry) = current {
        if entry.key == key {
            return Some(entry);
        }
        current = entry.next.as_deref();
    }
    None
}

/// Outcome of [`put`] on a chain.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Placement<V> {
    /// The key was already present; holds the value it had before.
    Replaced(Option<V>),
    /// A new entry was linked at the tail.
    Inserted,
}

/// Replaces the value of `key` in place, or appends a new entry at the tail.
pub(super) fn put<V>(head: &mut Link<V>, key: i64, value: Option<V>) -> Placement<V> {
    let mut cursor = head;
    while let Some(entry) = cursor {
        if entry.key == key {
            return Placement::Replaced(std::mem::replace(&mut entry.value, value));
        }
        cursor = &mut entry.next;
    }
    *cursor = Some(Box::new(Entry::new(key, value)));
    Placement::Inserted
}

/// Unlinks the entry holding `key` and returns it.
pub(super) fn unlink<V>(head: &mut Link<V>, key: i64) -> Option<Box<Entry<V>>> {
    if head.as_ref()?.key == key {
        let mut removed = head.take()?;
        *head = removed.next.take();
        return Some(removed);
    }

    let mut previous = head.as_mut()?;
    loop {
        if previous.next.as_ref()?.key == key {
            let mut removed = previous.next.take()?;
            previous.next = removed.next.take();
            return Some(removed);
        }
        previous = previous.next.as_mut()?;
    }
}

/// Iterates the entries of one chain from head to tail.
pub(super) fn entries<V>(head: &Link<V>) -> impl Iterator<Item = &Entry<V>> {
    std::iter::successors(head.as_deref(), |entry| entry.next.as_deref())
}

/// Detaches every entry of a chain, yielding owned key/value pairs in order.
pub(super) fn drain<V>(head: Link<V>) -> impl Iterator<Item = (i64, Option<V>)> {
    let mut current = head;
    std::iter::from_fn(move || {
        let mut entry = current.take()?;
        current = entry.next.take();
        Some((entry.key, entry.value.take()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chain_of(pairs: &[(i64, &'static str)]) -> Link<&'static str> {
        let mut head = None;
        for &(key, value) in pairs {
            let _ = put(&mut head, key, Some(value));
        }
        head
    }

    fn keys_of(head: &Link<&'static str>) -> Vec<i64> {
        entries(head).map(|entry| entry.key).collect()
    }

    #[rstest]
    fn test_put_appends_at_tail() {
        let head = chain_of(&[(1, "a"), (9, "b"), (17, "c")]);
        assert_eq!(keys_of(&head), vec![1, 9, 17]);
    }

    #[rstest]
    fn test_put_replaces_in_place() {
        let mut head = chain_of(&[(1, "a"), (9, "b"), (17, "c")]);
        assert_eq!(put(&mut head, 9, Some("B")), Placement::Replaced(Some("b")));
        assert_eq!(keys_of(&head), vec![1, 9, 17]);
        assert_eq!(find(&head, 9).and_then(|entry| entry.value), Some("B"));
    }

    #[rstest]
    fn test_put_new_key_reports_insertion() {
        let mut head = chain_of(&[(1, "a")]);
        assert_eq!(put(&mut head, 2, None), Placement::Inserted);
    }

    #[rstest]
    #[case(1, vec![9, 17])]
    #[case(9, vec![1, 17])]
    #[case(17, vec![1, 9])]
    fn test_unlink_by_position(#[case] key: i64, #[case] remaining: Vec<i64>) {
        let mut head = chain_of(&[(1, "a"), (9, "b"), (17, "c")]);
        let removed = unlink(&mut head, key).map(|entry| entry.key);
        assert_eq!(removed, Some(key));
        assert_eq!(keys_of(&head), remaining);
    }

    #[rstest]
    fn test_unlink_missing_key() {
        let mut head = chain_of(&[(1, "a"), (9, "b")]);
        assert!(unlink(&mut head, 5).is_none());
        assert!(unlink(&mut None::<Box<Entry<&str>>>, 5).is_none());
        assert_eq!(keys_of(&head), vec![1, 9]);
    }

    #[rstest]
    fn test_unlink_only_entry_empties_slot() {
        let mut head = chain_of(&[(4, "a")]);
        assert!(unlink(&mut head, 4).is_some());
        assert!(head.is_none());
    }

    #[rstest]
    fn test_drain_preserves_order() {
        let head = chain_of(&[(3, "x"), (11, "y")]);
        let drained: Vec<_> = drain(head).collect();
        assert_eq!(drained, vec![(3, Some("x")), (11, Some("y"))]);
    }

    #[rstest]
    fn test_long_chain_drops_without_overflow() {
        let mut head: Link<u64> = None;
        for key in 0..200_000 {
            head = Some(Box::new(Entry {
                key,
                value: Some(0),
                next: head.take(),
            }));
        }
        drop(head);
    }
}
