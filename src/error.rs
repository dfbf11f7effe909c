//! Error types for [`LongMap`](crate::LongMap).
//!
//! Every failure in this crate is an invalid argument supplied by the caller:
//! a non-positive table capacity, or a missing key passed to one of the
//! `try_*` operations. Lookups that find nothing are not errors; they return
//! `None`.

/// Represents an argument rejected by a [`LongMap`](crate::LongMap) operation.
///
/// # Examples
///
/// ```rust
/// use longmap::{InvalidArgumentError, LongMap};
///
/// let error = LongMap::<String>::with_capacity(0).unwrap_err();
/// assert_eq!(error, InvalidArgumentError::NonPositiveCapacity(0));
/// assert_eq!(format!("{error}"), "capacity must be positive, got 0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgumentError {
    /// The requested table capacity was zero or negative.
    #[error("capacity must be positive, got {0}")]
    NonPositiveCapacity(i64),
    /// A key-taking operation received no key.
    #[error("{operation}: key must not be null")]
    NullKey {
        /// The name of the operation that rejected the key.
        operation: &'static str,
    },
}
