//! # longmap
//!
//! A mutable hash map keyed by 64-bit signed integers, resolving collisions
//! by separate chaining.
//!
//! ## Overview
//!
//! - [`LongMap`]: the map itself, with `put`, `get`, `remove`, membership
//!   tests, key/value enumeration, `size` and `clear`
//! - [`slot_index`]: the pure key-to-slot derivation shared by every
//!   operation
//! - [`InvalidArgumentError`]: the single error type, for non-positive
//!   capacities and missing keys
//!
//! The table starts at [`DEFAULT_CAPACITY`] slots and doubles whenever the
//! load factor reaches [`RESIZE_THRESHOLD`], up to [`MAXIMUM_CAPACITY`].
//! Growth is reported through `tracing` at debug level.
//!
//! ## Example
//!
//! ```rust
//! use longmap::prelude::*;
//!
//! let mut map: LongMap<String> = LongMap::with_capacity(8)?;
//! map.put(1, "value 1".to_string());
//! map.put(2, "value 2".to_string());
//!
//! assert_eq!(map.keys(), vec![1, 2]);
//! assert_eq!(map.get(2).map(String::as_str), Some("value 2"));
//! # Ok::<(), InvalidArgumentError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use longmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::InvalidArgumentError;
    pub use crate::map::{LongMap, LongMapIterator};
}

pub mod error;
pub mod map;

pub use error::InvalidArgumentError;
pub use map::{
    DEFAULT_CAPACITY, LongMap, LongMapIterator, MAXIMUM_CAPACITY, RESIZE_THRESHOLD, slot_index,
};
