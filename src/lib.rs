#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;

/// Fail-fast cursors over the keys, values and entries of a
/// [`HashMap`].
///
/// A cursor does not borrow the map. It is driven by passing the map to each
/// call, and reports an error instead of yielding stale data when the map
/// was structurally modified behind its back.
pub mod cursor;

pub mod error;

/// A HashMap implementation using quadratic probing.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// The open-addressing table underneath [`HashMap`]: tri-state slots,
/// quadratic probing and prime-sized growth.
pub mod hash_table;

/// Live views over the keys, values and entries of a [`HashMap`].
pub mod views;

pub use config::TableConfig;
pub use cursor::EntryCursor;
pub use cursor::KeyCursor;
pub use cursor::ValueCursor;
pub use error::IterError;
pub use hash_map::DefaultHashBuilder;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_table::HashTable;
pub use hash_table::SlotState;
pub use views::EntrySet;
pub use views::KeySet;
pub use views::ValueCollection;
