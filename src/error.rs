//! Errors reported by the fail-fast cursors in [`cursor`](crate::cursor).

use thiserror::Error;

/// A contract violation detected by a cursor.
///
/// Every variant is reported before the cursor or the map is touched, so the
/// caller can recover: elements already yielded stay valid and the map is
/// unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterError {
    /// The map was structurally modified by something other than this cursor
    /// since the cursor was created or last removed an element.
    #[error(
        "map was modified outside this cursor: expected modification count {expected}, found {found}"
    )]
    ConcurrentModification {
        /// Modification count the cursor expected
        expected: usize,
        /// Modification count the map reported
        found: usize,
    },

    /// `remove` or `set_value` was called without a preceding `next`, or
    /// after the element yielded by the last `next` was already removed.
    #[error("no element to act on: call next() first")]
    IllegalState,

    /// `next` was called with no occupied slots left to visit.
    #[error("cursor is exhausted")]
    Exhausted,
}

impl IterError {
    /// Returns `true` for [`IterError::ConcurrentModification`].
    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}
