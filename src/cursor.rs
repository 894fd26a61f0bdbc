use core::marker::PhantomData;

use crate::error::IterError;
use crate::hash_map::HashMap;
use crate::hash_table::HashTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    /// Nothing yielded since creation or the last removal.
    Ready,
    /// The slot at this index was the last one yielded and may be removed.
    Advanced(usize),
    /// A call to `next` found no occupied slot left.
    Exhausted,
}

/// Position and bookkeeping shared by every cursor kind.
#[derive(Debug, Clone)]
struct RawCursor {
    position: usize,
    state: CursorState,
    expected_mod_count: usize,
}

impl RawCursor {
    fn new<T>(table: &HashTable<T>) -> Self {
        Self {
            position: 0,
            state: CursorState::Ready,
            expected_mod_count: table.mod_count(),
        }
    }

    fn check<T>(&self, table: &HashTable<T>) -> Result<(), IterError> {
        let found = table.mod_count();
        if found != self.expected_mod_count {
            return Err(IterError::ConcurrentModification {
                expected: self.expected_mod_count,
                found,
            });
        }
        Ok(())
    }

    fn has_next<T>(&self, table: &HashTable<T>) -> bool {
        table.next_occupied(self.position).is_some()
    }

    fn advance<T>(&mut self, table: &HashTable<T>) -> Result<usize, IterError> {
        self.check(table)?;
        match table.next_occupied(self.position) {
            Some(index) => {
                self.position = index + 1;
                self.state = CursorState::Advanced(index);
                Ok(index)
            }
            None => {
                self.position = table.capacity();
                self.state = CursorState::Exhausted;
                Err(IterError::Exhausted)
            }
        }
    }

    fn current<T>(&self, table: &HashTable<T>) -> Result<usize, IterError> {
        self.check(table)?;
        match self.state {
            CursorState::Advanced(index) => Ok(index),
            CursorState::Ready | CursorState::Exhausted => Err(IterError::IllegalState),
        }
    }

    fn remove<T>(&mut self, table: &mut HashTable<T>) -> Result<T, IterError> {
        let index = self.current(table)?;
        let value = table.remove_at(index).ok_or(IterError::IllegalState)?;
        debug_assert_eq!(table.mod_count(), self.expected_mod_count.wrapping_add(1));
        self.expected_mod_count = table.mod_count();
        self.state = CursorState::Ready;
        Ok(value)
    }
}

/// A fail-fast cursor over the keys of a [`HashMap`].
///
/// The cursor does not borrow the map, so the map can be modified while the
/// cursor is alive. Any structural change not made through the cursor's own
/// [`remove`](KeyCursor::remove) makes the next call to `next` or `remove`
/// fail with [`IterError::ConcurrentModification`].
///
/// Slots are visited in ascending index order.
///
/// # Examples
///
/// ```rust
/// use quad_hash::HashMap;
/// use quad_hash::IterError;
///
/// let mut map = HashMap::new();
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// let mut cursor = map.keys().cursor();
/// cursor.next(&map).unwrap();
///
/// map.insert(3, "c");
/// assert!(matches!(
///     cursor.next(&map),
///     Err(IterError::ConcurrentModification { .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct KeyCursor<K, V> {
    raw: RawCursor,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> KeyCursor<K, V> {
    /// Creates a cursor positioned before the first slot of `map`.
    pub fn new<S>(map: &HashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(&map.table),
            marker: PhantomData,
        }
    }

    /// Returns `true` if an occupied slot remains past the cursor. Calling
    /// this any number of times does not move the cursor.
    pub fn has_next<S>(&self, map: &HashMap<K, V, S>) -> bool {
        self.raw.has_next(&map.table)
    }

    /// Advances to the next occupied slot and returns its key.
    pub fn next<'m, S>(&mut self, map: &'m HashMap<K, V, S>) -> Result<&'m K, IterError> {
        let index = self.raw.advance(&map.table)?;
        map.table
            .get_at(index)
            .map(|(k, _)| k)
            .ok_or(IterError::IllegalState)
    }

    /// Removes the pair whose key was last returned by
    /// [`next`](KeyCursor::next), leaving a tombstone in its slot.
    pub fn remove<S>(&mut self, map: &mut HashMap<K, V, S>) -> Result<(K, V), IterError> {
        self.raw.remove(&mut map.table)
    }
}

/// A fail-fast cursor over the values of a [`HashMap`].
///
/// See [`KeyCursor`] for the modification rules.
#[derive(Debug, Clone)]
pub struct ValueCursor<K, V> {
    raw: RawCursor,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> ValueCursor<K, V> {
    /// Creates a cursor positioned before the first slot of `map`.
    pub fn new<S>(map: &HashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(&map.table),
            marker: PhantomData,
        }
    }

    /// Returns `true` if an occupied slot remains past the cursor.
    pub fn has_next<S>(&self, map: &HashMap<K, V, S>) -> bool {
        self.raw.has_next(&map.table)
    }

    /// Advances to the next occupied slot and returns its value.
    pub fn next<'m, S>(&mut self, map: &'m HashMap<K, V, S>) -> Result<&'m V, IterError> {
        let index = self.raw.advance(&map.table)?;
        map.table
            .get_at(index)
            .map(|(_, v)| v)
            .ok_or(IterError::IllegalState)
    }

    /// Removes the pair whose value was last returned by
    /// [`next`](ValueCursor::next).
    pub fn remove<S>(&mut self, map: &mut HashMap<K, V, S>) -> Result<(K, V), IterError> {
        self.raw.remove(&mut map.table)
    }
}

/// A fail-fast cursor over the key-value pairs of a [`HashMap`].
///
/// Besides removal, the pair last returned by [`next`](EntryCursor::next)
/// can have its value replaced with [`set_value`](EntryCursor::set_value).
/// Replacing a value is not a structural change: it leaves the map's
/// modification count alone and does not disturb other cursors.
///
/// # Examples
///
/// ```rust
/// use quad_hash::HashMap;
///
/// let mut map = HashMap::new();
/// for i in 0..10 {
///     map.insert(i, i * 10);
/// }
///
/// let mut cursor = map.entries().cursor();
/// while cursor.has_next(&map) {
///     let (&key, _) = cursor.next(&map).unwrap();
///     if key % 2 == 0 {
///         cursor.remove(&mut map).unwrap();
///     } else {
///         cursor.set_value(&mut map, key).unwrap();
///     }
/// }
///
/// assert_eq!(map.len(), 5);
/// assert_eq!(map.get(&3), Some(&3));
/// ```
#[derive(Debug, Clone)]
pub struct EntryCursor<K, V> {
    raw: RawCursor,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> EntryCursor<K, V> {
    /// Creates a cursor positioned before the first slot of `map`.
    pub fn new<S>(map: &HashMap<K, V, S>) -> Self {
        Self {
            raw: RawCursor::new(&map.table),
            marker: PhantomData,
        }
    }

    /// Returns `true` if an occupied slot remains past the cursor.
    pub fn has_next<S>(&self, map: &HashMap<K, V, S>) -> bool {
        self.raw.has_next(&map.table)
    }

    /// Advances to the next occupied slot and returns its pair.
    pub fn next<'m, S>(&mut self, map: &'m HashMap<K, V, S>) -> Result<(&'m K, &'m V), IterError> {
        let index = self.raw.advance(&map.table)?;
        map.table
            .get_at(index)
            .map(|(k, v)| (k, v))
            .ok_or(IterError::IllegalState)
    }

    /// Removes the pair last returned by [`next`](EntryCursor::next).
    pub fn remove<S>(&mut self, map: &mut HashMap<K, V, S>) -> Result<(K, V), IterError> {
        self.raw.remove(&mut map.table)
    }

    /// Replaces the value of the pair last returned by
    /// [`next`](EntryCursor::next), returning the old value.
    pub fn set_value<S>(&mut self, map: &mut HashMap<K, V, S>, value: V) -> Result<V, IterError> {
        let index = self.raw.current(&map.table)?;
        let (_, slot_value) = map
            .table
            .get_at_mut(index)
            .ok_or(IterError::IllegalState)?;
        Ok(core::mem::replace(slot_value, value))
    }
}
