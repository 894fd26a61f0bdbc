use core::borrow::Borrow;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::cursor::EntryCursor;
use crate::cursor::KeyCursor;
use crate::cursor::ValueCursor;
use crate::hash_map::HashMap;
use crate::hash_map::Iter;
use crate::hash_map::IterMut;
use crate::hash_map::Keys;
use crate::hash_map::Values;
use crate::hash_map::ValuesMut;

/// A live view of the keys of a [`HashMap`].
///
/// The view holds no state of its own: every call reads or changes the map
/// as it is at that moment. Removing a key through the view removes its
/// whole pair from the map.
///
/// Created by [`HashMap::keys`].
pub struct KeySet<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> KeySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Returns the number of keys in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every pair from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns an iterator over the keys, in slot order.
    pub fn iter(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.map.iter(),
        }
    }

    /// Returns a fail-fast cursor over the keys.
    pub fn cursor(&self) -> KeyCursor<K, V> {
        KeyCursor::new(self.map)
    }
}

impl<K, V, S> KeySet<'_, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the map contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Removes `key` and its value from the map. Returns `true` if the key
    /// was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove_entry(key).is_some()
    }
}

impl<'v, K, V, S> IntoIterator for &'v KeySet<'_, K, V, S> {
    type IntoIter = Keys<'v, K, V>;
    type Item = &'v K;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A live view of the values of a [`HashMap`].
///
/// Created by [`HashMap::values`].
pub struct ValueCollection<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> ValueCollection<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Returns the number of values in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map holds no values.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every pair from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns an iterator over the values, in slot order.
    pub fn iter(&self) -> Values<'_, K, V> {
        Values {
            inner: self.map.iter(),
        }
    }

    /// Returns an iterator over mutable references to the values.
    pub fn iter_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.map.values_mut()
    }

    /// Returns a fail-fast cursor over the values.
    pub fn cursor(&self) -> ValueCursor<K, V> {
        ValueCursor::new(self.map)
    }

    /// Returns `true` if some key maps to a value equal to `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }

    /// Removes the pair in the lowest-indexed slot whose value equals
    /// `value`. Returns `true` if such a pair existed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 1);
    ///
    /// assert!(map.values().remove(&1));
    /// assert_eq!(map.len(), 1);
    /// assert!(!map.values().remove(&2));
    /// ```
    pub fn remove(&mut self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let table = &mut self.map.table;
        let found = (0..table.capacity())
            .find(|&index| matches!(table.get_at(index), Some((_, v)) if v == value));
        match found {
            Some(index) => table.remove_at(index).is_some(),
            None => false,
        }
    }
}

impl<'v, K, V, S> IntoIterator for &'v ValueCollection<'_, K, V, S> {
    type IntoIter = Values<'v, K, V>;
    type Item = &'v V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A live view of the key-value pairs of a [`HashMap`].
///
/// Created by [`HashMap::entries`].
pub struct EntrySet<'a, K, V, S> {
    map: &'a mut HashMap<K, V, S>,
}

impl<'a, K, V, S> EntrySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut HashMap<K, V, S>) -> Self {
        Self { map }
    }

    /// Returns the number of pairs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every pair from the map.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns an iterator over the pairs, in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Returns an iterator over the pairs with mutable values. Writing a
    /// value does not count as a structural change.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.map.iter_mut()
    }

    /// Returns a fail-fast cursor over the pairs.
    pub fn cursor(&self) -> EntryCursor<K, V> {
        EntryCursor::new(self.map)
    }
}

impl<K, V, S> EntrySet<'_, K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    /// Returns `true` if `key` is present and maps to a value equal to
    /// `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key) == Some(value)
    }

    /// Removes the pair for `key` if it maps to a value equal to `value`.
    /// Returns `true` if a pair was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("a", 1);
    ///
    /// let mut entries = map.entries();
    /// assert!(!entries.remove(&"a", &2));
    /// assert!(entries.remove(&"a", &1));
    /// assert!(entries.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(index) = self.map.find_index(key) else {
            return false;
        };
        let table = &mut self.map.table;
        match table.get_at(index) {
            Some((_, v)) if v == value => table.remove_at(index).is_some(),
            _ => false,
        }
    }
}

impl<'v, K, V, S> IntoIterator for &'v EntrySet<'_, K, V, S> {
    type IntoIter = Iter<'v, K, V>;
    type Item = (&'v K, &'v V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
