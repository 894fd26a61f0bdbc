use core::borrow::Borrow;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::config::TableConfig;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::views::EntrySet;
use crate::views::KeySet;
use crate::views::ValueCollection;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder a [`HashMap`] uses unless told otherwise.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
        type PairHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder a [`HashMap`] uses unless told otherwise.
        pub type DefaultHashBuilder = std::hash::RandomState;
        type PairHashBuilder = core::hash::BuildHasherDefault<std::hash::DefaultHasher>;
    } else {
        compile_error!("quad-hash needs the `foldhash` or the `std` feature to provide a default hasher");
    }
}

/// A key-value map stored in a quadratic-probing [`HashTable`].
///
/// Keys must be `Hash + Eq` and are hashed with the builder `S`. A key's home slot
/// is its hash modulo the number of slots; collisions probe
/// `(home + i²) mod capacity`. Removed pairs leave tombstones that later
/// insertions reuse, and growth to the next prime at least twice the size
/// clears them out.
///
/// Iteration follows slot order, which is neither insertion order nor stable
/// across growth.
///
/// Structural equality and hashing only look at the pairs, so two maps built
/// from the same pairs in a different order, or with different capacities,
/// compare and hash equal.
///
/// # Examples
///
/// ```rust
/// use quad_hash::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("apple", 3);
/// map.insert("pear", 5);
///
/// assert_eq!(map.get(&"apple"), Some(&3));
/// assert_eq!(map.remove(&"pear"), Some(5));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    pub(crate) table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

/// Dumps every slot, one per line: `(key, value)` for occupied slots and a
/// blank line for empty or tombstoned ones.
///
/// The format is for diagnostics only and may change.
impl<K, V, S> Display for HashMap<K, V, S>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Table: [")?;
        for index in 0..self.table.capacity() {
            match self.table.get_at(index) {
                Some((k, v)) => writeln!(f, "\t({k}, {v})")?,
                None => writeln!(f, "\t")?,
            }
        }
        write!(f, "]")
    }
}

impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with the default capacity (59 slots) and load
    /// factor (0.8).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 59);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_capacity(101);
    /// assert_eq!(map.capacity(), 101);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates an empty map from a [`TableConfig`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// # use quad_hash::TableConfig;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_config(TableConfig {
    ///     initial_capacity: 11,
    ///     load_factor: 0.5,
    /// });
    /// assert_eq!(map.capacity(), 11);
    /// assert_eq!(map.load_factor(), 0.5);
    /// ```
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with default sizing that hashes with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hash_builder)
    }

    /// Creates an empty map with `capacity` slots that hashes with
    /// `hash_builder`.
    ///
    /// A capacity of `0` selects the default of 59 slots.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_config_and_hasher(TableConfig::with_capacity(capacity), hash_builder)
    }

    /// Creates an empty map sized by `config` that hashes with `hash_builder`.
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_config(config),
            hash_builder,
        }
    }

    /// Number of live pairs. Tombstones are not counted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert('x', 0);
    /// map.insert('y', 0);
    /// map.remove(&'x');
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` when no live pairs remain.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    ///
    /// Unlike the standard library's maps this is the raw slot count, not the
    /// number of elements that fit before the next growth.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the occupancy ratio at which the map grows.
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Returns the structural modification counter.
    ///
    /// It changes whenever a pair is added or removed, the map is cleared or
    /// drained, or the table grows. Overwriting the value of an existing key
    /// leaves it alone.
    pub fn mod_count(&self) -> usize {
        self.table.mod_count()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns how many pairs sit at each probe distance from their home
    /// slot.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::hash_table::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns a snapshot of slot occupancy and growth parameters.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }

    /// Resets every slot to empty, tombstones included. The capacity is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map: HashMap<u8, u8> = (0..8).map(|i| (i, i)).collect();
    /// map.clear();
    /// assert_eq!(map.get(&3), None);
    /// assert_eq!(map.capacity(), 59);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns `true` if some key maps to a value equal to `value`.
    ///
    /// This is a linear scan over the occupied slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("red", 0xff0000);
    /// assert!(map.contains_value(&0xff0000));
    /// assert!(!map.contains_value(&0x00ff00));
    /// ```
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.table.iter().any(|(_, v)| v == value)
    }

    /// Keeps only the pairs for which `keep` returns `true`. Removed pairs
    /// leave tombstones.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| keep(k, v));
    }

    /// Returns an iterator over the key-value pairs of the map, in slot
    /// order.
    ///
    /// This only needs a shared borrow. The views returned by
    /// [`keys`](Self::keys), [`values`](Self::values) and
    /// [`entries`](Self::entries) borrow the map mutably, since they can
    /// remove through it; for read-only walks use this, [`HashMap::get`] or
    /// the `&HashMap` `IntoIterator` impl.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let map: HashMap<u32, u32> = (1..=4).map(|i| (i, i * i)).collect();
    ///
    /// let total: u32 = map.iter().map(|(_, square)| square).sum();
    /// assert_eq!(total, 30);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the pairs of the map with mutable values.
    ///
    /// Changing a value through this iterator is not a structural change.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over mutable references to the values of the map.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns a live view of the map's keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("left", 0);
    /// map.insert("right", 1);
    ///
    /// let mut keys = map.keys();
    /// assert!(keys.remove(&"left"));
    /// assert!(!keys.contains(&"left"));
    ///
    /// assert!(!map.contains_key(&"left"));
    /// ```
    pub fn keys(&mut self) -> KeySet<'_, K, V, S> {
        KeySet::new(self)
    }

    /// Returns a live view of the map's values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(10, "dup");
    /// map.insert(20, "dup");
    ///
    /// assert!(map.values().remove(&"dup"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn values(&mut self) -> ValueCollection<'_, K, V, S> {
        ValueCollection::new(self)
    }

    /// Returns a live view of the map's key-value pairs.
    pub fn entries(&mut self) -> EntrySet<'_, K, V, S> {
        EntrySet::new(self)
    }

    /// Empties the map and yields its pairs in slot order.
    ///
    /// The map is empty as soon as this returns, and keeps its capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map: HashMap<u8, char> = [(1, 'a'), (2, 'b')].into_iter().collect();
    ///
    /// let mut pairs: Vec<_> = map.drain().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(1, 'a'), (2, 'b')]);
    /// assert_eq!(map.capacity(), 59);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    pub(crate) fn hash_key<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.hash_builder.hash_one(key)
    }

    /// Returns the slot index holding `key`, if present.
    pub(crate) fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        self.table.find_index(hash, |(k, _)| key.eq(k.borrow()))
    }

    /// Associates `value` with `key`.
    ///
    /// A new key takes the first tombstone or empty slot on its probe path and
    /// yields `None`. A present key has its value swapped in place and the
    /// previous value is returned; that is not a structural change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert("port", 80), None);
    /// let before = map.mod_count();
    /// assert_eq!(map.insert("port", 8080), Some(80));
    /// assert_eq!(map.mod_count(), before);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Some(old_value)
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Looks up the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(String::from("host"), "localhost");
    /// assert_eq!(map.get("host"), Some(&"localhost"));
    /// assert_eq!(map.get("user"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and its value.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        self.table
            .find(hash, |(k, _)| key.eq(k.borrow()))
            .map(|(k, v)| (k, v))
    }

    /// Looks up the value stored under `key` for in-place mutation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("hits", 0);
    /// *map.get_mut(&"hits").unwrap() += 1;
    /// assert_eq!(map[&"hits"], 1);
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        self.table
            .find_mut(hash, |(k, _)| key.eq(k.borrow()))
            .map(|(_, v)| v)
    }

    /// `true` when `key` is stored in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Takes the value stored under `key` out of the map, leaving a tombstone
    /// in its slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(7u16, "seven");
    /// assert_eq!(map.remove(&7), Some("seven"));
    /// assert_eq!(map.remove(&7), None);
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Like [`remove`](Self::remove), but hands back the stored key as well.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_key(key);
        self.table.remove(hash, |(k, _)| key.eq(k.borrow()))
    }

    /// Probes for `key` once and returns a handle to its slot, occupied or
    /// vacant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// #
    /// let mut counts = HashMap::new();
    /// for letter in "banana".chars() {
    ///     *counts.entry(letter).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts[&'a'], 3);
    /// assert_eq!(counts[&'n'], 2);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, S2> PartialEq<HashMap<K, V, S2>> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

#[cfg(feature = "std")]
impl<K, V, S, S2> PartialEq<std::collections::HashMap<K, V, S2>> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &std::collections::HashMap<K, V, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

#[cfg(feature = "std")]
impl<K, V, S, S2> PartialEq<HashMap<K, V, S2>> for std::collections::HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S2>) -> bool {
        other == self
    }
}

/// Hashes the pairs independently of slot layout: each pair is hashed with a
/// fixed-seed hasher and the results are summed, so equal maps hash equal
/// whatever their capacity or insertion order.
impl<K, V, S> Hash for HashMap<K, V, S>
where
    K: Hash,
    V: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let pair_hasher = PairHashBuilder::default();
        let combined = self
            .iter()
            .fold(0u64, |acc, pair| acc.wrapping_add(pair_hasher.hash_one(pair)));
        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

/// Inserts each pair in turn with [`HashMap::insert`]; later duplicates of a
/// key overwrite earlier ones.
impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (&key, &value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// The slot a key resolved to, as returned by [`HashMap::entry`].
///
/// A vacant entry remembers the first reusable slot on the key's probe path,
/// so inserting through it does not probe again.
pub enum Entry<'a, K, V> {
    /// The key is absent.
    Vacant(VacantEntry<'a, K, V>),
    /// The key is stored in the map.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Stores `default` if the key is absent, then returns the key's value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`or_insert`](Self::or_insert), but only builds the value when the
    /// key is absent.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Runs `f` on the stored value if the key is present.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// The key this entry was looked up with, or the stored key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Stores `V::default()` if the key is absent.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// An absent key together with the slot it would be stored in.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// The key that [`insert`](Self::insert) will store.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Gives the key back without touching the map.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Stores the pair and returns its value. The map may grow as a result,
    /// in which case the reference points into the new table.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A stored pair, located by [`HashMap::entry`].
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// The stored key.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// The stored value.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// The stored value, writable.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Gives up the entry for a reference to its value that lives as long as
    /// the map borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Swaps in a new value, returning the previous one. Not a structural
    /// change.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Tombstones the slot and returns the value.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Tombstones the slot and returns the pair.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// Pairs of a [`HashMap`] in slot order, from [`HashMap::iter`].
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| (&pair.0, &pair.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Pairs of a [`HashMap`] with writable values, from [`HashMap::iter_mut`].
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Keys of a [`HashMap`] in slot order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Values of a [`HashMap`] in slot order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| pair.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a `HashMap`.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// Pairs taken out of a [`HashMap`] by [`HashMap::drain`].
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// Pairs of a consumed [`HashMap`], in slot order.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
