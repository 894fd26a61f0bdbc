use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::config::MAX_CAPACITY;
use crate::config::TableConfig;

/// Observable state of a single slot in the table.
///
/// A tombstone is a slot that held a value which has since been removed. It
/// is logically empty, but lookups must keep probing past it because values
/// inserted while it was occupied may live further along the same probe
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never written since the last rehash or clear.
    Empty,
    /// Holds a live value.
    Occupied,
    /// Held a value that has been removed.
    Tombstone,
}

#[derive(Clone)]
enum Slot<T> {
    Empty,
    Occupied { hash: u64, value: T },
    Tombstone,
}

impl<T> Slot<T> {
    #[inline(always)]
    fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Occupied { .. } => SlotState::Occupied,
            Slot::Tombstone => SlotState::Tombstone,
        }
    }

    #[inline(always)]
    fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline(always)]
    fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline(always)]
    fn into_value(self) -> Option<T> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Slot<T>]> {
    core::iter::repeat_with(|| Slot::Empty)
        .take(capacity)
        .collect()
}

#[inline(always)]
fn home_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }

    true
}

/// Returns the smallest prime that is not less than `n`.
pub(crate) fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    if candidate > 2 && candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Capacity a table of `capacity` slots grows to: the next prime not less
/// than `2 * capacity + 1`, clamped to [`MAX_CAPACITY`].
fn grown_capacity(capacity: usize) -> usize {
    let target = capacity.saturating_mul(2).saturating_add(1);
    if target >= MAX_CAPACITY {
        MAX_CAPACITY
    } else {
        next_prime(target).min(MAX_CAPACITY)
    }
}

/// The quadratic probe sequence for a hash: `(home + i²) mod capacity` for
/// `i = 0, 1, 2, ...`, bounded to `capacity` probes.
///
/// Squares are accumulated as running sums of odd numbers so the sequence
/// never overflows, whatever the capacity.
#[derive(Clone)]
pub(crate) struct ProbeSeq {
    index: usize,
    stride: usize,
    remaining: usize,
    capacity: usize,
}

impl ProbeSeq {
    #[inline(always)]
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            index: home_index(hash, capacity),
            stride: 1 % capacity,
            remaining: capacity,
            capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.index;
        self.index = (self.index + self.stride) % self.capacity;
        self.stride = (self.stride + 2) % self.capacity;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

impl FusedIterator for ProbeSeq {}

/// Outcome of an insertion walk.
enum Probe {
    /// A slot holding a matching value.
    Found(usize),
    /// Where a new value goes: the first tombstone on the path if there was
    /// one, otherwise the empty slot that ended the walk.
    Vacant(usize),
    /// The walk hit its bound without a match or a reusable slot.
    Exhausted,
}

#[cfg(any(test, feature = "stats"))]
/// Distribution of probe distances for the live values in a table.
///
/// `counts()[d]` is the number of values stored `d` probes away from their
/// home slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Number of values found at each probe distance.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Longest probe distance of any live value, if the table is non-empty.
    pub fn max_distance(&self) -> Option<usize> {
        self.counts.iter().rposition(|&count| count != 0)
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let total: usize = self.counts.iter().sum();
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({total} entries):");

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(partial);
            bar
        };

        for (distance, &count) in self.counts.iter().enumerate() {
            println!("{distance:>3} | {} ({count})", make_bar(count));
        }
    }
}

#[cfg(any(test, feature = "stats"))]
/// Slot-level utilization statistics for a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Number of live values.
    pub populated: usize,
    /// Number of tombstoned slots awaiting reuse or a rehash.
    pub tombstones: usize,
    /// Number of never-written slots.
    pub empty_slots: usize,
    /// Total number of slots.
    pub capacity: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// Load factor at which the table grows.
    pub max_load_factor: f32,
    /// Structural modifications since construction.
    pub mod_count: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Prints the statistics to stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== HashTable Debug Statistics ===");
        println!("Populated:        {}", self.populated);
        println!("Tombstones:       {}", self.tombstones);
        println!("Empty slots:      {}", self.empty_slots);
        println!("Capacity:         {}", self.capacity);
        println!("Load factor:      {:.2}%", self.load_factor * 100.0);
        println!("Growth threshold: {:.2}%", self.max_load_factor * 100.0);
        println!("Modifications:    {}", self.mod_count);
    }
}

/// An open-addressing hash table with quadratic probing.
///
/// `HashTable` stores values of type `V` in a single array of slots. Each
/// slot is empty, occupied or a tombstone. A value's home slot is its hash
/// modulo the capacity; collisions are resolved by probing
/// `(home + i²) mod capacity` for `i = 1, 2, ...`.
///
/// The table does not hash values itself: callers supply the hash and an
/// equality predicate on every operation, and the hash is stored alongside
/// the value so the table can rehash without calling back into the caller.
///
/// # Growth
///
/// After each insertion of a new value, if `len / capacity` reaches the
/// configured load factor, the table grows to the smallest prime not less
/// than `2 * capacity + 1`. Live values are reinserted in ascending slot
/// order and tombstones are dropped. Growth also happens when an insertion
/// walk cannot reach any free slot, which quadratic probing allows once a
/// table is more than half full.
///
/// # Modification count
///
/// Every structural change (inserting a new value, removing one, clearing,
/// draining, growing) bumps a counter exposed by [`mod_count`]. Replacing a
/// value in place does not. Cursors use the counter to detect changes made
/// behind their back.
///
/// [`mod_count`]: HashTable::mod_count
///
/// # Examples
///
/// ```rust
/// use quad_hash::hash_table::Entry;
/// use quad_hash::hash_table::HashTable;
///
/// struct Route {
///     port: u16,
///     upstream: String,
/// }
///
/// let mut table = HashTable::with_capacity(11);
/// let hash = 8080u64;
///
/// if let Entry::Vacant(slot) = table.entry(hash, |r: &Route| r.port == 8080) {
///     slot.insert(Route {
///         port: 8080,
///         upstream: "10.0.0.7".to_string(),
///     });
/// }
///
/// let route = table.find(hash, |r| r.port == 8080).unwrap();
/// assert_eq!(route.upstream, "10.0.0.7");
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<V> {
    slots: Box<[Slot<V>]>,
    populated: usize,
    tombstones: usize,
    load_factor: f32,
    mod_count: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::string::String;

        f.debug_struct("HashTable")
            .field(
                "slots",
                &self
                    .slots
                    .chunks(16)
                    .map(|chunk| {
                        chunk
                            .iter()
                            .map(|slot| match slot.state() {
                                SlotState::Empty => '.',
                                SlotState::Occupied => '#',
                                SlotState::Tombstone => 'x',
                            })
                            .collect::<String>()
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.populated)
            .field("tombstones", &self.tombstones)
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor)
            .finish()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    /// Copies the slot array as-is, tombstones included. The clone starts
    /// with a fresh modification count.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            populated: self.populated,
            tombstones: self.tombstones,
            load_factor: self.load_factor,
            mod_count: 0,
        }
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table with `capacity` slots and the default load
    /// factor.
    ///
    /// A capacity of `0` selects the default of 59 slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 100);
    ///
    /// let table: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 59);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TableConfig::with_capacity(capacity))
    }

    /// Creates a new hash table from a [`TableConfig`], normalizing it first.
    pub fn with_config(config: TableConfig) -> Self {
        let config = config.normalized();
        Self {
            slots: empty_slots(config.initial_capacity),
            populated: 0,
            tombstones: 0,
            load_factor: config.load_factor,
            mod_count: 0,
        }
    }

    /// Returns the number of values in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no values.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the occupancy ratio at which the table grows.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns the number of tombstoned slots.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the structural modification counter.
    pub fn mod_count(&self) -> usize {
        self.mod_count
    }

    /// Returns the state of the slot at `index`, or `None` if `index` is out
    /// of bounds.
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(Slot::state)
    }

    /// Returns the value in the slot at `index` if that slot is occupied.
    pub fn get_at(&self, index: usize) -> Option<&V> {
        self.slots.get(index).and_then(Slot::value)
    }

    /// Returns the value in the slot at `index` mutably if that slot is
    /// occupied. Mutating a value in place is not a structural change.
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots.get_mut(index).and_then(Slot::value_mut)
    }

    /// Returns the index of the first occupied slot at or after `from`.
    pub fn next_occupied(&self, from: usize) -> Option<usize> {
        self.slots
            .get(from..)?
            .iter()
            .position(|slot| matches!(slot, Slot::Occupied { .. }))
            .map(|offset| from + offset)
    }

    /// Returns the index of the occupied slot holding a value matching
    /// `eq`, if any.
    ///
    /// The walk stops at the first empty slot, keeps going past tombstones,
    /// and gives up after `capacity` probes.
    pub fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        for index in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied {
                    hash: stored,
                    value,
                } if *stored == hash && eq(value) => return Some(index),
                _ => {}
            }
        }

        None
    }

    /// Finds a value matching `eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(11);
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    ///
    /// assert_eq!(table.find(7, |&n| n == 7), Some(&7));
    /// assert_eq!(table.find(8, |&n| n == 8), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let index = self.find_index(hash, eq)?;
        self.get_at(index)
    }

    /// Finds a value matching `eq`, returning a mutable reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        self.get_at_mut(index)
    }

    fn probe_insert(&self, hash: u64, eq: &impl Fn(&V) -> bool) -> Probe {
        let mut first_tombstone = None;

        for index in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied {
                    hash: stored,
                    value,
                } if *stored == hash && eq(value) => return Probe::Found(index),
                Slot::Occupied { .. } => {}
            }
        }

        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    /// Probes for the value matching `eq` and returns its slot, or the slot a
    /// new value would take.
    ///
    /// If the insertion walk cannot reach a free slot, the table grows before
    /// the entry is returned.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the table needs to grow but is
    /// already at [`MAX_CAPACITY`](crate::config::MAX_CAPACITY).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::Entry;
    /// # use quad_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(11);
    ///
    /// match table.entry(5, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// assert!(matches!(
    ///     table.entry(5, |s: &String| s == "hello"),
    ///     Entry::Occupied(_)
    /// ));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        loop {
            match self.probe_insert(hash, &eq) {
                Probe::Found(index) => {
                    return Entry::Occupied(OccupiedEntry { table: self, index });
                }
                Probe::Vacant(index) => {
                    return Entry::Vacant(VacantEntry {
                        table: self,
                        index,
                        hash,
                    });
                }
                Probe::Exhausted => {
                    log::trace!(
                        "insertion walk exhausted at capacity {} ({} live, {} tombstones)",
                        self.capacity(),
                        self.populated,
                        self.tombstones
                    );
                    if !self.rehash(None) {
                        panic!("capacity overflow");
                    }
                }
            }
        }
    }

    /// Removes and returns a value matching `eq`, leaving a tombstone in its
    /// slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(11);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 1);
    ///
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(hash, eq)?;
        self.remove_at(index)
    }

    /// Removes and returns the value in the slot at `index`, leaving a
    /// tombstone. Returns `None` if that slot is not occupied.
    pub fn remove_at(&mut self, index: usize) -> Option<V> {
        let slot = self.slots.get_mut(index)?;
        match core::mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.populated -= 1;
                self.tombstones += 1;
                self.mod_count = self.mod_count.wrapping_add(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Keeps only the values for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut V) -> bool) {
        for index in 0..self.slots.len() {
            let retained = match self.slots[index].value_mut() {
                Some(value) => keep(value),
                None => true,
            };
            if !retained {
                self.remove_at(index);
            }
        }
    }

    /// Removes all values, resetting every slot to empty while keeping the
    /// current capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        log::trace!(
            "cleared table of capacity {} ({} live, {} tombstones)",
            self.capacity(),
            self.populated,
            self.tombstones
        );
        self.populated = 0;
        self.tombstones = 0;
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    /// Returns an iterator over all values in ascending slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(11);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// let values: Vec<_> = table.iter().copied().collect();
    /// assert_eq!(values, vec![1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to all values in
    /// ascending slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.populated,
        }
    }

    /// Removes all values and returns them as an iterator.
    ///
    /// The table is empty, with its capacity unchanged, as soon as this
    /// returns.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let remaining = self.populated;
        let capacity = self.capacity();
        let slots = core::mem::replace(&mut self.slots, empty_slots(capacity));
        self.populated = 0;
        self.tombstones = 0;
        self.mod_count = self.mod_count.wrapping_add(1);

        Drain {
            slots: slots.into_vec().into_iter(),
            remaining,
            _table: PhantomData,
        }
    }

    fn occupy(&mut self, index: usize, hash: u64, value: V) -> usize {
        let slot = &mut self.slots[index];
        debug_assert!(!matches!(slot, Slot::Occupied { .. }));
        if matches!(slot, Slot::Tombstone) {
            self.tombstones -= 1;
        }
        *slot = Slot::Occupied { hash, value };
        self.populated += 1;
        self.mod_count = self.mod_count.wrapping_add(1);

        let mut index = index;
        if self.over_load_factor() {
            self.rehash(Some(&mut index));
        }
        index
    }

    #[inline]
    fn over_load_factor(&self) -> bool {
        // Same precision as the configured factor, so 4/5 reaches 0.8.
        self.populated as f32 / self.capacity() as f32 >= self.load_factor
    }

    /// Grows the slot array, reinserting live values and dropping
    /// tombstones. `tracked`, if given, is updated to follow the value it
    /// indexes.
    ///
    /// Returns `false`, leaving the table untouched, if it is already at
    /// `MAX_CAPACITY`.
    #[cold]
    fn rehash(&mut self, tracked: Option<&mut usize>) -> bool {
        let old_capacity = self.capacity();
        let new_capacity = grown_capacity(old_capacity);
        if new_capacity <= old_capacity {
            return false;
        }

        let target = tracked.as_deref().copied();
        let mut relocated = None;

        let old_slots = core::mem::replace(&mut self.slots, empty_slots(new_capacity));
        for (old_index, slot) in old_slots.into_vec().into_iter().enumerate() {
            if let Slot::Occupied { hash, value } = slot {
                // Fresh slots hold no tombstones, and the table is now under
                // half full, so the first empty slot on the walk is reachable.
                let Some(new_index) =
                    ProbeSeq::new(hash, new_capacity).find(|&i| matches!(self.slots[i], Slot::Empty))
                else {
                    panic!("capacity overflow");
                };
                self.slots[new_index] = Slot::Occupied { hash, value };
                if target == Some(old_index) {
                    relocated = Some(new_index);
                }
            }
        }

        log::debug!(
            "rehashed table from {} to {} slots ({} live, {} tombstones purged)",
            old_capacity,
            new_capacity,
            self.populated,
            self.tombstones
        );

        self.tombstones = 0;
        self.mod_count = self.mod_count.wrapping_add(1);
        if let (Some(tracked), Some(relocated)) = (tracked, relocated) {
            *tracked = relocated;
        }

        true
    }

    /// Computes a histogram of probe distances for the live values.
    ///
    /// The distance of a value is the `i` for which its slot is
    /// `(home + i²) mod capacity`.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut counts = alloc::vec![0usize; 1];

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let distance = ProbeSeq::new(*hash, self.capacity())
                    .position(|probe| probe == index)
                    .unwrap_or(self.capacity());
                if counts.len() <= distance {
                    counts.resize(distance + 1, 0);
                }
                counts[distance] += 1;
            }
        }

        ProbeHistogram { counts }
    }

    /// Returns slot-level utilization statistics.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            populated: self.populated,
            tombstones: self.tombstones,
            empty_slots: self.capacity() - self.populated - self.tombstones,
            capacity: self.capacity(),
            load_factor: self.populated as f64 / self.capacity() as f64,
            max_load_factor: self.load_factor,
            mod_count: self.mod_count,
        }
    }
}

/// Result of [`HashTable::entry`]: the matching slot, or the free slot chosen
/// for insertion.
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value in the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// A free slot on the probe path, ready to take a value.
///
/// Holds the slot the insertion walk chose: the first tombstone on the walk,
/// or the empty slot that ended it.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Returns the slot the value will be written to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Inserts a value into the vacant entry and returns a mutable reference
    /// to it.
    ///
    /// If the insertion brings the table to its load factor the table grows
    /// first, and the returned reference points into the new slot array.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        let index = table.occupy(self.index, self.hash, value);
        match table.slots[index].value_mut() {
            Some(value) => value,
            None => unreachable!("slot {index} was just occupied"),
        }
    }
}

/// A slot holding the value that matched.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Returns the slot holding the value.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The matched value.
    pub fn get(&self) -> &V {
        match self.table.slots[self.index].value() {
            Some(value) => value,
            None => unreachable!("occupied entry at empty slot {}", self.index),
        }
    }

    /// The matched value, writable.
    pub fn get_mut(&mut self) -> &mut V {
        match self.table.slots[self.index].value_mut() {
            Some(value) => value,
            None => unreachable!("occupied entry at empty slot {}", self.index),
        }
    }

    /// Trades the entry for a reference bound to the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        match self.table.slots[self.index].value_mut() {
            Some(value) => value,
            None => unreachable!("occupied entry at empty slot {}", self.index),
        }
    }

    /// Removes the value from the table, leaving a tombstone.
    pub fn remove(self) -> V {
        match self.table.remove_at(self.index) {
            Some(value) => value,
            None => unreachable!("occupied entry at empty slot {}", self.index),
        }
    }
}

/// Values of a [`HashTable`] in ascending slot order, from
/// [`HashTable::iter`].
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.slots.by_ref().find_map(Slot::value)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.slots.by_ref().find_map(Slot::value_mut)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// Values moved out by [`HashTable::drain`].
///
/// The table is already empty when this is handed out. Dropping it early
/// drops the values not yet yielded.
pub struct Drain<'a, V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.slots.by_ref().find_map(Slot::into_value)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.slots.by_ref().find_map(Slot::into_value)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.populated,
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
