//! Construction parameters for [`HashTable`](crate::HashTable) and
//! [`HashMap`](crate::HashMap).

/// Slot count used when no (or a zero) initial capacity is requested.
pub const DEFAULT_CAPACITY: usize = 59;

/// Load factor used when no (or a non-positive) load factor is requested.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.8;

/// Largest slot count a table will ever allocate.
///
/// This is `i32::MAX`, which is itself prime, so growth that gets clamped
/// here still lands on a prime capacity.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Sizing and growth parameters for a table.
///
/// Values are normalized when a table is built from them, so any
/// combination is accepted:
///
/// - an `initial_capacity` of `0` becomes [`DEFAULT_CAPACITY`], and anything
///   above [`MAX_CAPACITY`] is clamped to it;
/// - a `load_factor` that is not a finite, strictly positive number becomes
///   [`DEFAULT_LOAD_FACTOR`].
///
/// # Examples
///
/// ```rust
/// use quad_hash::TableConfig;
///
/// let config = TableConfig {
///     initial_capacity: 0,
///     load_factor: -1.0,
/// }
/// .normalized();
///
/// assert_eq!(config, TableConfig::default());
/// assert_eq!(config.initial_capacity, 59);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of slots allocated up front.
    pub initial_capacity: usize,
    /// Occupancy ratio (`len / capacity`) at which the table grows.
    pub load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Builds a config with the given capacity and the default load factor.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Returns a copy with out-of-range values replaced by their defaults.
    pub fn normalized(self) -> Self {
        let initial_capacity = match self.initial_capacity {
            0 => DEFAULT_CAPACITY,
            capacity => capacity.min(MAX_CAPACITY),
        };

        let load_factor = if self.load_factor.is_finite() && self.load_factor > 0.0 {
            self.load_factor
        } else {
            DEFAULT_LOAD_FACTOR
        };

        Self {
            initial_capacity,
            load_factor,
        }
    }
}
