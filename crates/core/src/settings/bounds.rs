//! Shared bound pools
//!
//! Most settings share a handful of ranges (0..100, 0..255, ...). Instead of
//! storing a min and a max in every descriptor, the generated tables keep one
//! pool of minimums, one pool of maximums and a list of lookup tables, and the
//! descriptors refer to them by small indices.

/// Signed minimum as stored in the min pool
pub type SettingMin = i32;

/// Unsigned maximum as stored in the max pool
pub type SettingMax = u32;

/// Maximum number of values in one lookup table
pub const MAX_LOOKUP_VALUES: usize = 256;

/// Enumeration of allowed values for a lookup-mode setting
///
/// The value of a label is its zero-based position in the table.
#[derive(Debug, Clone, Copy)]
pub struct LookupTable {
    labels: &'static [&'static str],
}

impl LookupTable {
    /// Create a lookup table from its labels
    pub const fn new(labels: &'static [&'static str]) -> Self {
        Self { labels }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the table has no values
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a value
    pub fn label(&self, value: usize) -> Option<&'static str> {
        self.labels.get(value).copied()
    }

    /// Value for a label (case-insensitive)
    pub fn value_of(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
    }

    /// Iterate over `(value, label)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.labels.iter().copied().enumerate()
    }
}

/// Minimum/maximum pools and lookup tables referenced by descriptors
#[derive(Debug, Clone, Copy)]
pub struct BoundPools {
    /// Shared minimums
    pub min: &'static [SettingMin],
    /// Shared maximums
    pub max: &'static [SettingMax],
    /// Lookup tables
    pub lookups: &'static [LookupTable],
}

impl BoundPools {
    /// Create bound pools
    pub const fn new(
        min: &'static [SettingMin],
        max: &'static [SettingMax],
        lookups: &'static [LookupTable],
    ) -> Self {
        Self { min, max, lookups }
    }
}

/// Inclusive range a setting value must stay in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Lowest allowed value
    pub min: SettingMin,
    /// Highest allowed value
    pub max: SettingMax,
}

impl Bounds {
    /// Check an integer value against the range
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }

    /// Check a float value against the range
    pub fn contains_f32(&self, value: f32) -> bool {
        value >= self.min as f32 && value <= self.max as f32
    }
}
