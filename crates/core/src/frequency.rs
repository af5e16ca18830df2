//! Frequency analyses over raw capture text.
//!
//! Two counters, both scanning the original text with newlines left in
//! place so the numbers line up with what the measurement pipeline reports:
//! - per-character counts (fold width 1)
//! - per-block counts over fixed-width, non-overlapping windows
//!
//! The encoder strips newlines before packing; the counters deliberately do
//! not. A capture with line breaks therefore shows '\n' as a counted symbol
//! and may have blocks spanning a break.

use std::collections::BTreeMap;

/// Window width used by the byte-block analysis. Eight characters mirror
/// one packed byte.
pub const BLOCK_WIDTH: usize = 8;

/// Occurrence counts per distinct key.
///
/// Backed by a `BTreeMap`, so iteration is always ascending by key value.
/// That gives the stable display order the log relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, u64>,
    total: u64,
}

impl<K: Ord> FrequencyTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Record one occurrence of `key`.
    pub fn record(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of `key` (zero if never seen).
    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate (key, count) pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Count each literal character of the raw text, newlines included.
pub fn count_symbols(raw: &str) -> FrequencyTable<char> {
    let mut table = FrequencyTable::new();
    for ch in raw.chars() {
        table.record(ch);
    }
    table
}

/// Count distinct fixed-width blocks of raw characters.
///
/// Windows are non-overlapping and taken in order; the final window may be
/// shorter than `width`. Blocks are opaque string keys and are never parsed
/// as numbers. Total group count is therefore ceil(raw length / width).
pub fn count_blocks(raw: &str, width: usize) -> FrequencyTable<String> {
    debug_assert!(width > 0, "block width must be positive");
    let mut table = FrequencyTable::new();
    let chars: Vec<char> = raw.chars().collect();
    for block in chars.chunks(width) {
        table.record(block.iter().collect());
    }
    table
}
