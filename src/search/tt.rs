//! Transposition table for caching maximizing-search values
//!
//! The value of a position under the maximizing search depends only on the
//! board and the remaining depth, so results can be reused whenever the
//! same board is reached again by a different move order.
//!
//! # Example
//!
//! ```
//! use tower::search::TranspositionTable;
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 420);
//!
//! assert_eq!(tt.probe(hash, 3), Some(420));
//! // Values are only exact for the depth they were searched at
//! assert_eq!(tt.probe(hash, 2), None);
//! ```

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Board content hash
    pub hash: u64,
    /// Remaining depth the value was computed with
    pub depth: u8,
    /// Maximizing value
    pub score: i64,
}

/// Direct-mapped cache of search values.
///
/// Each hash maps to exactly one slot; a new store always replaces the
/// slot's previous occupant.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = (size_mb * 1024 * 1024) / entry_size;

        // Ensure at least some entries
        let size = size.max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Look up the value of `hash` searched at exactly `depth`.
    ///
    /// The maximizing value is not monotone in depth, so entries from any
    /// other depth are ignored.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8) -> Option<i64> {
        let entry = self.entries[self.slot(hash)]?;
        (entry.hash == hash && entry.depth == depth).then_some(entry.score)
    }

    /// Store a value, replacing whatever occupied the slot.
    pub fn store(&mut self, hash: u64, depth: u8, score: i64) {
        let idx = self.slot(hash);
        self.entries[idx] = Some(TTEntry { hash, depth, score });
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
