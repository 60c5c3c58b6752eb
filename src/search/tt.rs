//! Transposition table for caching search results
//!
//! Entries are keyed by the exact board content (both bitboards), the
//! remaining depth and the side to move, so a hit never confuses two
//! different positions. The table is bounded: once it holds `capacity`
//! entries it is cleared before the next new key is inserted.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Board;
//! use gomoku::search::{EntryType, TTKey, TranspositionTable};
//!
//! let board = Board::new(15).unwrap();
//! let mut tt = TranspositionTable::new(1024);
//! let key = TTKey::new(&board, 2, true);
//!
//! tt.store(key, 100, EntryType::Exact);
//! assert_eq!(tt.probe(&key, -1000, 1000), Some(100));
//! ```

use rustc_hash::FxHashMap;

use crate::board::{Bitboard, Board};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Bound kind of a fail-soft result searched with window `(alpha, beta)`.
    #[inline]
    pub fn classify(score: i64, alpha: i64, beta: i64) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Position identity: board content, remaining depth and side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TTKey {
    black: Bitboard,
    white: Bitboard,
    size: u8,
    depth: u8,
    maximizing: bool,
}

impl TTKey {
    pub fn new(board: &Board, depth: u32, maximizing: bool) -> Self {
        Self {
            black: board.black,
            white: board.white,
            size: board.size() as u8,
            depth: depth.min(u32::from(u8::MAX)) as u8,
            maximizing,
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub score: i64,
    pub entry_type: EntryType,
}

/// Bounded transposition table
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: FxHashMap<TTKey, TTEntry>,
    capacity: usize,
    probes: u64,
    hits: u64,
    clears: u64,
}

impl TranspositionTable {
    /// Create a table holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            probes: 0,
            hits: 0,
            clears: 0,
        }
    }

    /// Probe the table for a position.
    ///
    /// Returns the stored score only when it is usable under `(alpha, beta)`:
    /// always for `Exact`, for `LowerBound` if it is `>= beta`, for
    /// `UpperBound` if it is `<= alpha`.
    pub fn probe(&mut self, key: &TTKey, alpha: i64, beta: i64) -> Option<i64> {
        self.probes += 1;
        let entry = self.entries.get(key)?;
        let usable = match entry.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => entry.score >= beta,
            EntryType::UpperBound => entry.score <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    /// Store a result. A full table is cleared before a new key goes in.
    pub fn store(&mut self, key: TTKey, score: i64, entry_type: EntryType) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.entries.clear();
            self.clears += 1;
        }
        self.entries.insert(key, TTEntry { score, entry_type });
    }

    /// Remove all entries (new game)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            capacity: self.capacity,
            used: self.entries.len(),
            probes: self.probes,
            hits: self.hits,
            clears: self.clears,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Maximum number of entries before the table is cleared
    pub capacity: usize,
    /// Number of entries currently stored
    pub used: usize,
    pub probes: u64,
    /// Probes that returned a usable score
    pub hits: u64,
    /// Times the table was cleared for being full
    pub clears: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Stone};

    fn key_for(stones: &[(u8, u8)], depth: u32, maximizing: bool) -> TTKey {
        let mut board = Board::new(9).unwrap();
        for &(r, c) in stones {
            board.place(Pos::new(r, c), Stone::Black).unwrap();
        }
        TTKey::new(&board, depth, maximizing)
    }

    #[test]
    fn test_tt_store_then_hit_exact() {
        let mut tt = TranspositionTable::new(16);
        let key = key_for(&[(4, 4)], 3, true);
        tt.store(key, 500, EntryType::Exact);

        assert_eq!(tt.probe(&key, -1000, 1000), Some(500));
        assert_eq!(tt.probe(&key, 600, 700), Some(500));
    }

    #[test]
    fn test_tt_key_distinguishes_depth_and_side() {
        let mut tt = TranspositionTable::new(16);
        tt.store(key_for(&[(4, 4)], 3, true), 500, EntryType::Exact);

        assert_eq!(tt.probe(&key_for(&[(4, 4)], 2, true), -1000, 1000), None);
        assert_eq!(tt.probe(&key_for(&[(4, 4)], 3, false), -1000, 1000), None);
        assert_eq!(tt.probe(&key_for(&[(4, 5)], 3, true), -1000, 1000), None);
    }

    #[test]
    fn test_tt_key_distinguishes_board_size() {
        let small = Board::new(7).unwrap();
        let large = Board::new(9).unwrap();
        assert_ne!(TTKey::new(&small, 1, true), TTKey::new(&large, 1, true));
    }

    #[test]
    fn test_tt_lower_bound_cutoff() {
        let mut tt = TranspositionTable::new(16);
        let key = key_for(&[(1, 1)], 2, false);
        tt.store(key, 500, EntryType::LowerBound);

        // Usable only when it reaches beta
        assert_eq!(tt.probe(&key, 0, 400), Some(500));
        assert_eq!(tt.probe(&key, 0, 600), None);
    }

    #[test]
    fn test_tt_upper_bound_cutoff() {
        let mut tt = TranspositionTable::new(16);
        let key = key_for(&[(1, 1)], 2, false);
        tt.store(key, -200, EntryType::UpperBound);

        assert_eq!(tt.probe(&key, -100, 100), Some(-200));
        assert_eq!(tt.probe(&key, -300, 100), None);
    }

    #[test]
    fn test_entry_type_classify() {
        assert_eq!(EntryType::classify(5, 10, 20), EntryType::UpperBound);
        assert_eq!(EntryType::classify(10, 10, 20), EntryType::UpperBound);
        assert_eq!(EntryType::classify(20, 10, 20), EntryType::LowerBound);
        assert_eq!(EntryType::classify(15, 10, 20), EntryType::Exact);
    }

    #[test]
    fn test_tt_bounded_clears_when_full() {
        let mut tt = TranspositionTable::new(2);
        let a = key_for(&[(0, 0)], 1, true);
        let b = key_for(&[(0, 1)], 1, true);
        let c = key_for(&[(0, 2)], 1, true);

        tt.store(a, 1, EntryType::Exact);
        tt.store(b, 2, EntryType::Exact);
        assert_eq!(tt.len(), 2);

        // Overwriting an existing key does not clear
        tt.store(b, 3, EntryType::Exact);
        assert_eq!(tt.len(), 2);
        assert_eq!(tt.probe(&b, -10, 10), Some(3));

        tt.store(c, 4, EntryType::Exact);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.probe(&a, -10, 10), None);
        assert_eq!(tt.probe(&c, -10, 10), Some(4));
        assert_eq!(tt.stats().clears, 1);
    }

    #[test]
    fn test_tt_clear_and_stats() {
        let mut tt = TranspositionTable::new(8);
        let key = key_for(&[(3, 3)], 1, true);
        tt.store(key, 7, EntryType::Exact);
        tt.probe(&key, -10, 10);
        tt.probe(&key_for(&[(3, 4)], 1, true), -10, 10);

        let stats = tt.stats();
        assert_eq!(stats.used, 1);
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 1);

        tt.clear();
        assert!(tt.is_empty());
    }
}
