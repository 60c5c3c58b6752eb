//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation and ordering
//! - Tactical scanner for immediate wins and forced blocks
//! - Transposition table for caching search results
//! - Minimax / alpha-beta tree search

pub mod alphabeta;
pub mod movegen;
pub mod threat;
pub mod tt;

pub use alphabeta::{SearchResult, SearchStats, Searcher, Strategy, WIN_SCORE};
pub use movegen::{candidates, MoveGenerator, DEFAULT_RADIUS};
pub use threat::{find_forcing_move, find_winning_cell, open_four_blocks, Forcing, ForcingKind};
pub use tt::{EntryType, TTEntry, TTKey, TTStats, TranspositionTable};
