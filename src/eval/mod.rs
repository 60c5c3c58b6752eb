//! Evaluation module for Gomoku positions
//!
//! - Line pattern detection (twos, threes, fours, fives)
//! - Weighted pattern totals with a block bias toward defense

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, Evaluator, DEFAULT_BLOCK_BIAS};
pub use patterns::{detect, scan_run, Pattern, PatternWeights, Run};
