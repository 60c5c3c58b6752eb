//! Heuristic evaluation function for Gomoku board positions
//!
//! The score is the pattern total of the maximizing side minus the
//! opponent's total scaled by a block bias, so that equal threats weigh
//! slightly in favor of defending.

use crate::board::{Board, Stone, DIRECTIONS, WIN_LENGTH};

use super::patterns::{scan_run, Pattern, PatternWeights, Run};

/// Reference bias applied to the minimizing side's total
pub const DEFAULT_BLOCK_BIAS: f64 = 1.1;

/// Pattern-table evaluator
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    weights: PatternWeights,
    block_bias: f64,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            weights: PatternWeights::default(),
            block_bias: DEFAULT_BLOCK_BIAS,
        }
    }
}

impl Evaluator {
    /// Weights and bias are expected to be validated by the caller
    /// (see `EngineConfig::validate`).
    pub fn new(weights: PatternWeights, block_bias: f64) -> Self {
        Self {
            weights,
            block_bias,
        }
    }

    /// Evaluate the board from the perspective of `maximizer`.
    ///
    /// Positive values favor `maximizer`. An empty board scores 0.
    #[must_use]
    pub fn evaluate(&self, board: &Board, maximizer: Stone) -> i64 {
        let max_sum = self.side_total(board, maximizer);
        let min_sum = self.side_total(board, maximizer.opponent());
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let scaled = (min_sum as f64 * self.block_bias).round() as i64;
        max_sum - scaled
    }

    /// Sum of pattern weights over every run of `side` in all four directions.
    /// Each run is counted once, from its canonical start.
    pub fn side_total(&self, board: &Board, side: Stone) -> i64 {
        board
            .positions(side)
            .flat_map(|pos| {
                DIRECTIONS
                    .iter()
                    .filter_map(move |&dir| scan_run(board, pos, dir, side))
            })
            .filter_map(|run| effective_pattern(&run))
            .map(|pattern| self.weights.weight(pattern))
            .sum()
    }
}

/// A live four is one placement away from five at either open end; the
/// evaluator scores it as an open four.
fn effective_pattern(run: &Run) -> Option<Pattern> {
    match run.pattern {
        Some(Pattern::LiveFour)
            if run.len + 1 >= WIN_LENGTH && (run.open_start || run.open_end) =>
        {
            Some(Pattern::OpenFour)
        }
        other => other,
    }
}

/// Evaluate with the reference weights and block bias
#[must_use]
pub fn evaluate(board: &Board, maximizer: Stone) -> i64 {
    Evaluator::default().evaluate(board, maximizer)
}
