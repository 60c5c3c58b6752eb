//! Depth-limited minimax search with optional alpha-beta pruning
//!
//! The search is written from the point of view of a fixed maximizing side:
//! nodes where the maximizer moves take the max over their children, nodes
//! where the opponent moves take the min. Scores are fail-soft, so a pruned
//! subtree still returns a sound bound and the transposition table can
//! store it with its bound kind.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::{Searcher, Strategy};
//!
//! let mut searcher = Searcher::with_strategy(Stone::Black, Strategy::AlphaBeta);
//! let board = Board::new(15).unwrap();
//!
//! let result = searcher.search(&board, Stone::Black, 2);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! ```

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::Evaluator;

use super::movegen::MoveGenerator;
use super::tt::{EntryType, TTKey, TTStats, TranspositionTable};

/// Base score of a decided game; the remaining depth is added on top so
/// that faster wins (and slower losses) are preferred.
pub const WIN_SCORE: i64 = 100_000_000;

/// Window bound, beyond any reachable score
const INF: i64 = i64::MAX / 4;

/// Tree search algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Full minimax, never prunes
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Minimax => f.write_str("minimax"),
            Strategy::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "alpha-beta" | "alphabeta" | "ab" => Ok(Strategy::AlphaBeta),
            other => Err(format!(
                "unknown strategy `{}` (expected minimax or alpha-beta)",
                other
            )),
        }
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited below the root
    pub nodes: u64,
    /// Frontier evaluations
    pub evaluations: u64,
    /// Sibling loops cut short by `beta <= alpha`
    pub cutoffs: u64,
    pub tt_probes: u64,
    /// Probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` if the root had no candidates
    pub best_move: Option<Pos>,
    /// Score of the best move from the maximizer's point of view
    pub score: i64,
    pub depth: u32,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Game-tree searcher for one maximizing side.
///
/// Owns its evaluator, move generator and (optionally) a transposition
/// table that persists across calls to [`Searcher::search`].
#[derive(Debug, Clone)]
pub struct Searcher {
    maximizer: Stone,
    strategy: Strategy,
    evaluator: Evaluator,
    movegen: MoveGenerator,
    tt: Option<TranspositionTable>,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new(
        maximizer: Stone,
        strategy: Strategy,
        evaluator: Evaluator,
        movegen: MoveGenerator,
        tt: Option<TranspositionTable>,
    ) -> Self {
        Self {
            maximizer,
            strategy,
            evaluator,
            movegen,
            tt,
            stats: SearchStats::default(),
        }
    }

    /// Reference evaluator, default move generator, no transposition table.
    #[must_use]
    pub fn with_strategy(maximizer: Stone, strategy: Strategy) -> Self {
        Self::new(
            maximizer,
            strategy,
            Evaluator::default(),
            MoveGenerator::default(),
            None,
        )
    }

    pub fn maximizer(&self) -> Stone {
        self.maximizer
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Pick the best move for `mover` looking `depth` plies ahead.
    ///
    /// `mover` maximizes if it is this searcher's maximizer and minimizes
    /// otherwise. Among equally scored candidates the first in candidate
    /// order wins. The caller's board is never modified; all placements
    /// happen on a private copy.
    #[must_use]
    pub fn search(&mut self, board: &Board, mover: Stone, depth: u32) -> SearchResult {
        let start = Instant::now();
        let depth = depth.max(1);
        self.stats = SearchStats::default();

        if let Some(winner) = board.winner() {
            let win = WIN_SCORE + i64::from(depth);
            let score = if winner == self.maximizer { win } else { -win };
            debug!("{} root already won by {:?}, score {}", self.strategy, winner, score);
            return SearchResult {
                best_move: None,
                score,
                depth,
                stats: self.stats,
                elapsed: start.elapsed(),
            };
        }

        let mut work_board = board.clone();
        let mover_is_max = mover == self.maximizer;
        let moves = self.movegen.candidates(&work_board, mover);

        let mut best_move = None;
        let mut best_score = if mover_is_max { -INF } else { INF };

        for pos in moves {
            let Some(mut child) = work_board.scoped(pos, mover) else {
                continue;
            };
            let (alpha, beta) = match (self.strategy, mover_is_max) {
                (Strategy::AlphaBeta, true) => (best_score, INF),
                (Strategy::AlphaBeta, false) => (-INF, best_score),
                (Strategy::Minimax, _) => (-INF, INF),
            };
            let score = self.search_node(&mut child, pos, depth - 1, !mover_is_max, alpha, beta);
            drop(child);

            let improves = if mover_is_max {
                score > best_score
            } else {
                score < best_score
            };
            if improves || best_move.is_none() {
                best_score = score;
                best_move = Some(pos);
            }
        }

        let elapsed = start.elapsed();
        debug!(
            "{} depth {} for {:?}: best {:?} score {} nodes {} cutoffs {} tt {}/{} in {:?}",
            self.strategy,
            depth,
            mover,
            best_move,
            best_score,
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.tt_hits,
            self.stats.tt_probes,
            elapsed
        );

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_score } else { 0 },
            depth,
            stats: self.stats,
            elapsed,
        }
    }

    /// Score of the position reached by placing `last`, with `depth` plies left.
    fn search_node(
        &mut self,
        board: &mut Board,
        last: Pos,
        depth: u32,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
    ) -> i64 {
        self.stats.nodes += 1;

        let last_side = board.get(last);
        if board.winner_at(last, last_side) {
            let win = WIN_SCORE + i64::from(depth);
            return if last_side == self.maximizer { win } else { -win };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            self.stats.evaluations += 1;
            return self.evaluator.evaluate(board, self.maximizer);
        }

        let key = TTKey::new(board, depth, maximizing);
        if let Some(tt) = self.tt.as_mut() {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(&key, alpha, beta) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let side = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let prune = self.strategy == Strategy::AlphaBeta;
        let mut best = if maximizing { -INF } else { INF };

        for pos in self.movegen.candidates(board, side) {
            let Some(mut child) = board.scoped(pos, side) else {
                continue;
            };
            let score = self.search_node(&mut child, pos, depth - 1, !maximizing, alpha, beta);
            drop(child);

            if maximizing {
                best = best.max(score);
                if prune {
                    alpha = alpha.max(score);
                }
            } else {
                best = best.min(score);
                if prune {
                    beta = beta.min(score);
                }
            }
            if prune && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if let Some(tt) = self.tt.as_mut() {
            tt.store(key, best, EntryType::classify(best, alpha_orig, beta_orig));
        }
        best
    }

    /// Drop every cached result (new game)
    pub fn clear_tt(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
    }

    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }
}
