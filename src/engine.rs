//! Main AI Engine integrating all search components
//!
//! A move request goes through two stages:
//!
//! 1. **Tactical scan**: win now, block the opponent's five, or cap an
//!    opponent three before it becomes an open four. A hit is played
//!    without searching.
//! 2. **Tree search**: minimax or alpha-beta to the requested depth.
//!
//! If the search has nothing to offer the engine falls back to the center,
//! then to a random empty cell.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut engine = AIEngine::new(Stone::White);
//! let mut board = Board::new(15).unwrap();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.get_move_with_stats(&board, Stone::White, 2);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::{Board, BoardError, Pos, Stone};
use crate::eval::{Evaluator, PatternWeights, DEFAULT_BLOCK_BIAS};
use crate::search::{
    find_forcing_move, ForcingKind, MoveGenerator, SearchResult, Searcher, Strategy, TTStats,
    TranspositionTable, DEFAULT_RADIUS,
};

/// Invalid engine or game configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("transposition table capacity must be at least 1 entry")]
    ZeroCapacity,
    #[error("block bias {0} must be a finite number >= 1.0")]
    BlockBias(f64),
    #[error("pattern weight {lower} ({lower_value}) must not exceed {higher} ({higher_value})")]
    WeightOrder {
        lower: &'static str,
        lower_value: i64,
        higher: &'static str,
        higher_value: i64,
    },
    #[error("OPEN_FOUR ({open_four}) must be at least 10x {pattern} ({value})")]
    OpenFourMargin {
        open_four: i64,
        pattern: &'static str,
        value: i64,
    },
}

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Plies searched per move
    pub depth: u32,
    pub strategy: Strategy,
    /// Cache search results across requests
    pub transposition: bool,
    /// Entries kept before the cache is cleared
    pub tt_capacity: usize,
    /// Chebyshev radius for candidate moves
    pub radius: usize,
    /// Let the move generator return a lone winning/blocking cell
    pub forcing_shortcut: bool,
    pub weights: PatternWeights,
    /// Multiplier on the opponent's pattern total
    pub block_bias: f64,
    /// Seed for the random tie-breaks; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            strategy: Strategy::AlphaBeta,
            transposition: true,
            tt_capacity: 1 << 18,
            radius: DEFAULT_RADIUS,
            forcing_shortcut: false,
            weights: PatternWeights::default(),
            block_bias: DEFAULT_BLOCK_BIAS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.transposition && self.tt_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.block_bias.is_finite() || self.block_bias < 1.0 {
            return Err(ConfigError::BlockBias(self.block_bias));
        }
        self.weights.validate()
    }
}

/// Which stage of the engine produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes five
    ImmediateWin,
    /// Blocks the opponent's five
    Defense,
    /// Caps an opponent three
    OpenFourBlock,
    /// Plain minimax search
    Minimax,
    /// Alpha-beta search
    AlphaBeta,
    /// Center or random cell, no search result
    Fallback,
}

impl From<ForcingKind> for SearchType {
    fn from(kind: ForcingKind) -> Self {
        match kind {
            ForcingKind::Win => SearchType::ImmediateWin,
            ForcingKind::Block => SearchType::Defense,
            ForcingKind::OpenFourBlock => SearchType::OpenFourBlock,
        }
    }
}

impl From<Strategy> for SearchType {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Minimax => SearchType::Minimax,
            Strategy::AlphaBeta => SearchType::AlphaBeta,
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchType::ImmediateWin => "immediate win",
            SearchType::Defense => "defense",
            SearchType::OpenFourBlock => "open-four block",
            SearchType::Minimax => "minimax",
            SearchType::AlphaBeta => "alpha-beta",
            SearchType::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// Result of a move request with search statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// `None` only when the board is full
    pub best_move: Option<Pos>,
    /// Search score from the engine maximizer's view (0 for unsearched moves)
    pub score: i64,
    pub search_type: SearchType,
    pub time_ms: u64,
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn forcing(pos: Pos, kind: ForcingKind, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: kind.into(),
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn searched(result: &SearchResult, strategy: Strategy, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: strategy.into(),
            time_ms,
            nodes: result.stats.nodes,
        }
    }

    #[inline]
    fn fallback(best_move: Option<Pos>, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move,
            score: 0,
            search_type: SearchType::Fallback,
            time_ms,
            nodes,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Every engine scores positions for one designated maximizer (usually the
/// side it plays). Requests for the other side minimize instead. The
/// transposition table lives as long as the engine.
#[derive(Debug, Clone)]
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
    rng: StdRng,
}

impl AIEngine {
    /// Engine with the default configuration.
    #[must_use]
    pub fn new(maximizer: Stone) -> Self {
        Self::build(maximizer, EngineConfig::default())
    }

    /// Engine with a custom configuration, validated first.
    pub fn with_config(maximizer: Stone, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(maximizer, config))
    }

    fn build(maximizer: Stone, config: EngineConfig) -> Self {
        let evaluator = Evaluator::new(config.weights, config.block_bias);
        let movegen = MoveGenerator::new(config.radius, config.forcing_shortcut);
        let tt = config
            .transposition
            .then(|| TranspositionTable::new(config.tt_capacity));
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            searcher: Searcher::new(maximizer, config.strategy, evaluator, movegen, tt),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn maximizer(&self) -> Stone {
        self.searcher.maximizer()
    }

    /// Best move for `mover` at the configured depth.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, mover: Stone) -> Option<Pos> {
        let depth = self.config.depth;
        self.find_best_move(board, mover, depth)
    }

    /// Best move for `mover` searching `depth` plies.
    ///
    /// The board is not modified. `None` only when no legal move exists.
    #[must_use]
    pub fn find_best_move(&mut self, board: &Board, mover: Stone, depth: u32) -> Option<Pos> {
        self.get_move_with_stats(board, mover, depth).best_move
    }

    /// Best move for `mover` with the stage that produced it and statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, mover: Stone, depth: u32) -> MoveResult {
        let start = Instant::now();
        let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;

        if board.is_full() {
            return MoveResult::fallback(None, elapsed_ms(start), 0);
        }

        if let Some(forcing) = find_forcing_move(board, mover, &mut self.rng) {
            info!("{:?} plays {} ({})", mover, forcing.pos, forcing.kind);
            return MoveResult::forcing(forcing.pos, forcing.kind, elapsed_ms(start));
        }

        let result = self.searcher.search(board, mover, depth);
        match result.best_move {
            Some(pos) if board.is_legal(pos) => {
                info!(
                    "{:?} plays {} by {} (score {}, {} nodes, {}ms)",
                    mover,
                    pos,
                    self.searcher.strategy(),
                    result.score,
                    result.stats.nodes,
                    result.elapsed.as_millis()
                );
                MoveResult::searched(&result, self.searcher.strategy(), elapsed_ms(start))
            }
            other => {
                let pos = self.fallback_move(board);
                warn!(
                    "search for {:?} returned {:?}, falling back to {:?}",
                    mover, other, pos
                );
                MoveResult::fallback(pos, elapsed_ms(start), result.stats.nodes)
            }
        }
    }

    /// Center if free, else a uniformly random empty cell.
    fn fallback_move(&mut self, board: &Board) -> Option<Pos> {
        let center = board.center();
        if board.is_legal(center) {
            return Some(center);
        }
        board.empty_cells().choose(&mut self.rng).copied()
    }

    /// Clear the transposition table cache.
    ///
    /// Call this when starting a new game to avoid stale positions.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Transposition table statistics, `None` when caching is off.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.searcher.tt_stats()
    }
}
