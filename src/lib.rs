//! Gomoku engine with minimax and alpha-beta search
//!
//! Free-style Gomoku on an N x N board (5 to 20 lines, 15 by default):
//! - Five or more in a row wins, along any of the four axes
//! - No captures, no forbidden moves for either side
//! - A full board with no five is a draw
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards, win detection
//! - [`eval`]: Run classification and position evaluation
//! - [`search`]: Move generation, tactical scan, minimax / alpha-beta search
//! - [`engine`]: AI engine combining the tactical scan and the tree search
//! - [`game`]: Players and the turn loop
//! - [`console`] and [`ui`]: terminal and egui front ends
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut board = Board::new(15).unwrap();
//! let mut engine = AIEngine::new(Stone::White);
//!
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! // AI responds as White
//! if let Some(pos) = engine.find_best_move(&board, Stone::White, 2) {
//!     board.place(pos, Stone::White).unwrap();
//!     println!("AI plays at {}", pos);
//! }
//! ```
//!
//! # Move Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's five
//! 3. Cap an opponent three before it opens into a four
//! 4. Minimax or alpha-beta search to the requested depth
//! 5. Center, then a random empty cell

pub mod board;
pub mod console;
pub mod engine;
pub mod eval;
pub mod game;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use engine::{AIEngine, ConfigError, EngineConfig, MoveResult, SearchType};
pub use search::Strategy;
