//! GUI module for the Gomoku game
//!
//! Native window built on egui/eframe. Engine moves are computed on a
//! worker thread and picked up on the next frame.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameResult, GameState, AI_DEPTH};
