//! Board representation for Gomoku

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use thiserror::Error;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, ScopedMove};

/// Default board size (15x15)
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Smallest board a five can be laid out on
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest supported board (20x20)
pub const MAX_BOARD_SIZE: usize = 20;
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 400

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// The four canonical line axes: horizontal, vertical and both diagonals.
/// Every undirected line is visited from exactly one end when scanning these.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Board symbol used by the text renderer and parsers
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
            Stone::Empty => '.',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

impl std::str::FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" | "x" => Ok(Stone::Black),
            "white" | "w" | "o" => Ok(Stone::White),
            other => Err(format!("unknown side `{}` (expected black or white)", other)),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_BOARD_SIZE && (col as usize) < MAX_BOARD_SIZE);
        Self { row, col }
    }

    /// Step `steps` cells along `(dr, dc)`, staying inside a `size`x`size` board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, steps: i32, size: usize) -> Option<Pos> {
        let r = i32::from(self.row) + dr * steps;
        let c = i32::from(self.col) + dc * steps;
        if Self::is_valid(r, c, size) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        let size = size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl std::str::FromStr for Pos {
    type Err = String;

    /// Parses `row,col` (as taken by the analysis command).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `row,col`, got `{}`", s))?;
        let row: u8 = row.trim().parse().map_err(|e| format!("bad row in `{}`: {}", s, e))?;
        let col: u8 = col.trim().parse().map_err(|e| format!("bad col in `{}`: {}", s, e))?;
        if row as usize >= MAX_BOARD_SIZE || col as usize >= MAX_BOARD_SIZE {
            return Err(format!("`{}` is outside the largest supported board", s));
        }
        Ok(Pos::new(row, col))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {size} is outside the supported range {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}")]
    InvalidSize { size: usize },
    #[error("{pos} is outside the {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },
    #[error("{pos} is already occupied")]
    Occupied { pos: Pos },
    #[error("cannot place an empty stone")]
    EmptyStone,
}
