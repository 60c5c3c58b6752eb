//! Board structure: grid storage, legality and win detection

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{
    BoardError, Pos, Stone, DEFAULT_BOARD_SIZE, DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
    WIN_LENGTH,
};

/// Square game board of `size` x `size` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    /// Create an empty board, rejecting sizes outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize { size });
        }
        Ok(Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center cell `(N/2, N/2)`
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.size + pos.col as usize
    }

    #[inline]
    fn pos_of(&self, idx: usize) -> Pos {
        Pos::new((idx / self.size) as u8, (idx % self.size) as u8)
    }

    /// Get stone at position (`Empty` outside the board)
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !self.contains(pos) {
            return Stone::Empty;
        }
        let idx = self.index(pos);
        if self.black.get(idx) {
            Stone::Black
        } else if self.white.get(idx) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// A move is legal when it is on the board and the cell is empty
    #[inline]
    pub fn is_legal(&self, pos: Pos) -> bool {
        self.contains(pos) && self.is_empty(pos)
    }

    /// Place a stone, reporting why the move was rejected.
    /// The board is left untouched on error.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied { pos });
        }
        let idx = self.index(pos);
        match stone {
            Stone::Black => self.black.set(idx),
            Stone::White => self.white.set(idx),
            Stone::Empty => return Err(BoardError::EmptyStone),
        }
        Ok(())
    }

    /// Place a stone if the move is legal; `false` (and no change) otherwise.
    #[inline]
    pub fn apply(&mut self, pos: Pos, stone: Stone) -> bool {
        self.place(pos, stone).is_ok()
    }

    /// Restore a cell to Empty
    #[inline]
    pub fn undo(&mut self, pos: Pos) {
        if self.contains(pos) {
            let idx = self.index(pos);
            self.black.clear(idx);
            self.white.clear(idx);
        }
    }

    /// Place a stone for the lifetime of the returned guard.
    ///
    /// The stone is removed when the guard is dropped, so every exit path of
    /// the caller leaves the board as it found it. `None` if the move is illegal.
    pub fn scoped(&mut self, pos: Pos, stone: Stone) -> Option<ScopedMove<'_>> {
        if self.apply(pos, stone) {
            Some(ScopedMove { board: self, pos })
        } else {
            None
        }
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Positions holding `stone`, row-major
    pub fn positions(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.stones(stone)
            .into_iter()
            .flat_map(|bb| bb.iter_ones())
            .map(move |idx| self.pos_of(idx))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size * self.size
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Pos> {
        let n = self.size as u8;
        (0..n)
            .flat_map(|r| (0..n).map(move |c| Pos::new(r, c)))
            .filter(|&p| self.is_empty(p))
            .collect()
    }

    /// Length of the line of `stone` through `pos` along `(dr, dc)`,
    /// counting `pos` itself as one of them.
    pub fn line_length(&self, pos: Pos, dr: i32, dc: i32, stone: Stone) -> usize {
        let run = |sign: i32| {
            (1..)
                .map_while(|step| pos.offset(dr * sign, dc * sign, step, self.size))
                .take_while(|&p| self.get(p) == stone)
                .count()
        };
        1 + run(1) + run(-1)
    }

    /// Does the stone at `pos` complete five (or more) in a row for `stone`?
    ///
    /// Only the 4 lines through `pos` are checked, so this is the cheap test
    /// to run right after placing a stone.
    pub fn winner_at(&self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || self.get(pos) != stone {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.line_length(pos, dr, dc, stone) >= WIN_LENGTH)
    }

    /// Full-board scan for a five
    pub fn winner(&self) -> Option<Stone> {
        [Stone::Black, Stone::White]
            .into_iter()
            .find(|&stone| self.positions(stone).any(|p| self.winner_at(p, stone)))
    }

    /// The first five-in-a-row line through `pos`, ordered along its axis
    pub fn winning_line(&self, pos: Pos) -> Option<Vec<Pos>> {
        let stone = self.get(pos);
        if stone == Stone::Empty {
            return None;
        }
        for &(dr, dc) in &DIRECTIONS {
            let back = (1..)
                .map_while(|step| pos.offset(-dr, -dc, step, self.size))
                .take_while(|&p| self.get(p) == stone)
                .count() as i32;
            let line: Vec<Pos> = (0..)
                .map_while(|step| pos.offset(dr, dc, step - back, self.size))
                .take_while(|&p| self.get(p) == stone)
                .collect();
            if line.len() >= WIN_LENGTH {
                return Some(line);
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }
}

/// Text rendering: column header, then one row per line with its index.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, "{:2} ", c)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{:2} ", r)?;
            for c in 0..self.size {
                write!(f, " {} ", self.get(Pos::new(r as u8, c as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A stone placed for the duration of a scope; removed again on drop.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.undo(self.pos);
    }
}
