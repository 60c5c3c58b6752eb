//! Turn sequencing between two players

pub mod player;

use std::io::Write;

use thiserror::Error;

use crate::board::{Board, Pos, Stone};

pub use player::{ComputerPlayer, HumanPlayer, Player};

/// Errors raised while collecting a move
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid input `{0}`: enter two integers (row col)")]
    Format(String),
    #[error("input closed before a move was entered")]
    Closed,
    #[error("{0} has no legal move")]
    NoMove(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What a single placement did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Off the board or occupied; nothing changed
    Invalid,
    /// Placed; the other player is up
    Continue,
    /// Placed and completed five
    Win(Stone),
    /// Placed and filled the board
    Draw,
}

/// A game between two players on one board
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
    current: usize,
    last_move: Option<Pos>,
}

impl Game {
    /// `first` moves first.
    pub fn new(board: Board, first: Box<dyn Player>, second: Box<dyn Player>) -> Self {
        Self {
            board,
            players: [first, second],
            current: 0,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Box<dyn Player>; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &dyn Player {
        self.players[self.current].as_ref()
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Place the current player's stone at `pos`.
    ///
    /// The turn passes only on `Continue`.
    pub fn step(&mut self, pos: Pos) -> StepOutcome {
        let stone = self.players[self.current].stone();
        if !self.board.apply(pos, stone) {
            return StepOutcome::Invalid;
        }
        self.last_move = Some(pos);

        if self.board.winner_at(pos, stone) {
            self.players[self.current].add_win();
            return StepOutcome::Win(stone);
        }
        if self.board.is_full() {
            return StepOutcome::Draw;
        }
        self.current = 1 - self.current;
        StepOutcome::Continue
    }

    /// Run the game to completion, printing the board after every move.
    pub fn play<W: Write>(&mut self, out: &mut W) -> Result<StepOutcome, InputError> {
        write!(out, "{}", self.board)?;

        loop {
            if self.board.is_full() {
                writeln!(out, "\nIt's a draw!")?;
                return Ok(StepOutcome::Draw);
            }

            let player = &mut self.players[self.current];
            let (name, symbol) = (player.name().to_owned(), player.stone().symbol());
            writeln!(out, "\n{}'s turn ({})", name, symbol)?;
            let pos = player.choose_move(&self.board)?;

            match self.step(pos) {
                StepOutcome::Invalid => writeln!(out, "Invalid move. Try again.")?,
                StepOutcome::Continue => write!(out, "{}", self.board)?,
                StepOutcome::Win(stone) => {
                    write!(out, "{}", self.board)?;
                    writeln!(out, "\n{} ({}) wins!", name, stone.symbol())?;
                    return Ok(StepOutcome::Win(stone));
                }
                StepOutcome::Draw => {
                    write!(out, "{}", self.board)?;
                    writeln!(out, "\nIt's a draw!")?;
                    return Ok(StepOutcome::Draw);
                }
            }
        }
    }
}
