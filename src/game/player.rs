//! Participants of a game: humans typing moves and engine-backed players

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use log::warn;

use crate::board::{Board, Pos, Stone};
use crate::console::parse_move;
use crate::engine::{AIEngine, MoveResult};

use super::InputError;

/// Anything that can pick a move for one side
pub trait Player {
    fn name(&self) -> &str;

    fn stone(&self) -> Stone;

    /// Pick a legal move on `board`. May block waiting for input.
    fn choose_move(&mut self, board: &Board) -> Result<Pos, InputError>;

    /// Games won so far
    fn wins(&self) -> u32;

    fn add_win(&mut self);
}

/// Player reading `row col` lines from `input`, prompting on `output`.
///
/// The input handle can be shared so that two humans at one terminal read
/// from the same buffered stream.
pub struct HumanPlayer<R, W> {
    name: String,
    stone: Stone,
    input: Rc<RefCell<R>>,
    output: W,
    wins: u32,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, stone: Stone, input: R, output: W) -> Self {
        Self::shared(name, stone, Rc::new(RefCell::new(input)), output)
    }

    pub fn shared(
        name: impl Into<String>,
        stone: Stone,
        input: Rc<RefCell<R>>,
        output: W,
    ) -> Self {
        Self {
            name: name.into(),
            stone,
            input,
            output,
            wins: 0,
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn stone(&self) -> Stone {
        self.stone
    }

    /// Re-prompts until a legal move is entered; `Closed` at end of input.
    fn choose_move(&mut self, board: &Board) -> Result<Pos, InputError> {
        let mut line = String::new();
        loop {
            write!(self.output, "Enter move (row col): ")?;
            self.output.flush()?;

            line.clear();
            if self.input.borrow_mut().read_line(&mut line)? == 0 {
                return Err(InputError::Closed);
            }

            match parse_move(&line) {
                Ok(pos) if board.is_legal(pos) => return Ok(pos),
                Ok(pos) => writeln!(self.output, "Invalid move {}. Try again.", pos)?,
                Err(err) => writeln!(self.output, "{}. Try again.", err)?,
            }
        }
    }

    fn wins(&self) -> u32 {
        self.wins
    }

    fn add_win(&mut self) {
        self.wins += 1;
    }
}

/// Engine-backed player; its engine maximizes for the player's own stone.
///
/// Random tie-breaks all go through the engine, so a seeded engine makes
/// the player reproducible.
pub struct ComputerPlayer {
    name: String,
    stone: Stone,
    engine: AIEngine,
    depth: u32,
    wins: u32,
    last_result: Option<MoveResult>,
}

impl ComputerPlayer {
    /// `engine` should be built with `stone` as its maximizer.
    pub fn new(name: impl Into<String>, stone: Stone, engine: AIEngine, depth: u32) -> Self {
        Self {
            name: name.into(),
            stone,
            engine,
            depth,
            wins: 0,
            last_result: None,
        }
    }

    /// Result of the most recent move request
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last_result.as_ref()
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn stone(&self) -> Stone {
        self.stone
    }

    fn choose_move(&mut self, board: &Board) -> Result<Pos, InputError> {
        // The engine does its own center/random fallback; `None` means a full board.
        let result = self.engine.get_move_with_stats(board, self.stone, self.depth);
        let chosen = result.best_move.filter(|&pos| board.is_legal(pos));
        self.last_result = Some(result);

        chosen.ok_or_else(|| {
            warn!("{} has no move on this board", self.name);
            InputError::NoMove(self.name.clone())
        })
    }

    fn wins(&self) -> u32 {
        self.wins
    }

    fn add_win(&mut self) {
        self.wins += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use std::io::Cursor;

    fn human(script: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        HumanPlayer::new(
            "Alice",
            Stone::Black,
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        )
    }

    #[test]
    fn test_human_reads_move() {
        let board = Board::new(9).unwrap();
        let mut player = human("3 4\n");
        assert_eq!(player.choose_move(&board).unwrap(), Pos::new(3, 4));
        let prompt = String::from_utf8(player.output.clone()).unwrap();
        assert_eq!(prompt, "Enter move (row col): ");
    }

    #[test]
    fn test_human_reprompts_on_bad_input() {
        let mut board = Board::new(9).unwrap();
        board.place(Pos::new(1, 1), Stone::White).unwrap();
        let mut player = human("hello\n1 1\n9 0\n2 2\n");

        assert_eq!(player.choose_move(&board).unwrap(), Pos::new(2, 2));
        let transcript = String::from_utf8(player.output.clone()).unwrap();
        assert_eq!(transcript.matches("Enter move (row col): ").count(), 4);
        assert_eq!(transcript.matches("Try again.").count(), 3);
    }

    #[test]
    fn test_human_end_of_input() {
        let board = Board::new(9).unwrap();
        let mut player = human("oops\n");
        assert!(matches!(player.choose_move(&board), Err(InputError::Closed)));
    }

    #[test]
    fn test_shared_input_between_players() {
        let board = Board::new(9).unwrap();
        let input = Rc::new(RefCell::new(Cursor::new(b"0 0\n1 1\n".to_vec())));
        let mut first = HumanPlayer::shared("A", Stone::Black, Rc::clone(&input), Vec::new());
        let mut second = HumanPlayer::shared("B", Stone::White, input, Vec::new());

        assert_eq!(first.choose_move(&board).unwrap(), Pos::new(0, 0));
        assert_eq!(second.choose_move(&board).unwrap(), Pos::new(1, 1));
    }

    #[test]
    fn test_win_counter() {
        let mut player = human("");
        assert_eq!(player.wins(), 0);
        player.add_win();
        player.add_win();
        assert_eq!(player.wins(), 2);
        assert_eq!(player.name(), "Alice");
        assert_eq!(player.stone(), Stone::Black);
    }

    #[test]
    fn test_computer_plays_legal_move() {
        let engine = AIEngine::with_config(
            Stone::White,
            EngineConfig {
                seed: Some(11),
                ..EngineConfig::default()
            },
        )
        .unwrap();
        let mut player = ComputerPlayer::new("Bot", Stone::White, engine, 2);
        let mut board = Board::new(9).unwrap();
        board.place(Pos::new(4, 4), Stone::Black).unwrap();

        let pos = player.choose_move(&board).unwrap();
        assert!(board.is_legal(pos));
        assert!(player.last_result().is_some());
    }

    #[test]
    fn test_computer_on_full_board_reports_no_move() {
        let mut board = Board::new(5).unwrap();
        for pos in board.empty_cells() {
            let stone = if (pos.col / 2 + pos.row) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place(pos, stone).unwrap();
        }
        let mut player = ComputerPlayer::new("Bot", Stone::Black, AIEngine::new(Stone::Black), 2);
        assert!(matches!(player.choose_move(&board), Err(InputError::NoMove(_))));
        assert_eq!(player.last_result().and_then(|r| r.best_move), None);
    }

    #[test]
    fn test_seeded_computers_choose_alike() {
        // White three on the diagonal: Black caps either end at random
        let mut board = Board::new(9).unwrap();
        for i in 3..6 {
            board.place(Pos::new(i, i), Stone::White).unwrap();
        }
        let seeded = |seed| {
            let config = EngineConfig {
                seed: Some(seed),
                ..EngineConfig::default()
            };
            let engine = AIEngine::with_config(Stone::Black, config).unwrap();
            ComputerPlayer::new("Bot", Stone::Black, engine, 2)
        };

        for seed in 0..8 {
            let first = seeded(seed).choose_move(&board).unwrap();
            let second = seeded(seed).choose_move(&board).unwrap();
            assert_eq!(first, second);
            assert!([Pos::new(2, 2), Pos::new(6, 6)].contains(&first));
        }
    }
}
