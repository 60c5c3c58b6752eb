//! Terminal front end: move parsing, game setup and the score report

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use thiserror::Error;

use crate::board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::engine::{AIEngine, ConfigError, EngineConfig};
use crate::game::{ComputerPlayer, Game, HumanPlayer, InputError, Player, StepOutcome};
use crate::search::Strategy;

/// Parse a `row col` line into a position.
///
/// Only the shape is checked here; whether the cell exists on the current
/// board is up to the caller.
pub fn parse_move(input: &str) -> Result<Pos, InputError> {
    let bad = || InputError::Format(input.trim().to_string());

    let mut parts = input.split_whitespace();
    let (row, col) = match (parts.next(), parts.next(), parts.next()) {
        (Some(row), Some(col), None) => (row, col),
        _ => return Err(bad()),
    };
    let row: u8 = row.parse().map_err(|_| bad())?;
    let col: u8 = col.parse().map_err(|_| bad())?;
    if row as usize >= MAX_BOARD_SIZE || col as usize >= MAX_BOARD_SIZE {
        return Err(bad());
    }
    Ok(Pos::new(row, col))
}

/// Who sits at each side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    HumanVsHuman,
    HumanVsAi,
    AiVsAi,
}

impl Mode {
    /// Search used by the computer players when none is requested
    pub fn default_strategy(self) -> Strategy {
        match self {
            Mode::AiVsAi => Strategy::AlphaBeta,
            Mode::HumanVsHuman | Mode::HumanVsAi => Strategy::Minimax,
        }
    }

    /// Names used when the players give none, first player first
    pub fn default_names(self) -> [&'static str; 2] {
        match self {
            Mode::HumanVsHuman => ["Player 1", "Player 2"],
            Mode::HumanVsAi => ["Player", "AI Bot"],
            Mode::AiVsAi => ["AI X", "AI O"],
        }
    }

    pub fn is_human(self, seat: usize) -> bool {
        match self {
            Mode::HumanVsHuman => true,
            Mode::HumanVsAi => seat == 0,
            Mode::AiVsAi => false,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::HumanVsHuman => f.write_str("hvh"),
            Mode::HumanVsAi => f.write_str("hvai"),
            Mode::AiVsAi => f.write_str("aivai"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hvh" | "1" => Ok(Mode::HumanVsHuman),
            "hvai" | "2" => Ok(Mode::HumanVsAi),
            "aivai" | "3" => Ok(Mode::AiVsAi),
            other => Err(format!(
                "unknown mode `{}` (expected hvh, hvai or aivai)",
                other
            )),
        }
    }
}

/// Settings for one console session
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleOptions {
    pub mode: Mode,
    pub size: usize,
    pub depth: u32,
    /// Overrides [`Mode::default_strategy`]
    pub strategy: Option<Strategy>,
    /// Names for the first and second player; missing ones get defaults
    pub names: Vec<String>,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            mode: Mode::HumanVsAi,
            size: DEFAULT_BOARD_SIZE,
            depth: 3,
            strategy: None,
            names: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::Input(InputError::Io(err))
    }
}

pub fn print_welcome<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(30);
    writeln!(out, "{}", rule)?;
    writeln!(out, "      Welcome to Gomoku      ")?;
    writeln!(out, "{}", rule)
}

pub fn print_scores<W: Write>(out: &mut W, players: &[Box<dyn Player>]) -> io::Result<()> {
    writeln!(out, "\nScores:")?;
    if players.is_empty() {
        return writeln!(out, "No players yet!");
    }
    for player in players {
        writeln!(
            out,
            "{} ({}) - {}",
            player.name(),
            player.stone().symbol(),
            player.wins()
        )?;
    }
    Ok(())
}

/// A writer handle that several players and the game loop can hold at once.
///
/// Prompts and the game transcript end up in the same stream, in the order
/// they were written.
pub struct SharedOutput<W>(Rc<RefCell<W>>);

impl<W: Write> SharedOutput<W> {
    pub fn new(inner: W) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }
}

impl<W: Clone> SharedOutput<W> {
    /// Copy of everything written so far
    pub fn contents(&self) -> W {
        self.0.borrow().clone()
    }
}

impl<W> Clone for SharedOutput<W> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<W: Write> Write for SharedOutput<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

/// Build both players for `options`. Humans read from the shared `input`
/// and prompt on `out`.
fn seat_players<R, W>(
    options: &ConsoleOptions,
    input: Rc<RefCell<R>>,
    out: &SharedOutput<W>,
) -> Result<[Box<dyn Player>; 2], ConfigError>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    let strategy = options
        .strategy
        .unwrap_or_else(|| options.mode.default_strategy());
    let defaults = options.mode.default_names();

    let seat = |index: usize, stone: Stone| -> Result<Box<dyn Player>, ConfigError> {
        let name = options
            .names
            .get(index)
            .cloned()
            .unwrap_or_else(|| defaults[index].to_string());

        if options.mode.is_human(index) {
            return Ok(Box::new(HumanPlayer::shared(
                name,
                stone,
                Rc::clone(&input),
                out.clone(),
            )));
        }
        let config = EngineConfig {
            depth: options.depth,
            strategy,
            ..EngineConfig::default()
        };
        let engine = AIEngine::with_config(stone, config)?;
        Ok(Box::new(ComputerPlayer::new(name, stone, engine, options.depth)))
    };

    Ok([seat(0, Stone::Black)?, seat(1, Stone::White)?])
}

/// Play one game in the terminal. The transcript and the human prompts are
/// both written to `out`.
pub fn run_console<R, W>(
    options: &ConsoleOptions,
    input: R,
    out: SharedOutput<W>,
) -> Result<StepOutcome, ConsoleError>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    let board = Board::new(options.size).map_err(ConfigError::from)?;
    let [first, second] = seat_players(options, Rc::new(RefCell::new(input)), &out)?;

    let mut out = out;
    print_welcome(&mut out)?;
    let mut game = Game::new(board, first, second);
    let outcome = game.play(&mut out)?;
    print_scores(&mut out, game.players())?;
    out.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardError;
    use std::io::Cursor;

    fn transcript() -> SharedOutput<Vec<u8>> {
        SharedOutput::new(Vec::new())
    }

    fn no_input() -> Cursor<Vec<u8>> {
        Cursor::new(Vec::new())
    }

    fn options(mode: Mode, size: usize, depth: u32) -> ConsoleOptions {
        ConsoleOptions {
            mode,
            size,
            depth,
            ..ConsoleOptions::default()
        }
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("3 4").unwrap(), Pos::new(3, 4));
        assert_eq!(parse_move("  10\t0 \n").unwrap(), Pos::new(10, 0));
        assert_eq!(parse_move("19 19").unwrap(), Pos::new(19, 19));
    }

    #[test]
    fn test_parse_move_rejects_malformed_input() {
        for input in ["", "3", "3 4 5", "a b", "3,4", "-1 2", "20 0", "300 1"] {
            match parse_move(input) {
                Err(InputError::Format(text)) => assert_eq!(text, input.trim()),
                other => panic!("`{}` parsed as {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("hvh".parse::<Mode>().unwrap(), Mode::HumanVsHuman);
        assert_eq!("HvAI".parse::<Mode>().unwrap(), Mode::HumanVsAi);
        assert_eq!("3".parse::<Mode>().unwrap(), Mode::AiVsAi);
        assert!("chess".parse::<Mode>().is_err());
        assert_eq!(Mode::AiVsAi.to_string(), "aivai");
    }

    #[test]
    fn test_default_strategy_split() {
        assert_eq!(Mode::HumanVsAi.default_strategy(), Strategy::Minimax);
        assert_eq!(Mode::AiVsAi.default_strategy(), Strategy::AlphaBeta);
    }

    #[test]
    fn test_print_scores() {
        let players: [Box<dyn Player>; 2] = [
            Box::new(HumanPlayer::new("Ann", Stone::Black, Cursor::new(Vec::new()), Vec::new())),
            Box::new(HumanPlayer::new("Ben", Stone::White, Cursor::new(Vec::new()), Vec::new())),
        ];
        let mut out = Vec::new();
        print_scores(&mut out, &players).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nScores:\nAnn (X) - 0\nBen (O) - 0\n"
        );

        let mut out = Vec::new();
        print_scores(&mut out, &[]).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No players yet!"));
    }

    #[test]
    fn test_two_humans_share_input() {
        let script = "0 0\n1 0\n0 1\n1 1\n0 2\n1 2\n0 3\n1 3\n0 4\n";
        let opts = ConsoleOptions {
            names: vec!["Ann".into(), "Ben".into()],
            ..options(Mode::HumanVsHuman, 5, 1)
        };
        let out = transcript();
        let input = Cursor::new(script.as_bytes().to_vec());
        let outcome = run_console(&opts, input, out.clone()).unwrap();
        let text = String::from_utf8(out.contents()).unwrap();

        assert_eq!(outcome, StepOutcome::Win(Stone::Black));
        assert!(text.starts_with("=============================="));
        assert!(text.contains("Welcome to Gomoku"));
        assert!(text.contains("Ann (X) wins!"));
        assert!(text.contains("Ann (X) - 1\nBen (O) - 0"));
    }

    #[test]
    fn test_prompts_land_in_the_transcript() {
        let script = "0 0\n1 0\n0 1\n1 1\n0 2\n1 2\n0 3\n1 3\n0 4\n";
        let out = transcript();
        let input = Cursor::new(script.as_bytes().to_vec());
        run_console(&options(Mode::HumanVsHuman, 5, 1), input, out.clone()).unwrap();
        let text = String::from_utf8(out.contents()).unwrap();

        assert_eq!(text.matches("Enter move (row col): ").count(), 9);
        let welcome = text.find("Welcome to Gomoku").unwrap();
        let first_prompt = text.find("Enter move (row col): ").unwrap();
        let scores = text.find("\nScores:").unwrap();
        assert!(welcome < first_prompt && first_prompt < scores);
    }

    #[test]
    fn test_computer_match_runs_to_the_end() {
        let out = transcript();
        let outcome = run_console(&options(Mode::AiVsAi, 6, 1), no_input(), out.clone()).unwrap();
        assert!(matches!(outcome, StepOutcome::Win(_) | StepOutcome::Draw));
        let text = String::from_utf8(out.contents()).unwrap();
        assert!(text.contains("\nScores:\nAI X (X)"));
    }

    #[test]
    fn test_human_leaving_ends_session() {
        let result = run_console(&options(Mode::HumanVsAi, 7, 1), no_input(), transcript());
        assert!(matches!(result, Err(ConsoleError::Input(InputError::Closed))));
    }

    #[test]
    fn test_rejects_bad_setup() {
        let out = transcript();
        let result = run_console(&options(Mode::AiVsAi, 4, 1), no_input(), out.clone());
        assert!(matches!(
            result,
            Err(ConsoleError::Config(ConfigError::Board(BoardError::InvalidSize { size: 4 })))
        ));

        let result = run_console(&options(Mode::AiVsAi, 9, 0), no_input(), out.clone());
        assert!(matches!(result, Err(ConsoleError::Config(ConfigError::ZeroDepth))));
        assert!(out.contents().is_empty());
    }
}
