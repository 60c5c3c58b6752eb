//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::board::BoardError;
use crate::console::Mode;
use crate::{AIEngine, Board, EngineConfig, MoveResult, Pos, Stone};

/// Plies searched by the GUI's computer players
pub const AI_DEPTH: u32 = 2;

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Win { winner: Stone, line: Vec<Pos> },
    Draw,
}

/// AI computation state
pub enum AiState {
    Idle,
    /// The engine travels to the worker and comes back with its move,
    /// so its cache survives between moves.
    Thinking {
        receiver: Receiver<(AIEngine, MoveResult)>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: Mode,
    pub names: [String; 2],
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub message: Option<String>,
    /// Computer players, indexed by `seat`
    engines: [Option<AIEngine>; 2],
}

fn seat(stone: Stone) -> usize {
    match stone {
        Stone::White => 1,
        _ => 0,
    }
}

impl GameState {
    /// Black moves first; in human vs AI the human plays Black.
    pub fn new(mode: Mode, size: usize, names: [String; 2]) -> Result<Self, BoardError> {
        let board = Board::new(size)?;
        let strategy = mode.default_strategy();
        let engine_for = |stone: Stone| {
            let config = EngineConfig {
                depth: AI_DEPTH,
                strategy,
                ..EngineConfig::default()
            };
            AIEngine::with_config(stone, config).ok()
        };
        let engines = match mode {
            Mode::HumanVsHuman => [None, None],
            Mode::HumanVsAi => [None, engine_for(Stone::White)],
            Mode::AiVsAi => [engine_for(Stone::Black), engine_for(Stone::White)],
        };

        info!("new {} game on a {}x{} board", mode, size, size);
        Ok(Self {
            board,
            mode,
            names,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            message: None,
            engines,
        })
    }

    /// Same mode, size and names, empty board.
    pub fn restart(&self) -> Result<Self, BoardError> {
        Self::new(self.mode, self.board.size(), self.names.clone())
    }

    pub fn current_name(&self) -> &str {
        &self.names[seat(self.current_turn)]
    }

    pub fn name_of(&self, stone: Stone) -> &str {
        &self.names[seat(stone)]
    }

    fn is_ai(&self, stone: Stone) -> bool {
        !self.mode.is_human(seat(stone))
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_ai(self.current_turn)
    }

    pub fn is_ai_turn(&self) -> bool {
        self.is_ai(self.current_turn)
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Place the human's stone at `pos`.
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.board.is_legal(pos) {
            return Err(format!("{} is already taken", pos));
        }

        self.execute_move(pos);
        Ok(())
    }

    /// Play `pos` for the side to move; callers check legality.
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        if !self.board.apply(pos, color) {
            self.message = Some(format!("Invalid move {}", pos));
            return;
        }

        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.message = None;

        if let Some(line) = self.board.winning_line(pos) {
            info!("{:?} wins with {:?}", color, line);
            self.game_over = Some(GameResult::Win {
                winner: color,
                line,
            });
            return;
        }
        if self.board.is_full() {
            self.game_over = Some(GameResult::Draw);
            return;
        }

        self.current_turn = color.opponent();
    }

    /// Hand the engine for the side to move to a worker thread.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }
        let color = self.current_turn;
        let mut engine = match self.engines[seat(color)].take() {
            Some(engine) => engine,
            None => {
                self.message = Some("AI engine unavailable".to_string());
                return;
            }
        };

        let board = self.board.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, color, AI_DEPTH);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Poll the worker; plays its move once it has answered.
    pub fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(answer) => answer,
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI worker exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        let (engine, move_result) = received;
        self.ai_state = AiState::Idle;
        self.engines[seat(self.current_turn)] = Some(engine);
        let best_move = move_result.best_move;
        self.last_ai_result = Some(move_result);

        match best_move {
            Some(pos) if self.board.is_legal(pos) => self.execute_move(pos),
            _ => self.message = Some("AI could not find a move".to_string()),
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Take back the last move; against the AI, back to the human's last turn.
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            Mode::HumanVsAi => {
                let last_by_ai = self
                    .move_history
                    .last()
                    .map_or(false, |&(_, stone)| self.is_ai(stone));
                if last_by_ai && self.move_history.len() >= 2 {
                    2
                } else {
                    1
                }
            }
            Mode::HumanVsHuman | Mode::AiVsAi => 1,
        };

        for _ in 0..undo_count {
            if let Some((pos, stone)) = self.move_history.pop() {
                self.board.undo(pos);
                self.current_turn = stone;
            }
        }
        self.last_move = self.move_history.last().map(|&(pos, _)| pos);
        self.game_over = None;
        self.message = None;
        for engine in self.engines.iter_mut().flatten() {
            engine.clear_cache();
        }
    }
}
