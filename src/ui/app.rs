//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameResult, GameState, AI_DEPTH};
use super::theme::*;
use crate::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::console::Mode;
use crate::Stone;

/// Choices made before a game starts
struct SetupForm {
    mode: Mode,
    size_text: String,
    names: [String; 2],
    error: Option<String>,
}

impl SetupForm {
    fn new(size: usize) -> Self {
        Self {
            mode: Mode::HumanVsAi,
            size_text: size.to_string(),
            names: [String::new(), String::new()],
            error: None,
        }
    }

    /// Typed names for human seats, defaults for empty ones and the AI
    fn player_names(&self) -> [String; 2] {
        let defaults = self.mode.default_names();
        let pick = |seat: usize| {
            let typed = self.names[seat].trim();
            if self.mode.is_human(seat) && !typed.is_empty() {
                typed.to_string()
            } else {
                defaults[seat].to_string()
            }
        };
        [pick(0), pick(1)]
    }

    fn start(&mut self) -> Option<GameState> {
        let size = match self.size_text.trim().parse::<usize>() {
            Ok(size) => size,
            Err(_) => {
                self.error = Some(format!(
                    "Board size must be a number between {} and {}",
                    MIN_BOARD_SIZE, MAX_BOARD_SIZE
                ));
                return None;
            }
        };
        match GameState::new(self.mode, size, self.player_names()) {
            Ok(state) => {
                self.error = None;
                Some(state)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}

enum Screen {
    Setup(SetupForm),
    Playing(GameState),
}

/// Main Gomoku application
pub struct GomokuApp {
    screen: Screen,
    board_view: BoardView,
    show_debug: bool,
}

impl GomokuApp {
    /// Opens on the setup screen with `size` pre-filled
    pub fn new(_cc: &eframe::CreationContext<'_>, size: usize) -> Self {
        Self {
            screen: Screen::Setup(SetupForm::new(size)),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn render_setup(ctx: &Context, form: &mut SetupForm) -> Option<GameState> {
        let mut started = None;
        CentralPanel::default()
            .frame(Frame::new().fill(PANEL_BG).inner_margin(32.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GOMOKU").size(32.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new("Five in a row wins").size(12.0).color(TEXT_MUTED));
                });
                ui.add_space(24.0);

                card_frame().show(ui, |ui| {
                    ui.label(RichText::new("MODE").size(10.0).color(TEXT_MUTED));
                    ui.radio_value(&mut form.mode, Mode::HumanVsHuman, "Human vs Human");
                    ui.radio_value(&mut form.mode, Mode::HumanVsAi, "Human vs AI (minimax)");
                    ui.radio_value(&mut form.mode, Mode::AiVsAi, "AI vs AI (alpha-beta)");
                    ui.label(
                        RichText::new(format!("AI searches {} plies", AI_DEPTH))
                            .size(10.0)
                            .color(TEXT_SECONDARY),
                    );

                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!("BOARD SIZE ({}-{})", MIN_BOARD_SIZE, MAX_BOARD_SIZE))
                            .size(10.0)
                            .color(TEXT_MUTED),
                    );
                    ui.text_edit_singleline(&mut form.size_text);

                    for seat in 0..2 {
                        if form.mode.is_human(seat) {
                            ui.add_space(8.0);
                            let label = if seat == 0 { "BLACK (X) NAME" } else { "WHITE (O) NAME" };
                            ui.label(RichText::new(label).size(10.0).color(TEXT_MUTED));
                            ui.text_edit_singleline(&mut form.names[seat]);
                        }
                    }

                    ui.add_space(16.0);
                    if ui.button(RichText::new("Start").size(14.0).strong()).clicked() {
                        started = form.start();
                    }

                    if let Some(err) = &form.error {
                        ui.add_space(8.0);
                        ui.label(RichText::new(err).size(12.0).color(STATUS_ERROR));
                    }
                });
            });
        started
    }
}

/// Rounded panel used for every side-panel section
fn card_frame() -> Frame {
    Frame::new()
        .fill(CARD_BG)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(12.0)
}

/// What the game screen asked the app to do this frame
#[derive(Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Undo,
    NewGame,
    Setup,
}

fn render_menu_bar(ctx: &Context, state: &GameState, show_debug: &mut bool) -> Action {
    let mut action = Action::None;
    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Game", |ui| {
                if ui.button("New Game (N)").clicked() {
                    action = Action::NewGame;
                    ui.close_menu();
                }
                if ui.button("Setup...").clicked() {
                    action = Action::Setup;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Undo (U)").clicked() {
                    action = Action::Undo;
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(show_debug, "AI Panel (D)");
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mode_text = match state.mode {
                    Mode::HumanVsHuman => "Human vs Human",
                    Mode::HumanVsAi => "Human vs AI",
                    Mode::AiVsAi => "AI vs AI",
                };
                let size = state.board.size();
                ui.label(format!("{} - {}x{}", mode_text, size, size));
            });
        });
    });
    action
}

fn render_side_panel(ctx: &Context, state: &GameState, show_debug: bool) -> Action {
    let mut action = Action::None;
    SidePanel::right("info_panel")
        .min_width(240.0)
        .max_width(280.0)
        .frame(Frame::new().fill(PANEL_BG))
        .show(ctx, |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
            });
            ui.add_space(12.0);

            render_turn_card(ui, state);
            ui.add_space(10.0);

            action = render_actions_card(ui, state);

            if show_debug {
                ui.add_space(10.0);
                render_ai_card(ui, state);
            }

            if let Some(msg) = &state.message {
                ui.add_space(10.0);
                Frame::new()
                    .fill(egui::Color32::from_rgb(80, 60, 30))
                    .corner_radius(CornerRadius::same(8))
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                    });
            }
        });
    action
}

/// Whose turn it is, or how the game ended
fn render_turn_card(ui: &mut egui::Ui, state: &GameState) {
    card_frame().show(ui, |ui| {
        let shown = match &state.game_over {
            Some(GameResult::Win { winner, .. }) => *winner,
            _ => state.current_turn,
        };
        let (stone_char, accent, ink) = if shown == Stone::Black {
            ("●", egui::Color32::from_rgb(70, 70, 75), TEXT_PRIMARY)
        } else {
            ("○", egui::Color32::from_rgb(220, 220, 225), egui::Color32::from_rgb(30, 30, 35))
        };

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 22.0, accent);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                stone_char,
                egui::FontId::proportional(28.0),
                ink,
            );
            ui.add_space(12.0);

            ui.vertical(|ui| {
                ui.add_space(4.0);
                let (headline, status, color) = match &state.game_over {
                    Some(GameResult::Win { winner, .. }) => (
                        format!("{} ({})", state.name_of(*winner), winner.symbol()),
                        "wins!".to_string(),
                        WIN_HIGHLIGHT,
                    ),
                    Some(GameResult::Draw) => {
                        ("Board full".to_string(), "It's a draw!".to_string(), TEXT_SECONDARY)
                    }
                    None => {
                        let headline =
                            format!("{} ({})", state.current_name(), state.current_turn.symbol());
                        match state.ai_thinking_elapsed() {
                            Some(elapsed) => (
                                headline,
                                format!("AI thinking... {:.1}s", elapsed.as_secs_f32()),
                                STATUS_BUSY,
                            ),
                            None => (headline, "to move".to_string(), STATUS_OK),
                        }
                    }
                };
                ui.label(RichText::new(headline).size(16.0).strong().color(TEXT_PRIMARY));
                ui.label(RichText::new(status).size(12.0).color(color));
            });
        });
    });
}

fn render_actions_card(ui: &mut egui::Ui, state: &GameState) -> Action {
    let mut action = Action::None;
    card_frame().show(ui, |ui| {
        ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
        ui.add_space(8.0);

        let button = |ui: &mut egui::Ui, text: &str| {
            Frame::new()
                .fill(BUTTON_BG)
                .corner_radius(CornerRadius::same(6))
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                            .sense(egui::Sense::click()),
                    )
                    .clicked()
                })
                .inner
        };

        ui.horizontal(|ui| {
            if button(ui, "Undo") {
                action = Action::Undo;
            }
            if button(ui, "New Game") {
                action = Action::NewGame;
            }
            if button(ui, "Setup") {
                action = Action::Setup;
            }
        });

        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Move #{}", state.move_history.len()))
                .size(11.0)
                .color(TEXT_SECONDARY),
        );
    });
    action
}

/// Last engine answer: how it was found and what it cost
fn render_ai_card(ui: &mut egui::Ui, state: &GameState) {
    card_frame().show(ui, |ui| {
        ui.label(RichText::new("LAST AI MOVE").size(10.0).color(TEXT_MUTED));
        ui.add_space(6.0);

        let result = match &state.last_ai_result {
            Some(result) => result,
            None => {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            }
        };

        ui.label(
            RichText::new(result.search_type.to_string())
                .size(11.0)
                .strong()
                .color(STATUS_OK),
        );
        ui.label(
            RichText::new(format!("Score: {}", result.score))
                .size(10.0)
                .color(TEXT_SECONDARY),
        );
        ui.label(
            RichText::new(format!("{} nodes in {}ms", result.nodes, result.time_ms))
                .size(10.0)
                .color(TEXT_SECONDARY),
        );
        if let Some(pos) = result.best_move {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("→ {}", pos))
                    .size(12.0)
                    .strong()
                    .color(WIN_HIGHLIGHT),
            );
        }
    });
}

fn render_board(ctx: &Context, state: &mut GameState, board_view: &mut BoardView) {
    CentralPanel::default().show(ctx, |ui| {
        ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

        let winning_line = match &state.game_over {
            Some(GameResult::Win { line, .. }) => Some(line.as_slice()),
            _ => None,
        };
        let accepting_input =
            state.game_over.is_none() && state.is_human_turn() && !state.is_ai_thinking();

        let clicked = board_view.show(
            ui,
            &state.board,
            state.current_turn,
            state.last_move,
            winning_line,
            accepting_input,
        );

        if let Some(pos) = clicked {
            if let Err(msg) = state.try_place_stone(pos) {
                state.message = Some(msg);
            }
        }
    });
}

fn keyboard_action(ctx: &Context, show_debug: &mut bool) -> Action {
    ctx.input(|i| {
        if i.key_pressed(egui::Key::D) {
            *show_debug = !*show_debug;
        }
        if i.key_pressed(egui::Key::U) {
            Action::Undo
        } else if i.key_pressed(egui::Key::N) {
            Action::NewGame
        } else {
            Action::None
        }
    })
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let state = match &mut self.screen {
            Screen::Setup(form) => {
                if let Some(state) = Self::render_setup(ctx, form) {
                    self.screen = Screen::Playing(state);
                }
                return;
            }
            Screen::Playing(state) => state,
        };

        state.check_ai_result();
        if state.is_ai_turn() && !state.is_ai_thinking() && state.game_over.is_none() {
            state.start_ai_thinking();
        }

        let mut action = keyboard_action(ctx, &mut self.show_debug);
        let menu = render_menu_bar(ctx, state, &mut self.show_debug);
        let side = render_side_panel(ctx, state, self.show_debug);
        render_board(ctx, state, &mut self.board_view);
        for chosen in [menu, side] {
            if chosen != Action::None {
                action = chosen;
            }
        }

        if state.is_ai_thinking() {
            ctx.request_repaint();
        }

        match action {
            Action::None => {}
            Action::Undo => state.undo(),
            Action::NewGame => {
                if state.is_ai_thinking() {
                    state.message = Some("Wait for the AI to finish".to_string());
                } else if let Ok(fresh) = state.restart() {
                    *state = fresh;
                }
            }
            Action::Setup => {
                let size = state.board.size();
                self.screen = Screen::Setup(SetupForm::new(size));
            }
        }
    }
}
