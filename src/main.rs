//! Gomoku command line: console game, egui window and position analysis

use std::error::Error;
use std::io;
use std::process;

use gomoku::board::Stone;
use gomoku::console::{run_console, ConsoleOptions, Mode, SharedOutput};
use gomoku::ui::GomokuApp;
use gomoku::{AIEngine, Board, ConfigError, EngineConfig, Pos, Strategy, DEFAULT_BOARD_SIZE};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "gomoku",
    about = "Free-style Gomoku against a minimax / alpha-beta engine"
)]
enum Command {
    #[structopt(
        name = "console",
        about = "Play in the terminal. `--mode` picks human vs human, human vs AI (default) or AI vs AI; moves are typed as `row col`."
    )]
    Console(ConsoleArgs),
    #[structopt(name = "gui", about = "Open the egui window.")]
    Gui,
    #[structopt(
        name = "best-move",
        about = "Print the engine's move for a position given as lists of `row,col` cells, e.g. `--black 5,5 5,6 --white 3,3`."
    )]
    BestMove(BestMoveArgs),
}

#[derive(StructOpt)]
struct ConsoleArgs {
    #[structopt(short, long, default_value = "hvai")]
    mode: Mode,
    #[structopt(short, long, default_value = "15")]
    size: usize,
    #[structopt(short, long, default_value = "3")]
    depth: u32,
    /// Engine search; minimax against a human, alpha-beta in AI vs AI when omitted
    #[structopt(long)]
    strategy: Option<Strategy>,
    /// Player names, first player (X) first
    names: Vec<String>,
}

#[derive(StructOpt)]
struct BestMoveArgs {
    #[structopt(short, long, default_value = "15")]
    size: usize,
    #[structopt(long)]
    black: Vec<Pos>,
    #[structopt(long)]
    white: Vec<Pos>,
    /// Side to move
    #[structopt(long, default_value = "black")]
    side: Stone,
    #[structopt(short, long, default_value = "2")]
    depth: u32,
    #[structopt(long, default_value = "alpha-beta")]
    strategy: Strategy,
}

fn main() {
    env_logger::init();

    let result: Result<(), Box<dyn Error>> = match Command::from_args() {
        Command::Console(args) => console(args),
        Command::Gui => gui(),
        Command::BestMove(args) => best_move(args).map_err(Into::into),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn console(args: ConsoleArgs) -> Result<(), Box<dyn Error>> {
    let options = ConsoleOptions {
        mode: args.mode,
        size: args.size,
        depth: args.depth,
        strategy: args.strategy,
        names: args.names,
    };
    let stdin = io::stdin().lock();
    run_console(&options, stdin, SharedOutput::new(io::stdout()))?;
    Ok(())
}

fn gui() -> Result<(), Box<dyn Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, DEFAULT_BOARD_SIZE)))),
    )?;
    Ok(())
}

fn best_move(args: BestMoveArgs) -> Result<(), ConfigError> {
    let mut board = Board::new(args.size)?;
    for &pos in &args.black {
        board.place(pos, Stone::Black)?;
    }
    for &pos in &args.white {
        board.place(pos, Stone::White)?;
    }

    let config = EngineConfig {
        depth: args.depth,
        strategy: args.strategy,
        ..EngineConfig::default()
    };
    let mut engine = AIEngine::with_config(args.side, config)?;
    let result = engine.get_move_with_stats(&board, args.side, args.depth);

    match result.best_move {
        Some(pos) => {
            println!("{}", board);
            println!("best move: {} {}", pos.row, pos.col);
            println!("search type: {}", result.search_type);
            println!("score: {}", result.score);
            println!("nodes: {} in {}ms", result.nodes, result.time_ms);
        }
        None => eprintln!("There are no empty cells in the given position."),
    }
    Ok(())
}
