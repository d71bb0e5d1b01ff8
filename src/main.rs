//! Command-line driver: evaluate a position, list its moves, run perft, or
//! let two engines play each other and print the game as PGN.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use snapshot_chess::engines::engine_minimax::MinimaxEngine;
use snapshot_chess::engines::engine_random::RandomEngine;
use snapshot_chess::engines::engine_trait::{Engine, GoParams};
use snapshot_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use snapshot_chess::game_state::game_state::GameState;
use snapshot_chess::move_generation::perft::{perft_divide, perft_multi_threaded};
use snapshot_chess::search::minimax::SearchConfig;
use snapshot_chess::search::threading::evaluate_parallel;
use snapshot_chess::utils::pgn::write_pgn;
use snapshot_chess::utils::san::{line_to_san, move_to_san};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a position to a fixed depth and print the evaluation and line
    Eval {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 2)]
        depth: u8,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// List the legal moves of a position
    Moves {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },
    /// Count leaf nodes, with per-move breakdown
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 3)]
        depth: u8,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Engine self-play; prints the finished game as PGN
    Play {
        #[arg(long, value_enum, default_value_t = EngineKind::Minimax)]
        white: EngineKind,
        #[arg(long, value_enum, default_value_t = EngineKind::Random)]
        black: EngineKind,
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 2)]
        depth: u8,
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Stop after this many half-moves
        #[arg(long, default_value_t = 80)]
        plies: usize,
        /// Seed for the random engine
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EngineKind {
    Minimax,
    Random,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli.command) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Eval { fen, depth, threads } => eval(&fen, SearchConfig { depth, threads }),
        Command::Moves { fen } => moves(&fen),
        Command::Perft { fen, depth, threads } => perft(&fen, depth, threads),
        Command::Play {
            white,
            black,
            fen,
            depth,
            threads,
            plies,
            seed,
        } => {
            let config = SearchConfig { depth, threads };
            let mut engines = [
                build_engine(white, config, seed),
                build_engine(black, config, seed.map(|s| s.wrapping_add(1))),
            ];
            play(&fen, &mut engines, plies)
        }
    }
}

fn load(fen: &str) -> Result<GameState> {
    GameState::from_fen(fen).with_context(|| format!("cannot load FEN '{fen}'"))
}

fn eval(fen: &str, config: SearchConfig) -> Result<()> {
    let mut game = load(fen)?;
    let started = Instant::now();
    let Some(result) = evaluate_parallel(&game, &config)? else {
        println!("illegal position: the side to move can capture the king");
        return Ok(());
    };

    println!("evaluation: {}", result.evaluation);
    match result.best_move {
        Some(best) => println!("best move:  {}", move_to_san(&mut game, &best)?),
        None => println!("best move:  (none)"),
    }
    println!("line:       {}", line_to_san(&mut game, &result.line())?);
    println!("nodes:      {} in {:?}", result.nodes, started.elapsed());
    Ok(())
}

fn moves(fen: &str) -> Result<()> {
    let mut game = load(fen)?;
    println!("{game}");
    let legals = game.calculate_legals();
    for mv in &legals {
        println!("{mv:<6} {}", move_to_san(&mut game, mv)?);
    }
    println!("{} legal move(s), status {:?}", legals.len(), game.status());
    Ok(())
}

fn perft(fen: &str, depth: u8, threads: usize) -> Result<()> {
    let mut game = load(fen)?;
    let started = Instant::now();
    for (mv, nodes) in perft_divide(&mut game, depth) {
        println!("{mv}: {nodes}");
    }
    let counts = perft_multi_threaded(&game, depth, threads)?;
    println!("{counts:#?}");
    println!("elapsed {:?}", started.elapsed());
    Ok(())
}

fn build_engine(kind: EngineKind, config: SearchConfig, seed: Option<u64>) -> Box<dyn Engine> {
    match kind {
        EngineKind::Minimax => Box::new(MinimaxEngine::new(config)),
        EngineKind::Random => match seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
    }
}

fn play(fen: &str, engines: &mut [Box<dyn Engine>; 2], plies: usize) -> Result<()> {
    let mut game = load(fen)?;
    for engine in engines.iter_mut() {
        engine.new_game();
    }

    for _ in 0..plies {
        let engine = &mut engines[game.moving_team().index()];
        let out = engine.choose_move(&game, &GoParams::default())?;
        for line in &out.info_lines {
            log::debug!("{}: {line}", engine.name());
        }
        let Some(mv) = out.best_move else {
            break;
        };
        game.make_move(mv)?;
    }

    let pgn = write_pgn(&game, engines[0].name(), engines[1].name())?;
    print!("{pgn}");
    Ok(())
}
