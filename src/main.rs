//! Negamax-TTT: play tic-tac-toe against a perfect engine.
//!
//! ## Usage
//!
//! - `negamax-ttt` - Play an interactive game
//! - `negamax-ttt play --sign x` - Play as x (x always moves first)
//! - `negamax-ttt protocol` - Start the text protocol server on stdin/stdout
//! - `negamax-ttt selfplay --games 1000` - Pit the engine against random play
//! - `negamax-ttt demo` - Watch the engine play itself

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use negamax_ttt::console::{choose_sign, play_game};
use negamax_ttt::playout::{PerfectOpponent, playout, selfplay};
use negamax_ttt::position::{Game, Sign};
use negamax_ttt::protocol::ProtocolEngine;
use negamax_ttt::search::analyze;

/// Negamax-TTT: a perfect-play tic-tac-toe engine
#[derive(Parser)]
#[command(name = "negamax-ttt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Sign to play; asked interactively when omitted
        #[arg(long, value_enum)]
        sign: Option<Sign>,
    },
    /// Start the text protocol server for front-ends and scripts
    Protocol {
        /// Sign the human side plays
        #[arg(long, value_enum, default_value_t = Sign::O)]
        sign: Sign,
    },
    /// Play the engine against a random opponent
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: usize,
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Play { sign }) => run_play(sign),
        None => run_play(None),
        Some(Commands::Protocol { sign }) => {
            let mut engine = ProtocolEngine::with_sign(sign);
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("protocol session failed")
        }
        Some(Commands::Selfplay { games, seed }) => {
            let stats = selfplay(games, seed);
            println!("Games:         {}", stats.games);
            println!("Computer wins: {}", stats.computer_wins);
            println!("Draws:         {}", stats.draws);
            println!("Human wins:    {}", stats.human_wins);
            Ok(())
        }
        Some(Commands::Demo) => {
            run_demo();
            Ok(())
        }
    }
}

fn run_play(sign: Option<Sign>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let sign = match sign {
        Some(sign) => sign,
        None => choose_sign(&mut input, &mut output)?,
    };
    let mut game = Game::new(sign);
    play_game(&mut game, &mut input, &mut output)?;
    Ok(())
}

fn run_demo() {
    println!("Negamax-TTT: Perfect-Play Tic-Tac-Toe\n");

    println!("=== Opening Search ===");
    let game = Game::new(Sign::O);
    let result = analyze(game.ai().occupancy, game.human().occupancy);
    if let Some(square) = result.best_move {
        println!("Best opening square: {}", square + 1);
    }
    println!(
        "Nodes searched: {}, cutoffs: {}",
        result.stats.nodes, result.stats.cutoffs
    );

    println!("\n=== Engine vs Engine ===");
    let state = playout(Sign::X, &mut PerfectOpponent);
    println!("Result: {state}");
}
