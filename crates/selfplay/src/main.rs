//! Headless self-play: the autopilot plays a seeded game until it tops out
//! or reaches the piece limit, then prints a summary.

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use stacker_core::{Board, TSpin};
use stacker_engine::{Game, GravityConfig};
use stacker_search::{Autopilot, Difficulty, StepOutcome};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stacker-selfplay", version, about = "Run the beam-search AI on a seeded game")]
struct Cli {
    /// AI preset: easy, medium, hard or expert
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,
    /// Seed for the piece sequence
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Stop after this many pieces
    #[arg(short = 'n', long, default_value_t = 500)]
    max_pieces: u32,
    /// Debug-level logs unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    difficulty: String,
    seed: u64,
    pieces: u32,
    lines: u32,
    score: u32,
    level: u32,
    tspins: u32,
    perfect_clears: u32,
    /// Steps where the inputs could not reach the planned placement.
    diverged: u32,
    game_over: bool,
    elapsed_ms: u128,
    board: Board,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.max_pieces == 0 {
        bail!("--max-pieces must be at least 1");
    }

    let mut game = Game::with_config(cli.seed, GravityConfig::gravity_off());
    let pilot = Autopilot::with_difficulty(cli.difficulty);
    info!(difficulty = %cli.difficulty, seed = cli.seed, "starting self-play");

    let started = Instant::now();
    let mut tspins = 0;
    let mut perfect_clears = 0;
    let mut diverged = 0;
    while game.pieces_placed() < cli.max_pieces {
        let outcome = pilot.step(&mut game);
        if matches!(outcome, StepOutcome::Diverged { .. }) {
            diverged += 1;
        }
        let Some(lock) = outcome.lock() else {
            break;
        };
        if lock.result.tspin != TSpin::None {
            tspins += 1;
        }
        if lock.result.perfect_clear {
            perfect_clears += 1;
        }
        if game.pieces_placed() % 100 == 0 {
            debug!(
                pieces = game.pieces_placed(),
                lines = game.lines(),
                score = game.score(),
                "progress"
            );
        }
    }

    let summary = Summary {
        difficulty: cli.difficulty.to_string(),
        seed: cli.seed,
        pieces: game.pieces_placed(),
        lines: game.lines(),
        score: game.score(),
        level: game.level(),
        tspins,
        perfect_clears,
        diverged,
        game_over: game.is_game_over(),
        elapsed_ms: started.elapsed().as_millis(),
        board: game.board().clone(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.board);
        println!(
            "{} seed {}: {} pieces, {} lines, score {}, level {}, {} t-spins, {} perfect clears, {} diverged{} ({} ms)",
            summary.difficulty,
            summary.seed,
            summary.pieces,
            summary.lines,
            summary.score,
            summary.level,
            summary.tspins,
            summary.perfect_clears,
            summary.diverged,
            if summary.game_over { ", topped out" } else { "" },
            summary.elapsed_ms,
        );
    }
    Ok(())
}
