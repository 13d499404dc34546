//! Only three - command-line driver
//!
//! Plays or replays sessions of the only-three game engine.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use only_three::{GameKind, Mark};
use only_three_cli::{Cli, Command, DriverConfig, OutputFormat, replay, run_session};
use std::io::{self, Write};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = DriverConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play { game } => run_play(game.unwrap_or(*config.game()), *config.format()),
        Command::Replay { cells } => run_replay(*config.game(), *config.format(), &cells),
        Command::Games => run_games(),
    }
}

/// Play an interactive session on stdin/stdout
#[instrument]
fn run_play(kind: GameKind, format: OutputFormat) -> Result<()> {
    info!("Starting session");
    let stdin = io::stdin();
    let summary = run_session(kind, format, stdin.lock(), io::stdout(), io::stderr())?;
    eprintln!(
        "{} placed, {} ignored, {} restarts; X won {}, O won {}",
        summary.placed(),
        summary.declined(),
        summary.restarts(),
        summary.wins_for(Mark::X),
        summary.wins_for(Mark::O)
    );
    Ok(())
}

/// Replay a fixed list of cells
#[instrument]
fn run_replay(kind: GameKind, format: OutputFormat, cells: &[usize]) -> Result<()> {
    let winner = replay(kind, format, cells, io::stdout())?;
    info!(?winner, "Replay finished");
    Ok(())
}

/// Print the game catalogue
fn run_games() -> Result<()> {
    let mut out = io::stdout().lock();
    for kind in GameKind::iter() {
        writeln!(out, "{} ({})\n  {}", kind.title(), kind, kind.rules())?;
    }
    Ok(())
}
