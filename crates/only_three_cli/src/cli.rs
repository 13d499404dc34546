//! Command-line interface for the only-three driver.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use only_three::GameKind;
use std::path::PathBuf;

/// Only three - tic-tac-toe where each side keeps three marks
#[derive(Parser, Debug)]
#[command(name = "only_three")]
#[command(about = "Headless driver for the only-three game engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (TOML). Defaults to ./only_three.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot output format, overriding the config file
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session, reading one command per line from stdin
    Play {
        /// Game to open (defaults to the config file's `game`)
        #[arg(long)]
        game: Option<GameKind>,
    },

    /// Apply a list of cell indices to a fresh game and print each snapshot
    Replay {
        /// Cell indices (0-8), in play order
        #[arg(required = true, num_args = 1..)]
        cells: Vec<usize>,
    },

    /// List the available games
    Games,
}
