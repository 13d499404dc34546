//! Headless command-line driver for the only-three engine.
//!
//! The driver stands in for a presentation layer: it turns text commands
//! into engine operations and prints the snapshots the engine emits.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, DriverConfig};
pub use driver::{ParseCommandError, SessionSummary, replay, run_session};
pub use output::{OutputFormat, SnapshotPrinter, render_text};
