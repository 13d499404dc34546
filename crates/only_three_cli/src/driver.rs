//! Line-oriented session driver.
//!
//! Reads one command per line, routes it to the engine, and lets the
//! [`SnapshotPrinter`] observer write every resulting snapshot. Prompts and
//! decline notices go to a separate writer so stdout stays machine-readable.

use crate::output::{OutputFormat, SnapshotPrinter};
use derive_getters::Getters;
use derive_more::{Display, Error};
use only_three::{GameEngine, GameKind, Mark, Placement, Position};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// One line of driver input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the current mark at a cell index (not yet range-checked).
    Place(usize),
    /// Restart the game.
    Restart,
    /// Close the session and stop reading.
    Close,
    /// Show the command summary.
    Help,
}

/// Input line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognised command: {:?}", input)]
pub struct ParseCommandError {
    /// The offending input, trimmed.
    pub input: String,
}

impl Command {
    /// Parses one input line; `None` for a blank line.
    ///
    /// Numbers are passed through unchecked so the engine decides whether
    /// the cell exists.
    #[instrument]
    pub fn parse(line: &str) -> Option<Result<Self, ParseCommandError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let command = match line.to_lowercase().as_str() {
            "restart" | "r" => Ok(Command::Restart),
            "close" | "quit" | "exit" | "q" => Ok(Command::Close),
            "help" | "?" => Ok(Command::Help),
            other => other
                .parse::<usize>()
                .ok()
                .or_else(|| Position::from_label_or_number(other).map(Position::to_index))
                .map(Command::Place)
                .ok_or_else(|| ParseCommandError {
                    input: line.to_string(),
                }),
        };
        Some(command)
    }
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
Commands:
  0-8 or a cell name   place the current mark (e.g. 4, center, top-left)
  restart, r           clear the board and start over with X
  close, quit, q       end the session
  help, ?              show this summary";

/// Counters for one driven session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct SessionSummary {
    /// Accepted placements.
    placed: usize,
    /// Declined placement requests.
    declined: usize,
    /// Restarts requested.
    restarts: usize,
    /// Games won, X then O.
    wins: [usize; 2],
}

impl SessionSummary {
    /// Games won by `mark`.
    pub fn wins_for(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.wins[0],
            Mark::O => self.wins[1],
        }
    }

    fn record(&mut self, placement: &Placement) {
        match placement {
            Placement::Placed(placed) => {
                self.placed += 1;
                match placed.winner {
                    Some(Mark::X) => self.wins[0] += 1,
                    Some(Mark::O) => self.wins[1] += 1,
                    None => {}
                }
            }
            Placement::Declined(_) => self.declined += 1,
        }
    }
}

/// Plays one interactive session of `kind`.
///
/// Reads commands from `input` until `close` or end of input, then closes
/// the session. Snapshots go to `out`, everything meant for a human to
/// `notices`.
#[instrument(skip(input, out, notices))]
pub fn run_session<R, W, N>(
    kind: GameKind,
    format: OutputFormat,
    input: R,
    out: W,
    mut notices: N,
) -> anyhow::Result<SessionSummary>
where
    R: BufRead,
    W: Write,
    N: Write,
{
    let mut engine = kind.open_with(SnapshotPrinter::new(out, format));
    let mut summary = SessionSummary::default();

    writeln!(notices, "{}: {}", kind.title(), kind.rules())?;
    writeln!(notices, "Type `help` for commands.")?;
    let opening = engine.snapshot().clone();
    engine.observer_mut().print(&opening)?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                warn!(%err, "Skipping input");
                writeln!(notices, "{}", err)?;
                continue;
            }
        };
        debug!(?command, "Handling command");

        match command {
            Command::Place(index) => {
                let placement = engine.place_mark(index);
                if let Placement::Declined(reason) = &placement {
                    writeln!(notices, "Ignored: {}", reason)?;
                }
                summary.record(&placement);
            }
            Command::Restart => {
                engine.restart();
                summary.restarts += 1;
            }
            Command::Help => writeln!(notices, "{}", HELP)?,
            Command::Close => break,
        }
        engine.observer_mut().check()?;
    }

    let mut printer = engine.close().into_observer();
    printer.check()?;
    info!(?summary, "Session finished");
    Ok(summary)
}

/// Applies `cells` in order to a fresh `kind` session, printing each snapshot.
///
/// Declined cells are logged and skipped. Returns the final winner.
#[instrument(skip(out))]
pub fn replay<W: Write>(
    kind: GameKind,
    format: OutputFormat,
    cells: &[usize],
    out: W,
) -> anyhow::Result<Option<Mark>> {
    let mut engine: GameEngine<SnapshotPrinter<W>> =
        kind.open_with(SnapshotPrinter::new(out, format));

    for cell in cells {
        if let Placement::Declined(reason) = engine.place_mark(*cell) {
            warn!(cell, %reason, "Replay step declined");
        }
        engine.observer_mut().check()?;
    }

    Ok(engine.winner())
}
