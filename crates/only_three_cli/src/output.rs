//! Writes engine snapshots for whoever reads stdout.

use only_three::{GameKind, Highlight, Mark, Position, Snapshot, StateObserver};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::{instrument, trace};

/// Snapshot encoding on stdout.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Board drawing plus a status line.
    #[default]
    Text,
    /// One JSON object per snapshot, one per line.
    Json,
}

/// Per-line JSON record.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    eviction_candidates: [Option<Position>; 2],
    highlights: [Highlight; 9],
}

/// Renders a snapshot as a text board and status lines.
#[instrument(level = "trace", skip(snapshot))]
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut text = snapshot.board().display();
    text.push('\n');

    for mark in Mark::BOTH {
        let cells: Vec<String> = snapshot
            .queue(mark)
            .iter()
            .map(|pos| pos.to_index().to_string())
            .collect();
        text.push_str(&format!("{}: [{}]", mark, cells.join(",")));
        if let Some(pos) = snapshot.eviction_candidate(mark)
            && !snapshot.is_decided()
        {
            text.push_str(&format!(" next out: {}", pos.to_index()));
        }
        text.push('\n');
    }

    match (snapshot.winner(), snapshot.winning_line()) {
        (Some(winner), Some(line)) => text.push_str(&format!("{} wins on {}\n", winner, line)),
        (Some(winner), None) => text.push_str(&format!("{} wins\n", winner)),
        (None, _) => text.push_str(&format!("{} to play\n", snapshot.turn())),
    }
    text
}

/// Observer that writes every snapshot to `out`.
///
/// Observer callbacks cannot fail, so the first write error is kept and
/// surfaced by [`SnapshotPrinter::check`].
#[derive(Debug)]
pub struct SnapshotPrinter<W> {
    out: W,
    format: OutputFormat,
    error: Option<io::Error>,
}

impl<W: Write> SnapshotPrinter<W> {
    /// Creates a printer writing `format` to `out`.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            error: None,
        }
    }

    /// Writes one snapshot.
    pub fn print(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}", render_text(snapshot))?;
            }
            OutputFormat::Json => {
                let record = JsonRecord {
                    snapshot,
                    eviction_candidates: Mark::BOTH.map(|mark| snapshot.eviction_candidate(mark)),
                    highlights: snapshot.highlights(),
                };
                serde_json::to_writer(&mut self.out, &record)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    /// Returns the first write error since the last check.
    pub fn check(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

}

impl<W: Write> StateObserver for SnapshotPrinter<W> {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        trace!(turn = %snapshot.turn(), "Printing snapshot");
        if let Err(err) = self.print(snapshot) {
            self.error.get_or_insert(err);
        }
    }

    fn on_session_closed(&mut self, kind: GameKind) {
        let result = match self.format {
            OutputFormat::Text => writeln!(self.out, "{} closed", kind.title()),
            OutputFormat::Json => writeln!(self.out, r#"{{"closed":"{}"}}"#, kind),
        };
        if let Err(err) = result.and_then(|()| self.out.flush()) {
            self.error.get_or_insert(err);
        }
    }
}
