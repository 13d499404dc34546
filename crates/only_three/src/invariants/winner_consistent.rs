//! Winner consistency: the winner is set exactly when a side holds a line.

use super::super::{Mark, Snapshot, rules};
use super::Invariant;

/// Invariant: `winner` names the only side whose cells form a line, and is
/// unset when no side does.
pub struct WinnerConsistentInvariant;

impl Invariant<Snapshot> for WinnerConsistentInvariant {
    fn holds(snapshot: &Snapshot) -> bool {
        let lines: Vec<_> = Mark::BOTH
            .into_iter()
            .filter(|mark| rules::winning_line(snapshot.queue(*mark)).is_some())
            .collect();

        match snapshot.winner() {
            None => lines.is_empty(),
            Some(winner) => lines == [winner],
        }
    }

    fn description() -> &'static str {
        "Winner is set exactly when one side holds a line"
    }
}
