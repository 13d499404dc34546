//! Queue capacity invariant: no side ever holds more than three cells.

use super::super::{Mark, MarkQueue, Snapshot};
use super::Invariant;

/// Invariant: each queue holds at most [`MarkQueue::CAPACITY`] cells.
pub struct QueueCapacityInvariant;

impl Invariant<Snapshot> for QueueCapacityInvariant {
    fn holds(snapshot: &Snapshot) -> bool {
        Mark::BOTH
            .into_iter()
            .all(|mark| snapshot.queue(mark).len() <= MarkQueue::CAPACITY)
    }

    fn description() -> &'static str {
        "Each side holds at most three cells"
    }
}
