//! Queue/board agreement: the queues are an exact index of the board.

use super::super::{Mark, Snapshot, Square};
use super::Invariant;

/// Invariant: the queues and the board describe the same marks.
///
/// Every occupied square appears in exactly one queue, the queue of the mark
/// on it; every queued cell is occupied by that queue's mark; no cell is
/// queued twice.
pub struct QueueBoardAgreementInvariant;

impl Invariant<Snapshot> for QueueBoardAgreementInvariant {
    fn holds(snapshot: &Snapshot) -> bool {
        let queued_once = Mark::BOTH.into_iter().all(|mark| {
            let queue = snapshot.queue(mark);
            queue.iter().all(|pos| {
                snapshot.board().get(pos) == Square::Occupied(mark)
                    && queue.iter().filter(|other| *other == pos).count() == 1
            })
        });

        let board_indexed = Mark::BOTH.into_iter().all(|mark| {
            snapshot
                .board()
                .occupied_by(mark)
                .all(|pos| snapshot.queues().owner(pos) == Some(mark))
        });

        queued_once && board_indexed
    }

    fn description() -> &'static str {
        "Queues index exactly the occupied squares, by owning mark"
    }
}
