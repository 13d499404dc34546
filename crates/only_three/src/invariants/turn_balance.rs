//! Turn balance invariant: queue sizes agree with X-first alternation.

use super::super::{Mark, MarkQueue, Snapshot};
use super::Invariant;

/// Invariant: the side to move agrees with how many marks each side holds.
///
/// X moves first and turns alternate, so X has placed either as many marks
/// as O or exactly one more. X is one ahead when O is to move, or when X has
/// just won. Queue lengths are placement counts capped at three, so "one
/// ahead" also allows both queues to be full. Once decided, the turn stays
/// with the winner.
pub struct TurnBalanceInvariant;

impl Invariant<Snapshot> for TurnBalanceInvariant {
    fn holds(snapshot: &Snapshot) -> bool {
        let x_ahead = match snapshot.winner() {
            Some(winner) if winner != snapshot.turn() => return false,
            Some(winner) => winner == Mark::X,
            None => snapshot.turn() == Mark::O,
        };

        let x = snapshot.queue(Mark::X).len();
        let o = snapshot.queue(Mark::O).len();
        if x_ahead {
            x == o + 1 || (x == MarkQueue::CAPACITY && o == MarkQueue::CAPACITY)
        } else {
            x == o
        }
    }

    fn description() -> &'static str {
        "Side to move agrees with X-first alternation"
    }
}
