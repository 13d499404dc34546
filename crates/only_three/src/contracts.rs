//! Contract-based validation for placements.
//!
//! Contracts pair preconditions, checked on every request, with
//! postconditions, checked in debug builds before a new state is committed:
//! {P} place {Q}.

use super::action::Decline;
use super::invariants::{InvariantSet, OnlyThreeInvariants};
use super::position::Position;
use super::snapshot::Snapshot;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Decline>;

    /// Checks postconditions on the state the action produced.
    fn post(before: &S, after: &S) -> Result<(), Decline>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell index lies on the board.
pub struct CellInRange;

impl CellInRange {
    /// Resolves the index to a position.
    #[instrument]
    pub fn check(index: usize) -> Result<Position, Decline> {
        Position::from_index(index).ok_or(Decline::OutOfRange(index))
    }
}

/// Precondition: nobody has won yet.
pub struct GameUndecided;

impl GameUndecided {
    /// Declines once a winner exists.
    #[instrument(skip(snapshot))]
    pub fn check(snapshot: &Snapshot) -> Result<(), Decline> {
        match snapshot.winner() {
            Some(winner) => Err(Decline::GameDecided(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: the target cell holds no live mark.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Declines when `pos` is occupied.
    #[instrument(skip(snapshot))]
    pub fn check(pos: Position, snapshot: &Snapshot) -> Result<(), Decline> {
        if snapshot.board().is_empty(pos) {
            Ok(())
        } else {
            Err(Decline::CellOccupied(pos))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark by cell index.
///
/// Preconditions, in order:
/// - cell index in 0-8
/// - no winner yet
/// - cell empty
///
/// Postcondition: every engine invariant holds on the new state.
pub struct PlacementContract;

impl PlacementContract {
    /// Checks all preconditions and resolves the target position.
    #[instrument(skip(snapshot))]
    pub fn admit(snapshot: &Snapshot, index: usize) -> Result<Position, Decline> {
        let pos = CellInRange::check(index)?;
        GameUndecided::check(snapshot)?;
        CellIsEmpty::check(pos, snapshot)?;
        Ok(pos)
    }
}

impl Contract<Snapshot, usize> for PlacementContract {
    fn pre(snapshot: &Snapshot, index: &usize) -> Result<(), Decline> {
        Self::admit(snapshot, *index).map(|_| ())
    }

    fn post(_before: &Snapshot, after: &Snapshot) -> Result<(), Decline> {
        OnlyThreeInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            Decline::InvariantViolation(descriptions)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::fixtures::played;
    use crate::{Mark, Square};

    #[test]
    fn test_precondition_accepts_empty_cell() {
        let snapshot = Snapshot::initial();
        assert_eq!(PlacementContract::admit(&snapshot, 4), Ok(Position::Center));
        assert!(PlacementContract::pre(&snapshot, &8).is_ok());
    }

    #[test]
    fn test_precondition_out_of_range() {
        let snapshot = Snapshot::initial();
        assert_eq!(PlacementContract::pre(&snapshot, &9), Err(Decline::OutOfRange(9)));
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let snapshot = played(&[4]);
        assert_eq!(
            PlacementContract::pre(&snapshot, &4),
            Err(Decline::CellOccupied(Position::Center))
        );
    }

    #[test]
    fn test_range_checked_before_winner() {
        let snapshot = played(&[0, 3, 1, 4, 2]);
        assert_eq!(PlacementContract::pre(&snapshot, &42), Err(Decline::OutOfRange(42)));
        assert_eq!(PlacementContract::pre(&snapshot, &8), Err(Decline::GameDecided(Mark::X)));
        // Decided takes precedence over occupied.
        assert_eq!(PlacementContract::pre(&snapshot, &0), Err(Decline::GameDecided(Mark::X)));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = played(&[0]);
        let after = played(&[0, 4]);
        assert!(PlacementContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = played(&[0]);
        let mut after = played(&[0, 4]);
        after.board.set(Position::TopLeft, Square::Empty);
        assert!(matches!(
            PlacementContract::post(&before, &after),
            Err(Decline::InvariantViolation(_))
        ));
    }
}
