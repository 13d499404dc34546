//! Immutable game state, one value per transition.
//!
//! Observers receive a `&Snapshot` after every accepted transition. The
//! projections at the bottom of this module let a presentation layer derive
//! per-cell effects (pending eviction, winning line) without any callbacks
//! of its own.

use super::invariants::{InvariantSet, InvariantViolation, OnlyThreeInvariants};
use super::position::Position;
use super::queue::{MarkQueue, MarkQueues};
use super::rules::{self, Line};
use super::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};

/// Full engine state at one point in time.
///
/// Deserialization checks every engine invariant, so a loaded snapshot is
/// one the engine could have produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnapshotFields")]
pub struct Snapshot {
    pub(crate) board: Board,
    pub(crate) queues: MarkQueues,
    pub(crate) turn: Mark,
    pub(crate) winner: Option<Mark>,
}

/// Snapshot fields as read, before the invariants are checked.
#[derive(Deserialize)]
struct SnapshotFields {
    board: Board,
    queues: MarkQueues,
    turn: Mark,
    winner: Option<Mark>,
}

impl TryFrom<SnapshotFields> for Snapshot {
    type Error = InvariantViolation;

    fn try_from(fields: SnapshotFields) -> Result<Self, Self::Error> {
        let snapshot = Self {
            board: fields.board,
            queues: fields.queues,
            turn: fields.turn,
            winner: fields.winner,
        };
        OnlyThreeInvariants::check_all(&snapshot).map_err(|violations| {
            let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
            InvariantViolation::new(descriptions.join("; "))
        })?;
        Ok(snapshot)
    }
}

/// How a presentation layer should treat one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Highlight {
    /// Nothing special.
    #[default]
    None,
    /// This cell is its owner's oldest of three and goes on that side's next placement.
    PendingEviction,
    /// This cell is part of the winning line.
    WinningLine,
}

impl Snapshot {
    /// The initial state: empty board and queues, X to play, no winner.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            queues: MarkQueues::new(),
            turn: Mark::X,
            winner: None,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Both placement queues.
    pub fn queues(&self) -> &MarkQueues {
        &self.queues
    }

    /// Queue for one mark.
    pub fn queue(&self, mark: Mark) -> &MarkQueue {
        self.queues.get(mark)
    }

    /// Mark to play next (the winner, once decided).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Winning mark, if the game is decided.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// True once a winner exists.
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// True for the initial state.
    pub fn is_initial(&self) -> bool {
        *self == Self::initial()
    }

    /// Cell that `mark` loses on its next placement.
    ///
    /// Only a full queue has a candidate.
    pub fn eviction_candidate(&self, mark: Mark) -> Option<Position> {
        let queue = self.queue(mark);
        if queue.is_full() { queue.oldest() } else { None }
    }

    /// The winner's line.
    pub fn winning_line(&self) -> Option<Line> {
        self.winner
            .and_then(|mark| rules::winning_line(self.queue(mark)))
    }

    /// Per-cell effect for a presentation layer.
    ///
    /// The winning line takes precedence; pending eviction is only reported
    /// while the game is undecided.
    pub fn highlight(&self, pos: Position) -> Highlight {
        if let Some(line) = self.winning_line() {
            return if line.contains(pos) {
                Highlight::WinningLine
            } else {
                Highlight::None
            };
        }

        match self.board.get(pos) {
            Square::Occupied(mark) if self.eviction_candidate(mark) == Some(pos) => {
                Highlight::PendingEviction
            }
            _ => Highlight::None,
        }
    }

    /// Highlights for all nine cells, in index order.
    pub fn highlights(&self) -> [Highlight; 9] {
        Position::ALL.map(|pos| self.highlight(pos))
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(snapshot: &mut Snapshot, mark: Mark, pos: Position) {
        snapshot.board.set(pos, Square::Occupied(mark));
        snapshot.queues.get_mut(mark).push(pos);
    }

    #[test]
    fn test_initial_has_no_highlights() {
        let snapshot = Snapshot::initial();
        assert!(snapshot.is_initial());
        assert_eq!(snapshot.turn(), Mark::X);
        assert_eq!(snapshot.highlights(), [Highlight::None; 9]);
    }

    #[test]
    fn test_candidate_requires_three_marks() {
        let mut snapshot = Snapshot::initial();
        place(&mut snapshot, Mark::X, Position::TopLeft);
        place(&mut snapshot, Mark::X, Position::Center);
        assert_eq!(snapshot.eviction_candidate(Mark::X), None);

        place(&mut snapshot, Mark::X, Position::BottomCenter);
        assert_eq!(snapshot.eviction_candidate(Mark::X), Some(Position::TopLeft));
        assert_eq!(snapshot.highlight(Position::TopLeft), Highlight::PendingEviction);
        assert_eq!(snapshot.highlight(Position::Center), Highlight::None);
        assert_eq!(snapshot.eviction_candidate(Mark::O), None);
    }

    #[test]
    fn test_winning_line_overrides_eviction() {
        let mut snapshot = Snapshot::initial();
        place(&mut snapshot, Mark::O, Position::TopLeft);
        place(&mut snapshot, Mark::O, Position::BottomCenter);
        place(&mut snapshot, Mark::O, Position::MiddleRight);
        for pos in [Position::TopRight, Position::Center, Position::BottomLeft] {
            place(&mut snapshot, Mark::X, pos);
        }
        snapshot.winner = Some(Mark::X);

        assert_eq!(snapshot.highlight(Position::Center), Highlight::WinningLine);
        assert_eq!(snapshot.highlight(Position::TopRight), Highlight::WinningLine);
        // O's oldest no longer blinks once the game is decided.
        assert_eq!(snapshot.highlight(Position::TopLeft), Highlight::None);
        assert_eq!(
            snapshot.winning_line().map(|line| line.to_string()),
            Some("{2,4,6}".to_string())
        );
    }

    #[test]
    fn test_deserialize_rejects_contradictory_state() {
        let mut json = serde_json::to_value(Snapshot::initial()).expect("serializes");
        // X holds the top row and O two middle cells, but nobody has won.
        for index in 0..3 {
            json["board"]["squares"][index] = serde_json::json!({ "Occupied": "X" });
        }
        for index in 3..5 {
            json["board"]["squares"][index] = serde_json::json!({ "Occupied": "O" });
        }
        json["queues"]["x"] = serde_json::json!(["TopLeft", "TopCenter", "TopRight"]);
        json["queues"]["o"] = serde_json::json!(["MiddleLeft", "Center"]);
        json["turn"] = serde_json::json!("O");

        let err = serde_json::from_value::<Snapshot>(json.clone()).unwrap_err();
        assert!(err.to_string().contains("Winner is set exactly when one side holds a line"));

        json["winner"] = serde_json::json!("X");
        json["turn"] = serde_json::json!("X");
        let snapshot: Snapshot = serde_json::from_value(json).expect("decided state loads");
        assert_eq!(snapshot.winning_line().map(|line| line.to_string()), Some("{0,1,2}".to_string()));
    }

    #[test]
    fn test_deserialize_rejects_board_queue_mismatch() {
        let mut json = serde_json::to_value(Snapshot::initial()).expect("serializes");
        json["queues"]["x"] = serde_json::json!(["Center"]);
        json["turn"] = serde_json::json!("O");
        assert!(serde_json::from_value::<Snapshot>(json.clone()).is_err());

        json["queues"]["x"] = serde_json::json!(["TopLeft", "Center", "BottomRight", "TopRight"]);
        assert!(serde_json::from_value::<Snapshot>(json).is_err());
    }
}
