//! Outcomes of a placement request.
//!
//! A request either applies a full transition or changes nothing. Neither
//! case is an error: a declined request carries the reason for logging and
//! diagnostics only.

use super::position::Position;
use super::types::Mark;
use serde::{Deserialize, Serialize};

/// An accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Placed {
    /// Cell that received the mark.
    pub position: Position,
    /// Mark that was placed.
    pub mark: Mark,
    /// The mover's oldest cell, cleared because the queue overflowed.
    pub evicted: Option<Position>,
    /// Set when this placement won the game.
    pub winner: Option<Mark>,
}

impl Placed {
    /// True when this placement decided the game.
    pub fn is_winning(&self) -> bool {
        self.winner.is_some()
    }
}

impl std::fmt::Display for Placed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)?;
        if let Some(evicted) = self.evicted {
            write!(f, ", evicted {}", evicted)?;
        }
        if let Some(winner) = self.winner {
            write!(f, ", {} wins", winner)?;
        }
        Ok(())
    }
}

/// Why a placement request changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Decline {
    /// The cell index is outside 0-8.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(usize),

    /// The game already has a winner.
    #[display("Game already won by {}", _0)]
    GameDecided(Mark),

    /// The cell holds a live mark.
    #[display("{} is already occupied", _0)]
    CellOccupied(Position),

    /// The computed state broke an invariant and was discarded.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for Decline {}

/// Result of [`GameEngine::place_mark`](crate::GameEngine::place_mark).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The transition was applied and observers were notified.
    Placed(Placed),
    /// Nothing changed and nothing was emitted.
    Declined(Decline),
}

impl Placement {
    /// True when the transition was applied.
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    /// The applied transition, if any.
    pub fn placed(&self) -> Option<&Placed> {
        match self {
            Placement::Placed(placed) => Some(placed),
            Placement::Declined(_) => None,
        }
    }

    /// The decline reason, if any.
    pub fn declined(&self) -> Option<&Decline> {
        match self {
            Placement::Placed(_) => None,
            Placement::Declined(reason) => Some(reason),
        }
    }
}
