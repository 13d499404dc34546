//! Only three - tic-tac-toe where each side keeps at most three marks.
//!
//! Placing a fourth mark removes that side's oldest one. A side wins when its
//! three live marks form a row, column or diagonal, checked after the
//! eviction.
//!
//! # Architecture
//!
//! - **Engine**: [`GameEngine`] owns the session state and is its only writer
//! - **Snapshot**: immutable state value produced per transition, with
//!   per-cell projections for a presentation layer
//! - **Observer**: [`StateObserver`] receives every new snapshot
//! - **Rules / invariants / contracts**: pure checks the engine composes
//!
//! # Example
//!
//! ```
//! use only_three::{GameKind, Mark, Placement, Snapshot};
//!
//! let mut engine = GameKind::OnlyThree.open_with(Vec::<Snapshot>::new());
//! for cell in [0, 3, 1, 4, 2] {
//!     engine.place_mark(cell);
//! }
//! assert_eq!(engine.winner(), Some(Mark::X));
//! assert!(matches!(engine.place_mark(8), Placement::Declined(_)));
//!
//! let closed = engine.close();
//! assert_eq!(closed.observer().len(), 6);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod engine;
pub mod invariants;
mod kind;
mod observer;
mod position;
mod queue;
pub mod rules;
mod snapshot;
mod types;

// Crate-level exports - Core types
pub use position::Position;
pub use queue::{MarkQueue, MarkQueues, QueueError};
pub use types::{Board, Mark, Square};

// Crate-level exports - Engine
pub use action::{Decline, Placed, Placement};
pub use engine::{ClosedSession, GameEngine};
pub use kind::GameKind;
pub use snapshot::{Highlight, Snapshot};

// Crate-level exports - Observer contract
pub use observer::{EngineEvent, EventLog, FnObserver, StateObserver};

// Crate-level exports - Rules, invariants and contracts
pub use contracts::{Contract, PlacementContract};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, OnlyThreeInvariants};
pub use rules::Line;
