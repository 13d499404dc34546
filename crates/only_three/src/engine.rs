//! The game state engine.
//!
//! A `GameEngine` owns one session's state and is its only writer. Every
//! accepted operation builds a new [`Snapshot`] beside the current one, swaps
//! it in whole, and then notifies the observer, so an observer never sees a
//! half-applied placement.

use super::action::{Placed, Placement};
use super::contracts::PlacementContract;
use super::kind::GameKind;
use super::observer::StateObserver;
use super::position::Position;
use super::queue::MarkQueues;
use super::rules;
use super::snapshot::Snapshot;
use super::types::{Board, Mark, Square};
use tracing::{debug, info, instrument};

#[cfg(debug_assertions)]
use super::contracts::Contract;

/// One open session of a game.
///
/// Closing consumes the engine, so no operation can reach a closed session.
#[derive(Debug, Clone)]
pub struct GameEngine<O = ()> {
    kind: GameKind,
    state: Snapshot,
    observer: O,
}

impl GameEngine {
    /// Opens an only-three session with no observer.
    #[instrument]
    pub fn new() -> Self {
        Self::open(GameKind::OnlyThree, ())
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: StateObserver> GameEngine<O> {
    /// Opens an only-three session reporting to `observer`.
    #[instrument(skip(observer))]
    pub fn with_observer(observer: O) -> Self {
        Self::open(GameKind::OnlyThree, observer)
    }

    #[instrument(skip(observer))]
    pub(crate) fn open(kind: GameKind, observer: O) -> Self {
        info!(%kind, "Opening game session");
        Self {
            kind,
            state: Snapshot::initial(),
            observer,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Operations
    // ─────────────────────────────────────────────────────────────

    /// Places the current turn's mark at `index` (0-8).
    ///
    /// A request for an off-board cell, an occupied cell or a decided game
    /// changes nothing and notifies nobody; the returned
    /// [`Placement::Declined`] says why.
    #[instrument(skip(self), fields(mover = %self.state.turn))]
    pub fn place_mark(&mut self, index: usize) -> Placement {
        let pos = match PlacementContract::admit(&self.state, index) {
            Ok(pos) => pos,
            Err(reason) => {
                debug!(%reason, "Placement declined");
                return Placement::Declined(reason);
            }
        };

        let (next, placed) = Self::transition(&self.state, pos);

        #[cfg(debug_assertions)]
        if let Err(reason) = PlacementContract::post(&self.state, &next) {
            return Placement::Declined(reason);
        }

        self.state = next;
        if let Some(winner) = placed.winner {
            info!(%winner, line = ?self.state.winning_line().map(|l| l.to_string()), "Game won");
        }
        self.observer.on_state_changed(&self.state);
        Placement::Placed(placed)
    }

    /// Places the current turn's mark at `pos`.
    pub fn place(&mut self, pos: Position) -> Placement {
        self.place_mark(pos.to_index())
    }

    /// Resets board, queues, turn and winner. Always notifies the observer.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.state = Snapshot::initial();
        self.observer.on_state_changed(&self.state);
    }

    /// Ends the session.
    ///
    /// Restarts first, so a reopened game of the same kind starts clean, then
    /// tells the observer the session is over.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn close(mut self) -> ClosedSession<O> {
        self.restart();
        info!("Closing game session");
        self.observer.on_session_closed(self.kind);
        ClosedSession {
            kind: self.kind,
            observer: self.observer,
        }
    }

    /// Computes the state after `mover` takes `pos`, without touching `current`.
    fn transition(current: &Snapshot, pos: Position) -> (Snapshot, Placed) {
        let mover = current.turn;
        let mut next = current.clone();

        next.board.set(pos, Square::Occupied(mover));
        let evicted = next.queues.get_mut(mover).push(pos);
        if let Some(evicted) = evicted {
            debug!(%evicted, %mover, "Evicting oldest mark");
            next.board.set(evicted, Square::Empty);
        }

        // The win check sees the queues after eviction.
        let winner = match rules::check_winner(&next.queues) {
            Some((winner, line)) => {
                debug!(%winner, %line, "Line completed");
                next.winner = Some(winner);
                Some(winner)
            }
            None => {
                next.turn = mover.opponent();
                None
            }
        };

        (next, Placed::new(pos, mover, evicted, winner))
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only projection
    // ─────────────────────────────────────────────────────────────

    /// Current state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Both placement queues.
    pub fn queues(&self) -> &MarkQueues {
        self.state.queues()
    }

    /// Mark to play next.
    pub fn turn(&self) -> Mark {
        self.state.turn()
    }

    /// Winning mark, if decided.
    pub fn winner(&self) -> Option<Mark> {
        self.state.winner()
    }

    /// True once a winner exists.
    pub fn is_decided(&self) -> bool {
        self.state.is_decided()
    }

    /// Cells that would accept a placement right now.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_decided() {
            Vec::new()
        } else {
            Position::valid_moves(self.board())
        }
    }

    /// The game being played.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

/// What remains of a session after [`GameEngine::close`].
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct ClosedSession<O = ()> {
    /// The game that was closed.
    kind: GameKind,
    /// The observer, handed back.
    observer: O,
}

impl<O: StateObserver> ClosedSession<O> {
    /// Takes back the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Opens a fresh session of the same game with the same observer.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub fn reopen(self) -> GameEngine<O> {
        GameEngine::open(self.kind, self.observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decline, EventLog};

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::new();
        assert_eq!(engine.turn(), Mark::X);
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.board().empty_positions().count(), 9);
        assert!(engine.queues()[Mark::X].is_empty());
        assert!(engine.queues()[Mark::O].is_empty());
        assert_eq!(engine.valid_moves().len(), 9);
    }

    #[test]
    fn test_placement_alternates_turn() {
        let mut engine = GameEngine::new();
        let placement = engine.place_mark(4);
        assert_eq!(
            placement,
            Placement::Placed(Placed::new(Position::Center, Mark::X, None, None))
        );
        assert_eq!(engine.turn(), Mark::O);
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Mark::X));

        engine.place_mark(0);
        assert_eq!(engine.turn(), Mark::X);
        assert_eq!(engine.board().get(Position::TopLeft), Square::Occupied(Mark::O));
    }

    #[test]
    fn test_fourth_mark_evicts_oldest() {
        let mut engine = GameEngine::new();
        for cell in [0, 1, 5, 3, 7, 8] {
            assert!(engine.place_mark(cell).is_placed());
        }
        assert_eq!(engine.snapshot().eviction_candidate(Mark::X), Some(Position::TopLeft));

        let placement = engine.place_mark(2);
        assert_eq!(
            placement.placed().and_then(|placed| placed.evicted),
            Some(Position::TopLeft)
        );
        assert!(engine.board().is_empty(Position::TopLeft));
        assert!(!engine.queues()[Mark::X].contains(Position::TopLeft));
        assert_eq!(engine.queues()[Mark::X].len(), 3);
    }

    #[test]
    fn test_declined_request_is_silent() {
        let mut engine = GameEngine::with_observer(EventLog::new());
        engine.place_mark(4);
        let before = engine.snapshot().clone();

        assert_eq!(engine.place_mark(4), Placement::Declined(Decline::CellOccupied(Position::Center)));
        assert_eq!(engine.place_mark(9), Placement::Declined(Decline::OutOfRange(9)));
        assert_eq!(engine.snapshot(), &before);
        assert_eq!(engine.observer().len(), 1);
    }

    #[test]
    fn test_win_keeps_turn_and_blocks_moves() {
        let mut engine = GameEngine::new();
        for cell in [0, 3, 1, 4] {
            engine.place_mark(cell);
        }
        let placement = engine.place_mark(2);
        assert!(placement.placed().is_some_and(Placed::is_winning));
        assert_eq!(engine.winner(), Some(Mark::X));
        assert_eq!(engine.turn(), Mark::X);
        assert!(engine.valid_moves().is_empty());
        assert_eq!(
            engine.place_mark(8),
            Placement::Declined(Decline::GameDecided(Mark::X))
        );
    }

    #[test]
    fn test_restart_and_close_notify() {
        let mut engine = GameKind::OnlyThree.open_with(EventLog::new());
        engine.place_mark(0);
        engine.restart();
        assert!(engine.snapshot().is_initial());

        let closed = engine.close();
        assert_eq!(*closed.kind(), GameKind::OnlyThree);
        let log = closed.observer();
        // place, restart, restart from close, close
        assert_eq!(log.len(), 4);
        assert!(log.is_closed());
        assert!(log.latest().is_some_and(Snapshot::is_initial));
    }

    #[test]
    fn test_reopen_starts_clean() {
        let mut engine = GameEngine::with_observer(Vec::<Snapshot>::new());
        for cell in [0, 3, 1, 4, 2] {
            engine.place_mark(cell);
        }
        let engine = engine.close().reopen();
        assert!(engine.snapshot().is_initial());
        assert_eq!(engine.observer().len(), 6);
    }
}
