//! The outbound half of the engine contract.
//!
//! An engine notifies exactly one observer. Fan-out to several
//! collaborators is a tuple of observers, notified left to right.

use super::kind::GameKind;
use super::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Receives engine state after every accepted transition.
pub trait StateObserver {
    /// Called after an accepted placement and after every restart.
    fn on_state_changed(&mut self, snapshot: &Snapshot);

    /// Called once when the session is closed, after the final restart.
    fn on_session_closed(&mut self, _kind: GameKind) {}
}

impl StateObserver for () {
    fn on_state_changed(&mut self, _snapshot: &Snapshot) {}
}

/// Records every snapshot, oldest first.
impl StateObserver for Vec<Snapshot> {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

impl<O: StateObserver + ?Sized> StateObserver for Box<O> {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        (**self).on_state_changed(snapshot);
    }

    fn on_session_closed(&mut self, kind: GameKind) {
        (**self).on_session_closed(kind);
    }
}

impl<O: StateObserver + ?Sized> StateObserver for &mut O {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        (**self).on_state_changed(snapshot);
    }

    fn on_session_closed(&mut self, kind: GameKind) {
        (**self).on_session_closed(kind);
    }
}

macro_rules! impl_observer_fan_out {
    ($($obs:ident . $idx:tt),+) => {
        impl<$($obs: StateObserver),+> StateObserver for ($($obs,)+) {
            fn on_state_changed(&mut self, snapshot: &Snapshot) {
                $(self.$idx.on_state_changed(snapshot);)+
            }

            fn on_session_closed(&mut self, kind: GameKind) {
                $(self.$idx.on_session_closed(kind);)+
            }
        }
    };
}

impl_observer_fan_out!(A.0, B.1);
impl_observer_fan_out!(A.0, B.1, C.2);

/// Adapts a closure into an observer of state changes.
#[derive(Debug, Clone)]
pub struct FnObserver<F>(pub F);

impl<F> StateObserver for FnObserver<F>
where
    F: FnMut(&Snapshot),
{
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        (self.0)(snapshot);
    }
}

/// Something the engine told its observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A transition was applied.
    StateChanged(Snapshot),
    /// The session ended.
    SessionClosed(GameKind),
}

/// Records every notification, including session close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Recorded snapshots, skipping close notifications.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.events.iter().filter_map(|event| match event {
            EngineEvent::StateChanged(snapshot) => Some(snapshot),
            EngineEvent::SessionClosed(_) => None,
        })
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots().last()
    }

    /// Whether a close was recorded.
    pub fn is_closed(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, EngineEvent::SessionClosed(_)))
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl StateObserver for EventLog {
    fn on_state_changed(&mut self, snapshot: &Snapshot) {
        self.events.push(EngineEvent::StateChanged(snapshot.clone()));
    }

    fn on_session_closed(&mut self, kind: GameKind) {
        self.events.push(EngineEvent::SessionClosed(kind));
    }
}
