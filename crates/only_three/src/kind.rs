//! Catalogue of selectable games.

use super::engine::GameEngine;
use super::observer::StateObserver;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A game a player can pick from the catalogue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    /// Tic-tac-toe where each side keeps at most three marks.
    #[default]
    OnlyThree,
}

impl GameKind {
    /// Title shown in a game list.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::OnlyThree => "Only three",
        }
    }

    /// One-paragraph rules summary.
    pub fn rules(self) -> &'static str {
        match self {
            GameKind::OnlyThree => {
                "Only three figures of each side can be on the field. \
                 If fourth added, the first one disappears"
            }
        }
    }

    /// Opens a fresh session with no observer.
    #[instrument]
    pub fn open(self) -> GameEngine {
        GameEngine::open(self, ())
    }

    /// Opens a fresh session reporting to `observer`.
    #[instrument(skip(observer))]
    pub fn open_with<O: StateObserver>(self, observer: O) -> GameEngine<O> {
        GameEngine::open(self, observer)
    }
}
