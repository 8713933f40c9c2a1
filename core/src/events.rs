//! Named game events and their payloads.

use std::fmt;
use std::str::FromStr;

use gatekeeper_types::GameConfig;
use thiserror::Error;

use crate::state::GameState;

/// The closed set of event names a subscriber can register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    StepChanged,
    Evaluated,
    StepReset,
    GameReset,
    GameComplete,
    BinaryUpdated,
    ConfigUpdated,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game event: {0}")]
pub struct UnknownEventError(pub String);

impl GameEventKind {
    pub const ALL: [GameEventKind; 7] = [
        GameEventKind::StepChanged,
        GameEventKind::Evaluated,
        GameEventKind::StepReset,
        GameEventKind::GameReset,
        GameEventKind::GameComplete,
        GameEventKind::BinaryUpdated,
        GameEventKind::ConfigUpdated,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameEventKind::StepChanged => "stepChanged",
            GameEventKind::Evaluated => "evaluated",
            GameEventKind::StepReset => "stepReset",
            GameEventKind::GameReset => "gameReset",
            GameEventKind::GameComplete => "gameComplete",
            GameEventKind::BinaryUpdated => "binaryUpdated",
            GameEventKind::ConfigUpdated => "configUpdated",
        }
    }
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameEventKind {
    type Err = UnknownEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventError(s.to_string()))
    }
}

/// Payload delivered to subscribers, one variant per [`GameEventKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StepChanged(GameState),
    Evaluated { state: GameState, is_correct: bool },
    StepReset(GameState),
    GameReset(GameState),
    GameComplete(GameState),
    BinaryUpdated(GameState),
    ConfigUpdated(GameConfig),
}

impl GameEvent {
    #[must_use]
    pub fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::StepChanged(_) => GameEventKind::StepChanged,
            GameEvent::Evaluated { .. } => GameEventKind::Evaluated,
            GameEvent::StepReset(_) => GameEventKind::StepReset,
            GameEvent::GameReset(_) => GameEventKind::GameReset,
            GameEvent::GameComplete(_) => GameEventKind::GameComplete,
            GameEvent::BinaryUpdated(_) => GameEventKind::BinaryUpdated,
            GameEvent::ConfigUpdated(_) => GameEventKind::ConfigUpdated,
        }
    }

    /// The state snapshot carried by the event; `None` for config updates.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        match self {
            GameEvent::StepChanged(state)
            | GameEvent::Evaluated { state, .. }
            | GameEvent::StepReset(state)
            | GameEvent::GameReset(state)
            | GameEvent::GameComplete(state)
            | GameEvent::BinaryUpdated(state) => Some(state),
            GameEvent::ConfigUpdated(_) => None,
        }
    }
}
