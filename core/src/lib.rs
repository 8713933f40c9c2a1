//! Core domain logic for Gatekeeper.
//!
//! This crate owns the quiz state machine and everything it needs at runtime:
//! the named event set, the synchronous event bus, and the deferred-action
//! queue that drives auto-advance. Conversion and sequence types come from
//! [`gatekeeper_types`].

mod bus;
pub mod events;
pub mod game;
pub mod scheduler;
mod state;

pub use bus::{EventBus, ListenerError, ListenerId, ListenerResult};
pub use events::{GameEvent, GameEventKind, UnknownEventError};
pub use game::{DEFAULT_AUTO_ADVANCE_DELAY, GameManager, StepOutcome};
pub use scheduler::{DeferredAction, Scheduler};
pub use state::{Evaluation, GameState, GameStats};
