//! Synchronous publish/subscribe for game events.
//!
//! Delivery is in registration order. A listener that returns an error or
//! panics is logged and skipped; it never stops delivery to the listeners
//! after it and never reaches the caller that triggered the event.

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::events::{GameEvent, GameEventKind};

/// Error type listeners may return; it is logged and dropped by the bus.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

pub type ListenerResult = Result<(), ListenerError>;

type Callback = Box<dyn FnMut(&GameEvent) -> ListenerResult>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: HashMap<GameEventKind, Vec<(ListenerId, Callback)>>,
}

// Callbacks are opaque, so only report how many are registered.
impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&'static str, usize> = self
            .listeners
            .iter()
            .map(|(kind, callbacks)| (kind.as_str(), callbacks.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("listeners", &counts)
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: GameEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&GameEvent) -> ListenerResult + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not registered under `kind`.
    pub fn unsubscribe(&mut self, kind: GameEventKind, id: ListenerId) -> bool {
        let Some(callbacks) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    #[must_use]
    pub fn listener_count(&self, kind: GameEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver `event` to every listener registered for its kind.
    ///
    /// Returns how many listeners completed without error.
    pub fn emit(&mut self, event: &GameEvent) -> usize {
        let kind = event.kind();
        let Some(callbacks) = self.listeners.get_mut(&kind) else {
            return 0;
        };

        let mut delivered = 0;
        for (id, callback) in callbacks.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => {
                    tracing::warn!(event = %kind, listener = %id, error = %err, "Error in event listener");
                }
                Err(payload) => {
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(ToString::to_string)
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "non-string panic payload".to_string());
                    tracing::warn!(event = %kind, listener = %id, panic = %message, "Event listener panicked");
                }
            }
        }
        delivered
    }
}
