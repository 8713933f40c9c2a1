//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gatekeeper_core::{GameEvent, GameEventKind, GameManager};
use gatekeeper_types::{BitSequence, describe};

/// Every event a game emitted, in order.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<GameEvent>>>);

impl EventLog {
    /// Subscribe to every event kind on `game`.
    pub fn attach(game: &mut GameManager) -> Self {
        let log = Self::default();
        for kind in GameEventKind::ALL {
            let events = Rc::clone(&log.0);
            game.subscribe(kind, move |event| {
                events.borrow_mut().push(event.clone());
                Ok(())
            });
        }
        log
    }

    pub fn kinds(&self) -> Vec<GameEventKind> {
        self.0.borrow().iter().map(GameEvent::kind).collect()
    }

    pub fn count(&self, kind: GameEventKind) -> usize {
        self.0.borrow().iter().filter(|event| event.kind() == kind).count()
    }

    pub fn last(&self) -> Option<GameEvent> {
        self.0.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// The canonical answer for `target`.
pub fn answer(target: i64) -> BitSequence {
    describe(target).bits
}
