//! Deferred actions for the single-threaded game loop.
//!
//! There is no timer thread: the driver asks for [`Scheduler::next_deadline`],
//! sleeps until then, and hands the current instant back to
//! [`Scheduler::take_due`]. Tasks run on the same loop that applies user input.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Move to the next step (auto-advance after a correct answer).
    AdvanceStep,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    /// Insertion order, breaks ties between equal deadlines.
    seq: u64,
    due: Instant,
    action: DeferredAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            seq,
            due: now + delay,
            action,
        });
    }

    /// Drop every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Remove and return the actions due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due, task.seq));
        due.into_iter().map(|task| task.action).collect()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn nothing_due_before_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start, SECOND, DeferredAction::AdvanceStep);

        assert_eq!(scheduler.next_deadline(), Some(start + SECOND));
        assert!(scheduler.take_due(start + SECOND / 2).is_empty());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn due_tasks_are_removed() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start, SECOND, DeferredAction::AdvanceStep);
        scheduler.schedule(start, SECOND * 3, DeferredAction::AdvanceStep);

        let due = scheduler.take_due(start + SECOND * 2);
        assert_eq!(due, vec![DeferredAction::AdvanceStep]);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_deadline(), Some(start + SECOND * 3));
    }

    #[test]
    fn cancel_all_empties_queue() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(start, SECOND, DeferredAction::AdvanceStep);
        scheduler.schedule(start, SECOND * 2, DeferredAction::AdvanceStep);

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }
}
