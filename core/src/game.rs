//! The game state machine.
//!
//! [`GameManager`] is the single writer of [`GameState`]. Every mutating
//! operation updates the state and then announces it to subscribers before
//! returning; readers only ever receive cloned snapshots.
//!
//! # Transitions
//!
//! ```text
//! toggle_bit / set_bits ──> binaryUpdated      (evaluation cleared)
//! evaluate              ──> evaluated          (maybe schedules AdvanceStep)
//! next_step             ──> stepChanged | gameComplete (at the last step)
//! previous_step         ──> stepChanged | (nothing at step 0)
//! go_to_step            ──> stepChanged | (nothing when out of range)
//! reset_step            ──> stepReset
//! reset_game            ──> gameReset
//! update_config         ──> configUpdated
//! ```
//!
//! A pending auto-advance is cancelled by any later change to the state.

use std::time::{Duration, Instant};

use gatekeeper_types::{
    BitSequence, ConfigPatch, DomainError, GameConfig, ProgressionSequence, check_answer,
};

use crate::bus::{EventBus, ListenerId, ListenerResult};
use crate::events::{GameEvent, GameEventKind};
use crate::scheduler::{DeferredAction, Scheduler};
use crate::state::{Evaluation, GameState, GameStats};

pub const DEFAULT_AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new step was loaded.
    Moved,
    /// The request was out of range; nothing changed and nothing was emitted.
    AtBoundary,
    /// `next_step` at the final step: nothing changed, `gameComplete` was emitted.
    Completed,
}

#[derive(Debug)]
pub struct GameManager {
    sequence: ProgressionSequence,
    state: GameState,
    config: GameConfig,
    bus: EventBus,
    scheduler: Scheduler,
    auto_advance_delay: Duration,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameManager {
    /// Start at step 0 of the learning sequence with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sequence(ProgressionSequence::learning())
    }

    #[must_use]
    pub fn with_sequence(sequence: ProgressionSequence) -> Self {
        let state = GameState::initial(&sequence);
        Self {
            sequence,
            state,
            config: GameConfig::default(),
            bus: EventBus::new(),
            scheduler: Scheduler::new(),
            auto_advance_delay: DEFAULT_AUTO_ADVANCE_DELAY,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn sequence(&self) -> &ProgressionSequence {
        &self.sequence
    }

    #[must_use]
    pub fn auto_advance_delay(&self) -> Duration {
        self.auto_advance_delay
    }

    /// When the next deferred action is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Percentage of steps reached, counting the current one.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.state.step_number() as f64 / self.state.total_steps as f64) * 100.0
    }

    /// On the last step and answered correctly.
    #[must_use]
    pub fn is_game_complete(&self) -> bool {
        self.state.is_last_step() && self.state.is_correct() == Some(true)
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        GameStats {
            completed_steps: self.state.step_number(),
            total_steps: self.state.total_steps,
            progress: self.progress(),
        }
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, kind: GameEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&GameEvent) -> ListenerResult + 'static,
    {
        self.bus.subscribe(kind, callback)
    }

    pub fn unsubscribe(&mut self, kind: GameEventKind, id: ListenerId) -> bool {
        self.bus.unsubscribe(kind, id)
    }

    // ------------------------------------------------------------------------
    // Answer editing
    // ------------------------------------------------------------------------

    /// Flip bit `index` of the answer. Out-of-range indices are ignored and
    /// emit nothing.
    pub fn toggle_bit(&mut self, index: usize) -> bool {
        if !self.state.user_bits.toggle(index) {
            tracing::debug!(index, width = self.state.bit_width, "Ignoring out-of-range bit toggle");
            return false;
        }
        self.answer_changed();
        true
    }

    /// Replace the whole answer.
    ///
    /// The answer must have exactly the current step's bit width; otherwise
    /// nothing changes and no event is emitted.
    pub fn set_bits(&mut self, bits: BitSequence) -> Result<(), DomainError> {
        if bits.len() != self.state.bit_width as usize {
            tracing::debug!(
                expected = self.state.bit_width,
                found = bits.len(),
                "Rejecting answer of the wrong width"
            );
            return Err(DomainError::WidthMismatch {
                expected: self.state.bit_width,
                found: bits.len(),
            });
        }
        self.state.user_bits = bits;
        self.answer_changed();
        Ok(())
    }

    fn answer_changed(&mut self) {
        self.cancel_pending();
        self.state.evaluation = Evaluation::Unevaluated;
        self.emit(GameEvent::BinaryUpdated(self.state.clone()));
    }

    /// Check the answer against the current target.
    ///
    /// The answer is read as two's complement only when the target is
    /// negative. With auto-advance on, a correct answer schedules the next
    /// step after [`GameManager::auto_advance_delay`].
    pub fn evaluate(&mut self) -> bool {
        self.evaluate_at(Instant::now())
    }

    /// [`GameManager::evaluate`] with an explicit clock reading.
    pub fn evaluate_at(&mut self, now: Instant) -> bool {
        self.cancel_pending();
        let correct = check_answer(&self.state.user_bits, self.state.target);
        self.state.evaluation = Evaluation::Evaluated { correct };
        tracing::debug!(
            target_value = self.state.target,
            answer = %self.state.user_bits,
            correct,
            "Evaluated answer"
        );
        self.emit(GameEvent::Evaluated {
            state: self.state.clone(),
            is_correct: correct,
        });

        if correct && self.config.auto_advance {
            self.scheduler
                .schedule(now, self.auto_advance_delay, DeferredAction::AdvanceStep);
            tracing::debug!(delay_ms = self.auto_advance_delay.as_millis() as u64, "Scheduled auto-advance");
        }
        correct
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Advance one step; at the final step emit `gameComplete` instead.
    pub fn next_step(&mut self) -> StepOutcome {
        if self.state.is_last_step() {
            tracing::info!(steps = self.state.total_steps, "Game complete");
            self.emit(GameEvent::GameComplete(self.state.clone()));
            return StepOutcome::Completed;
        }
        self.load_step(self.state.current_step_index + 1)
    }

    pub fn previous_step(&mut self) -> StepOutcome {
        match self.state.current_step_index.checked_sub(1) {
            Some(index) => self.load_step(index),
            None => StepOutcome::AtBoundary,
        }
    }

    /// Jump to step `index` (0-based). Negative or too-large indices are a
    /// no-op.
    pub fn go_to_step(&mut self, index: isize) -> StepOutcome {
        match usize::try_from(index) {
            Ok(index) if index < self.sequence.len() => self.load_step(index),
            _ => {
                tracing::debug!(index, total = self.sequence.len(), "Ignoring out-of-range step jump");
                StepOutcome::AtBoundary
            }
        }
    }

    fn load_step(&mut self, index: usize) -> StepOutcome {
        let state = match GameState::at_step(&self.sequence, index) {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(error = %err, "Refusing to load step");
                return StepOutcome::AtBoundary;
            }
        };
        self.cancel_pending();
        self.state = state;
        tracing::debug!(
            step = self.state.step_number(),
            target_value = self.state.target,
            width = self.state.bit_width,
            "Step changed"
        );
        self.emit(GameEvent::StepChanged(self.state.clone()));
        StepOutcome::Moved
    }

    // ------------------------------------------------------------------------
    // Resets and settings
    // ------------------------------------------------------------------------

    /// Zero the answer for the current target.
    pub fn reset_step(&mut self) {
        self.cancel_pending();
        self.state.user_bits = BitSequence::zeros_for(self.state.target);
        self.state.evaluation = Evaluation::Unevaluated;
        self.emit(GameEvent::StepReset(self.state.clone()));
    }

    /// Back to step 0, as if newly constructed. Settings are kept.
    pub fn reset_game(&mut self) {
        self.cancel_pending();
        self.state = GameState::initial(&self.sequence);
        tracing::info!("Game reset");
        self.emit(GameEvent::GameReset(self.state.clone()));
    }

    /// Merge `patch` into the settings. Turning auto-advance off drops a
    /// pending advance.
    pub fn update_config(&mut self, patch: ConfigPatch) -> GameConfig {
        if patch.auto_advance == Some(false) {
            self.cancel_pending();
        }
        self.config = self.config.merged(patch);
        self.emit(GameEvent::ConfigUpdated(self.config));
        self.config
    }

    // ------------------------------------------------------------------------
    // Deferred work
    // ------------------------------------------------------------------------

    /// Apply every deferred action due at `now`. Returns how many ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        let count = due.len();
        for action in due {
            match action {
                DeferredAction::AdvanceStep => {
                    self.next_step();
                }
            }
        }
        count
    }

    fn cancel_pending(&mut self) {
        let dropped = self.scheduler.cancel_all();
        if dropped > 0 {
            tracing::debug!(dropped, "Cancelled pending auto-advance");
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.bus.emit(&event);
    }
}
