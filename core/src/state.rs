//! Game state snapshots.

use gatekeeper_types::{BitSequence, ProgressionSequence, StepRangeError, hint_for, minimum_bit_width};
use serde::Serialize;

/// Whether the current answer has been checked.
///
/// Any edit to the answer or change of step resets this to `Unevaluated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    #[default]
    Unevaluated,
    Evaluated { correct: bool },
}

impl Evaluation {
    #[must_use]
    pub fn is_evaluated(self) -> bool {
        matches!(self, Evaluation::Evaluated { .. })
    }

    /// `None` until evaluated.
    #[must_use]
    pub fn is_correct(self) -> Option<bool> {
        match self {
            Evaluation::Unevaluated => None,
            Evaluation::Evaluated { correct } => Some(correct),
        }
    }
}

/// Everything a presentation layer needs to draw one step.
///
/// Handed out by value: editing a snapshot never touches the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub current_step_index: usize,
    pub target: i64,
    pub bit_width: u32,
    pub user_bits: BitSequence,
    pub evaluation: Evaluation,
    pub total_steps: usize,
    pub hint: &'static str,
}

impl GameState {
    /// State for the first step of `sequence`.
    #[must_use]
    pub fn initial(sequence: &ProgressionSequence) -> Self {
        Self::fresh(0, sequence.first(), sequence.len())
    }

    /// Zeroed, unevaluated state for step `index`.
    pub fn at_step(sequence: &ProgressionSequence, index: usize) -> Result<Self, StepRangeError> {
        let info = sequence.step_info(index)?;
        Ok(Self::fresh(index, info.current_number, info.total_steps))
    }

    fn fresh(index: usize, target: i64, total_steps: usize) -> Self {
        Self {
            current_step_index: index,
            target,
            bit_width: minimum_bit_width(target),
            user_bits: BitSequence::zeros_for(target),
            evaluation: Evaluation::Unevaluated,
            total_steps,
            hint: hint_for(target),
        }
    }

    /// 1-based step number for display.
    #[must_use]
    pub fn step_number(&self) -> usize {
        self.current_step_index + 1
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_step_index + 1 >= self.total_steps
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_evaluated()
    }

    #[must_use]
    pub fn is_correct(&self) -> Option<bool> {
        self.evaluation.is_correct()
    }

    /// Whether the answer is read as two's complement.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.target < 0
    }
}

/// Aggregated progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameStats {
    pub completed_steps: usize,
    pub total_steps: usize,
    /// Percentage in `0.0..=100.0`.
    pub progress: f64,
}
