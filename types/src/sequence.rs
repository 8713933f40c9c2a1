//! The ordered list of quiz targets.

use thiserror::Error;

const LEARNING_SEQUENCE: [i64; 11] = [0, 1, 2, 4, 10, 100, 128, 256, -1, -10, -128];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid step index {index} (sequence has {len} steps)")]
pub struct StepRangeError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("progression sequence must not be empty")]
pub struct EmptySequenceError;

/// Position of a step within its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub current_number: i64,
    /// 1-based.
    pub step_number: usize,
    pub total_steps: usize,
}

/// Fixed, non-empty list of targets in difficulty order.
///
/// Read-only after construction; there is no way to add or remove a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionSequence {
    values: Vec<i64>,
}

impl ProgressionSequence {
    pub fn new(values: impl Into<Vec<i64>>) -> Result<Self, EmptySequenceError> {
        let values = values.into();
        if values.is_empty() {
            return Err(EmptySequenceError);
        }
        Ok(Self { values })
    }

    /// Unsigned warm-ups followed by two's-complement negatives.
    #[must_use]
    pub fn learning() -> Self {
        Self {
            values: LEARNING_SEQUENCE.to_vec(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, index: usize) -> Result<i64, StepRangeError> {
        self.values.get(index).copied().ok_or(StepRangeError {
            index,
            len: self.values.len(),
        })
    }

    pub fn step_info(&self, index: usize) -> Result<StepInfo, StepRangeError> {
        let current_number = self.value_at(index)?;
        Ok(StepInfo {
            current_number,
            step_number: index + 1,
            total_steps: self.values.len(),
        })
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[must_use]
    pub fn first(&self) -> i64 {
        self.values[0]
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }
}

impl Default for ProgressionSequence {
    fn default() -> Self {
        Self::learning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learning_sequence_contents() {
        let seq = ProgressionSequence::learning();
        assert_eq!(seq.len(), 11);
        assert_eq!(seq.values(), &LEARNING_SEQUENCE);
        assert_eq!(seq.first(), 0);
        assert_eq!(seq.last_index(), 10);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            ProgressionSequence::new(Vec::<i64>::new()),
            Err(EmptySequenceError)
        );
    }

    #[test]
    fn value_at_bounds() {
        let seq = ProgressionSequence::new([0, 1, 2, 4, 10]).unwrap();
        assert_eq!(seq.value_at(0), Ok(0));
        assert_eq!(seq.value_at(4), Ok(10));
        assert_eq!(seq.value_at(5), Err(StepRangeError { index: 5, len: 5 }));
    }

    #[test]
    fn step_info_is_one_based() {
        let seq = ProgressionSequence::learning();
        let info = seq.step_info(9).unwrap();
        assert_eq!(info.current_number, -10);
        assert_eq!(info.step_number, 10);
        assert_eq!(info.total_steps, 11);
        assert!(seq.step_info(11).is_err());
    }

    #[test]
    fn range_error_message() {
        let err = StepRangeError { index: 7, len: 3 };
        assert_eq!(err.to_string(), "invalid step index 7 (sequence has 3 steps)");
    }
}
