//! Core domain types for Gatekeeper.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! binary/two's-complement conversion, the progression of quiz targets, and the
//! user-adjustable game settings. Everything here can be used from any layer.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

pub mod binary;
mod sequence;
mod settings;

pub use binary::{
    BinaryConversion, Bit, BitSequence, DEFAULT_GROUP_SIZE, DomainError, MAX_BIT_WIDTH,
    check_answer, describe, format_grouped, format_grouped_default, from_binary,
    from_binary_str, hint_for, is_valid_binary, minimum_bit_width, to_binary,
};
pub use sequence::{EmptySequenceError, ProgressionSequence, StepInfo, StepRangeError};
pub use settings::{ConfigPatch, GameConfig};
