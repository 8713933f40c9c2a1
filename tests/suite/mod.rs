//! Integration test modules

mod conversion;
mod playthrough;
mod preferences;
