//! Validation
//!
//! The validator itself: read the source, run the compiler front
//! end, classify the outcome.

pub mod engine;

pub use engine::{ValidateError, Validator};
