//! Core Data Model
//!
//! Source files, diagnostics, and validation results.

pub mod diagnostics;
pub mod source;

pub use diagnostics::{Diagnostic, Severity, ValidationResult};
pub use source::SourceFile;
