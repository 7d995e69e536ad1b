//! pyext-check
//!
//! Build verification for CPython native-extension source files.
//!
//! This library provides:
//! - A stateless validator that syntax-checks an extension source
//!   with the system C compiler and the interpreter's embedding headers
//! - GCC/Clang diagnostic parsing
//! - Toolchain discovery via `sysconfig`
//! - A lightweight extension-module convention scan

pub mod config;
pub mod convention;
pub mod core;
pub mod parser;
pub mod report;
pub mod toolchain;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use core::{Diagnostic, Severity, SourceFile, ValidationResult};
pub use toolchain::{Toolchain, ToolchainError};
pub use validation::{ValidateError, Validator};
