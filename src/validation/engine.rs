//! Validation Engine
//!
//! One stateless operation: `validate(path)`. Each call is independent;
//! callers may run validations in parallel with no coordination.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::convention;
use crate::core::{Severity, SourceFile, ValidationResult};
use crate::parser;
use crate::toolchain::{Toolchain, ToolchainError};

/// Fatal validation failure.
///
/// Syntax problems in the checked source are not errors here; they come
/// back as a `ValidationResult` with `ok == false`.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

/// Syntax-checks extension sources with a resolved [`Toolchain`]
#[derive(Debug, Clone)]
pub struct Validator {
    toolchain: Toolchain,
    convention_check: bool,
}

impl Validator {
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            convention_check: true,
        }
    }

    pub fn with_convention_check(mut self, enabled: bool) -> Self {
        self.convention_check = enabled;
        self
    }

    /// Syntax-check one extension source file.
    ///
    /// `ok` is true iff the compiler front end exited successfully and
    /// reported no errors. Compiler diagnostics come first, in output
    /// order, followed by convention findings.
    pub fn validate(&self, path: impl AsRef<Path>) -> Result<ValidationResult, ValidateError> {
        let path = path.as_ref();
        let source = SourceFile::read(path).map_err(|source| ValidateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let output = self.toolchain.syntax_check(source.path())?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut diagnostics = parser::parse_output(&stderr);

        // An unresolvable Python.h is an environment defect, not a source
        // defect; keep the taxonomy honest.
        if let Some(missing) = diagnostics.iter().find(|d| missing_python_header(&d.message)) {
            return Err(ToolchainError::MissingHeaders {
                message: missing.message.clone(),
            }
            .into());
        }

        let exited_ok = output.status.success();
        if !exited_ok && diagnostics.is_empty() {
            // Nonzero exit without a single attributed diagnostic means the
            // invocation itself went wrong (bad flag, broken install).
            return Err(ToolchainError::CompilerFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        let ok = exited_ok && !diagnostics.iter().any(|d| d.severity == Severity::Error);
        log::debug!(
            "{}: {} ({} diagnostics)",
            path.display(),
            if ok { "pass" } else { "fail" },
            diagnostics.len()
        );

        if self.convention_check {
            diagnostics.extend(convention::scan(&source));
        }

        Ok(ValidationResult::new(ok, diagnostics))
    }
}

fn missing_python_header(message: &str) -> bool {
    // GCC: `Python.h: No such file or directory`
    // Clang: `'Python.h' file not found`
    // Anchored so lookalike names (MyPython.h) stay source defects.
    let names_python_h = message.starts_with("Python.h:")
        || message.contains("'Python.h'")
        || message.contains("<Python.h>");
    names_python_h
        && (message.contains("No such file") || message.contains("file not found"))
}
