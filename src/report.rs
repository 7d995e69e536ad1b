//! Reporting
//!
//! Renders per-file validation outcomes as compiler-style text or JSON.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::ValidationResult;

/// Outcome for one checked file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl FileReport {
    pub fn new(path: PathBuf, result: ValidationResult) -> Self {
        Self { path, result }
    }
}

/// Write diagnostics in `path:line[:col]: severity: message` form, one
/// status line per file at the end.
pub fn render_text(reports: &[FileReport], out: &mut impl Write) -> Result<()> {
    for report in reports {
        for diagnostic in &report.result.diagnostics {
            match diagnostic.column {
                Some(col) => writeln!(
                    out,
                    "{}:{}:{}: {}: {}",
                    report.path.display(),
                    diagnostic.line,
                    col,
                    diagnostic.severity,
                    diagnostic.message
                )?,
                None => writeln!(
                    out,
                    "{}:{}: {}: {}",
                    report.path.display(),
                    diagnostic.line,
                    diagnostic.severity,
                    diagnostic.message
                )?,
            }
        }
        writeln!(
            out,
            "{}: {}",
            report.path.display(),
            if report.result.ok { "PASS" } else { "FAIL" }
        )?;
    }
    Ok(())
}

/// Write the whole run as one JSON array.
pub fn render_json(reports: &[FileReport], out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Diagnostic;

    fn failing_report() -> FileReport {
        FileReport::new(
            PathBuf::from("extension.c"),
            ValidationResult::new(
                false,
                vec![
                    Diagnostic::error(17, "expected ';' before 'static'"),
                    Diagnostic::warning(1, "no PyMethodDef method table found"),
                ],
            ),
        )
    }

    #[test]
    fn text_report_is_compiler_shaped() {
        let mut out = Vec::new();
        render_text(&[failing_report()], &mut out).expect("render");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("extension.c:17: error: expected ';' before 'static'"));
        assert!(text.contains("extension.c: FAIL"));
    }

    #[test]
    fn passing_file_reports_pass() {
        let report = FileReport::new(
            PathBuf::from("good.c"),
            ValidationResult::new(true, vec![]),
        );
        let mut out = Vec::new();
        render_text(&[report], &mut out).expect("render");
        assert_eq!(String::from_utf8(out).unwrap(), "good.c: PASS\n");
    }

    #[test]
    fn json_report_round_trips_the_essentials() {
        let mut out = Vec::new();
        render_json(&[failing_report()], &mut out).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value[0]["path"], "extension.c");
        assert_eq!(value[0]["ok"], false);
        assert_eq!(value[0]["diagnostics"][0]["severity"], "error");
        assert_eq!(value[0]["diagnostics"][0]["line"], 17);
    }
}
