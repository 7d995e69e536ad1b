//! GCC/Clang diagnostic line parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{Diagnostic, Severity};

// file:line[:col]: severity: message
// The path part excludes ':' so drive-letter paths are not a concern here;
// the checker only ever hands the compiler POSIX-style paths.
static DIAGNOSTIC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<path>[^:\s][^:]*):(?P<line>\d+)(?::(?P<col>\d+))?:\s*(?P<sev>fatal error|error|warning|note):\s*(?P<msg>.*)$",
    )
    .expect("diagnostic line regex is valid")
});

/// Parse compiler stderr into diagnostics, in order of appearance.
///
/// Caret lines, source excerpts, and "In file included from" context are
/// skipped; only attributed diagnostic lines survive.
pub fn parse_output(stderr: &str) -> Vec<Diagnostic> {
    stderr.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Diagnostic> {
    let captures = DIAGNOSTIC_LINE.captures(line)?;

    let severity = match &captures["sev"] {
        "error" | "fatal error" => Severity::Error,
        "warning" => Severity::Warning,
        "note" => Severity::Note,
        _ => unreachable!("regex alternation is exhaustive"),
    };

    // Line/column groups are all-digit; out-of-range numbers would mean a
    // pathological compiler, skip the line rather than panic.
    let line_no: u32 = captures["line"].parse().ok()?;
    let column = captures
        .name("col")
        .and_then(|c| c.as_str().parse::<u32>().ok());

    Some(Diagnostic {
        severity,
        line: line_no,
        column,
        message: captures["msg"].to_string(),
    })
}
