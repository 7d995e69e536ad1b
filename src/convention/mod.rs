//! Extension-Module Convention Scan
//!
//! A regex-level look for the fixed shape every CPython extension source
//! shares: the `Python.h` include, a method table, a module-definition
//! struct, and a `PyInit_<name>` entry point whose name matches the module
//! name declared in the struct. Findings are warnings only; the compiler
//! front end stays the sole authority on `ok`.
//!
//! This is deliberately not a C parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{Diagnostic, SourceFile};

static PYTHON_H_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#\s*include\s*[<"]Python\.h[>"]"#).expect("valid regex"));

static METHOD_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPyMethodDef\s+\w+\s*\[\]").expect("valid regex"));

// Module name string in the slot right after PyModuleDef_HEAD_INIT.
static MODULE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bPyModuleDef\s+\w+\s*=\s*\{\s*PyModuleDef_HEAD_INIT\s*,\s*"([^"]*)""#)
        .expect("valid regex")
});

static INIT_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPyInit_([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid regex"));

/// Scan one source for the extension-module convention.
///
/// Returned diagnostics are ordered by where the missing or mismatched
/// construct would appear; absent constructs are reported against line 1.
pub fn scan(source: &SourceFile) -> Vec<Diagnostic> {
    let text = source.contents();
    let mut findings = Vec::new();

    if !PYTHON_H_INCLUDE.is_match(text) {
        findings.push(Diagnostic::warning(1, "no `#include <Python.h>` found"));
    }

    if !METHOD_TABLE.is_match(text) {
        findings.push(Diagnostic::warning(
            1,
            "no PyMethodDef method table found",
        ));
    }

    let declared_name = MODULE_DEF.captures(text);
    if declared_name.is_none() {
        findings.push(Diagnostic::warning(
            1,
            "no PyModuleDef module-definition struct found",
        ));
    }

    match INIT_FUNCTION.captures(text) {
        None => {
            findings.push(Diagnostic::warning(
                1,
                "no PyInit_<modulename> entry point found",
            ));
        }
        Some(init) => {
            let init_name = init.get(1).expect("capture group 1 exists");
            if let Some(declared) = &declared_name {
                let declared_name = &declared[1];
                if init_name.as_str() != declared_name {
                    let line = source.line_of_offset(init_name.start());
                    findings.push(Diagnostic::warning(
                        line,
                        format!(
                            "init entry point `PyInit_{}` does not match declared module name \
                             `{}`; the interpreter will fail to import this module",
                            init_name.as_str(),
                            declared_name
                        ),
                    ));
                }
            }
        }
    }

    findings
}
