//! End-to-end validator tests against the extension fixtures.
//!
//! Compiles hermetically against the stub `Python.h` under
//! `tests/fixtures/include`, so only a C compiler is required. Tests skip
//! (with a note) when no compiler can be located.

use std::path::PathBuf;

use pyext_check::core::Severity;
use pyext_check::toolchain::{self, Toolchain};
use pyext_check::validation::{ValidateError, Validator};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn hermetic_validator() -> Option<Validator> {
    let compiler = match toolchain::default_compiler("python3") {
        Ok(compiler) => compiler,
        Err(err) => {
            eprintln!("skipping: {err}");
            return None;
        }
    };
    let toolchain = Toolchain::new(compiler, vec![fixture("include")]);
    Some(Validator::new(toolchain))
}

#[test]
fn well_formed_none_fixture_passes() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let result = validator
        .validate(fixture("extension_none.c"))
        .expect("validation runs");
    assert!(result.ok, "diagnostics: {:?}", result.diagnostics);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn well_formed_string_fixture_passes() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let result = validator
        .validate(fixture("extension_string.c"))
        .expect("validation runs");
    assert!(result.ok, "diagnostics: {:?}", result.diagnostics);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn malformed_fixture_fails_with_located_diagnostics() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let result = validator
        .validate(fixture("extension_malformed.c"))
        .expect("validation runs");
    assert!(!result.ok);

    let errors: Vec<_> = result.errors().collect();
    assert!(
        errors.len() >= 2,
        "expected both missing semicolons reported, got {errors:?}"
    );

    // GCC points at the declaration following the unterminated one, Clang
    // at the closing brace itself; both land in this window.
    assert!(
        (14..=16).contains(&errors[0].line),
        "first error on line {}, expected near the method table",
        errors[0].line
    );
    // The second separator is attributed differently per front end: Clang
    // reports it at the struct (lines 22-24), GCC error-recovers past the
    // struct and instead reports `extensionmodule` as undeclared where it
    // is used. Accept either consequence.
    assert!(
        errors.iter().any(|d| (22..=24).contains(&d.line)
            || d.message.contains("extensionmodule")),
        "no error traceable to the module-definition struct: {errors:?}"
    );
}

#[test]
fn validation_is_idempotent() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let path = fixture("extension_malformed.c");
    let first = validator.validate(&path).expect("validation runs");
    let second = validator.validate(&path).expect("validation runs");
    assert_eq!(first, second);
}

#[test]
fn nonexistent_path_is_io_error() {
    // No compiler needed: the read fails before any toolchain work.
    let toolchain = Toolchain::new("cc", vec![fixture("include")]);
    let validator = Validator::new(toolchain);
    let err = validator
        .validate(fixture("no_such_fixture.c"))
        .expect_err("missing fixture must fail");
    assert!(matches!(err, ValidateError::Io { .. }), "got {err}");
}

#[test]
fn unresolvable_headers_are_a_toolchain_error() {
    let Some(compiler) = toolchain::default_compiler("python3").ok() else {
        eprintln!("skipping: no C compiler");
        return;
    };
    // Empty include path: Python.h cannot resolve, which is an environment
    // defect, not a fixture defect.
    let validator = Validator::new(Toolchain::new(compiler, vec![]));
    let err = validator
        .validate(fixture("extension_none.c"))
        .expect_err("missing headers must be fatal");
    assert!(
        matches!(
            err,
            ValidateError::Toolchain(toolchain::ToolchainError::MissingHeaders { .. })
        ),
        "got {err}"
    );
}

#[test]
fn convention_scan_can_be_disabled() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let validator = validator.with_convention_check(false);
    let result = validator
        .validate(fixture("extension_none.c"))
        .expect("validation runs");
    assert!(result.ok);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn warnings_do_not_fail_validation() {
    let Some(validator) = hermetic_validator() else {
        return;
    };
    let result = validator
        .validate(fixture("extension_none.c"))
        .expect("validation runs");
    // Any compiler or convention warnings must leave ok untouched.
    assert!(result.ok);
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.severity != Severity::Error));
}
