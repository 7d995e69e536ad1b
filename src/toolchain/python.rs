//! CPython `sysconfig` queries.
//!
//! The interpreter knows where its embedding headers live and which compiler
//! built it; asking it beats guessing. Mirrors what a Python build backend
//! does with `sysconfig.get_paths()` and `get_config_vars()`.

use std::path::PathBuf;
use std::process::Command;

use super::ToolchainError;

// One header directory per line: include, platinclude, and the virtualenv
// include dir when running inside one.
const INCLUDE_DIRS_SCRIPT: &str = r#"
import os.path
import sys
import sysconfig

paths = sysconfig.get_paths()
dirs = []
for p in (paths["include"], paths["platinclude"]):
    if p and p not in dirs:
        dirs.append(p)
if sys.exec_prefix != sys.base_exec_prefix:
    venv_include = os.path.join(sys.exec_prefix, "include")
    if venv_include not in dirs:
        dirs.append(venv_include)
print("\n".join(dirs))
"#;

const CONFIG_CC_SCRIPT: &str =
    "import sysconfig; print(sysconfig.get_config_var('CC') or '')";

/// Header search directories for the given interpreter.
pub fn include_dirs(python: &str) -> Result<Vec<PathBuf>, ToolchainError> {
    let stdout = run_script(python, INCLUDE_DIRS_SCRIPT)?;

    let dirs: Vec<PathBuf> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    if dirs.is_empty() {
        return Err(ToolchainError::PythonQuery {
            python: python.to_string(),
            detail: "sysconfig reported no include directories".to_string(),
        });
    }

    log::debug!("{python} include dirs: {dirs:?}");
    Ok(dirs)
}

/// The compiler the interpreter was built with, if it recorded one.
///
/// Best effort: a missing or broken interpreter is not an error here, the
/// caller falls back to a `$PATH` search.
pub fn config_cc(python: &str) -> Option<String> {
    match run_script(python, CONFIG_CC_SCRIPT) {
        Ok(stdout) => {
            let cc = stdout.trim();
            if cc.is_empty() {
                None
            } else {
                Some(cc.to_string())
            }
        }
        Err(err) => {
            log::debug!("sysconfig CC query failed: {err}");
            None
        }
    }
}

fn run_script(python: &str, script: &str) -> Result<String, ToolchainError> {
    let output = Command::new(python)
        .arg("-c")
        .arg(script)
        .output()
        .map_err(|err| ToolchainError::PythonQuery {
            python: python.to_string(),
            detail: err.to_string(),
        })?;

    if !output.status.success() {
        return Err(ToolchainError::PythonQuery {
            python: python.to_string(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
