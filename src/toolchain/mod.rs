//! Toolchain
//!
//! C compiler discovery and syntax-check invocation. The compiler is an
//! external collaborator; this module only locates it and runs it in
//! `-fsyntax-only` mode with the right include paths.

pub mod python;

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use thiserror::Error;

use crate::config::Config;

/// Failure to locate or run the external compiler.
///
/// Kept distinct from source defects: a missing compiler or missing
/// `Python.h` is an environment problem, not a broken fixture.
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("no C compiler found; set $CC, pass --compiler, or install cc/gcc/clang")]
    CompilerNotFound,

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("querying `{python}` for build configuration failed: {detail}")]
    PythonQuery { python: String, detail: String },

    #[error("interpreter headers not found: {message}")]
    MissingHeaders { message: String },

    #[error("compiler exited with {status} but produced no diagnostics:\n{stderr}")]
    CompilerFailed { status: String, stderr: String },
}

/// A resolved toolchain: compiler binary plus include directories
#[derive(Debug, Clone)]
pub struct Toolchain {
    compiler: PathBuf,
    include_dirs: Vec<PathBuf>,
}

impl Toolchain {
    pub fn new(compiler: impl Into<PathBuf>, include_dirs: Vec<PathBuf>) -> Self {
        Self {
            compiler: compiler.into(),
            include_dirs,
        }
    }

    /// Resolve a toolchain from configuration.
    ///
    /// Compiler: explicit config, then `$CC`, then the interpreter's
    /// `sysconfig` CC, then the first of cc/gcc/clang on `$PATH`.
    ///
    /// Include dirs: explicitly configured dirs are used verbatim (hermetic
    /// mode); otherwise the configured Python interpreter is asked for its
    /// header locations.
    pub fn discover(config: &Config) -> Result<Self, ToolchainError> {
        let compiler = match &config.compiler {
            Some(path) => path.clone(),
            None => default_compiler(&config.python)?,
        };

        let include_dirs = if config.include_dirs.is_empty() {
            python::include_dirs(&config.python)?
        } else {
            config.include_dirs.clone()
        };

        log::debug!(
            "resolved toolchain: compiler={}, include_dirs={:?}",
            compiler.display(),
            include_dirs
        );

        Ok(Self {
            compiler,
            include_dirs,
        })
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Run the compiler front end against one source file, syntax check only.
    ///
    /// Nothing is written next to the source; whatever scratch files the
    /// compiler needs are its own business.
    pub fn syntax_check(&self, source: &Path) -> Result<Output, ToolchainError> {
        let mut command = Command::new(&self.compiler);
        command.arg("-fsyntax-only");
        for dir in &self.include_dirs {
            command.arg("-I").arg(dir);
        }
        command.arg(source);

        log::debug!("running {:?}", command);

        command.output().map_err(|source| ToolchainError::Spawn {
            command: format!("{}", self.compiler.display()),
            source,
        })
    }
}

/// Locate a C compiler without explicit configuration.
///
/// `$CC` wins, then the interpreter's recorded compiler, then a `$PATH`
/// search for the conventional names.
pub fn default_compiler(python: &str) -> Result<PathBuf, ToolchainError> {
    if let Ok(cc) = env::var("CC")
        && !cc.trim().is_empty()
    {
        // CC may carry flags ("gcc -pthread"); only the program matters here.
        let program = cc.split_whitespace().next().unwrap_or(&cc);
        return Ok(PathBuf::from(program));
    }

    if let Some(cc) = python::config_cc(python) {
        let program = cc.split_whitespace().next().unwrap_or(&cc);
        return Ok(PathBuf::from(program));
    }

    ["cc", "gcc", "clang"]
        .iter()
        .find_map(|name| find_in_path(name))
        .ok_or(ToolchainError::CompilerNotFound)
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
