//! Configuration management for the extension checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional `pyext-check.toml` with a `[toolchain]` table
//!
//! CLI arguments win over the config file; the config file wins over
//! discovery.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "pyext-check.toml";

/// Command-line arguments for the extension checker
#[derive(Debug, Parser)]
#[command(name = "pyext-check")]
#[command(about = "Syntax-check CPython native-extension sources before building")]
#[command(version)]
pub struct Args {
    /// Extension source files to check
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// C compiler to invoke (defaults to $CC, then sysconfig, then PATH)
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<PathBuf>,

    /// Extra header directory; suppresses the interpreter header query
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Python interpreter to query for headers and compiler
    #[arg(long, value_name = "EXE", help = "Python interpreter (default: python3)")]
    pub python: Option<String>,

    /// Skip the extension-module convention scan
    #[arg(long)]
    pub no_convention_check: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file path (default: ./pyext-check.toml, then the user config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// `pyext-check.toml` contents
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub toolchain: ToolchainSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolchainSection {
    pub compiler: Option<PathBuf>,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    pub python: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub files: Vec<PathBuf>,
    pub compiler: Option<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub python: String,
    pub convention_check: bool,
    pub format: OutputFormat,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => load_config_file(path)?,
            None => find_default_config_file()?,
        }
        .unwrap_or_default();

        let include_dirs = if args.include_dirs.is_empty() {
            file.toolchain.include_dirs
        } else {
            args.include_dirs
        };

        Ok(Config {
            files: args.files,
            compiler: args.compiler.or(file.toolchain.compiler),
            include_dirs,
            python: args
                .python
                .or(file.toolchain.python)
                .unwrap_or_else(|| "python3".to_string()),
            convention_check: !args.no_convention_check,
            format: args.format,
            log_level: args.log_level,
        })
    }
}

fn load_config_file(path: &Path) -> Result<Option<ConfigFile>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file {}", path.display()))?;
    let parsed = toml::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(Some(parsed))
}

fn find_default_config_file() -> Result<Option<ConfigFile>> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("pyext-check").join(CONFIG_FILE_NAME));
    }

    for candidate in candidates {
        if candidate.is_file() {
            log::debug!("using config file {}", candidate.display());
            return load_config_file(&candidate);
        }
    }
    Ok(None)
}
