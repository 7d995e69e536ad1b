use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use pyext_check::config::{Args, Config, OutputFormat};
use pyext_check::report::{self, FileReport};
use pyext_check::{Toolchain, Validator};

// 0: all files pass, 1: at least one failed validation, 2: IO or toolchain
// trouble.
const EXIT_PASS: u8 = 0;
const EXIT_FAIL: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    // Logger first: config-file resolution already logs at debug.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.clone()),
    )
    .init();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("pyext-check: {err:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match run(&config) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("pyext-check: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(config: &Config) -> Result<u8> {
    let toolchain = Toolchain::discover(config)?;
    let validator = Validator::new(toolchain).with_convention_check(config.convention_check);

    let mut reports = Vec::with_capacity(config.files.len());
    let mut failed = false;
    for path in &config.files {
        let result = validator.validate(path)?;
        if !result.ok {
            failed = true;
        }
        reports.push(FileReport::new(path.clone(), result));
    }

    match config.format {
        OutputFormat::Text => {
            let mut stderr = io::stderr().lock();
            report::render_text(&reports, &mut stderr)?;
            stderr.flush()?;
        }
        OutputFormat::Json => {
            let mut stdout = io::stdout().lock();
            report::render_json(&reports, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(if failed { EXIT_FAIL } else { EXIT_PASS })
}
