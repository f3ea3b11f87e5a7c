//! Lectern CLI
//!
//! Command-line interface for validating and compiling curricula.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lectern_cli::commands;
use lectern_cli::loader;
use lectern_cli::{Cli, Command, LecternConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = cli.command.source();
    let config = LecternConfig::load(cli.config.as_deref(), source.root().as_deref())
        .context("Failed to load configuration")?;
    let files = loader::load(&source.source()).context("Failed to read content")?;
    let result = commands::compile(&files, &config);

    let mut stdout = std::io::stdout().lock();
    match &cli.command {
        Command::Validate { format, .. } => {
            if commands::run_validate(&result, *format, &mut stdout)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Process {
            output, compact, ..
        } => {
            let pretty = config.output.pretty && !compact;
            commands::run_process(&result, pretty, output.as_deref(), &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
