//! longecho CLI - ECHO compliance checking and discovery
//!
//! Main entry point for the `longecho` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use error::CliError;
use longecho_common_log::{LogConfig, LogLevel};

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    NotFound = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli);

    match run(cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            // Non-compliance has already been reported on stdout.
            if matches!(e, CliError::NotCompliant { .. }) {
                debug!(code = e.code(), "{e}");
            } else {
                error!(code = e.code(), "{e}");
            }
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

fn init_tracing(cli: &Cli) {
    let config = LogConfig::default()
        .with_env_overrides()
        .level(LogLevel::from_verbosity(cli.verbose, cli.quiet))
        .ansi(output::stderr_is_terminal());

    if let Err(e) = longecho_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
