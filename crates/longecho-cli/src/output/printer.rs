//! Output printer with format awareness.

use std::fmt::Display;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;
use crate::output::{IconContext, Table};

/// Main output handler
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    quiet: bool,
    icons: IconContext,
}

impl Output {
    pub fn new(ctx: &CommandContext) -> Self {
        Self {
            format: ctx.format,
            quiet: ctx.quiet,
            icons: IconContext::new(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn icons(&self) -> IconContext {
        self.icons
    }

    /// Print as pretty JSON. Always printed, even when quiet.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?;
        write_stdout(&json)
    }

    /// Print one line of human-readable text.
    pub fn line(&self, text: impl Display) -> Result<(), CliError> {
        if self.quiet {
            return Ok(());
        }
        write_stdout(&text.to_string())
    }

    /// Print an empty line.
    pub fn blank(&self) -> Result<(), CliError> {
        self.line("")
    }

    /// Print a rendered table.
    pub fn table(&self, table: &Table) -> Result<(), CliError> {
        if self.quiet {
            return Ok(());
        }
        write_stdout(table.render().trim_end())
    }
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").map_err(|e| CliError::io("failed to write output", e))
}
