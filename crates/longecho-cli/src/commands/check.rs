//! Check command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_core::{ComplianceChecker, ComplianceResult, NonComplianceReason};

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::join_formats;
use crate::error::CliError;
use crate::output::{truncate, Column, Output, Table};

/// Check if a directory is ECHO-compliant
///
/// A directory is ECHO-compliant if it has a README.md or README.txt at
/// the root and holds data in durable formats.
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Directory to check
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Show detailed information
    #[arg(long)]
    pub details: bool,
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let result = ComplianceChecker::new(&ctx.policy).check(&self.path);
        let out = Output::new(ctx);

        match out.format() {
            OutputFormat::Json => out.json(&result)?,
            OutputFormat::Table => out.table(&result_table(&result))?,
            OutputFormat::Text => self.print_text(&out, &result)?,
        }

        match result.reason {
            None => Ok(()),
            Some(reason) => Err(CliError::NotCompliant {
                path: result.path,
                reason,
            }),
        }
    }

    fn print_text(&self, out: &Output, result: &ComplianceResult) -> Result<(), CliError> {
        let icons = out.icons();
        let Some(source) = result.source.as_ref() else {
            return out.line(format!("{} {}", icons.cross(), result));
        };

        out.line(format!("{} {}", icons.check(), result))?;
        if !self.details {
            return Ok(());
        }

        out.blank()?;
        if let Some(name) = source.readme_path.file_name() {
            out.line(format!("  README: {}", name.to_string_lossy()))?;
        }
        out.line(format!("  Name: {}", source.name))?;
        if !source.description.is_empty() {
            out.line(format!("  Description: {}", truncate(&source.description, 100)))?;
        }
        out.line(format!(
            "  Durable formats: {}",
            join_formats(&source.durable_formats)
        ))?;
        let other: Vec<&str> = source.other_formats().collect();
        if !other.is_empty() {
            out.line(format!("  Other formats: {}", other.join(", ")))?;
        }
        Ok(())
    }
}

fn result_table(result: &ComplianceResult) -> Table {
    let mut table = Table::new(vec![Column::new("Field"), Column::new("Value").max_width(80)]);
    table.add_row(vec!["Path".to_string(), result.path.display().to_string()]);
    table.add_row(vec!["Compliant".to_string(), result.compliant.to_string()]);

    match &result.source {
        Some(source) => {
            table.add_row(vec!["Name".to_string(), source.name.clone()]);
            table.add_row(vec!["Description".to_string(), source.description.clone()]);
            table.add_row(vec![
                "Durable formats".to_string(),
                join_formats(&source.durable_formats),
            ]);
        }
        None => {
            let reason = result.reason.map(NonComplianceReason::as_str).unwrap_or_default();
            table.add_row(vec!["Reason".to_string(), reason.to_string()]);
        }
    }
    table
}
