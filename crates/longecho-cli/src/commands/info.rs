//! Info command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_core::{ComplianceChecker, NonComplianceReason, Source};

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::join_formats;
use crate::error::CliError;
use crate::output::{Column, Output, Table};

/// Show detailed information about an ECHO source
#[derive(Debug, Parser)]
pub struct InfoCommand {
    /// ECHO source directory
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,
}

impl InfoCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let result = ComplianceChecker::new(&ctx.policy).check(&self.path);
        let out = Output::new(ctx);

        let Some(source) = result.source else {
            let reason = result.reason.unwrap_or(NonComplianceReason::PathMissing);
            match out.format() {
                OutputFormat::Json => out.json(&serde_json::json!({
                    "path": result.path,
                    "reason": reason,
                }))?,
                _ => out.line(format!("Not an ECHO source: {reason}"))?,
            }
            return Err(CliError::NotCompliant {
                path: result.path,
                reason,
            });
        };

        match out.format() {
            OutputFormat::Json => out.json(&source),
            OutputFormat::Table => out.table(&info_table(&source)),
            OutputFormat::Text => {
                for (field, value) in info_rows(&source) {
                    out.line(format!("{field}: {value}"))?;
                }
                if let Some(contents) = &source.contents {
                    out.line("Contents:")?;
                    let bullet = out.icons().bullet();
                    for entry in contents {
                        match &entry.description {
                            Some(description) => {
                                out.line(format!("  {bullet} {}: {description}", entry.path))?
                            }
                            None => out.line(format!("  {bullet} {}", entry.path))?,
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Field / value pairs describing a source, skipping empty values.
fn info_rows(source: &Source) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Path", source.path.display().to_string()),
        ("Name", source.name.clone()),
    ];
    if let Some(name) = source.readme_path.file_name() {
        rows.push(("README", name.to_string_lossy().into_owned()));
    }
    if !source.description.is_empty() {
        rows.push(("Description", source.description.clone()));
    }
    rows.push(("Durable formats", join_formats(&source.durable_formats)));

    let other: Vec<&str> = source.other_formats().collect();
    if !other.is_empty() {
        rows.push(("Other formats", other.join(", ")));
    }
    if let Some(site) = &source.site_path {
        rows.push(("Site", site.display().to_string()));
    }
    rows
}

fn info_table(source: &Source) -> Table {
    let mut table = Table::new(vec![Column::new("Field"), Column::new("Value").max_width(80)]);
    for (field, value) in info_rows(source) {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}
