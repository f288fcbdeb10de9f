//! Formats command implementation.

use clap::Parser;
use longecho_core::policy::{normalize_extension, DURABLE_CATEGORIES};
use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;
use crate::output::{Column, Output, Table};

/// List recognized durable formats
#[derive(Debug, Parser)]
pub struct FormatsCommand {}

#[derive(Debug, Serialize)]
struct Category {
    category: String,
    extensions: Vec<String>,
}

impl FormatsCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let categories = categories(&ctx.config.policy.extra_durable_extensions);
        let out = Output::new(ctx);

        match out.format() {
            OutputFormat::Json => out.json(&categories),
            OutputFormat::Table => {
                let mut table = Table::new(vec![Column::new("Category"), Column::new("Extensions")]);
                for c in &categories {
                    table.add_row(vec![c.category.clone(), c.extensions.join(", ")]);
                }
                out.table(&table)
            }
            OutputFormat::Text => {
                out.line("ECHO Durable Formats")?;
                out.blank()?;
                for c in &categories {
                    out.line(format!("{}:", c.category))?;
                    out.line(format!("  {}", c.extensions.join(", ")))?;
                    out.blank()?;
                }
                Ok(())
            }
        }
    }
}

/// Built-in categories, plus a "Configured" one for extensions added in config.
fn categories(extra: &[String]) -> Vec<Category> {
    let mut categories: Vec<Category> = DURABLE_CATEGORIES
        .iter()
        .map(|(name, exts)| Category {
            category: name.to_string(),
            extensions: exts.iter().map(|e| e.to_string()).collect(),
        })
        .collect();

    let mut configured: Vec<String> = extra
        .iter()
        .map(|e| normalize_extension(e))
        .filter(|e| !categories.iter().any(|c| c.extensions.contains(e)))
        .collect();
    configured.sort();
    configured.dedup();

    if !configured.is_empty() {
        categories.push(Category {
            category: "Configured".to_string(),
            extensions: configured,
        });
    }
    categories
}
