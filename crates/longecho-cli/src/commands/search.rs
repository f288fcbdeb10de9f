//! Search command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_core::{Discovery, SearchSources, Source};

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::{print_source_list, require_dir, source_table};
use crate::error::CliError;
use crate::output::Output;

/// Search ECHO sources by README content
///
/// Matches are case-insensitive against each source's description and the
/// full text of its README.
#[derive(Debug, Parser)]
pub struct SearchCommand {
    /// Root directory to search
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Text to look for
    pub query: String,

    /// Maximum directory depth to scan
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,
}

impl SearchCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        require_dir(&self.path)?;

        let discovery = Discovery::with_policy(&self.path, &ctx.policy)
            .max_depth(ctx.max_depth(self.max_depth))
            .follow_symlinks(ctx.config.discovery.follow_symlinks);
        let sources: Vec<Source> = SearchSources::new(discovery.iter(), &self.query).collect();

        let out = Output::new(ctx);
        match out.format() {
            OutputFormat::Json => out.json(&sources),
            OutputFormat::Table => out.table(&source_table(&sources)),
            OutputFormat::Text => {
                if sources.is_empty() {
                    return out.line(format!(
                        "No ECHO sources matching '{}' found",
                        self.query
                    ));
                }
                out.line(format!("Found {} matching source(s):", sources.len()))?;
                out.blank()?;
                print_source_list(&out, &sources, false)
            }
        }
    }
}
