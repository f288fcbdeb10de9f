//! Discover command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_core::{Discovery, Source};
use tracing::info;

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::{print_source_list, require_dir, source_table};
use crate::error::CliError;
use crate::output::Output;

/// Find ECHO-compliant directories under a root path
#[derive(Debug, Parser)]
pub struct DiscoverCommand {
    /// Root directory to scan
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Maximum directory depth to scan
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links to directories
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl DiscoverCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        require_dir(&self.path)?;

        let discovery = Discovery::with_policy(&self.path, &ctx.policy)
            .max_depth(ctx.max_depth(self.max_depth))
            .follow_symlinks(self.follow_symlinks || ctx.config.discovery.follow_symlinks);
        let sources: Vec<Source> = discovery.iter().collect();
        info!(count = sources.len(), "discovery finished");

        let out = Output::new(ctx);
        match out.format() {
            OutputFormat::Json => out.json(&sources),
            OutputFormat::Table => out.table(&source_table(&sources)),
            OutputFormat::Text => {
                if sources.is_empty() {
                    return out.line(format!(
                        "No ECHO-compliant sources found under {}",
                        self.path.display()
                    ));
                }
                out.line(format!("Found {} ECHO source(s):", sources.len()))?;
                out.blank()?;
                print_source_list(&out, &sources, true)
            }
        }
    }
}
