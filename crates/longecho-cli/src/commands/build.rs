//! Build command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_site::SiteBuilder;

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::require_dir;
use crate::error::CliError;
use crate::output::{Column, Output, Table};

/// Build a static HTML site for an archive
///
/// Writes an index page listing the archive's sub-sources and one page per
/// source with its README, into `<path>/site` unless `--output` is given.
#[derive(Debug, Parser)]
pub struct BuildCommand {
    /// Archive root directory
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Output directory (default: <path>/site)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Copy each source's own site next to its page
    #[arg(short, long)]
    pub bundle: bool,
}

impl BuildCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        require_dir(&self.path)?;

        let summary = SiteBuilder::new(&ctx.policy)
            .output(self.output.clone())
            .bundle(self.bundle)
            .build(&self.path)?;
        let out = Output::new(ctx);

        match out.format() {
            OutputFormat::Json => out.json(&summary),
            OutputFormat::Table => {
                let mut table = Table::new(vec![
                    Column::new("Source").max_width(30),
                    Column::new("Page"),
                ]);
                for page in &summary.pages {
                    table.add_row(vec![page.name.clone(), page.page.display().to_string()]);
                }
                out.table(&table)
            }
            OutputFormat::Text => {
                out.line(format!(
                    "{} Built site with {} source(s)",
                    out.icons().check(),
                    summary.sources_count
                ))?;
                out.line(format!("  Output: {}", summary.output_path.display()))
            }
        }
    }
}
