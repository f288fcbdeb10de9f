//! Archive command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use longecho_core::ArchiveLoader;

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::{require_dir, source_table};
use crate::error::CliError;
use crate::output::Output;

/// Summarize an archive and its sub-sources
///
/// Resolves the archive's manifest, its curated sources and any remaining
/// compliant subdirectories, in display order.
#[derive(Debug, Parser)]
pub struct ArchiveCommand {
    /// Archive root directory
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,
}

impl ArchiveCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        require_dir(&self.path)?;

        let archive = ArchiveLoader::new(&ctx.policy).load(&self.path)?;
        let out = Output::new(ctx);

        match out.format() {
            OutputFormat::Json => out.json(&archive),
            OutputFormat::Table => out.table(&source_table(&archive.sources)),
            OutputFormat::Text => {
                out.line(format!("Archive: {}", archive.name))?;
                out.line(format!("  Path: {}", archive.path.display()))?;
                if !archive.description.is_empty() {
                    out.line(format!("  Description: {}", archive.description))?;
                }
                if let Some(manifest) = archive.manifest.as_ref().and_then(|m| m.path.as_ref()) {
                    out.line(format!("  Manifest: {}", manifest.display()))?;
                }
                if archive.root.has_site {
                    out.line("  Site: yes")?;
                }
                out.blank()?;

                if archive.sources.is_empty() {
                    return out.line("No sub-sources found");
                }
                out.line(format!("Sources ({}):", archive.sources.len()))?;
                let bullet = out.icons().bullet();
                for source in &archive.sources {
                    let dir = source
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    out.line(format!("  {bullet} {} ({dir}) [order {}]", source.name, source.order))?;
                }
                Ok(())
            }
        }
    }
}
