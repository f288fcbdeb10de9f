//! Command implementations.

mod archive;
mod build;
mod check;
mod discover;
mod formats;
mod info;
mod manifest;
mod search;

pub use archive::ArchiveCommand;
pub use build::BuildCommand;
pub use check::CheckCommand;
pub use discover::DiscoverCommand;
pub use formats::FormatsCommand;
pub use info::InfoCommand;
pub use manifest::ManifestCommands;
pub use search::SearchCommand;

use std::path::Path;

use longecho_core::Source;

use crate::error::CliError;
use crate::output::{truncate, Column, Output, Table};

/// Width of descriptions in source listings.
const LIST_DESCRIPTION_WIDTH: usize = 80;

/// Fail unless `path` is an existing directory.
pub(crate) fn require_dir(path: &Path) -> Result<(), CliError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CliError::NotFound {
            message: format!("directory not found: {}", path.display()),
            path: path.to_path_buf(),
        })
    }
}

pub(crate) fn join_formats<'a>(formats: impl IntoIterator<Item = &'a String>) -> String {
    formats
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Path / formats / description table for a list of sources.
pub(crate) fn source_table(sources: &[Source]) -> Table {
    let mut table = Table::new(vec![
        Column::new("Path"),
        Column::new("Name").max_width(30),
        Column::new("Formats"),
        Column::new("Description").max_width(50),
    ]);
    for source in sources {
        table.add_row(vec![
            source.path.display().to_string(),
            source.name.clone(),
            join_formats(source.durable_formats.iter().take(3)),
            source.description.clone(),
        ]);
    }
    table
}

/// Text listing: path, description and optionally durable formats per source.
pub(crate) fn print_source_list(
    out: &Output,
    sources: &[Source],
    show_formats: bool,
) -> Result<(), CliError> {
    for source in sources {
        out.line(source.path.display())?;
        if !source.description.is_empty() {
            out.line(format!(
                "  {}",
                truncate(&source.description, LIST_DESCRIPTION_WIDTH)
            ))?;
        }
        if show_formats {
            out.line(format!("  Formats: {}", join_formats(&source.durable_formats)))?;
        }
        out.blank()?;
    }
    Ok(())
}
