//! Site builder errors.

use std::io;
use std::path::PathBuf;

use longecho_common_fs::FsError;
use longecho_core::ArchiveError;
use thiserror::Error;

/// Errors raised while building a site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The archive could not be loaded.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A built-in template failed to compile.
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// A page failed to render.
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Writing a page or creating a directory failed.
    #[error(transparent)]
    Io(#[from] FsError),

    /// Copying a source's own site into the bundle failed.
    #[error("failed to copy {}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result alias for the site builder.
pub type Result<T> = std::result::Result<T, SiteError>;
