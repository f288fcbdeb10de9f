//! Static site builder for ECHO archives.
//!
//! [`SiteBuilder`] loads an archive through [`longecho_core::ArchiveLoader`]
//! and writes an `index.html` listing its sub-sources, plus one page per
//! source with its README rendered to HTML.

pub mod builder;
pub mod error;
pub mod html;
pub mod templates;

pub use builder::{build_site, BuildSummary, PageSummary, SiteBuilder};
pub use error::{Result, SiteError};
pub use html::{escape_html, icon_emoji, markdown_to_html};
