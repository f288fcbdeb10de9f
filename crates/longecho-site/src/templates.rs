//! Built-in page templates.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;
use crate::html::escape_html;

pub const INDEX_TEMPLATE: &str = "index";
pub const SOURCE_TEMPLATE: &str = "source";

const INDEX_HBS: &str = include_str!("../templates/index.hbs");
const SOURCE_HBS: &str = include_str!("../templates/source.hbs");

/// Handlebars registry holding the archive index and source page templates.
pub struct SiteTemplates {
    handlebars: Handlebars<'static>,
}

impl SiteTemplates {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(escape_html);
        handlebars.register_template_string(INDEX_TEMPLATE, INDEX_HBS)?;
        handlebars.register_template_string(SOURCE_TEMPLATE, SOURCE_HBS)?;
        Ok(Self { handlebars })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.handlebars.render(name, data)?)
    }
}
