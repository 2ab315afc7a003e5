//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary; there is no theme directory.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::PostSummary;
use crate::helpers::{date_xml, format_post_date};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are already HTML; user text is escaped explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("redirect.html", include_str!("site/redirect.html")),
            // Partials
            (
                "partials/tickets.html",
                include_str!("site/partials/tickets.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
        ])?;

        tera.register_filter("post_date", post_date_filter);
        tera.register_filter("date_xml", date_xml_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a front-matter date (`format` is Moment.js style)
fn post_date_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("post_date", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("post_date", "format", String, val),
        None => "DD/MM/YYYY".to_string(),
    };
    Ok(tera::Value::String(format_post_date(&s, &format)))
}

/// Tera filter: machine-readable date, empty when unparseable
fn date_xml_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_xml", "value", String, value);
    Ok(tera::Value::String(date_xml(&s).unwrap_or_default()))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub root: String,
    pub date_format: String,
}

/// Links shared by every page of a locale
#[derive(Debug, Clone, Serialize)]
pub struct UrlsData {
    pub home: String,
    pub blog: String,
    pub assets: String,
}

/// The same page in another locale
#[derive(Debug, Clone, Serialize)]
pub struct AlternateData {
    pub locale: String,
    pub url: String,
    /// Absolute URL for `hreflang` links
    pub full_url: String,
}

/// A listed post with its page URL
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    #[serde(flatten)]
    pub post: PostSummary,
    pub url: String,
}

/// A post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    pub title: String,
    pub key: String,
    pub image: Option<String>,
    pub date: String,
    pub slug: String,
    /// Rendered body
    pub html: String,
    pub hide_title: bool,
}
