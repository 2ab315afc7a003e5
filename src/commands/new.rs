//! Create a new blog post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::scanner::{is_english, ENGLISH_SUFFIX, POST_EXTENSION};
use crate::Site;

/// Scaffold a post file in the blog directory.
///
/// `lang` selects the English variant (`{slug}-en.mdx`); anything else is
/// rejected since only default-locale files and English variants are read.
pub fn create_post(
    site: &Site,
    title: &str,
    lang: Option<&str>,
    image: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let english = match lang {
        None => false,
        Some(lang) if is_english(lang) => true,
        Some(lang) if lang.eq_ignore_ascii_case(&site.config.default_locale) => false,
        Some(lang) => anyhow::bail!(
            "Unsupported language: {}. Available: {}, en",
            lang,
            site.config.default_locale
        ),
    };

    fs::create_dir_all(&site.blog_dir)?;

    let default_path = site.blog_dir.join(format!("{}{}", slug, POST_EXTENSION));
    let file_path = if english {
        if !default_path.exists() {
            tracing::warn!(
                "{:?} does not exist yet; English variants are only reachable through it",
                default_path
            );
        }
        site.blog_dir.join(format!("{}{}", slug, ENGLISH_SUFFIX))
    } else {
        default_path
    };

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    // JSON strings are valid double-quoted YAML scalars
    let content = format!(
        "---\ntitle: {}\nkey: {}\ndate: {}\nimage: {}\n---\n\n",
        serde_json::to_string(title)?,
        slug,
        now.format("%Y-%m-%d"),
        image.unwrap_or(&slug),
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
