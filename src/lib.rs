//! devfest-site: conference website with a file-backed Markdown blog
//!
//! Blog posts are `.mdx` files with YAML front-matter, read fresh on every
//! request by [`content::BlogService`]. Pages are rendered with embedded Tera
//! templates, either on the fly by the development server or ahead of time
//! by the static generator.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod pages;
pub mod server;
pub mod templates;
pub mod tickets;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Blog posts directory
    pub blog_dir: PathBuf,
    /// Static assets (images, css) directory
    pub assets_dir: PathBuf,
    /// Translation files directory
    pub i18n_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        Self {
            blog_dir: base_dir.join(&config.blog_dir),
            assets_dir: base_dir.join(&config.assets_dir),
            i18n_dir: base_dir.join(&config.i18n_dir),
            public_dir: base_dir.join(&config.public_dir),
            config,
            base_dir,
        }
    }

    /// The blog content service for this site
    pub fn blog(&self) -> content::BlogService {
        content::BlogService::for_site(self)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, lang: Option<&str>, image: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, lang, image)
    }
}
