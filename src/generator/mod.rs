//! Generator module - writes the whole site as static HTML

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{BlogService, PostSummary};
use crate::helpers::locale_url;
use crate::pages::Pages;
use crate::Site;

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub posts: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    site: Site,
    pages: Pages,
    blog: BlogService,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            pages: Pages::new(site)?,
            blog: site.blog(),
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)?;

        let mut report = GenerateReport {
            assets: self.copy_assets()?,
            ..Default::default()
        };

        let posts = self.blog.get_all_blog_posts().await?;
        report.posts = posts.len();

        for locale in self.site.config.site_locales() {
            report.pages += self.generate_locale(&locale, &posts).await?;
        }

        self.generate_api(&posts)?;

        // Root entry point sends visitors to the default locale
        let target = locale_url(&self.site.config, &self.site.config.default_locale, "");
        self.write_file(Path::new("index.html"), &self.pages.redirect(&target)?)?;
        report.pages += 1;

        Ok(report)
    }

    /// Home, listing and post pages for one locale
    async fn generate_locale(&self, locale: &str, posts: &[PostSummary]) -> Result<usize> {
        let dir = Path::new(locale);
        let mut written = 0;

        self.write_file(&dir.join("index.html"), &self.pages.home(locale, posts)?)?;
        self.write_file(
            &dir.join("blog").join("index.html"),
            &self.pages.blog_index(locale, posts)?,
        )?;
        written += 2;

        for summary in posts {
            let Some(post) = self.blog.get_blog_post_by_slug(&summary.slug, locale).await else {
                tracing::warn!("Post {} disappeared during generation", summary.slug);
                continue;
            };
            let path = dir.join("blog").join(&post.slug).join("index.html");
            self.write_file(&path, &self.pages.blog_post(locale, &post)?)?;
            written += 1;
        }

        self.write_file(&dir.join("404.html"), &self.pages.not_found(locale)?)?;
        written += 1;

        tracing::debug!("Generated {} pages for locale {}", written, locale);
        Ok(written)
    }

    /// JSON listing for client-side consumers
    fn generate_api(&self, posts: &[PostSummary]) -> Result<()> {
        let json = serde_json::to_string_pretty(posts)?;
        self.write_file(&Path::new("api").join("blog.json"), &json)
    }

    /// Copy the assets tree (images, css) into the public directory
    fn copy_assets(&self) -> Result<usize> {
        let assets_dir = &self.site.assets_dir;
        if !assets_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(assets_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }

    fn write_file(&self, relative: &Path, content: &str) -> Result<()> {
        let dest = self.site.public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, content)?;
        Ok(())
    }
}
