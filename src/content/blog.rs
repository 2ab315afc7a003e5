//! Blog service - reads posts from the blog directory on every call

use futures::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};

use super::excerpt::{extract_excerpt, DEFAULT_EXCERPT_LENGTH};
use super::images::{HERO_SUFFIX, MINI_SUFFIX};
use super::post::sort_by_date_desc;
use super::scanner::{resolve_post_path, scan_posts, PostFile};
use super::{BlogError, FrontMatter, ImageResolver, PostDetail, PostSummary};
use crate::Site;

/// File-backed blog content
#[derive(Debug, Clone)]
pub struct BlogService {
    dir: PathBuf,
    images: ImageResolver,
    excerpt_length: usize,
}

impl BlogService {
    /// Create a service over a blog directory
    pub fn new<P: AsRef<Path>>(dir: P, images: ImageResolver) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            images,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        }
    }

    /// Create the service configured for a site
    pub fn for_site(site: &Site) -> Self {
        let images = ImageResolver::from_config(&site.base_dir, &site.config);
        Self::new(&site.blog_dir, images).with_excerpt_length(site.config.excerpt_length)
    }

    /// Override the excerpt length (in characters)
    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    /// Every default-locale post, newest first.
    ///
    /// A missing directory yields an empty list. A file that cannot be read
    /// fails the whole listing.
    pub async fn get_all_blog_posts(&self) -> Result<Vec<PostSummary>, BlogError> {
        let files = scan_posts(&self.dir)?;

        let sources = read_sources(files)?;

        let mut posts = join_all(
            sources
                .iter()
                .map(|(raw, slug)| self.assemble_summary(slug, raw)),
        )
        .await;

        sort_by_date_desc(&mut posts);
        tracing::debug!("Listed {} blog posts from {:?}", posts.len(), self.dir);
        Ok(posts)
    }

    /// A single post, in its English variant when `locale` asks for it and
    /// one exists. Any failure reads as absence.
    pub async fn get_blog_post_by_slug(&self, slug: &str, locale: &str) -> Option<PostDetail> {
        match self.load_detail(slug, locale).await {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::debug!("Blog post {:?} ({}) unavailable: {}", slug, locale, e);
                None
            }
        }
    }

    async fn load_detail(&self, slug: &str, locale: &str) -> Result<PostDetail, BlogError> {
        let path = resolve_post_path(&self.dir, slug, locale)
            .ok_or_else(|| BlogError::InvalidSlug(slug.to_string()))?;
        let raw = read_post(&path)?;
        let (fm, body) = FrontMatter::parse(&raw);

        let image = self
            .images
            .resolve(&image_key(&fm, slug, HERO_SUFFIX))
            .await;

        Ok(PostDetail {
            title: fm.title.unwrap_or_default(),
            key: key_or_slug(fm.key, slug),
            image,
            date: fm.date.unwrap_or_default(),
            slug: slug.to_string(),
            content: body.to_string(),
            hide_title: fm.hide_title,
        })
    }

    async fn assemble_summary(&self, slug: &str, raw: &str) -> PostSummary {
        let (fm, body) = FrontMatter::parse(raw);
        let excerpt = extract_excerpt(body, self.excerpt_length);

        let image = self
            .images
            .resolve(&image_key(&fm, slug, MINI_SUFFIX))
            .await;

        PostSummary {
            title: fm.title.unwrap_or_default(),
            key: key_or_slug(fm.key, slug),
            image,
            date: fm.date.unwrap_or_default(),
            slug: slug.to_string(),
            excerpt,
        }
    }
}

/// Raw text of every listed file; the first unreadable one fails them all
fn read_sources(files: Vec<PostFile>) -> Result<Vec<(String, String)>, BlogError> {
    files
        .into_iter()
        .map(|file| Ok((read_post(&file.path)?, file.slug)))
        .collect()
}

/// Invalid UTF-8 sequences decode to U+FFFD rather than failing the read
fn read_post(path: &Path) -> Result<String, BlogError> {
    let bytes = fs::read(path).map_err(|source| BlogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `{image or slug}{suffix}`
fn image_key(fm: &FrontMatter, slug: &str, suffix: &str) -> String {
    let base = fm.image.as_deref().filter(|s| !s.is_empty()).unwrap_or(slug);
    format!("{}{}", base, suffix)
}

fn key_or_slug(key: Option<String>, slug: &str) -> String {
    key.filter(|k| !k.is_empty())
        .unwrap_or_else(|| slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_defaults_to_slug() {
        let fm = FrontMatter::default();
        assert_eq!(image_key(&fm, "aws", MINI_SUFFIX), "aws-mini");

        let fm = FrontMatter {
            image: Some("google".to_string()),
            ..Default::default()
        };
        assert_eq!(image_key(&fm, "aws", HERO_SUFFIX), "google-hero");

        let fm = FrontMatter {
            image: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(image_key(&fm, "aws", HERO_SUFFIX), "aws-hero");
    }

    #[test]
    fn test_key_or_slug() {
        assert_eq!(key_or_slug(Some("k".to_string()), "s"), "k");
        assert_eq!(key_or_slug(Some(String::new()), "s"), "s");
        assert_eq!(key_or_slug(None, "s"), "s");
    }

    #[test]
    fn test_unreadable_file_fails_all_sources() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("ok.mdx");
        fs::write(&ok, "---\ntitle: Ok\n---\nBody").unwrap();

        let files = vec![
            PostFile {
                slug: "ok".to_string(),
                path: ok,
            },
            PostFile {
                slug: "gone".to_string(),
                path: dir.path().join("gone.mdx"),
            },
        ];

        match read_sources(files) {
            Err(BlogError::Read { path, .. }) => assert!(path.ends_with("gone.mdx")),
            other => panic!("expected a read error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_post_decodes_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.mdx");
        fs::write(&path, b"Caf\xe9").unwrap();
        assert_eq!(read_post(&path).unwrap(), "Caf\u{fffd}");
    }
}
