//! Blog image table
//!
//! Posts name an image base (`aws`, `devfest`, ...) and each view asks for a
//! variant of it: `{base}-mini` for listings, `{base}-hero` for the post page.
//! Keys map to files under `{assets_dir}/images/blog/`. An asset is only read
//! the first time its key is resolved, to fingerprint its public URL.

use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::config::SiteConfig;
use crate::helpers::url_for;

/// Suffix of the listing variant
pub const MINI_SUFFIX: &str = "-mini";
/// Suffix of the post page variant
pub const HERO_SUFFIX: &str = "-hero";

/// Images shipped with the site
const BUILTIN_IMAGES: &[(&str, &str)] = &[
    ("aws-hero", "aws-hero.png"),
    ("aws-mini", "aws-mini.png"),
    ("bouygues-mini", "bouygues-mini.png"),
    ("bouygues-hero", "bouygues-hero.png"),
    ("capgemini-hero", "capgemini-hero.png"),
    ("capgemini-mini", "capgemini-mini.png"),
    ("cgi-hero", "cgi-hero.png"),
    ("cgi-mini", "cgi-mini.png"),
    ("dataiku-hero", "dataiku-hero.png"),
    ("dataiku-mini", "dataiku-mini.png"),
    ("devfest-hero", "devfest-hero.jpg"),
    ("devfest-mini", "devfest-mini.jpg"),
    ("generali-hero", "generali-hero.png"),
    ("generali-mini", "generali-mini.png"),
    ("google-hero", "google-hero.png"),
    ("google-mini", "google-mini.png"),
    ("onepoint-hero", "onepoint-hero.png"),
    ("onepoint-mini", "onepoint-mini.png"),
    ("proginov-hero", "proginov-hero.png"),
    ("proginov-mini", "proginov-mini.png"),
    ("soprasteria-mini", "soprasteria-mini.png"),
    ("soprasteria-hero", "soprasteria-hero.png"),
    ("thales-hero", "thales-hero.png"),
    ("thales-mini", "thales-mini.png"),
    ("u-tech-hero", "u-tech-hero.png"),
    ("u-tech-mini", "u-tech-mini.png"),
    ("checklist-participant-hero", "checklist-participant-hero.png"),
    ("checklist-participant-mini", "checklist-participant-mini.png"),
];

/// A file in the image table, loaded on first use
#[derive(Debug)]
struct ImageAsset {
    file: String,
    url: OnceCell<String>,
}

impl ImageAsset {
    fn new(file: &str) -> Arc<Self> {
        Arc::new(Self {
            file: file.to_string(),
            url: OnceCell::new(),
        })
    }
}

/// Resolves logical image keys to public URLs
#[derive(Debug, Clone)]
pub struct ImageResolver {
    /// Directory holding the image files
    dir: PathBuf,
    /// Public URL of `dir`
    base_url: String,
    images: IndexMap<String, Arc<ImageAsset>>,
}

impl ImageResolver {
    /// Create a resolver over the built-in table
    pub fn new<P: AsRef<Path>>(dir: P, base_url: &str) -> Self {
        let images = BUILTIN_IMAGES
            .iter()
            .map(|(key, file)| (key.to_string(), ImageAsset::new(file)))
            .collect();

        Self {
            dir: dir.as_ref().to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
            images,
        }
    }

    /// Create the resolver for a site, merging `blog_images` from the config
    pub fn from_config(base_dir: &Path, config: &SiteConfig) -> Self {
        let dir = base_dir.join(&config.assets_dir).join("images").join("blog");
        Self::new(dir, &url_for(config, "images/blog")).with_images(&config.blog_images)
    }

    /// Add or replace table entries
    pub fn with_images(mut self, extra: &IndexMap<String, String>) -> Self {
        for (key, file) in extra {
            self.images.insert(key.clone(), ImageAsset::new(file));
        }
        self
    }

    /// Resolve a key to the public URL of its image.
    ///
    /// Returns `None` for unknown keys. An asset that cannot be read still
    /// resolves, without a fingerprint.
    pub async fn resolve(&self, key: &str) -> Option<String> {
        let asset = self.images.get(key)?;
        let url = asset
            .url
            .get_or_init(|| self.load(&asset.file))
            .await;
        Some(url.clone())
    }

    async fn load(&self, file: &str) -> String {
        let plain = format!("{}/{}", self.base_url, file);
        match tokio::fs::read(self.dir.join(file)).await {
            Ok(bytes) => format!("{}?v={}", plain, fingerprint(&bytes)),
            Err(e) => {
                tracing::debug!("Image {} not loaded: {}", file, e);
                plain
            }
        }
    }
}

/// Short content hash used to bust caches
fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:08x}", hasher.finish() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_unknown_key_resolves_to_none() {
        let resolver = ImageResolver::new("/nonexistent", "/images/blog");
        assert_eq!(resolver.resolve("nope-mini").await, None);
    }

    #[tokio::test]
    async fn test_missing_file_resolves_plain_url() {
        let resolver = ImageResolver::new("/nonexistent", "/images/blog/");
        assert_eq!(
            resolver.resolve("devfest-hero").await.as_deref(),
            Some("/images/blog/devfest-hero.jpg")
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_fingerprinted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("aws-mini.png"), b"png bytes").unwrap();
        let resolver = ImageResolver::new(dir.path(), "/images/blog");

        let url = resolver.resolve("aws-mini").await.unwrap();
        assert!(url.starts_with("/images/blog/aws-mini.png?v="));
        assert_eq!(url.len(), "/images/blog/aws-mini.png?v=".len() + 8);

        // Loaded once: later edits do not change the resolved URL
        fs::write(dir.path().join("aws-mini.png"), b"other bytes").unwrap();
        assert_eq!(resolver.resolve("aws-mini").await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_with_images_extends_table() {
        let mut extra = IndexMap::new();
        extra.insert("meetup-mini".to_string(), "meetup.webp".to_string());
        let resolver = ImageResolver::new("/nonexistent", "/img").with_images(&extra);

        assert!(resolver.images.contains_key("meetup-mini"));
        assert!(resolver.images.contains_key("google-hero"));
        assert_eq!(
            resolver.resolve("meetup-mini").await.as_deref(),
            Some("/img/meetup.webp")
        );
    }

    #[test]
    fn test_builtin_table_has_both_variants() {
        let resolver = ImageResolver::new("/nonexistent", "/img");
        for key in resolver.images.keys() {
            let base = key
                .strip_suffix(MINI_SUFFIX)
                .or_else(|| key.strip_suffix(HERO_SUFFIX))
                .unwrap();
            assert!(resolver.images.contains_key(&format!("{}{}", base, MINI_SUFFIX)));
            assert!(resolver.images.contains_key(&format!("{}{}", base, HERO_SUFFIX)));
        }
    }
}
