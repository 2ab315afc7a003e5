//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/images/blog/aws-mini.png") // -> "/images/blog/aws-mini.png"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// URL of a page inside a locale section
///
/// # Examples
/// ```ignore
/// locale_url(&config, "en", "blog/aws") // -> "/en/blog/aws"
/// ```
pub fn locale_url(config: &SiteConfig, locale: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        url_for(config, locale)
    } else {
        url_for(config, &format!("{}/{}", locale, path))
    }
}

/// URL of a blog post page
pub fn post_url(config: &SiteConfig, locale: &str, slug: &str) -> String {
    locale_url(config, locale, &format!("blog/{}", slug))
}
