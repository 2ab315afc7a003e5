//! Blog post records

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::frontmatter::parse_post_date;

/// A post as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,

    /// Logical identifier (front-matter `key`, or the slug)
    pub key: String,

    /// Resolved URL of the mini image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Date exactly as written in the front-matter
    pub date: String,

    pub slug: String,

    /// Plain-text preview of the body
    pub excerpt: String,
}

/// A post as shown on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub title: String,
    pub key: String,

    /// Resolved URL of the hero image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub date: String,
    pub slug: String,

    /// Raw Markdown body, front-matter removed
    pub content: String,

    /// Whether the page should skip its title heading
    pub hide_title: bool,
}

/// Sort posts newest first.
///
/// Posts whose date does not parse go last, keeping their relative order.
pub fn sort_by_date_desc(posts: &mut [PostSummary]) {
    // Reversed, `None` compares greatest
    posts.sort_by_cached_key(|p| Reverse(parse_post_date(&p.date)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, date: &str) -> PostSummary {
        PostSummary {
            title: slug.to_uppercase(),
            key: slug.to_string(),
            image: None,
            date: date.to_string(),
            slug: slug.to_string(),
            excerpt: String::new(),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            summary("old", "2023-01-10"),
            summary("new", "2024-10-01"),
            summary("mid", "2024/03/15 09:00"),
        ];
        sort_by_date_desc(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_undated_posts_go_last_in_scan_order() {
        let mut posts = vec![
            summary("b-undated", "bientôt"),
            summary("dated", "2024-01-01"),
            summary("a-undated", ""),
        ];
        sort_by_date_desc(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["dated", "b-undated", "a-undated"]);
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let detail = PostDetail {
            title: "T".to_string(),
            key: "k".to_string(),
            image: None,
            date: "2024-01-01".to_string(),
            slug: "s".to_string(),
            content: "body".to_string(),
            hide_title: true,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["hideTitle"], serde_json::Value::Bool(true));
        assert!(json.get("image").is_none());
    }
}
