//! List blog posts

use anyhow::Result;

use crate::content::PostSummary;
use crate::Site;

/// Print the blog listing, newest first
pub async fn run(site: &Site) -> Result<()> {
    let posts = site.blog().get_all_blog_posts().await?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!("{}", format_line(post));
    }

    Ok(())
}

fn format_line(post: &PostSummary) -> String {
    let date = if post.date.is_empty() {
        "----------"
    } else {
        post.date.as_str()
    };
    let image = if post.image.is_some() { "" } else { " (no image)" };
    format!("  {} - {} [{}]{}", date, post.title, post.slug, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let mut post = PostSummary {
            title: "Bienvenue".to_string(),
            key: "welcome".to_string(),
            image: Some("/images/blog/welcome-mini.png".to_string()),
            date: "2024-06-05".to_string(),
            slug: "welcome".to_string(),
            excerpt: String::new(),
        };
        assert_eq!(format_line(&post), "  2024-06-05 - Bienvenue [welcome]");

        post.date.clear();
        post.image = None;
        assert_eq!(
            format_line(&post),
            "  ---------- - Bienvenue [welcome] (no image)"
        );
    }
}
