use devfest_site::content::{BlogService, ImageResolver};
use std::fs;
use std::path::Path;

fn write_post(dir: &Path, file: &str, front_matter: &str, body: &str) {
    fs::write(dir.join(file), format!("---\n{}\n---\n{}", front_matter, body)).unwrap();
}

/// A blog directory plus an images directory holding a few real files
fn fixture() -> (tempfile::TempDir, BlogService) {
    let dir = tempfile::tempdir().unwrap();
    let blog = dir.path().join("blog");
    let images = dir.path().join("images");
    fs::create_dir_all(&blog).unwrap();
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("aws-mini.png"), b"aws mini").unwrap();
    fs::write(images.join("aws-hero.png"), b"aws hero").unwrap();

    write_post(
        &blog,
        "aws.mdx",
        "title: AWS nous rejoint\nkey: aws\ndate: 2024-10-17",
        "AWS sera présent cette année.",
    );
    write_post(
        &blog,
        "aws-en.mdx",
        "title: AWS joins us\nkey: aws\ndate: 2024-10-17\nhideTitle: true",
        "AWS will be there this year.",
    );
    write_post(
        &blog,
        "welcome.mdx",
        "title: Bienvenue\ndate: 2024-06-05\nimage: devfest",
        "Première édition du blog.",
    );
    write_post(
        &blog,
        "cfp.mdx",
        "title: Appel à orateurs\ndate: 2024-08-20\nimage: unknown",
        "Le CFP est ouvert.",
    );

    let resolver = ImageResolver::new(&images, "/images/blog");
    let service = BlogService::new(&blog, resolver);
    (dir, service)
}

#[tokio::test]
async fn test_listing_is_sorted_newest_first() {
    let (_dir, service) = fixture();
    let posts = service.get_all_blog_posts().await.unwrap();

    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["aws", "cfp", "welcome"]);
}

#[tokio::test]
async fn test_english_variants_are_not_listed() {
    let (_dir, service) = fixture();
    let posts = service.get_all_blog_posts().await.unwrap();

    assert!(posts.iter().all(|p| !p.slug.ends_with("-en")));
    assert_eq!(posts[0].title, "AWS nous rejoint");
}

#[tokio::test]
async fn test_summary_fields() {
    let (_dir, service) = fixture();
    let posts = service.get_all_blog_posts().await.unwrap();

    let aws = &posts[0];
    assert_eq!(aws.key, "aws");
    assert_eq!(aws.date, "2024-10-17");
    assert_eq!(aws.excerpt, "AWS sera présent cette année.");
    let image = aws.image.as_deref().unwrap();
    assert!(image.starts_with("/images/blog/aws-mini.png?v="));

    // `key` falls back to the slug
    assert_eq!(posts[2].key, "welcome");
}

#[tokio::test]
async fn test_unknown_image_still_assembles() {
    let (_dir, service) = fixture();
    let posts = service.get_all_blog_posts().await.unwrap();

    let cfp = posts.iter().find(|p| p.slug == "cfp").unwrap();
    assert_eq!(cfp.image, None);
    assert_eq!(cfp.title, "Appel à orateurs");
}

#[tokio::test]
async fn test_known_image_without_file_has_plain_url() {
    let (_dir, service) = fixture();
    let posts = service.get_all_blog_posts().await.unwrap();

    // `devfest-mini` is in the built-in table but not on disk
    let welcome = posts.iter().find(|p| p.slug == "welcome").unwrap();
    assert_eq!(
        welcome.image.as_deref(),
        Some("/images/blog/devfest-mini.jpg")
    );
}

#[tokio::test]
async fn test_post_by_slug_follows_locale() {
    let (_dir, service) = fixture();

    let fr = service.get_blog_post_by_slug("aws", "fr").await.unwrap();
    assert_eq!(fr.title, "AWS nous rejoint");
    assert!(!fr.hide_title);
    assert_eq!(fr.content, "AWS sera présent cette année.");

    for locale in ["en", "en-US", "EN"] {
        let en = service.get_blog_post_by_slug("aws", locale).await.unwrap();
        assert_eq!(en.title, "AWS joins us");
        assert!(en.hide_title);
        assert_eq!(en.slug, "aws");
        assert!(en
            .image
            .as_deref()
            .unwrap()
            .starts_with("/images/blog/aws-hero.png?v="));
    }
}

#[tokio::test]
async fn test_english_request_falls_back_to_default_file() {
    let (_dir, service) = fixture();
    let post = service.get_blog_post_by_slug("welcome", "en").await.unwrap();
    assert_eq!(post.title, "Bienvenue");
}

#[tokio::test]
async fn test_missing_post_is_none() {
    let (_dir, service) = fixture();
    assert!(service.get_blog_post_by_slug("nope", "fr").await.is_none());
    assert!(service
        .get_blog_post_by_slug("../secret", "fr")
        .await
        .is_none());
}

#[tokio::test]
async fn test_posts_are_read_fresh() {
    let (dir, service) = fixture();
    assert_eq!(service.get_all_blog_posts().await.unwrap().len(), 3);

    write_post(
        &dir.path().join("blog"),
        "late.mdx",
        "title: Dernière minute\ndate: 2024-11-01",
        "Nouveau.",
    );
    let posts = service.get_all_blog_posts().await.unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0].slug, "late");
}

#[tokio::test]
async fn test_long_body_excerpt_is_bounded() {
    let (dir, service) = fixture();
    let body = "mot ".repeat(200);
    write_post(
        &dir.path().join("blog"),
        "long.mdx",
        "title: Long\ndate: 2023-01-01",
        &body,
    );

    let posts = service.get_all_blog_posts().await.unwrap();
    let long = posts.iter().find(|p| p.slug == "long").unwrap();
    assert!(long.excerpt.ends_with("..."));
    assert!(long.excerpt.chars().count() <= 200 + 3);
}

#[tokio::test]
async fn test_missing_directory_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = BlogService::new(
        dir.path().join("absent"),
        ImageResolver::new(dir.path(), "/images/blog"),
    );
    assert!(service.get_all_blog_posts().await.unwrap().is_empty());
    assert!(service.get_blog_post_by_slug("any", "fr").await.is_none());
}

#[tokio::test]
async fn test_invalid_utf8_post_is_still_listed() {
    let (dir, service) = fixture();
    fs::write(
        dir.path().join("blog/latin.mdx"),
        b"---\ntitle: Caf\xe9\ndate: 2024-12-01\n---\nUn caf\xe9 offert.",
    )
    .unwrap();

    let posts = service.get_all_blog_posts().await.unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0].slug, "latin");
    assert_eq!(posts[0].title, "Caf\u{fffd}");
    assert_eq!(posts[0].excerpt, "Un caf\u{fffd} offert.");

    let detail = service.get_blog_post_by_slug("latin", "fr").await.unwrap();
    assert_eq!(detail.content, "Un caf\u{fffd} offert.");
}
