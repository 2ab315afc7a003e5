//! Blog directory scanning and file naming conventions
//!
//! `{slug}.mdx` holds the default-locale post, `{slug}-en.mdx` its English
//! variant. Only default-locale files are listed.

use std::fs;
use std::path::{Path, PathBuf};

use super::BlogError;

/// Extension of post files
pub const POST_EXTENSION: &str = ".mdx";
/// Suffix of English variants
pub const ENGLISH_SUFFIX: &str = "-en.mdx";

/// A listed post file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFile {
    pub slug: String,
    pub path: PathBuf,
}

/// List default-locale post files, sorted by file name.
///
/// A missing directory is not an error and yields nothing.
pub fn scan_posts(dir: &Path) -> Result<Vec<PostFile>, BlogError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let scan_error = |source| BlogError::Scan {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && is_listed(name) {
            files.push(PostFile {
                slug: slug_from_file_name(name),
                path: path.clone(),
            });
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Whether a file name is a default-locale post
pub fn is_listed(file_name: &str) -> bool {
    file_name.ends_with(POST_EXTENSION) && !file_name.ends_with(ENGLISH_SUFFIX)
}

/// Strip the `.mdx` / `.md` extension
pub fn slug_from_file_name(file_name: &str) -> String {
    file_name
        .strip_suffix(".mdx")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(file_name)
        .to_string()
}

/// Whether a requested locale selects English variants
pub fn is_english(locale: &str) -> bool {
    locale.to_lowercase().starts_with("en")
}

/// Pick the file backing `slug` for `locale`.
///
/// The English variant wins only for English locales and only when it exists.
/// Returns `None` for slugs that could escape the blog directory.
pub fn resolve_post_path(dir: &Path, slug: &str, locale: &str) -> Option<PathBuf> {
    if !is_safe_slug(slug) {
        return None;
    }

    if is_english(locale) {
        let english = dir.join(format!("{}{}", slug, ENGLISH_SUFFIX));
        if english.exists() {
            return Some(english);
        }
    }

    Some(dir.join(format!("{}{}", slug, POST_EXTENSION)))
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_listed() {
        assert!(is_listed("aws.mdx"));
        assert!(!is_listed("aws-en.mdx"));
        assert!(!is_listed("notes.md"));
        assert!(!is_listed("image.png"));
    }

    #[test]
    fn test_slug_from_file_name() {
        assert_eq!(slug_from_file_name("devfest-2024.mdx"), "devfest-2024");
        assert_eq!(slug_from_file_name("notes.md"), "notes");
        assert_eq!(slug_from_file_name("README"), "README");
    }

    #[test]
    fn test_is_english() {
        assert!(is_english("en"));
        assert!(is_english("EN-us"));
        assert!(!is_english("fr"));
        assert!(!is_english(""));
    }

    #[test]
    fn test_scan_missing_dir() {
        let files = scan_posts(Path::new("/definitely/not/here")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mdx", "a.mdx", "a-en.mdx", "draft.md", "cover.png"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("folder.mdx")).unwrap();

        let files = scan_posts(dir.path()).unwrap();
        let slugs: Vec<_> = files.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert_eq!(files[0].path, dir.path().join("a.mdx"));
    }

    #[test]
    fn test_resolve_post_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("talk.mdx"), "").unwrap();
        fs::write(dir.path().join("talk-en.mdx"), "").unwrap();
        fs::write(dir.path().join("only-fr.mdx"), "").unwrap();

        assert_eq!(
            resolve_post_path(dir.path(), "talk", "en-GB"),
            Some(dir.path().join("talk-en.mdx"))
        );
        assert_eq!(
            resolve_post_path(dir.path(), "talk", "fr"),
            Some(dir.path().join("talk.mdx"))
        );
        assert_eq!(
            resolve_post_path(dir.path(), "only-fr", "en"),
            Some(dir.path().join("only-fr.mdx"))
        );
    }

    #[test]
    fn test_resolve_rejects_unsafe_slugs() {
        let dir = Path::new("/blog");
        assert_eq!(resolve_post_path(dir, "../secret", "fr"), None);
        assert_eq!(resolve_post_path(dir, "a/b", "fr"), None);
        assert_eq!(resolve_post_path(dir, ".hidden", "fr"), None);
        assert_eq!(resolve_post_path(dir, "", "fr"), None);
    }
}
