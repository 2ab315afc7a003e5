//! Plain-text excerpts for blog listings

use lazy_static::lazy_static;
use regex::Regex;

/// Default excerpt length, in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

lazy_static! {
    static ref LEADING_BLOCK: Regex = Regex::new(r"^---[\s\S]*?---").unwrap();
    static ref HEADING_LINE: Regex = Regex::new(r"(?m)^#.*$").unwrap();
}

/// Build a short preview from a post body.
///
/// Whole paragraphs are kept while they fit under `max_len` characters; the
/// first one that does not fit is cut at a word boundary and gets `...`.
pub fn extract_excerpt(content: &str, max_len: usize) -> String {
    let clean = clean_body(content);
    if clean.is_empty() {
        return String::new();
    }

    let mut excerpt = String::new();
    let mut excerpt_len = 0;

    for paragraph in clean.split("\n\n").filter(|p| !p.trim().is_empty()) {
        let paragraph_len = paragraph.chars().count();
        if excerpt_len + paragraph_len < max_len {
            excerpt.push_str(paragraph);
            excerpt.push_str("\n\n");
            excerpt_len += paragraph_len + 2;
            continue;
        }

        let remaining = max_len.saturating_sub(excerpt_len);
        excerpt.push_str(&truncate_words(paragraph, remaining));
        excerpt.push_str(ELLIPSIS);
        break;
    }

    let excerpt = excerpt.trim();
    if excerpt.is_empty() || excerpt == ELLIPSIS {
        let head: String = clean.chars().take(max_len).collect();
        return format!("{}{}", head, ELLIPSIS);
    }
    excerpt.to_string()
}

/// Drop a leading metadata block and heading lines
fn clean_body(content: &str) -> String {
    let content = content.replace("\r\n", "\n");
    let content = LEADING_BLOCK.replace(&content, "");
    HEADING_LINE.replace_all(&content, "").trim().to_string()
}

/// Keep whole words while the result stays under `limit` characters
fn truncate_words(paragraph: &str, limit: usize) -> String {
    let mut truncated = String::new();
    let mut truncated_len = 0;

    for word in paragraph.split(' ') {
        let word_len = word.chars().count();
        if truncated_len + word_len + 1 >= limit {
            break;
        }
        if !truncated.is_empty() {
            truncated.push(' ');
            truncated_len += 1;
        }
        truncated.push_str(word);
        truncated_len += word_len;
    }

    truncated
}
