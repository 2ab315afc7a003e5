//! Date helper functions

use chrono::NaiveDateTime;

use crate::content::parse_post_date;

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "DD/MM/YYYY") // -> "05/06/2024"
/// ```
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Format a post's front-matter date, returning it untouched when it does
/// not parse
pub fn format_post_date(raw: &str, format: &str) -> String {
    match parse_post_date(raw) {
        Some(date) => format_date(&date, format),
        None => raw.to_string(),
    }
}

/// Date in ISO 8601 form, for `<time datetime>` attributes
pub fn date_xml(raw: &str) -> Option<String> {
    parse_post_date(raw).map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
