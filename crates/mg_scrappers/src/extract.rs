//! Best-effort title and body extraction from raw markup. This is pattern
//! matching, not parsing: nested tags inside a paragraph make it skip that
//! paragraph.

use lazy_static::lazy_static;
use regex::Regex;

pub const FALLBACK_TITLE: &str = "Article";

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap();
    static ref CONTENT_BLOCK: Regex =
        Regex::new(r#"(?i)<(?:p|article|div class="content")[^>]*>([^<]+)</(?:p|article|div)>"#).unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Trimmed `<title>` text. Only a page without a title gets
/// [`FALLBACK_TITLE`]; a blank title stays blank.
pub fn extract_title(html: &str) -> String {
    TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(FALLBACK_TITLE)
        .to_string()
}

/// Text of paragraph-like blocks, space separated, cut to `max_chars`
/// characters.
pub fn extract_content(html: &str, max_chars: usize) -> String {
    let joined = CONTENT_BLOCK
        .find_iter(html)
        .map(|m| TAG.replace_all(m.as_str(), ""))
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined, max_chars)
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
