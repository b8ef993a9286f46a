//! Plain-text summaries of Markdown content
//!
//! Draft listings and window titles want a short plain-text line, not
//! Markdown source. This strips the common inline and block markers the
//! composer produces (links and images keep their text), collapses blank
//! runs, and truncates with an ellipsis.

use regex::Regex;

/// Default summary length, in characters.
pub const SUMMARY_LEN: usize = 100;

/// Strip Markdown syntax down to readable text and truncate to
/// `max_length` characters, appending `...` when the text was longer.
pub fn text_summary(content: &str, max_length: usize) -> String {
    let text = strip_markdown(content);

    let mut chars = text.char_indices();
    match chars.nth(max_length) {
        // More characters than the limit: cut on the boundary we landed on.
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

/// [`text_summary`] at the standard length.
pub fn short_summary(content: &str) -> String {
    text_summary(content, SUMMARY_LEN)
}

/// Remove Markdown markers, keeping the readable text.
fn strip_markdown(content: &str) -> String {
    // Patterns are constant, so compilation cannot fail.
    let image = Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid image pattern");
    let link = Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link pattern");
    let bold = Regex::new(r"\*\*([^*]*)\*\*").expect("valid bold pattern");
    let italic = Regex::new(r"\*([^*]*)\*").expect("valid italic pattern");
    let code = Regex::new(r"`([^`]*)`").expect("valid code pattern");
    let heading = Regex::new(r"(?m)^#{1,6}\s*").expect("valid heading pattern");
    let list = Regex::new(r"(?m)^\s*(?:[-*+]|\d+[.)])\s+").expect("valid list pattern");
    let blank_run = Regex::new(r"\n\s*\n").expect("valid blank-run pattern");

    // Images before links: the image syntax contains the link syntax.
    let text = image.replace_all(content, "$1");
    let text = link.replace_all(&text, "$1");
    let text = bold.replace_all(&text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = code.replace_all(&text, "$1");
    let text = heading.replace_all(&text, "");
    let text = list.replace_all(&text, "");
    let text = blank_run.replace_all(&text, "\n");
    text.trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
