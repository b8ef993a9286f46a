//! Clipboard operations for HTML export
//!
//! Copies the rendered post to the system clipboard using the arboard
//! crate. The clipboard gets the HTML rendering plus the Markdown source
//! as the plain-text fallback, so pasting into a rich-text editor keeps
//! the formatting while pasting into a plain editor keeps the source.

use super::html::render_html_body;
use arboard::Clipboard;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access the clipboard
    Access(String),
    /// Failed to set clipboard content
    Write(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Access(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::Write(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Copy the post body to the clipboard as HTML.
///
/// The Markdown source goes along as the plain-text fallback.
///
/// # Example
///
/// ```ignore
/// copy_post_html("# Hello\n\n**Bold** text")?;
/// // Rich paste gets the formatted content, plain paste gets the source
/// ```
pub fn copy_post_html(markdown: &str) -> Result<(), ClipboardError> {
    let html = render_html_body(markdown);

    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
    clipboard
        .set_html(html.as_str(), Some(markdown))
        .map_err(|e| ClipboardError::Write(e.to_string()))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display_access() {
        let err = ClipboardError::Access("no display".to_string());
        assert!(err.to_string().contains("no display"));
        assert!(err.to_string().contains("access"));
    }

    #[test]
    fn test_clipboard_error_display_write() {
        let err = ClipboardError::Write("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
