//! Toolbar formatting commands for the composer
//!
//! This module implements the inline formatting commands the toolbar offers:
//! Bold, Italic, and Link. The command set is closed, and each command
//! carries its wrapping rule (marker prefix, marker suffix, placeholder) as
//! data, so there is no string dispatch and no "unknown command" branch to
//! mishandle.
//!
//! Applying a command splices into the buffer at the current selection:
//!
//! - A non-empty selection is wrapped in the command's markers. The caret
//!   lands right after the closing marker, except for Link, where it lands
//!   on the `U` of the `URL` placeholder so the user can type the target
//!   immediately.
//! - An empty selection inserts the markers around a placeholder word, with
//!   the caret just inside the opening marker.
//!
//! There is no toggling: formatting already-formatted text wraps it again.

use crate::editor::buffer::EditBuffer;

// ─────────────────────────────────────────────────────────────────────────────
// Command Set
// ─────────────────────────────────────────────────────────────────────────────

/// The closed set of inline formatting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineCommand {
    /// Wrap in `**` markers
    Bold,
    /// Wrap in `*` markers
    Italic,
    /// Wrap in `[...](URL)` syntax
    Link,
}

/// How a command wraps the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapRule {
    /// Text inserted before the selection (or placeholder).
    pub prefix: &'static str,
    /// Text inserted after the selection (or placeholder).
    pub suffix: &'static str,
    /// Stand-in content when the selection is empty.
    pub placeholder: &'static str,
    /// Caret offset from the splice origin when the placeholder was used.
    pub placeholder_caret: usize,
    /// Caret distance back from the end of the replacement when a selection
    /// was wrapped. Zero means "right after the closing marker".
    pub wrap_caret_backset: usize,
}

impl InlineCommand {
    /// Every command, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Bold, Self::Italic, Self::Link];

    /// The wrapping rule for this command.
    pub const fn rule(self) -> WrapRule {
        match self {
            Self::Bold => WrapRule {
                prefix: "**",
                suffix: "**",
                placeholder: "bold text",
                placeholder_caret: 2,
                wrap_caret_backset: 0,
            },
            Self::Italic => WrapRule {
                prefix: "*",
                suffix: "*",
                placeholder: "italic text",
                placeholder_caret: 1,
                wrap_caret_backset: 0,
            },
            // Caret backset 4 puts the caret on the 'U' of "](URL)".
            Self::Link => WrapRule {
                prefix: "[",
                suffix: "](URL)",
                placeholder: "link text",
                placeholder_caret: 1,
                wrap_caret_backset: 4,
            },
        }
    }

    /// Toolbar button glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "𝐁",
            Self::Italic => "𝐼",
            Self::Link => "🔗",
        }
    }

    /// Keyboard shortcut shown in tooltips.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Bold => "Ctrl+B",
            Self::Italic => "Ctrl+I",
            Self::Link => "Ctrl+K",
        }
    }

    /// Tooltip text including the shortcut.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Link => "Insert Link",
        };
        format!("{} ({})", name, self.shortcut_label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Application
// ─────────────────────────────────────────────────────────────────────────────

/// What [`apply`] did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOutcome {
    /// Final caret position (collapsed selection).
    pub caret: usize,
    /// True when the placeholder was inserted instead of wrapping text.
    pub used_placeholder: bool,
}

/// Apply `command` at the buffer's current selection.
///
/// The replacement is spliced over the selection; everything outside the
/// selection is untouched. The caret collapses at the position dictated by
/// the command's [`WrapRule`] and is queued for the text widget.
pub fn apply(command: InlineCommand, buffer: &mut EditBuffer) -> FormatOutcome {
    let rule = command.rule();

    let (replacement, used_placeholder) = if buffer.has_selection() {
        let selected = buffer.selected_text();
        let mut replacement =
            String::with_capacity(rule.prefix.len() + selected.len() + rule.suffix.len());
        replacement.push_str(rule.prefix);
        replacement.push_str(selected);
        replacement.push_str(rule.suffix);
        (replacement, false)
    } else {
        let replacement = format!("{}{}{}", rule.prefix, rule.placeholder, rule.suffix);
        (replacement, true)
    };

    let origin = buffer.replace_selection(&replacement);

    let caret = if used_placeholder {
        origin + rule.placeholder_caret
    } else {
        origin + replacement.len() - rule.wrap_caret_backset
    };
    buffer.place_caret(caret);

    FormatOutcome {
        caret,
        used_placeholder,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_selection(text: &str, start: usize, end: usize) -> EditBuffer {
        let mut buf = EditBuffer::with_text(text);
        buf.set_selection(start, end);
        buf
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bold Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_wraps_selection() {
        let mut buf = buffer_with_selection("say hi now", 4, 6);
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "say **hi** now");
        // Caret directly after the closing "**".
        assert_eq!(outcome.caret, 10);
        assert_eq!(buf.selection(), (10, 10));
        assert!(!outcome.used_placeholder);
    }

    #[test]
    fn test_bold_empty_selection_inserts_placeholder() {
        let mut buf = EditBuffer::with_text("say  now");
        buf.set_caret(4);
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "say **bold text** now");
        // Caret just inside the opening "**", ready to overtype.
        assert_eq!(outcome.caret, 4 + 2);
        assert!(outcome.used_placeholder);
    }

    #[test]
    fn test_bold_at_start_of_text() {
        let mut buf = buffer_with_selection("hi there", 0, 2);
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "**hi** there");
        assert_eq!(outcome.caret, 6);
    }

    #[test]
    fn test_bold_at_end_of_text() {
        let mut buf = buffer_with_selection("say hi", 4, 6);
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "say **hi**");
        assert_eq!(outcome.caret, 10);
    }

    #[test]
    fn test_bold_no_toggle_wraps_again() {
        let mut buf = buffer_with_selection("**hi**", 0, 6);
        apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "****hi****");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Italic Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_italic_wraps_selection() {
        let mut buf = buffer_with_selection("say hi now", 4, 6);
        let outcome = apply(InlineCommand::Italic, &mut buf);
        assert_eq!(buf.text(), "say *hi* now");
        assert_eq!(outcome.caret, 8);
    }

    #[test]
    fn test_italic_empty_selection_inserts_placeholder() {
        let mut buf = EditBuffer::with_text("");
        let outcome = apply(InlineCommand::Italic, &mut buf);
        assert_eq!(buf.text(), "*italic text*");
        assert_eq!(outcome.caret, 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Link Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link_wraps_selection_caret_on_url() {
        let mut buf = buffer_with_selection("x", 0, 1);
        let outcome = apply(InlineCommand::Link, &mut buf);
        assert_eq!(buf.text(), "[x](URL)");
        // Caret sits on the 'U' so typing replaces the URL placeholder.
        assert_eq!(outcome.caret, 4);
        assert_eq!(&buf.text()[outcome.caret..outcome.caret + 3], "URL");
    }

    #[test]
    fn test_link_selection_in_context() {
        let mut buf = buffer_with_selection("see docs here", 4, 8);
        let outcome = apply(InlineCommand::Link, &mut buf);
        assert_eq!(buf.text(), "see [docs](URL) here");
        // "[docs](URL)" is 11 bytes; caret 4 back from its end.
        assert_eq!(outcome.caret, 4 + 11 - 4);
    }

    #[test]
    fn test_link_empty_selection_inserts_placeholder() {
        let mut buf = EditBuffer::with_text("go ");
        buf.set_caret(3);
        let outcome = apply(InlineCommand::Link, &mut buf);
        assert_eq!(buf.text(), "go [link text](URL)");
        // Caret just after the '['.
        assert_eq!(outcome.caret, 4);
        assert!(outcome.used_placeholder);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Splice Integrity Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_surrounding_text_untouched() {
        let mut buf = buffer_with_selection("alpha beta gamma", 6, 10);
        apply(InlineCommand::Bold, &mut buf);
        assert!(buf.text().starts_with("alpha "));
        assert!(buf.text().ends_with(" gamma"));
        assert_eq!(buf.text(), "alpha **beta** gamma");
    }

    #[test]
    fn test_multibyte_selection_wraps_cleanly() {
        let mut buf = buffer_with_selection("God påske alle", 4, 10); // "påske"
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.text(), "God **påske** alle");
        // "**påske**" is 6 bytes of text ('å' is 2) + 4 marker bytes.
        assert_eq!(outcome.caret, 4 + 10);
    }

    #[test]
    fn test_caret_queued_for_widget() {
        let mut buf = buffer_with_selection("say hi now", 4, 6);
        let outcome = apply(InlineCommand::Bold, &mut buf);
        assert_eq!(buf.take_pending_caret(), Some(outcome.caret));
    }

    #[test]
    fn test_apply_never_panics_on_any_selection() {
        let text = "ab 你好 🎉 cd";
        for a in 0..=text.len() {
            for b in 0..=text.len() {
                for cmd in [InlineCommand::Bold, InlineCommand::Italic, InlineCommand::Link] {
                    let mut buf = EditBuffer::with_text(text);
                    buf.set_selection(a, b);
                    let _ = apply(cmd, &mut buf);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rule Metadata Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_rules_match_markers() {
        assert_eq!(InlineCommand::Bold.rule().prefix, "**");
        assert_eq!(InlineCommand::Italic.rule().suffix, "*");
        assert_eq!(InlineCommand::Link.rule().suffix, "](URL)");
        assert_eq!(InlineCommand::Link.rule().wrap_caret_backset, 4);
    }

    #[test]
    fn test_tooltips_include_shortcuts() {
        assert_eq!(InlineCommand::Bold.tooltip(), "Bold (Ctrl+B)");
        assert_eq!(InlineCommand::Link.tooltip(), "Insert Link (Ctrl+K)");
    }
}
