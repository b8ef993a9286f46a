//! Body editor widget for Quill
//!
//! Wraps egui's multiline TextEdit around an [`EditBuffer`]: renders the
//! Markdown source, keeps the buffer's byte-offset selection in sync with
//! the widget's char-based cursor, and restores the caret after a toolbar
//! command has spliced text into the buffer.

use super::buffer::EditBuffer;
use eframe::egui::text::{CCursor, CCursorRange};
use eframe::egui::{self, FontId, ScrollArea, TextEdit, Ui};
use log::debug;
use std::sync::Arc;

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the content was modified.
    pub changed: bool,
}

/// The Markdown source editor for the post body.
///
/// This widget wraps egui's TextEdit with additional functionality:
/// - Selection tracking as byte offsets on the [`EditBuffer`]
/// - Caret restore after programmatic edits (toolbar commands)
/// - Font size and word wrap from Settings
///
/// # Example
///
/// ```ignore
/// ComposerEditor::new(&mut buffer)
///     .font_size(settings.font_size)
///     .word_wrap(settings.word_wrap)
///     .show(ui);
/// ```
pub struct ComposerEditor<'a> {
    /// The buffer being edited.
    buffer: &'a mut EditBuffer,
    /// Font size for the editor.
    font_size: f32,
    /// Whether word wrap is enabled.
    word_wrap: bool,
    /// Hint text shown while the buffer is empty.
    hint_text: Option<String>,
    /// ID for the editor (for state persistence).
    id: Option<egui::Id>,
}

impl<'a> ComposerEditor<'a> {
    /// Create a new editor widget for the given buffer.
    pub fn new(buffer: &'a mut EditBuffer) -> Self {
        Self {
            buffer,
            font_size: 14.0,
            word_wrap: true,
            hint_text: None,
            id: None,
        }
    }

    /// Set the font size for the editor.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set whether word wrap is enabled.
    #[must_use]
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Set the hint text shown while the buffer is empty.
    #[must_use]
    pub fn hint_text(mut self, hint: impl Into<String>) -> Self {
        self.hint_text = Some(hint.into());
        self
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        // Include the buffer revision in the ID so that egui treats the
        // TextEdit as a new widget when content is replaced wholesale
        // (e.g., a draft was loaded). This forces the TextEdit to drop
        // stale cursor and undo state.
        let base_id = self.id.unwrap_or_else(|| ui.id().with("composer"));
        let id = base_id.with(self.buffer.revision());

        // A toolbar command has spliced text into the buffer and queued a
        // caret position. The widget stores cursors as char indices, the
        // buffer works in byte offsets, so convert before handing the
        // position to the widget state.
        let mut caret_restored = false;
        if let Some(byte_pos) = self.buffer.take_pending_caret() {
            let char_pos = byte_to_char_index(self.buffer.text(), byte_pos);
            let mut state = TextEdit::load_state(ui.ctx(), id).unwrap_or_default();
            state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(char_pos))));
            state.store(ui.ctx(), id);
            ui.ctx().memory_mut(|mem| mem.request_focus(id));
            caret_restored = true;
            debug!("Restored caret to byte {} (char {})", byte_pos, char_pos);
        }

        // Store original content for change detection
        let original_content = self.buffer.text().to_owned();

        // Capture values for the layouter closure
        let font_size = self.font_size;
        let word_wrap = self.word_wrap;

        // Configure the text layout based on word wrap
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> Arc<egui::Galley> {
            let font_id = FontId::monospace(font_size);
            let layout_job = if word_wrap {
                egui::text::LayoutJob::simple(
                    text.to_owned(),
                    font_id,
                    ui.visuals().text_color(),
                    wrap_width,
                )
            } else {
                egui::text::LayoutJob::simple_singleline(
                    text.to_owned(),
                    font_id,
                    ui.visuals().text_color(),
                )
            };
            ui.fonts(|f| f.layout_job(layout_job))
        };

        let content = self.buffer.text_mut();

        let scroll_output = ScrollArea::vertical()
            .id_source(id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut text_edit = TextEdit::multiline(content)
                    .id(id)
                    .frame(false)
                    .font(FontId::monospace(font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(12)
                    .layouter(&mut layouter);
                if let Some(ref hint) = self.hint_text {
                    text_edit = text_edit.hint_text(hint.as_str());
                }

                let text_output = text_edit.show(ui);

                // Keep focus on the editor after a toolbar command, so
                // typing continues at the restored caret.
                if caret_restored {
                    text_output.response.request_focus();
                }

                text_output
            });

        let text_output = scroll_output.inner;

        // Determine if content changed
        let changed = self.buffer.text() != original_content;
        if changed {
            debug!("Editor content changed ({} bytes)", self.buffer.len());
        }

        // Mirror the widget's cursor back into the buffer as byte offsets,
        // so toolbar commands see the selection the user sees.
        if let Some(cursor_range) = text_output.cursor_range {
            let primary = cursor_range.primary.ccursor.index;
            let secondary = cursor_range.secondary.ccursor.index;
            let (start, end) = if primary <= secondary {
                (primary, secondary)
            } else {
                (secondary, primary)
            };
            let start_byte = char_to_byte_index(self.buffer.text(), start);
            let end_byte = char_to_byte_index(self.buffer.text(), end);
            self.buffer.set_selection(start_byte, end_byte);
        }

        EditorOutput { changed }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a byte offset to a character index.
///
/// The offset is clamped to the string length; an offset inside a multi-byte
/// character counts the characters strictly before it.
fn byte_to_char_index(text: &str, byte_index: usize) -> usize {
    let byte_index = super::buffer::floor_char_boundary(text, byte_index);
    text[..byte_index].chars().count()
}

/// Convert a character index to a byte offset.
///
/// Returns the text length if the index is past the end.
fn char_to_byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte_index, _)| byte_index)
        .unwrap_or(text.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_char_index_ascii() {
        let text = "Hello, World!";
        assert_eq!(byte_to_char_index(text, 0), 0);
        assert_eq!(byte_to_char_index(text, 5), 5);
        assert_eq!(byte_to_char_index(text, 13), 13);
    }

    #[test]
    fn test_byte_to_char_index_multibyte() {
        // "på" is 3 bytes ('p' + 2-byte 'å') but 2 chars
        let text = "på bordet";
        assert_eq!(byte_to_char_index(text, 0), 0);
        assert_eq!(byte_to_char_index(text, 1), 1);
        assert_eq!(byte_to_char_index(text, 3), 2);
        assert_eq!(byte_to_char_index(text, 4), 3);
    }

    #[test]
    fn test_byte_to_char_index_clamps_past_end() {
        assert_eq!(byte_to_char_index("abc", 100), 3);
    }

    #[test]
    fn test_byte_to_char_index_inside_multibyte() {
        // Byte 2 is the middle of 'å'; counts chars strictly before it
        let text = "på";
        assert_eq!(byte_to_char_index(text, 2), 1);
    }

    #[test]
    fn test_char_to_byte_index_ascii() {
        let text = "Hello";
        assert_eq!(char_to_byte_index(text, 0), 0);
        assert_eq!(char_to_byte_index(text, 3), 3);
        assert_eq!(char_to_byte_index(text, 5), 5);
    }

    #[test]
    fn test_char_to_byte_index_multibyte() {
        let text = "på bordet";
        assert_eq!(char_to_byte_index(text, 0), 0);
        assert_eq!(char_to_byte_index(text, 1), 1);
        assert_eq!(char_to_byte_index(text, 2), 3);
        assert_eq!(char_to_byte_index(text, 3), 4);
    }

    #[test]
    fn test_char_to_byte_index_past_end() {
        assert_eq!(char_to_byte_index("på", 10), 3);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let text = "Smash på bordet 🏓";
        for char_idx in 0..=text.chars().count() {
            let byte_idx = char_to_byte_index(text, char_idx);
            assert_eq!(
                byte_to_char_index(text, byte_idx),
                char_idx,
                "Roundtrip failed for char index {}",
                char_idx
            );
        }
    }
}
