//! Edit buffer for the post body
//!
//! The buffer owns the Markdown source being composed together with the
//! current selection. The selection is a pair of byte offsets into the text,
//! kept ordered and clamped to UTF-8 character boundaries so that splicing
//! can never panic, even when offsets originate from GUI cursor state.
//!
//! A collapsed selection (`start == end`) is the caret. Toolbar commands
//! splice their replacement over the selection and then place the caret
//! through [`EditBuffer::place_caret`], which also queues the position for
//! the text widget to pick up on the next frame.

// ─────────────────────────────────────────────────────────────────────────────
// Edit Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// The editable post body: text plus an ordered, boundary-safe selection.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    /// The Markdown source text.
    text: String,
    /// Selection as byte offsets, `start <= end`, both on char boundaries.
    selection: (usize, usize),
    /// Bumped on every programmatic content replacement so the GUI can
    /// discard stale widget state.
    revision: u64,
    /// Caret position the text widget should adopt on its next frame.
    pending_caret: Option<usize>,
}

impl EditBuffer {
    /// Create an empty buffer with the caret at the start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer seeded with text, caret at the start.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for the text widget. Selection validity is restored
    /// by the widget writing the cursor back after the edit.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Byte length of the text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The current selection as ordered byte offsets.
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Whether the selection spans at least one character.
    pub fn has_selection(&self) -> bool {
        self.selection.0 != self.selection.1
    }

    /// The caret position (end of the selection).
    pub fn caret(&self) -> usize {
        self.selection.1
    }

    /// The text covered by the selection.
    pub fn selected_text(&self) -> &str {
        let (start, end) = self.selection;
        &self.text[start..end]
    }

    /// Set the selection from possibly unordered, possibly mid-character
    /// offsets. The pair is normalized and widened to whole characters.
    pub fn set_selection(&mut self, a: usize, b: usize) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let start = floor_char_boundary(&self.text, start);
        let end = ceil_char_boundary(&self.text, end);
        self.selection = (start, end);
    }

    /// Collapse the selection to a caret at `pos` (clamped).
    pub fn set_caret(&mut self, pos: usize) {
        let pos = floor_char_boundary(&self.text, pos);
        self.selection = (pos, pos);
    }

    /// Collapse the selection to `pos` and queue the position for the text
    /// widget, so the on-screen caret follows a programmatic edit.
    pub fn place_caret(&mut self, pos: usize) {
        self.set_caret(pos);
        self.pending_caret = Some(self.selection.0);
    }

    /// Take the queued caret position, if any. Consumed by the text widget.
    pub fn take_pending_caret(&mut self) -> Option<usize> {
        self.pending_caret.take()
    }

    /// Splice `replacement` over the current selection, leaving everything
    /// outside the selection untouched. The caret collapses to the end of
    /// the replacement. Returns the splice origin (the old selection start)
    /// so callers can compute caret positions relative to it.
    pub fn replace_selection(&mut self, replacement: &str) -> usize {
        let (start, end) = self.selection;
        self.text.replace_range(start..end, replacement);
        let caret = start + replacement.len();
        self.selection = (caret, caret);
        start
    }

    /// Replace the whole text (draft load, discard). Resets the caret to
    /// the start and bumps the revision so the GUI drops stale widget state.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = (0, 0);
        self.pending_caret = None;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Revision counter, bumped by [`EditBuffer::set_text`].
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Largest index `<= index` on a UTF-8 character boundary, clamped to the
/// string length.
#[inline]
pub(crate) fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut i = index;
    while i > 0 && !is_char_start(bytes[i]) {
        i -= 1;
    }
    i
}

/// Smallest index `>= index` on a UTF-8 character boundary, clamped to the
/// string length.
#[inline]
pub(crate) fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut i = index;
    while i < bytes.len() && !is_char_start(bytes[i]) {
        i += 1;
    }
    i
}

/// True for ASCII bytes and multi-byte lead bytes; false for continuation
/// bytes (10xxxxxx).
#[inline]
fn is_char_start(byte: u8) -> bool {
    (byte & 0b1100_0000) != 0b1000_0000
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Selection Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_buffer_empty() {
        let buf = EditBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.selection(), (0, 0));
        assert!(!buf.has_selection());
    }

    #[test]
    fn test_set_selection_ordered() {
        let mut buf = EditBuffer::with_text("say hi now");
        buf.set_selection(4, 6);
        assert_eq!(buf.selection(), (4, 6));
        assert_eq!(buf.selected_text(), "hi");
    }

    #[test]
    fn test_set_selection_reversed_pair_normalized() {
        let mut buf = EditBuffer::with_text("say hi now");
        buf.set_selection(6, 4);
        assert_eq!(buf.selection(), (4, 6));
        assert_eq!(buf.selected_text(), "hi");
    }

    #[test]
    fn test_set_selection_clamped_beyond_end() {
        let mut buf = EditBuffer::with_text("abc");
        buf.set_selection(1, 99);
        assert_eq!(buf.selection(), (1, 3));
    }

    #[test]
    fn test_set_selection_widens_to_whole_chars() {
        let mut buf = EditBuffer::with_text("på ski"); // 'å' spans bytes 1-2
        buf.set_selection(2, 2);
        // Collapsed inside 'å': floor pulls start to 1, ceil pushes end to 3.
        assert_eq!(buf.selection(), (1, 3));
        assert_eq!(buf.selected_text(), "å");
    }

    #[test]
    fn test_set_caret_mid_char_floors() {
        let mut buf = EditBuffer::with_text("你好");
        buf.set_caret(1);
        assert_eq!(buf.selection(), (0, 0));
        buf.set_caret(4);
        assert_eq!(buf.selection(), (3, 3));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Splice Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_replace_selection_leaves_rest_untouched() {
        let mut buf = EditBuffer::with_text("say hi now");
        buf.set_selection(4, 6);
        let origin = buf.replace_selection("**hi**");
        assert_eq!(origin, 4);
        assert_eq!(buf.text(), "say **hi** now");
        assert_eq!(buf.selection(), (10, 10));
    }

    #[test]
    fn test_replace_collapsed_selection_inserts() {
        let mut buf = EditBuffer::with_text("abcd");
        buf.set_caret(2);
        buf.replace_selection("XY");
        assert_eq!(buf.text(), "abXYcd");
        assert_eq!(buf.selection(), (4, 4));
    }

    #[test]
    fn test_replace_selection_at_end() {
        let mut buf = EditBuffer::with_text("abc");
        buf.set_caret(3);
        buf.replace_selection("!");
        assert_eq!(buf.text(), "abc!");
        assert_eq!(buf.selection(), (4, 4));
    }

    #[test]
    fn test_replace_selection_multibyte() {
        let mut buf = EditBuffer::with_text("si 你好 nå");
        buf.set_selection(3, 9); // the two Chinese chars
        buf.replace_selection("hei");
        assert_eq!(buf.text(), "si hei nå");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret Queue Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_place_caret_queues_for_widget() {
        let mut buf = EditBuffer::with_text("hello");
        buf.place_caret(3);
        assert_eq!(buf.selection(), (3, 3));
        assert_eq!(buf.take_pending_caret(), Some(3));
        assert_eq!(buf.take_pending_caret(), None);
    }

    #[test]
    fn test_set_text_resets_state() {
        let mut buf = EditBuffer::with_text("old");
        buf.set_selection(0, 3);
        buf.place_caret(2);
        let rev = buf.revision();
        buf.set_text("fresh");
        assert_eq!(buf.text(), "fresh");
        assert_eq!(buf.selection(), (0, 0));
        assert_eq!(buf.take_pending_caret(), None);
        assert_eq!(buf.revision(), rev + 1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Boundary Helper Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_floor_char_boundary() {
        let s = "Hei på deg"; // 'å' spans bytes 5-6
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 5), 5);
        assert_eq!(floor_char_boundary(s, 6), 5);
        assert_eq!(floor_char_boundary(s, 100), s.len());
    }

    #[test]
    fn test_ceil_char_boundary() {
        let s = "Hei på deg";
        assert_eq!(ceil_char_boundary(s, 5), 5);
        assert_eq!(ceil_char_boundary(s, 6), 7);
        assert_eq!(ceil_char_boundary(s, 100), s.len());
    }

    #[test]
    fn test_no_panic_on_any_selection_offsets() {
        let mut buf = EditBuffer::with_text("Hello 世界! 🎉 Café");
        let len = buf.len();
        for a in 0..=len + 2 {
            for b in 0..=len + 2 {
                buf.set_selection(a, b);
                let _ = buf.selected_text();
            }
        }
    }
}
