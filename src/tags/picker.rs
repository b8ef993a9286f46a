//! Tag picker state machine
//!
//! The picker owns the selected tag list for the post being composed, the
//! text of the tag input box, and the visibility of the suggestion panel.
//! The GUI layer renders it and feeds events in; everything here is plain
//! state so the whole contract is unit-testable.
//!
//! The selected list keeps three invariants at all times: entries are
//! trimmed and non-empty, entries are distinct under case-sensitive
//! equality, and the list never grows past [`MAX_TAGS`]. The serialized
//! form (what a submitted post carries) is the comma-joined list and is
//! re-derived from scratch after every mutation rather than edited in
//! place.

use crate::tags::catalog::TagCatalog;
use log::debug;

/// Upper bound on selected tags per post.
pub const MAX_TAGS: usize = 5;

/// Upper bound on entries the suggestion panel shows.
pub const MAX_SUGGESTIONS: usize = 10;

/// Warning shown when an add is rejected because the list is full.
pub const TAG_LIMIT_MESSAGE: &str = "Maximum 5 tags allowed";

/// Result of trying to insert a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended to the list.
    Added,
    /// Already selected; nothing changed (always silent).
    Duplicate,
    /// The list is at capacity. Interactive paths surface
    /// [`TAG_LIMIT_MESSAGE`] for this; bulk paths stay silent.
    Full,
    /// The candidate was empty after trimming.
    Empty,
}

impl AddOutcome {
    /// Whether the list changed.
    pub fn added(self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// Selected tags, input box, and suggestion panel state for one post.
#[derive(Debug, Clone)]
pub struct TagPicker {
    /// The injected universe of known tags.
    catalog: TagCatalog,
    /// Selected tags in insertion order.
    tags: Vec<String>,
    /// Comma-joined rendering of `tags`, re-derived after every mutation.
    serialized: String,
    /// Current text of the tag input box.
    pub input: String,
    /// Whether the suggestion panel is showing.
    suggestions_visible: bool,
}

impl TagPicker {
    /// Create an empty picker over the given catalog.
    pub fn new(catalog: TagCatalog) -> Self {
        Self {
            catalog,
            tags: Vec::new(),
            serialized: String::new(),
            input: String::new(),
            suggestions_visible: false,
        }
    }

    /// Create a picker seeded from stored post state.
    ///
    /// Exactly one source is consulted: the serialized field when it is
    /// non-empty, otherwise the visible input value. Parsed pieces are
    /// folded in under the usual invariants; with no user present, excess
    /// and duplicates are dropped silently.
    pub fn seeded(catalog: TagCatalog, serialized_field: &str, input_value: &str) -> Self {
        let mut picker = Self::new(catalog);
        let source = if !serialized_field.trim().is_empty() {
            serialized_field
        } else {
            input_value
        };
        for tag in split_tag_field(source) {
            picker.try_insert(&tag);
        }
        picker
    }

    // ─────────────────────────────────────────────────────────────────────────
    // List Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The selected tags in insertion order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of selected tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no tags are selected.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether the list is at capacity.
    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_TAGS
    }

    /// The comma-joined serialized form, as a submitted post carries it.
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Whether the suggestion panel is showing.
    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    /// Hide the suggestion panel (pointer action outside input and panel).
    pub fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
    }

    /// Show or hide the panel; the GUI calls this as the query changes.
    pub fn set_suggestions_visible(&mut self, visible: bool) {
        self.suggestions_visible = visible;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Try to append a tag. Capacity is checked before duplicates, so a
    /// full list reports [`AddOutcome::Full`] even for an already-selected
    /// tag. On success the serialized field is re-derived.
    pub fn try_insert(&mut self, tag: &str) -> AddOutcome {
        let tag = tag.trim();
        if tag.is_empty() {
            return AddOutcome::Empty;
        }
        if self.is_full() {
            return AddOutcome::Full;
        }
        if self.tags.iter().any(|t| t == tag) {
            return AddOutcome::Duplicate;
        }
        self.tags.push(tag.to_string());
        self.rederive_serialized();
        debug!("Tag added: '{}' ({}/{})", tag, self.tags.len(), MAX_TAGS);
        AddOutcome::Added
    }

    /// Remove the first occurrence of `tag`. A non-member is a no-op.
    /// Returns whether the list changed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                self.rederive_serialized();
                debug!("Tag removed: '{}'", tag);
                true
            }
            None => false,
        }
    }

    /// Remove and return the most recently added tag.
    pub fn pop_last(&mut self) -> Option<String> {
        let tag = self.tags.pop()?;
        self.rederive_serialized();
        debug!("Tag popped: '{}'", tag);
        Some(tag)
    }

    fn rederive_serialized(&mut self) {
        self.serialized = self.tags.join(",");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Suggestions
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the suggestion catalog. Selected tags are untouched.
    pub fn set_catalog(&mut self, catalog: TagCatalog) {
        self.catalog = catalog;
    }

    /// Suggestions for `query`: catalog entries whose lowercase form
    /// contains the lowercase query, excluding already-selected tags,
    /// capped to the first [`MAX_SUGGESTIONS`] in catalog order.
    ///
    /// The sequence is lazy and re-evaluated per call; an empty query
    /// yields nothing.
    pub fn suggest<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = query.to_lowercase();
        let selected = &self.tags;
        self.catalog
            .iter()
            .filter(move |entry| !needle.is_empty() && entry.to_lowercase().contains(&needle))
            .filter(move |entry| !selected.iter().any(|t| t == entry))
            .take(MAX_SUGGESTIONS)
    }

    /// Accept a suggestion the user clicked: insert it, then clear the box
    /// and hide the panel regardless of the outcome. A `Full` outcome is
    /// the caller's cue to surface [`TAG_LIMIT_MESSAGE`].
    pub fn accept_suggestion(&mut self, tag: &str) -> AddOutcome {
        let outcome = self.try_insert(tag);
        self.input.clear();
        self.suggestions_visible = false;
        outcome
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard Contract
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter in the tag input: attempt to add the trimmed box value if
    /// non-empty, then clear the box and hide the panel. The returned
    /// outcome tells the caller whether to raise the capacity warning.
    pub fn handle_enter(&mut self) -> AddOutcome {
        let value = self.input.trim().to_string();
        let outcome = if value.is_empty() {
            AddOutcome::Empty
        } else {
            self.try_insert(&value)
        };
        self.input.clear();
        self.suggestions_visible = false;
        outcome
    }

    /// Backspace in the tag input: when the box is empty, remove the most
    /// recently added tag. Returns the removed tag, if any.
    pub fn handle_backspace(&mut self) -> Option<String> {
        if self.input.is_empty() {
            self.pop_last()
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submit Commit
    // ─────────────────────────────────────────────────────────────────────────

    /// Flush the input box into the list at submit time.
    ///
    /// Two-phase: the serialized field is re-derived before and after the
    /// flush. A comma-free value is one candidate; a comma-separated value
    /// is split into candidates added in sequence, and only then is the
    /// box cleared. Overflow and duplicates are silent here.
    pub fn commit(&mut self) {
        self.rederive_serialized();

        let value = self.input.trim().to_string();
        if !value.is_empty() {
            if value.contains(',') {
                for tag in split_tag_field(&value) {
                    self.try_insert(&tag);
                }
                self.input.clear();
            } else {
                self.try_insert(&value);
            }
        }

        self.rederive_serialized();
    }
}

/// Split a comma-separated tag field into trimmed, non-empty pieces.
pub fn split_tag_field(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
