//! Application state management for Quill
//!
//! This module defines the central `AppState` struct that manages all
//! application data and UI state: the post being composed, settings,
//! the tag catalog, and transient UI flags like toasts and dialogs.

use crate::config::{load_config, save_config_silent, Settings};
use crate::editor::EditBuffer;
use crate::error::Result;
use crate::post::{load_post, now_unix, Category, FieldError, PostMeta};
use crate::tags::{TagCatalog, TagPicker};
use log::{info, warn};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Composer
// ─────────────────────────────────────────────────────────────────────────────

/// The post currently being written.
///
/// Holds the form fields and the body buffer, plus a snapshot of what was
/// last saved so unsaved changes can be detected.
#[derive(Debug, Clone)]
pub struct Composer {
    /// Post title as typed, untrimmed.
    pub title: String,
    /// Selected category.
    pub category: Category,
    /// Markdown body and selection.
    pub buffer: EditBuffer,
    /// Selected tags, input box, and suggestion state.
    pub tags: TagPicker,
    /// Draft file backing this post, once it has been saved.
    pub path: Option<PathBuf>,
    created_at: u64,
    saved_title: String,
    saved_body: String,
    saved_tags: String,
    saved_category: Category,
}

impl Composer {
    /// A fresh, empty post.
    pub fn blank(catalog: TagCatalog, category: Category) -> Self {
        Self {
            title: String::new(),
            category,
            buffer: EditBuffer::new(),
            tags: TagPicker::new(catalog),
            path: None,
            created_at: now_unix(),
            saved_title: String::new(),
            saved_body: String::new(),
            saved_tags: String::new(),
            saved_category: category,
        }
    }

    /// A composer over a draft loaded from disk. Starts with no unsaved
    /// changes.
    pub fn from_draft(catalog: TagCatalog, path: PathBuf, meta: PostMeta, body: String) -> Self {
        let tags = TagPicker::seeded(catalog, &meta.tags.join(","), "");
        let saved_tags = tags.serialized().to_string();

        Self {
            title: meta.title.clone(),
            category: meta.category,
            buffer: EditBuffer::with_text(&body),
            tags,
            path: Some(path),
            created_at: meta.created_at,
            saved_title: meta.title,
            saved_body: body,
            saved_tags,
            saved_category: meta.category,
        }
    }

    /// Whether any field differs from the last saved snapshot.
    pub fn is_modified(&self) -> bool {
        self.title != self.saved_title
            || self.buffer.text() != self.saved_body
            || self.tags.serialized() != self.saved_tags
            || self.category != self.saved_category
    }

    /// Record the current fields as the saved snapshot.
    pub fn mark_saved(&mut self) {
        self.saved_title = self.title.clone();
        self.saved_body = self.buffer.text().to_string();
        self.saved_tags = self.tags.serialized().to_string();
        self.saved_category = self.category;
    }

    /// Front matter for the current fields, stamped with the current time.
    pub fn meta(&self) -> PostMeta {
        PostMeta {
            title: self.title.trim().to_string(),
            category: self.category,
            tags: self.tags.tags().to_vec(),
            draft: true,
            created_at: self.created_at,
            updated_at: now_unix(),
        }
    }

    /// Title for window chrome, with a fallback for unnamed posts.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            "Untitled"
        } else {
            trimmed
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Action deferred until the user resolves the unsaved-changes prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Start a fresh post.
    NewPost,
    /// Open the draft at this path.
    OpenDraft(PathBuf),
    /// Exit the application.
    Exit,
}

/// Transient UI flags, separate from the document model.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the settings panel is visible.
    pub show_settings: bool,
    /// Whether the unsaved-changes dialog is visible.
    pub show_confirm_dialog: bool,
    /// Message shown in the unsaved-changes dialog.
    pub confirm_dialog_message: String,
    /// Action to run once the dialog is resolved.
    pub pending_action: Option<PendingAction>,
    /// Whether the error modal is visible.
    pub show_error_modal: bool,
    /// Message shown in the error modal.
    pub error_message: String,
    /// Transient status bar toast.
    pub toast_message: Option<String>,
    /// App-time at which the toast disappears.
    pub toast_expires_at: Option<f64>,
    /// Validation failures from the last publish attempt, cleared on edit.
    pub field_errors: Vec<FieldError>,
}

// ─────────────────────────────────────────────────────────────────────────────
// App State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state.
pub struct AppState {
    /// The post being composed.
    pub composer: Composer,
    /// User settings, persisted on change.
    pub settings: Settings,
    /// Transient UI flags.
    pub ui: UiState,
    /// The tag universe behind suggestion lookups.
    catalog: TagCatalog,
    /// Whether settings changed since the last save.
    settings_dirty: bool,
}

impl AppState {
    /// Load settings from disk and build the initial state.
    pub fn new() -> Self {
        let settings = load_config();
        Self::with_settings(settings)
    }

    /// Build state from the given settings. Used by tests to avoid disk.
    pub fn with_settings(settings: Settings) -> Self {
        let catalog = Self::load_catalog(&settings);
        let composer = Composer::blank(catalog.clone(), settings.default_category);

        Self {
            composer,
            settings,
            ui: UiState::default(),
            catalog,
            settings_dirty: false,
        }
    }

    /// Resolve the tag catalog from settings, falling back to the built-in
    /// set when the configured file cannot be read.
    fn load_catalog(settings: &Settings) -> TagCatalog {
        match &settings.tag_catalog_path {
            Some(path) => match TagCatalog::load(path) {
                Ok(catalog) => {
                    info!("Loaded tag catalog from {}", path.display());
                    catalog
                }
                Err(e) => {
                    warn!("Failed to load tag catalog from {}: {}", path.display(), e);
                    TagCatalog::builtin()
                }
            },
            None => TagCatalog::builtin(),
        }
    }

    /// Re-read the catalog from settings and swap it into the live picker.
    pub fn reload_catalog(&mut self) {
        self.catalog = Self::load_catalog(&self.settings);
        self.composer.tags.set_catalog(self.catalog.clone());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the composer with a fresh post.
    pub fn new_post(&mut self) {
        info!("Starting a new post");
        self.composer = Composer::blank(self.catalog.clone(), self.settings.default_category);
        self.ui.field_errors.clear();
    }

    /// Load a draft from disk into the composer.
    pub fn open_draft(&mut self, path: &Path) -> Result<()> {
        let (meta, body) = load_post(path)?;
        info!("Opened draft: {}", path.display());
        self.composer = Composer::from_draft(self.catalog.clone(), path.to_path_buf(), meta, body);
        self.ui.field_errors.clear();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Unsaved-Changes Dialog
    // ─────────────────────────────────────────────────────────────────────────

    /// Park `action` behind the unsaved-changes dialog.
    pub fn confirm_discard(&mut self, message: impl Into<String>, action: PendingAction) {
        self.ui.confirm_dialog_message = message.into();
        self.ui.pending_action = Some(action);
        self.ui.show_confirm_dialog = true;
    }

    /// Close the dialog and hand back the parked action.
    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.ui.show_confirm_dialog = false;
        self.ui.pending_action.take()
    }

    /// Close the dialog and drop the parked action.
    pub fn cancel_pending_action(&mut self) {
        self.ui.show_confirm_dialog = false;
        self.ui.pending_action = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts and Errors
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a transient status message for `duration` seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Clear the toast once its time is up. Called every frame.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.clear_toast();
            }
        }
    }

    pub fn clear_toast(&mut self) {
        self.ui.toast_message = None;
        self.ui.toast_expires_at = None;
    }

    /// Show the blocking error modal.
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Error shown to user: {}", message);
        self.ui.error_message = message;
        self.ui.show_error_modal = true;
    }

    /// Dismiss the error modal.
    pub fn dismiss_error(&mut self) {
        self.ui.show_error_modal = false;
        self.ui.error_message.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a settings mutation, sanitize, and mark for saving.
    pub fn update_settings<F: FnOnce(&mut Settings)>(&mut self, f: F) {
        f(&mut self.settings);
        self.settings.sanitize();
        self.settings_dirty = true;
    }

    /// Mark settings as needing a save without changing them here.
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Persist settings if they changed. Returns whether a save happened.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            self.settings_dirty = false;
            save_config_silent(&self.settings)
        } else {
            false
        }
    }

    /// Final save on shutdown.
    pub fn shutdown(&mut self) {
        info!("Shutting down");
        self.settings_dirty = true;
        self.save_settings_if_dirty();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::with_settings(Settings::default())
    }

    // ─── Composer ────────────────────────────────────────────────────────────

    #[test]
    fn test_blank_composer_is_unmodified() {
        let composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        assert!(!composer.is_modified());
        assert!(composer.path.is_none());
    }

    #[test]
    fn test_editing_title_marks_modified() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        composer.title = "Grip strength routine".to_string();
        assert!(composer.is_modified());

        composer.mark_saved();
        assert!(!composer.is_modified());
    }

    #[test]
    fn test_editing_body_marks_modified() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        composer.buffer.set_text("Some content");
        assert!(composer.is_modified());
    }

    #[test]
    fn test_changing_tags_marks_modified() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        composer.tags.try_insert("technique");
        assert!(composer.is_modified());

        composer.mark_saved();
        composer.tags.remove("technique");
        assert!(composer.is_modified());
    }

    #[test]
    fn test_changing_category_marks_modified() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        composer.category = Category::Tournament;
        assert!(composer.is_modified());
    }

    #[test]
    fn test_meta_reflects_fields() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Technique);
        composer.title = "  Spin serve basics  ".to_string();
        composer.tags.try_insert("serve");
        composer.tags.try_insert("spin");

        let meta = composer.meta();
        assert_eq!(meta.title, "Spin serve basics");
        assert_eq!(meta.category, Category::Technique);
        assert_eq!(meta.tags, vec!["serve", "spin"]);
        assert!(meta.draft);
    }

    #[test]
    fn test_from_draft_starts_clean() {
        let meta = PostMeta {
            title: "Loop drills".to_string(),
            category: Category::Training,
            tags: vec!["forehand".to_string(), "drills".to_string()],
            draft: true,
            created_at: 1000,
            updated_at: 2000,
        };
        let composer = Composer::from_draft(
            TagCatalog::builtin(),
            PathBuf::from("/drafts/loop-drills.md"),
            meta,
            "Start close to the table.".to_string(),
        );

        assert!(!composer.is_modified());
        assert_eq!(composer.tags.tags(), &["forehand", "drills"]);
        assert_eq!(composer.meta().created_at, 1000);
    }

    #[test]
    fn test_display_title_fallback() {
        let mut composer = Composer::blank(TagCatalog::builtin(), Category::Other);
        assert_eq!(composer.display_title(), "Untitled");

        composer.title = "  Rubber care  ".to_string();
        assert_eq!(composer.display_title(), "Rubber care");
    }

    // ─── App State ───────────────────────────────────────────────────────────

    #[test]
    fn test_new_post_uses_default_category() {
        let mut settings = Settings::default();
        settings.default_category = Category::Equipment;
        let state = AppState::with_settings(settings);

        assert_eq!(state.composer.category, Category::Equipment);
    }

    #[test]
    fn test_new_post_clears_field_errors() {
        let mut state = test_state();
        state.ui.field_errors.push(FieldError::TitleRequired);
        state.new_post();
        assert!(state.ui.field_errors.is_empty());
    }

    #[test]
    fn test_confirm_discard_parks_action() {
        let mut state = test_state();
        state.confirm_discard("You have unsaved changes.", PendingAction::NewPost);

        assert!(state.ui.show_confirm_dialog);
        assert_eq!(state.take_pending_action(), Some(PendingAction::NewPost));
        assert!(!state.ui.show_confirm_dialog);
        assert_eq!(state.take_pending_action(), None);
    }

    #[test]
    fn test_cancel_drops_pending_action() {
        let mut state = test_state();
        state.confirm_discard("Unsaved.", PendingAction::Exit);
        state.cancel_pending_action();

        assert!(!state.ui.show_confirm_dialog);
        assert_eq!(state.ui.pending_action, None);
    }

    #[test]
    fn test_toast_expires() {
        let mut state = test_state();
        state.show_toast("Draft saved", 10.0, 2.0);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(11.0);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(12.0);
        assert!(state.ui.toast_message.is_none());
        assert!(state.ui.toast_expires_at.is_none());
    }

    #[test]
    fn test_error_modal_lifecycle() {
        let mut state = test_state();
        state.show_error("Maximum 5 tags allowed");
        assert!(state.ui.show_error_modal);
        assert_eq!(state.ui.error_message, "Maximum 5 tags allowed");

        state.dismiss_error();
        assert!(!state.ui.show_error_modal);
        assert!(state.ui.error_message.is_empty());
    }

    #[test]
    fn test_update_settings_sanitizes() {
        let mut state = test_state();
        state.update_settings(|s| s.font_size = 500.0);
        assert_eq!(state.settings.font_size, Settings::MAX_FONT_SIZE);
    }
}
