//! Main application module for Quill
//!
//! This module implements the eframe App trait for the main application,
//! handling window management, UI updates, and event processing.

// Allow clippy lints for this application module:
// - too_many_lines: the update loop and panel rendering are long but linear
#![allow(clippy::too_many_lines)]

use crate::editor::{apply, ComposerEditor, InlineCommand};
use crate::export::{copy_post_html, export_html_file};
use crate::files::dialogs::{export_html_dialog, pick_tag_catalog_dialog, publish_post_dialog};
use crate::markdown::{MarkdownPreview, PreviewColors};
use crate::post::{
    list_drafts, publish_to, save_draft, slugify, validate, Category, MAX_BODY_LEN, MAX_TITLE_LEN,
};
use crate::state::{AppState, PendingAction};
use crate::tags::{MAX_TAGS, TAG_LIMIT_MESSAGE};
use crate::theme::ThemeColors;
use crate::ui::{DraftPicker, SettingsPanel, TagRow, Toolbar, ToolbarAction};
use eframe::egui::{self, RichText};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::config::WindowSize;

/// Keyboard shortcut actions.
///
/// Shortcuts are collected during input handling and dispatched after the
/// frame is rendered, so formatting always sees the editor's up-to-date
/// selection.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// Start a fresh post (Ctrl+N).
    NewPost,
    /// Save the current draft (Ctrl+S).
    SaveDraft,
    /// Open the draft picker (Ctrl+P).
    OpenDraftPicker,
    /// Publish the post (Ctrl+Enter).
    Publish,
    /// Export as HTML (Ctrl+Shift+E).
    ExportHtml,
    /// Toggle the settings panel (Ctrl+,).
    ToggleSettings,
    /// Apply an inline format command (Ctrl+B / Ctrl+I / Ctrl+K).
    Format(InlineCommand),
}

/// The main application.
pub struct QuillApp {
    /// Central application state.
    state: AppState,
    /// Toolbar component.
    toolbar: Toolbar,
    /// Settings panel component.
    settings_panel: SettingsPanel,
    /// Draft picker overlay.
    draft_picker: DraftPicker,
    /// Set when exit has been confirmed.
    should_exit: bool,
    /// Last known window size, to avoid redundant settings writes.
    last_window_size: Option<egui::Vec2>,
    /// Last known window position.
    last_window_pos: Option<egui::Pos2>,
    /// Application start time, the origin of the frame clock.
    start_time: std::time::Instant,
    /// App-time of the last draft save, for the auto-save timer.
    last_save_time: f64,
}

impl QuillApp {
    /// Create the application and apply the configured theme.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let state = AppState::new();

        let visuals =
            ThemeColors::visuals_for_theme(state.settings.theme, &cc.egui_ctx.style().visuals);
        cc.egui_ctx.set_visuals(visuals);

        info!("Quill started");

        Self {
            state,
            toolbar: Toolbar::new(),
            settings_panel: SettingsPanel::new(),
            draft_picker: DraftPicker::new(),
            should_exit: false,
            last_window_size: None,
            last_window_pos: None,
            start_time: std::time::Instant::now(),
            last_save_time: 0.0,
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Re-derive visuals from the configured theme and apply them.
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals =
            ThemeColors::visuals_for_theme(self.state.settings.theme, &ctx.style().visuals);
        ctx.set_visuals(visuals);
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                // Check if size changed
                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);

                // Check if position changed
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        // Update settings with new window state
        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

                self.state.settings.window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };

                debug!(
                    "Window state updated: {}x{} at ({}, {}), maximized: {}",
                    size.x, size.y, pos.x, pos.y, maximized
                );
            }
        }

        changed
    }

    /// Get the window title based on current state.
    ///
    /// Returns a title in the format: "Title - Quill", with an asterisk
    /// after the title while there are unsaved changes.
    fn window_title(&self) -> String {
        format_window_title(
            self.state.composer.display_title(),
            self.state.composer.is_modified(),
        )
    }

    /// Handle close request from the window.
    ///
    /// Returns `true` if the application should close.
    fn handle_close_request(&mut self) -> bool {
        if self.should_exit {
            return true;
        }

        if self.state.composer.is_modified() {
            // Confirmation dialog will be shown
            self.state.confirm_discard(
                "You have unsaved changes. Save this draft before exiting?",
                PendingAction::Exit,
            );
            false
        } else {
            self.state.shutdown();
            true
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard Shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle global keyboard shortcuts.
    ///
    /// Runs after rendering so formatting commands act on the selection
    /// the editor reported this frame.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Overlays take the keyboard while they are up
        if self.state.ui.show_settings
            || self.state.ui.show_error_modal
            || self.state.ui.show_confirm_dialog
            || self.draft_picker.is_open()
        {
            return;
        }

        let action = ctx.input(|i| {
            // Most specific first: Ctrl+Shift combos before plain Ctrl.
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Export HTML");
                return Some(KeyboardAction::ExportHtml);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::Enter) {
                debug!("Keyboard shortcut: Publish");
                return Some(KeyboardAction::Publish);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Save draft");
                return Some(KeyboardAction::SaveDraft);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::N) {
                debug!("Keyboard shortcut: New post");
                return Some(KeyboardAction::NewPost);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::P) {
                debug!("Keyboard shortcut: Draft picker");
                return Some(KeyboardAction::OpenDraftPicker);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::Comma) {
                debug!("Keyboard shortcut: Settings");
                return Some(KeyboardAction::ToggleSettings);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::B) {
                debug!("Keyboard shortcut: Bold");
                return Some(KeyboardAction::Format(InlineCommand::Bold));
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::I) {
                debug!("Keyboard shortcut: Italic");
                return Some(KeyboardAction::Format(InlineCommand::Italic));
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::K) {
                debug!("Keyboard shortcut: Insert link");
                return Some(KeyboardAction::Format(InlineCommand::Link));
            }
            None
        });

        if let Some(action) = action {
            let now = self.get_app_time();
            match action {
                KeyboardAction::NewPost => self.handle_new_post(),
                KeyboardAction::SaveDraft => self.handle_save_draft(now, true),
                KeyboardAction::OpenDraftPicker => self.handle_open_draft_picker(),
                KeyboardAction::Publish => self.handle_publish(now),
                KeyboardAction::ExportHtml => self.handle_export_html(ctx, now),
                KeyboardAction::ToggleSettings => {
                    self.state.ui.show_settings = !self.state.ui.show_settings;
                }
                KeyboardAction::Format(command) => self.apply_format(command),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply an inline Markdown command at the editor's selection.
    fn apply_format(&mut self, command: InlineCommand) {
        let outcome = apply(command, &mut self.state.composer.buffer);
        debug!(
            "Applied {:?}, caret at {} (placeholder: {})",
            command, outcome.caret, outcome.used_placeholder
        );
        self.state.ui.field_errors.clear();
    }

    /// Start a fresh post, prompting first if there are unsaved changes.
    fn handle_new_post(&mut self) {
        if self.state.composer.is_modified() {
            self.state.confirm_discard(
                "You have unsaved changes. Save this draft before starting a new post?",
                PendingAction::NewPost,
            );
        } else {
            self.state.new_post();
        }
    }

    /// Save the composer to the drafts folder.
    ///
    /// Pending tag input is folded in first, so text left in the tag box
    /// is not lost. With `announce` a toast confirms the save.
    fn handle_save_draft(&mut self, now: f64, announce: bool) {
        self.state.composer.tags.commit();

        let meta = self.state.composer.meta();
        let body = self.state.composer.buffer.text().to_string();
        let existing = self.state.composer.path.clone();

        match save_draft(&meta, &body, existing.as_deref()) {
            Ok(path) => {
                info!("Draft saved: {}", path.display());
                self.state.composer.path = Some(path);
                self.state.composer.mark_saved();
                self.last_save_time = now;
                if announce {
                    self.state.show_toast("Draft saved", now, 2.0);
                }
            }
            Err(e) => {
                self.state.show_error(format!("Failed to save draft: {}", e));
            }
        }
    }

    /// Validate the form and, if clean, publish to a chosen file.
    fn handle_publish(&mut self, now: f64) {
        // Commit-on-submit: text still in the tag box becomes a tag before
        // the fields are validated.
        self.state.composer.tags.commit();

        let errors = validate(
            &self.state.composer.title,
            self.state.composer.buffer.text(),
            self.state.composer.tags.serialized(),
        );
        if !errors.is_empty() {
            debug!("Publish blocked by {} validation error(s)", errors.len());
            self.state.ui.field_errors = errors;
            self.state
                .show_toast("Fix the highlighted fields before publishing", now, 3.0);
            return;
        }
        self.state.ui.field_errors.clear();

        let default_name = format!("{}.md", slugify(&self.state.composer.title));
        let initial_dir = self.state.settings.last_export_directory.clone();

        if let Some(path) = publish_post_dialog(initial_dir.as_ref(), &default_name) {
            let meta = self.state.composer.meta();
            let body = self.state.composer.buffer.text().to_string();

            match publish_to(&path, &meta, &body) {
                Ok(()) => {
                    info!("Published: {}", path.display());
                    self.remember_export_directory(&path);
                    self.state.composer.mark_saved();
                    self.state
                        .show_toast(format!("Published to {}", path.display()), now, 2.5);
                }
                Err(e) => {
                    self.state.show_error(format!("Failed to publish: {}", e));
                }
            }
        }
    }

    /// Export the post as a standalone HTML document.
    fn handle_export_html(&mut self, ctx: &egui::Context, now: f64) {
        if self.state.composer.buffer.is_empty() {
            self.state.show_toast("Nothing to export", now, 2.0);
            return;
        }

        let default_name = format!("{}.html", slugify(&self.state.composer.title));
        let initial_dir = self.state.settings.last_export_directory.clone();

        if let Some(path) = export_html_dialog(initial_dir.as_ref(), &default_name) {
            let meta = self.state.composer.meta();
            let body = self.state.composer.buffer.text().to_string();
            let colors = PreviewColors::from_theme(self.state.settings.theme, &ctx.style().visuals);

            match export_html_file(&path, &meta, &body, &colors) {
                Ok(()) => {
                    info!("Exported HTML: {}", path.display());
                    self.remember_export_directory(&path);
                    self.state
                        .show_toast(format!("Exported to {}", path.display()), now, 2.5);

                    if self.state.settings.open_after_export {
                        if let Err(e) = open::that(&path) {
                            warn!("Failed to open exported file: {}", e);
                        }
                    }
                }
                Err(e) => {
                    self.state.show_error(format!("Export failed: {}", e));
                }
            }
        }
    }

    /// Copy the rendered HTML to the system clipboard.
    fn handle_copy_html(&mut self, now: f64) {
        if self.state.composer.buffer.is_empty() {
            self.state.show_toast("Nothing to copy", now, 2.0);
            return;
        }

        match copy_post_html(self.state.composer.buffer.text()) {
            Ok(()) => self.state.show_toast("HTML copied to clipboard", now, 2.0),
            Err(e) => self
                .state
                .show_toast(format!("Copy failed: {}", e), now, 3.0),
        }
    }

    /// Open (or close) the draft picker over a fresh listing.
    fn handle_open_draft_picker(&mut self) {
        if self.draft_picker.is_open() {
            self.draft_picker.close();
            return;
        }

        match list_drafts() {
            Ok(drafts) => self.draft_picker.open(drafts),
            Err(e) => self.state.show_error(format!("Failed to list drafts: {}", e)),
        }
    }

    /// A draft was chosen in the picker.
    fn handle_draft_selected(&mut self, path: PathBuf, now: f64) {
        if self.state.composer.is_modified() {
            self.state.confirm_discard(
                "You have unsaved changes. Save this draft before opening another?",
                PendingAction::OpenDraft(path),
            );
        } else {
            self.open_draft(&path, now);
        }
    }

    fn open_draft(&mut self, path: &Path, now: f64) {
        match self.state.open_draft(path) {
            Ok(()) => self.state.show_toast("Draft loaded", now, 2.0),
            Err(e) => self.state.show_error(format!("Failed to open draft: {}", e)),
        }
    }

    /// Run an action the user confirmed in the unsaved-changes dialog.
    fn run_pending_action(&mut self, action: PendingAction, now: f64) {
        match action {
            PendingAction::NewPost => self.state.new_post(),
            PendingAction::OpenDraft(path) => self.open_draft(&path, now),
            PendingAction::Exit => self.should_exit = true,
        }
    }

    /// Remember the directory of a published or exported file as the
    /// starting point for the next dialog.
    fn remember_export_directory(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            let parent = parent.to_path_buf();
            self.state
                .update_settings(|s| s.last_export_directory = Some(parent));
        }
    }

    /// Dispatch a toolbar button press.
    fn handle_toolbar_action(&mut self, action: ToolbarAction, ctx: &egui::Context, now: f64) {
        match action {
            ToolbarAction::NewPost => self.handle_new_post(),
            ToolbarAction::SaveDraft => self.handle_save_draft(now, true),
            ToolbarAction::OpenDrafts => self.handle_open_draft_picker(),
            ToolbarAction::Format(command) => self.apply_format(command),
            ToolbarAction::TogglePreview => {
                self.state.update_settings(|s| s.show_preview = !s.show_preview);
            }
            ToolbarAction::Publish => self.handle_publish(now),
            ToolbarAction::ExportHtml => self.handle_export_html(ctx, now),
            ToolbarAction::CopyHtml => self.handle_copy_html(now),
            ToolbarAction::OpenSettings => self.state.ui.show_settings = true,
        }
    }

    /// Save the draft in the background once the auto-save interval has
    /// elapsed with unsaved changes.
    fn maybe_auto_save(&mut self, now: f64) {
        if !self.state.settings.auto_save || !self.state.composer.is_modified() {
            return;
        }
        // An empty composer has nothing worth a file yet
        if self.state.composer.buffer.is_empty() && self.state.composer.title.trim().is_empty() {
            return;
        }

        let interval = f64::from(self.state.settings.auto_save_interval_secs);
        if now - self.last_save_time >= interval {
            debug!("Auto-saving draft");
            self.handle_save_draft(now, false);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI content.
    /// Returns the toolbar action, if any, for dispatch after the frame.
    fn render_ui(&mut self, ctx: &egui::Context) -> Option<ToolbarAction> {
        let theme_colors = ThemeColors::from_theme(self.state.settings.theme, &ctx.style().visuals);

        let toolbar_action = self.render_toolbar(ctx, &theme_colors);
        self.render_post_header(ctx, &theme_colors);
        self.render_status_bar(ctx, &theme_colors);
        self.render_central(ctx);

        toolbar_action
    }

    fn render_toolbar(
        &mut self,
        ctx: &egui::Context,
        theme_colors: &ThemeColors,
    ) -> Option<ToolbarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                action = self.toolbar.show(
                    ui,
                    theme_colors,
                    self.state.settings.show_preview,
                    self.state.composer.is_modified(),
                    !self.state.composer.buffer.is_empty(),
                );
            });

        action
    }

    /// Title, category, and tag row above the editor.
    fn render_post_header(&mut self, ctx: &egui::Context, theme_colors: &ThemeColors) {
        egui::TopBottomPanel::top("post_header").show(ctx, |ui| {
            ui.add_space(8.0);

            // Title field
            let title_edit = egui::TextEdit::singleline(&mut self.state.composer.title)
                .hint_text("Post title")
                .desired_width(f32::INFINITY)
                .font(egui::FontId::proportional(20.0));
            if ui.add(title_edit).changed() {
                self.state.ui.field_errors.clear();
            }

            ui.add_space(6.0);

            // Category and tags
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Category")
                        .size(10.0)
                        .color(theme_colors.text.muted),
                );

                egui::ComboBox::from_id_source("post_category")
                    .selected_text(self.state.composer.category.display_name())
                    .show_ui(ui, |ui| {
                        for category in Category::ALL {
                            ui.selectable_value(
                                &mut self.state.composer.category,
                                category,
                                category.display_name(),
                            );
                        }
                    });

                ui.add_space(12.0);

                let tag_output = TagRow::new(&mut self.state.composer.tags).show(ui, theme_colors);
                if tag_output.changed {
                    self.state.ui.field_errors.clear();
                }
                if tag_output.limit_hit {
                    self.state.show_error(TAG_LIMIT_MESSAGE);
                }
            });

            // Validation failures from the last publish attempt
            if !self.state.ui.field_errors.is_empty() {
                ui.add_space(4.0);
                for error in &self.state.ui.field_errors {
                    ui.colored_label(theme_colors.ui.error, format!("• {}", error));
                }
            }

            ui.add_space(8.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context, theme_colors: &ThemeColors) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Left: where this draft lives
                let location = match &self.state.composer.path {
                    Some(path) => path.display().to_string(),
                    None => "Unsaved draft".to_string(),
                };
                ui.label(
                    RichText::new(location)
                        .small()
                        .color(theme_colors.text.secondary),
                );

                // Center: Toast message (temporary notifications)
                if let Some(toast) = &self.state.ui.toast_message {
                    ui.with_layout(
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label(RichText::new(toast).italics());
                        },
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let title_len = self.state.composer.title.chars().count();
                    let body_len = self.state.composer.buffer.text().chars().count();

                    ui.label(format!("{}/{} tags", self.state.composer.tags.len(), MAX_TAGS));

                    ui.separator();

                    ui.label(format!("Body {}/{}", body_len, MAX_BODY_LEN));

                    ui.separator();

                    ui.label(format!("Title {}/{}", title_len, MAX_TITLE_LEN));
                });
            });
        });
    }

    /// Editor pane, with the live preview beside it when enabled.
    fn render_central(&mut self, ctx: &egui::Context) {
        let font_size = self.state.settings.font_size;
        let word_wrap = self.state.settings.word_wrap;
        let show_preview = self.state.settings.show_preview;
        let split_ratio = self.state.settings.split_ratio;
        let theme = self.state.settings.theme;

        egui::CentralPanel::default().show(ctx, |ui| {
            if show_preview {
                let full_width = ui.available_width();
                let full_height = ui.available_height();
                let editor_width = (full_width * split_ratio - 8.0).max(120.0);

                ui.horizontal_top(|ui| {
                    ui.allocate_ui_with_layout(
                        egui::vec2(editor_width, full_height),
                        egui::Layout::top_down(egui::Align::Min),
                        |ui| {
                            self.render_editor(ui, font_size, word_wrap);
                        },
                    );

                    ui.separator();

                    ui.allocate_ui_with_layout(
                        egui::vec2(ui.available_width(), full_height),
                        egui::Layout::top_down(egui::Align::Min),
                        |ui| {
                            egui::ScrollArea::vertical()
                                .id_source("preview_scroll")
                                .auto_shrink([false, false])
                                .show(ui, |ui| {
                                    MarkdownPreview::new(self.state.composer.buffer.text())
                                        .font_size(font_size)
                                        .theme(theme)
                                        .show(ui);
                                });
                        },
                    );
                });
            } else {
                self.render_editor(ui, font_size, word_wrap);
            }
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui, font_size: f32, word_wrap: bool) {
        let output = ComposerEditor::new(&mut self.state.composer.buffer)
            .font_size(font_size)
            .word_wrap(word_wrap)
            .hint_text("Write your post in Markdown...")
            .id(egui::Id::new("post_body"))
            .show(ui);

        if output.changed {
            self.state.ui.field_errors.clear();
        }
    }

    /// Render modal dialogs and overlays.
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let now = self.get_app_time();

        // Unsaved changes confirmation
        if self.state.ui.show_confirm_dialog {
            let message = self.state.ui.confirm_dialog_message.clone();

            egui::Window::new("Unsaved Changes")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(12.0);

                    ui.horizontal(|ui| {
                        if ui.button("Save Draft").clicked() {
                            self.handle_save_draft(now, true);
                            // The save may fail; only continue once clean
                            if !self.state.composer.is_modified() {
                                if let Some(action) = self.state.take_pending_action() {
                                    self.run_pending_action(action, now);
                                }
                            }
                        }
                        if ui.button("Discard").clicked() {
                            if let Some(action) = self.state.take_pending_action() {
                                self.run_pending_action(action, now);
                            }
                        }
                        if ui.button("Cancel").clicked() {
                            self.state.cancel_pending_action();
                        }
                    });
                });
        }

        // Error modal
        if self.state.ui.show_error_modal {
            let message = self.state.ui.error_message.clone();

            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚠").size(24.0));
                        ui.label(&message);
                    });
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.state.dismiss_error();
                    }
                });
        }

        // Settings panel
        if self.state.ui.show_settings {
            let is_dark = ctx.style().visuals.dark_mode;
            let output = self
                .settings_panel
                .show(ctx, &mut self.state.settings, is_dark);

            if output.changed {
                self.state.settings.sanitize();
                self.state.mark_settings_dirty();
                self.apply_theme(ctx);
            }

            if output.browse_catalog_requested {
                let initial_dir = self
                    .state
                    .settings
                    .tag_catalog_path
                    .as_ref()
                    .and_then(|p| p.parent().map(Path::to_path_buf));

                if let Some(path) = pick_tag_catalog_dialog(initial_dir.as_ref()) {
                    self.state
                        .update_settings(|s| s.tag_catalog_path = Some(path));
                    self.state.reload_catalog();
                    self.state.show_toast("Tag catalog loaded", now, 2.0);
                }
            }

            if output.catalog_cleared {
                self.state.reload_catalog();
            }

            if output.reset_requested {
                info!("Settings reset to defaults");
                self.state
                    .update_settings(|s| *s = crate::config::Settings::default());
                self.state.reload_catalog();
                self.apply_theme(ctx);
                self.state.show_toast("Settings reset to defaults", now, 2.0);
            }

            if output.close_requested {
                self.state.ui.show_settings = false;
                self.state.save_settings_if_dirty();
            }
        }
    }
}

impl eframe::App for QuillApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        // Update window title if it changed
        let title = self.window_title();
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        // Save the draft in the background when due
        self.maybe_auto_save(current_time);

        // Handle close request from window
        if ctx.input(|i| i.viewport().close_requested()) && !self.handle_close_request() {
            // Cancel the close request - we need to show a confirmation dialog
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        // Render the main UI (this updates editor selection)
        let toolbar_action = self.render_ui(ctx);

        // Modal dialogs and overlays
        self.render_dialogs(ctx);

        let picker_output =
            self.draft_picker
                .show(ctx, current_time, ctx.style().visuals.dark_mode);
        if let Some(path) = picker_output.selected {
            self.handle_draft_selected(path, current_time);
        }

        // Handle keyboard shortcuts AFTER render so selection is up-to-date
        self.handle_keyboard_shortcuts(ctx);

        // Toolbar actions are dispatched after render for the same reason
        if let Some(action) = toolbar_action {
            debug!("Toolbar action: {:?}", action);
            self.handle_toolbar_action(action, ctx, current_time);
        }

        // Request exit if confirmed
        if self.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }

    /// Whether to persist state.
    fn persist_egui_memory(&self) -> bool {
        true
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Build the window title for a post.
fn format_window_title(display_title: &str, modified: bool) -> String {
    const APP_NAME: &str = "Quill";

    if modified {
        format!("{}* - {}", display_title, APP_NAME)
    } else {
        format!("{} - {}", display_title, APP_NAME)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
