//! Toolbar UI Component for Quill
//!
//! A single row of icon buttons above the composer: post management,
//! inline formatting, the preview toggle, and the publish/export group.
//! Buttons emit [`ToolbarAction`]s; the app applies them after the frame
//! so formatting acts on the editor's up-to-date selection.

use crate::editor::InlineCommand;
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Height of the toolbar in pixels.
const TOOLBAR_HEIGHT: f32 = 40.0;

/// Standard size for toolbar icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(32.0, 28.0);

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    // Post actions
    /// Start a fresh post.
    NewPost,
    /// Save the current post to the drafts folder.
    SaveDraft,
    /// Open the draft picker overlay.
    OpenDrafts,

    // Formatting actions
    /// Apply an inline Markdown command at the selection.
    Format(InlineCommand),

    // View actions
    /// Show or hide the preview pane.
    TogglePreview,

    // Output actions
    /// Publish the post to a chosen Markdown file.
    Publish,
    /// Export the post as a standalone HTML document.
    ExportHtml,
    /// Copy the rendered HTML to the clipboard.
    CopyHtml,

    // Settings
    /// Open the settings window.
    OpenSettings,
}

/// The toolbar component.
///
/// Holds no state of its own; the enabled flags and the preview toggle
/// come in through [`Toolbar::show`] each frame.
#[derive(Debug, Default)]
pub struct Toolbar;

impl Toolbar {
    pub fn new() -> Self {
        Self
    }

    /// Render the toolbar and return the action triggered this frame, if any.
    ///
    /// `can_save` gates the save button, `has_content` gates publishing and
    /// export, and `show_preview` picks the preview toggle's icon.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        theme_colors: &ThemeColors,
        show_preview: bool,
        can_save: bool,
        has_content: bool,
    ) -> Option<ToolbarAction> {
        let is_dark = theme_colors.is_dark();

        let toolbar_bg = if is_dark {
            Color32::from_rgb(40, 40, 40)
        } else {
            Color32::from_rgb(248, 248, 248)
        };
        let separator_color = if is_dark {
            Color32::from_rgb(70, 70, 70)
        } else {
            Color32::from_rgb(210, 210, 210)
        };

        let mut action: Option<ToolbarAction> = None;

        ui.painter()
            .rect_filled(ui.available_rect_before_wrap(), 0.0, toolbar_bg);

        ui.horizontal(|ui| {
            ui.set_height(TOOLBAR_HEIGHT);
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.add_space(8.0);

            // Post group
            ui.label(
                RichText::new("Post")
                    .size(10.0)
                    .color(theme_colors.text.muted),
            );

            if icon_button(ui, "📄", "New Post (Ctrl+N)", true, is_dark).clicked() {
                action = Some(ToolbarAction::NewPost);
            }
            if icon_button(ui, "💾", "Save Draft (Ctrl+S)", can_save, is_dark).clicked() {
                action = Some(ToolbarAction::SaveDraft);
            }
            if icon_button(ui, "📂", "Drafts (Ctrl+P)", true, is_dark).clicked() {
                action = Some(ToolbarAction::OpenDrafts);
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
            ui.add_space(4.0);

            // Format group
            ui.label(
                RichText::new("Format")
                    .size(10.0)
                    .color(theme_colors.text.muted),
            );

            for command in InlineCommand::ALL {
                if icon_button(ui, command.icon(), &command.tooltip(), true, is_dark).clicked() {
                    action = Some(ToolbarAction::Format(command));
                }
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
            ui.add_space(4.0);

            // View group
            ui.label(
                RichText::new("View")
                    .size(10.0)
                    .color(theme_colors.text.muted),
            );

            let (preview_icon, preview_tooltip) = if show_preview {
                ("📝", "Hide Preview")
            } else {
                ("👁", "Show Preview")
            };
            if icon_button(ui, preview_icon, preview_tooltip, true, is_dark).clicked() {
                action = Some(ToolbarAction::TogglePreview);
            }

            ui.add_space(4.0);
            vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
            ui.add_space(4.0);

            // Publish group
            ui.label(
                RichText::new("Publish")
                    .size(10.0)
                    .color(theme_colors.text.muted),
            );

            if icon_button(ui, "📤", "Publish (Ctrl+Enter)", has_content, is_dark).clicked() {
                action = Some(ToolbarAction::Publish);
            }
            if icon_button(ui, "🌐", "Export as HTML", has_content, is_dark).clicked() {
                action = Some(ToolbarAction::ExportHtml);
            }
            if icon_button(ui, "📋", "Copy as HTML", has_content, is_dark).clicked() {
                action = Some(ToolbarAction::CopyHtml);
            }

            // Settings, right-aligned
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if icon_button(ui, "⚙", "Settings (Ctrl+,)", true, is_dark).clicked() {
                    action = Some(ToolbarAction::OpenSettings);
                }
            });
        });

        // Bottom border
        let rect = ui.min_rect();
        ui.painter().line_segment(
            [
                egui::pos2(rect.min.x, rect.max.y),
                egui::pos2(rect.max.x, rect.max.y),
            ],
            egui::Stroke::new(1.0, separator_color),
        );

        action
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Draw an icon button with a hover highlight and tooltip.
///
/// The button itself is an invisible frame; the glyph is painted over it so
/// the hover background never washes out the icon.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = if enabled {
        if is_dark {
            Color32::from_rgb(220, 220, 220)
        } else {
            Color32::from_rgb(50, 50, 50)
        }
    } else if is_dark {
        Color32::from_rgb(100, 100, 100)
    } else {
        Color32::from_rgb(160, 160, 160)
    };

    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(16.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        let hover_bg = if is_dark {
            Color32::from_rgb(60, 60, 60)
        } else {
            Color32::from_rgb(220, 220, 220)
        };
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    // The gear glyph sits slightly high in most fonts; nudge it down.
    let y_offset = if icon == "⚙" { 2.0 } else { 0.0 };

    ui.painter().text(
        btn.rect.center() + egui::vec2(0.0, y_offset),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(16.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

/// Draw a thin vertical separator line of the given height.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_action_equality() {
        assert_eq!(ToolbarAction::SaveDraft, ToolbarAction::SaveDraft);
        assert_ne!(ToolbarAction::SaveDraft, ToolbarAction::Publish);
        assert_eq!(
            ToolbarAction::Format(InlineCommand::Bold),
            ToolbarAction::Format(InlineCommand::Bold)
        );
        assert_ne!(
            ToolbarAction::Format(InlineCommand::Bold),
            ToolbarAction::Format(InlineCommand::Italic)
        );
    }

    #[test]
    fn test_every_inline_command_has_an_icon() {
        for command in InlineCommand::ALL {
            assert!(!command.icon().is_empty());
            assert!(!command.tooltip().is_empty());
        }
    }
}
