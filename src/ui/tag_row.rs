//! Tag Row UI Component for Quill
//!
//! Renders the selected tags as removable chips, the tag input box, and
//! the suggestion panel beneath it. All list rules live in
//! [`TagPicker`]; this widget feeds it the keyboard and pointer events:
//! Enter adds the typed value, Backspace in an empty box removes the
//! newest chip, clicking a suggestion accepts it, and a pointer press
//! outside the input and the panel dismisses the panel.

use crate::tags::{AddOutcome, TagPicker, MAX_TAGS};
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Key, RichText, Ui};

/// Output of showing the tag row for one frame.
#[derive(Debug, Default)]
pub struct TagRowOutput {
    /// Whether the selected tag list changed.
    pub changed: bool,
    /// An add was rejected because the list is at capacity; the app
    /// surfaces the limit warning.
    pub limit_hit: bool,
}

/// Builder-style widget over a [`TagPicker`].
pub struct TagRow<'a> {
    picker: &'a mut TagPicker,
}

impl<'a> TagRow<'a> {
    pub fn new(picker: &'a mut TagPicker) -> Self {
        Self { picker }
    }

    pub fn show(self, ui: &mut Ui, theme_colors: &ThemeColors) -> TagRowOutput {
        let mut output = TagRowOutput::default();
        let is_dark = theme_colors.is_dark();

        let chip_bg = if is_dark {
            Color32::from_rgb(55, 65, 85)
        } else {
            Color32::from_rgb(220, 230, 245)
        };
        let panel_bg = if is_dark {
            Color32::from_rgb(35, 35, 40)
        } else {
            Color32::from_rgb(255, 255, 255)
        };
        let panel_border = if is_dark {
            Color32::from_rgb(80, 80, 90)
        } else {
            Color32::from_rgb(180, 180, 190)
        };

        let selected: Vec<String> = self.picker.tags().to_vec();
        let mut to_remove: Option<String> = None;

        let input_response = ui
            .horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 6.0;

                ui.label(
                    RichText::new("Tags")
                        .size(10.0)
                        .color(theme_colors.text.muted),
                );

                // Selected chips
                for tag in &selected {
                    if tag_chip(ui, tag, chip_bg, theme_colors.text.primary) {
                        to_remove = Some(tag.clone());
                    }
                }

                // Capture before the edit so a Backspace that empties the
                // box is not mistaken for a chip removal.
                let was_empty = self.picker.input.is_empty();

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.picker.input)
                        .hint_text("Add a tag...")
                        .desired_width(140.0)
                        .font(egui::TextStyle::Body),
                );

                if response.changed() {
                    self.picker
                        .set_suggestions_visible(!self.picker.input.trim().is_empty());
                }

                // Enter adds the typed value and keeps focus for the next tag
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    match self.picker.handle_enter() {
                        AddOutcome::Added => output.changed = true,
                        AddOutcome::Full => output.limit_hit = true,
                        AddOutcome::Duplicate | AddOutcome::Empty => {}
                    }
                    response.request_focus();
                }

                // Backspace in an empty box removes the newest chip
                if was_empty
                    && response.has_focus()
                    && ui.input(|i| i.key_pressed(Key::Backspace))
                    && self.picker.handle_backspace().is_some()
                {
                    output.changed = true;
                }

                ui.label(
                    RichText::new(format!("{}/{}", self.picker.len(), MAX_TAGS))
                        .small()
                        .color(theme_colors.text.muted),
                );

                response
            })
            .inner;

        if let Some(tag) = to_remove {
            if self.picker.remove(&tag) {
                output.changed = true;
            }
        }

        // Suggestion panel, anchored under the input box
        if self.picker.suggestions_visible() {
            let query = self.picker.input.trim().to_string();
            let suggestions: Vec<String> =
                self.picker.suggest(&query).map(str::to_string).collect();

            if !suggestions.is_empty() {
                let area = egui::Area::new(egui::Id::new("tag_suggestions"))
                    .fixed_pos(input_response.rect.left_bottom() + egui::vec2(0.0, 4.0))
                    .order(egui::Order::Foreground)
                    .show(ui.ctx(), |ui| {
                        egui::Frame::none()
                            .fill(panel_bg)
                            .stroke(egui::Stroke::new(1.0, panel_border))
                            .rounding(6.0)
                            .shadow(egui::epaint::Shadow {
                                offset: [0.0, 2.0].into(),
                                blur: 8.0,
                                spread: 0.0,
                                color: Color32::from_black_alpha(40),
                            })
                            .inner_margin(4.0)
                            .show(ui, |ui| {
                                ui.set_min_width(160.0);
                                for suggestion in &suggestions {
                                    let row = ui.add_sized(
                                        [ui.available_width().max(160.0), 22.0],
                                        egui::SelectableLabel::new(
                                            false,
                                            RichText::new(suggestion)
                                                .color(theme_colors.text.primary),
                                        ),
                                    );
                                    if row.clicked() {
                                        match self.picker.accept_suggestion(suggestion) {
                                            AddOutcome::Added => output.changed = true,
                                            AddOutcome::Full => output.limit_hit = true,
                                            AddOutcome::Duplicate | AddOutcome::Empty => {}
                                        }
                                    }
                                }
                            });
                    });

                // A press anywhere else dismisses the panel
                if area.response.clicked_elsewhere() && input_response.clicked_elsewhere() {
                    self.picker.hide_suggestions();
                }
            }
        }

        output
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// One selected tag as a rounded chip with a remove button. Returns
/// whether the remove button was clicked.
fn tag_chip(ui: &mut Ui, tag: &str, bg: Color32, text_color: Color32) -> bool {
    let mut remove = false;

    egui::Frame::none()
        .fill(bg)
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;
                ui.label(RichText::new(tag).color(text_color).size(12.0));

                let close = ui.add(
                    egui::Button::new(RichText::new("×").color(text_color).size(12.0))
                        .frame(false)
                        .small(),
                );
                if close.on_hover_text("Remove tag").clicked() {
                    remove = true;
                }
            });
        });

    remove
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_defaults_to_no_change() {
        let output = TagRowOutput::default();
        assert!(!output.changed);
        assert!(!output.limit_hit);
    }
}
