//! Settings Panel Component for Quill
//!
//! This module implements a modal settings panel that allows users to
//! configure appearance, composer behavior, and publishing options with
//! live preview.

use crate::config::{Settings, Theme};
use crate::post::Category;
use eframe::egui::{self, Color32, RichText, Ui};

/// Settings panel sections for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    Appearance,
    Composer,
    Publishing,
}

impl SettingsSection {
    /// Get the display label for the section.
    pub fn label(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "Appearance",
            SettingsSection::Composer => "Composer",
            SettingsSection::Publishing => "Publishing",
        }
    }

    /// Get the icon for the section.
    pub fn icon(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "🎨",
            SettingsSection::Composer => "📝",
            SettingsSection::Publishing => "📤",
        }
    }
}

/// Result of showing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    /// Whether settings were modified.
    pub changed: bool,
    /// Whether the panel should be closed.
    pub close_requested: bool,
    /// Whether a reset to defaults was requested.
    pub reset_requested: bool,
    /// The user wants to pick a tag catalog file; the app runs the dialog.
    pub browse_catalog_requested: bool,
    /// The catalog source changed and suggestions should be reloaded.
    pub catalog_cleared: bool,
}

/// Settings panel state and rendering.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    /// Currently active settings section.
    active_section: SettingsSection,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanel {
    /// Create a new settings panel instance.
    pub fn new() -> Self {
        Self {
            active_section: SettingsSection::default(),
        }
    }

    /// Show the settings panel as a modal window.
    ///
    /// Settings are mutated in place so changes apply live; the output
    /// tells the app what else to do.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        settings: &mut Settings,
        is_dark: bool,
    ) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput::default();

        // Semi-transparent overlay
        let screen_rect = ctx.screen_rect();
        let overlay_color = if is_dark {
            Color32::from_rgba_unmultiplied(0, 0, 0, 180)
        } else {
            Color32::from_rgba_unmultiplied(0, 0, 0, 120)
        };

        egui::Area::new(egui::Id::new("settings_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, overlay_color);

                // Close on click outside
                if response.clicked() {
                    output.close_requested = true;
                }
            });

        // Settings modal window
        egui::Window::new("⚙ Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(500.0)
            .max_width(600.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                // Handle escape key to close
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.horizontal(|ui| {
                    // Left side: Section tabs
                    ui.vertical(|ui| {
                        ui.set_min_width(120.0);

                        for section in [
                            SettingsSection::Appearance,
                            SettingsSection::Composer,
                            SettingsSection::Publishing,
                        ] {
                            let selected = self.active_section == section;
                            let text = format!("{} {}", section.icon(), section.label());

                            let btn = ui.add_sized(
                                [110.0, 32.0],
                                egui::SelectableLabel::new(
                                    selected,
                                    RichText::new(text).size(14.0),
                                ),
                            );

                            if btn.clicked() {
                                self.active_section = section;
                            }
                        }

                        ui.add_space(ui.available_height() - 40.0);

                        // Reset button at bottom of sidebar
                        if ui
                            .add_sized([110.0, 28.0], egui::Button::new("↺ Reset All"))
                            .on_hover_text("Reset all settings to defaults")
                            .clicked()
                        {
                            output.reset_requested = true;
                        }
                    });

                    ui.separator();

                    // Right side: Section content
                    ui.vertical(|ui| {
                        ui.set_min_width(350.0);
                        ui.set_min_height(320.0);

                        match self.active_section {
                            SettingsSection::Appearance => {
                                if self.show_appearance_section(ui, settings) {
                                    output.changed = true;
                                }
                            }
                            SettingsSection::Composer => {
                                if self.show_composer_section(ui, settings) {
                                    output.changed = true;
                                }
                            }
                            SettingsSection::Publishing => {
                                if self.show_publishing_section(ui, settings, &mut output) {
                                    output.changed = true;
                                }
                            }
                        }
                    });
                });

                ui.separator();

                // Bottom buttons
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            output.close_requested = true;
                        }
                        ui.label(
                            RichText::new("Settings are saved automatically")
                                .small()
                                .weak(),
                        );
                    });
                });
            });

        output
    }

    /// Show the Appearance settings section.
    ///
    /// Returns true if any setting was changed.
    fn show_appearance_section(&mut self, ui: &mut Ui, settings: &mut Settings) -> bool {
        let mut changed = false;

        ui.heading("Appearance");
        ui.add_space(8.0);

        // Theme selection
        ui.label(RichText::new("Theme").strong());
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            for theme in [Theme::Light, Theme::Dark, Theme::System] {
                let label = match theme {
                    Theme::Light => "☀ Light",
                    Theme::Dark => "🌙 Dark",
                    Theme::System => "💻 System",
                };
                if ui
                    .selectable_value(&mut settings.theme, theme, label)
                    .changed()
                {
                    changed = true;
                }
            }
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        // Font size slider
        ui.horizontal(|ui| {
            ui.label(RichText::new("Font Size").strong());
            ui.add_space(8.0);
            ui.label(format!("{}px", settings.font_size as u32));
        });
        ui.add_space(4.0);

        let font_slider = ui.add(
            egui::Slider::new(
                &mut settings.font_size,
                Settings::MIN_FONT_SIZE..=Settings::MAX_FONT_SIZE,
            )
            .show_value(false)
            .step_by(1.0),
        );
        if font_slider.changed() {
            changed = true;
        }

        // Font size presets
        ui.horizontal(|ui| {
            for (label, size) in [("Small", 12.0), ("Medium", 14.0), ("Large", 18.0)] {
                if ui.small_button(label).clicked() {
                    settings.font_size = size;
                    changed = true;
                }
            }
        });

        changed
    }

    /// Show the Composer settings section.
    ///
    /// Returns true if any setting was changed.
    fn show_composer_section(&mut self, ui: &mut Ui, settings: &mut Settings) -> bool {
        let mut changed = false;

        ui.heading("Composer");
        ui.add_space(8.0);

        // Preview pane toggle
        if ui
            .checkbox(&mut settings.show_preview, "Show Preview Pane")
            .on_hover_text("Render the post beside the editor as you type")
            .changed()
        {
            changed = true;
        }

        ui.add_space(4.0);

        // Editor/preview split (only meaningful with the preview visible)
        ui.add_enabled_ui(settings.show_preview, |ui| {
            ui.horizontal(|ui| {
                ui.label("Editor width:");
                ui.add_space(8.0);
                ui.label(format!("{:.0}%", settings.split_ratio * 100.0));
            });
            ui.add_space(4.0);

            let split_slider = ui.add(
                egui::Slider::new(&mut settings.split_ratio, 0.2..=0.8)
                    .show_value(false)
                    .step_by(0.05),
            );
            if split_slider.changed() {
                changed = true;
            }
        });

        ui.add_space(4.0);

        // Word wrap toggle
        if ui
            .checkbox(&mut settings.word_wrap, "Word Wrap")
            .on_hover_text("Wrap long lines instead of horizontal scrolling")
            .changed()
        {
            changed = true;
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        // Default category for new posts
        ui.label(RichText::new("Default Category").strong());
        ui.add_space(4.0);

        egui::ComboBox::from_id_source("default_category")
            .selected_text(settings.default_category.display_name())
            .show_ui(ui, |ui| {
                for category in Category::ALL {
                    if ui
                        .selectable_value(
                            &mut settings.default_category,
                            category,
                            category.display_name(),
                        )
                        .changed()
                    {
                        changed = true;
                    }
                }
            });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        // Auto-save toggle
        if ui
            .checkbox(&mut settings.auto_save, "Auto-Save Draft")
            .on_hover_text("Save the draft automatically at regular intervals")
            .changed()
        {
            changed = true;
        }

        ui.add_space(4.0);

        // Auto-save interval (only enabled when auto-save is on)
        ui.add_enabled_ui(settings.auto_save, |ui| {
            ui.horizontal(|ui| {
                ui.label("Auto-save interval:");
                ui.add_space(8.0);
                ui.label(format!("{} seconds", settings.auto_save_interval_secs));
            });
            ui.add_space(4.0);

            let interval_slider = ui.add(
                egui::Slider::new(&mut settings.auto_save_interval_secs, 5..=300)
                    .show_value(false)
                    .step_by(5.0),
            );
            if interval_slider.changed() {
                changed = true;
            }

            // Interval presets
            ui.horizontal(|ui| {
                for (label, secs) in [("30s", 30), ("1m", 60), ("5m", 300)] {
                    if ui.small_button(label).clicked() {
                        settings.auto_save_interval_secs = secs;
                        changed = true;
                    }
                }
            });
        });

        changed
    }

    /// Show the Publishing settings section.
    ///
    /// Returns true if any setting was changed.
    fn show_publishing_section(
        &mut self,
        ui: &mut Ui,
        settings: &mut Settings,
        output: &mut SettingsPanelOutput,
    ) -> bool {
        let mut changed = false;

        ui.heading("Publishing");
        ui.add_space(8.0);

        // Tag catalog source
        ui.label(RichText::new("Tag Suggestions").strong());
        ui.add_space(4.0);

        let catalog_label = match &settings.tag_catalog_path {
            Some(path) => path.display().to_string(),
            None => "Built-in catalog".to_string(),
        };
        ui.label(RichText::new(catalog_label).small().weak());
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui
                .button("Browse...")
                .on_hover_text("Pick a catalog file with one tag per line")
                .clicked()
            {
                output.browse_catalog_requested = true;
            }

            if settings.tag_catalog_path.is_some() && ui.button("Use Built-in").clicked() {
                settings.tag_catalog_path = None;
                output.catalog_cleared = true;
                changed = true;
            }
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        // Open exported files
        if ui
            .checkbox(&mut settings.open_after_export, "Open After Export")
            .on_hover_text("Open exported HTML files in the default browser")
            .changed()
        {
            changed = true;
        }

        if let Some(dir) = &settings.last_export_directory {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Last export folder: {}", dir.display()))
                    .small()
                    .weak(),
            );
        }

        changed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_panel_creation() {
        let panel = SettingsPanel::new();
        assert_eq!(panel.active_section, SettingsSection::Appearance);
    }

    #[test]
    fn test_section_labels() {
        assert_eq!(SettingsSection::Appearance.label(), "Appearance");
        assert_eq!(SettingsSection::Composer.label(), "Composer");
        assert_eq!(SettingsSection::Publishing.label(), "Publishing");
    }

    #[test]
    fn test_section_icons_are_distinct() {
        let sections = [
            SettingsSection::Appearance,
            SettingsSection::Composer,
            SettingsSection::Publishing,
        ];
        for a in &sections {
            for b in &sections {
                if a != b {
                    assert_ne!(a.icon(), b.icon());
                }
            }
        }
    }

    #[test]
    fn test_default_output_requests_nothing() {
        let output = SettingsPanelOutput::default();
        assert!(!output.changed);
        assert!(!output.close_requested);
        assert!(!output.reset_requested);
        assert!(!output.browse_catalog_requested);
        assert!(!output.catalog_cleared);
    }
}
