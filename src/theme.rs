//! Theme system for Quill
//!
//! Defines the color palettes for the composer UI and converts them into
//! egui's `Visuals`. The `Theme` enum in `config::settings` (Light/Dark/
//! System) selects which palette is active at runtime.
//!
//! The Markdown preview carries its own palette in `markdown::preview`;
//! this module styles the application shell around it.

use crate::config::Theme;
use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Theme colors for the application shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Text colors for various contexts
    pub text: TextColors,
    /// UI feedback colors (accent, success, warning, error)
    pub ui: UiColors,
}

impl ThemeColors {
    /// Create theme colors for the given theme variant.
    ///
    /// `System` follows the visuals egui detected for the platform.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    /// Get the light theme colors.
    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            ui: UiColors::light(),
        }
    }

    /// Get the dark theme colors.
    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            ui: UiColors::dark(),
        }
    }

    /// Check if this is a dark theme (useful for conditional styling).
    pub fn is_dark(&self) -> bool {
        // Dark themes have darker backgrounds
        self.base.background.r() < 128
    }

    /// Convert theme colors to egui Visuals for UI styling.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let colors = ThemeColors::dark();
    /// ctx.set_visuals(colors.to_visuals());
    /// ```
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.is_dark() {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        // Window & panel backgrounds
        visuals.panel_fill = self.base.background;
        visuals.window_fill = self.base.background;
        visuals.extreme_bg_color = self.base.background_tertiary;
        visuals.faint_bg_color = self.base.background_secondary;
        visuals.code_bg_color = self.base.background_tertiary;

        // Text
        visuals.override_text_color = None; // Let widgets decide
        visuals.warn_fg_color = self.ui.warning;
        visuals.error_fg_color = self.ui.error;
        visuals.hyperlink_color = self.text.link;

        // Selection
        visuals.selection.bg_fill = self.base.selected;
        visuals.selection.stroke = Stroke::new(1.0, self.ui.accent);

        // Widget states
        visuals.widgets.noninteractive.bg_fill = self.base.background_secondary;
        visuals.widgets.noninteractive.weak_bg_fill = self.base.background_tertiary;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.base.border_subtle);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text.primary);
        visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

        visuals.widgets.inactive.bg_fill = self.base.background_secondary;
        visuals.widgets.inactive.weak_bg_fill = self.base.background_tertiary;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.base.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text.secondary);
        visuals.widgets.inactive.rounding = Rounding::same(4.0);

        visuals.widgets.hovered.bg_fill = self.base.hover;
        visuals.widgets.hovered.weak_bg_fill = self.base.hover;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.ui.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, self.text.primary);
        visuals.widgets.hovered.rounding = Rounding::same(4.0);

        visuals.widgets.active.bg_fill = self.ui.accent;
        visuals.widgets.active.weak_bg_fill = self.base.selected;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.ui.accent_hover);
        visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
        visuals.widgets.active.rounding = Rounding::same(4.0);

        visuals.widgets.open.bg_fill = self.base.selected;
        visuals.widgets.open.weak_bg_fill = self.base.selected;
        visuals.widgets.open.bg_stroke = Stroke::new(1.0, self.ui.accent);
        visuals.widgets.open.fg_stroke = Stroke::new(1.0, self.text.primary);
        visuals.widgets.open.rounding = Rounding::same(4.0);

        // Windows & popups
        visuals.window_rounding = Rounding::same(8.0);
        visuals.window_stroke = Stroke::new(1.0, self.base.border);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 16.0,
            spread: 0.0,
            color: if self.is_dark() {
                Color32::from_black_alpha(80)
            } else {
                Color32::from_black_alpha(40)
            },
        };
        visuals.popup_shadow = egui::epaint::Shadow {
            offset: egui::vec2(0.0, 6.0),
            blur: 20.0,
            spread: 0.0,
            color: if self.is_dark() {
                Color32::from_black_alpha(100)
            } else {
                Color32::from_black_alpha(50)
            },
        };
        visuals.menu_rounding = Rounding::same(4.0);

        // Miscellaneous
        visuals.button_frame = true;
        visuals.collapsing_header_frame = false;
        visuals.striped = true;
        visuals.slider_trailing_fill = true;
        visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

        visuals.dark_mode = self.is_dark();

        visuals
    }

    /// Create visuals for the given theme variant.
    ///
    /// Convenience method that combines `from_theme` and `to_visuals`.
    pub fn visuals_for_theme(theme: Theme, system_visuals: &Visuals) -> Visuals {
        Self::from_theme(theme, system_visuals).to_visuals()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base UI colors for backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Primary background color
    pub background: Color32,
    /// Secondary/elevated background (panels, popups)
    pub background_secondary: Color32,
    /// Tertiary background (inputs, chips)
    pub background_tertiary: Color32,
    /// Primary border color
    pub border: Color32,
    /// Subtle border color (dividers)
    pub border_subtle: Color32,
    /// Hover state background
    pub hover: Color32,
    /// Selected/active state background
    pub selected: Color32,
}

impl BaseColors {
    /// Light theme base colors.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(250, 250, 250),
            background_tertiary: Color32::from_rgb(245, 245, 245),
            border: Color32::from_rgb(200, 200, 200),
            border_subtle: Color32::from_rgb(230, 230, 230),
            hover: Color32::from_rgb(240, 240, 240),
            selected: Color32::from_rgb(230, 240, 255),
        }
    }

    /// Dark theme base colors.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            background_secondary: Color32::from_rgb(37, 37, 37),
            background_tertiary: Color32::from_rgb(45, 45, 45),
            border: Color32::from_rgb(60, 60, 60),
            border_subtle: Color32::from_rgb(50, 50, 50),
            hover: Color32::from_rgb(50, 50, 50),
            selected: Color32::from_rgb(40, 60, 80),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Text colors for various contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    /// Primary text color (main content)
    pub primary: Color32,
    /// Secondary text color (descriptions, labels)
    pub secondary: Color32,
    /// Muted text color (hints, summaries, counters)
    pub muted: Color32,
    /// Link text color
    pub link: Color32,
}

impl TextColors {
    /// Light theme text colors.
    pub fn light() -> Self {
        Self {
            primary: Color32::from_rgb(30, 30, 30),
            secondary: Color32::from_rgb(80, 80, 80),
            muted: Color32::from_rgb(120, 120, 120),
            link: Color32::from_rgb(0, 100, 180),
        }
    }

    /// Dark theme text colors.
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(220, 220, 220),
            secondary: Color32::from_rgb(180, 180, 180),
            muted: Color32::from_rgb(140, 140, 140),
            link: Color32::from_rgb(100, 180, 255),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Colors for UI feedback and interactive elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    /// Primary accent color (buttons, active elements)
    pub accent: Color32,
    /// Accent color for hover state
    pub accent_hover: Color32,
    /// Success color (draft saved, post published)
    pub success: Color32,
    /// Warning color (tag limit, unsaved changes)
    pub warning: Color32,
    /// Error color (validation failures)
    pub error: Color32,
    /// Info color (informational toasts)
    pub info: Color32,
}

impl UiColors {
    /// Light theme UI colors.
    pub fn light() -> Self {
        Self {
            accent: Color32::from_rgb(0, 120, 212),
            accent_hover: Color32::from_rgb(0, 100, 180),
            success: Color32::from_rgb(40, 167, 69),
            warning: Color32::from_rgb(255, 193, 7),
            error: Color32::from_rgb(220, 53, 69),
            info: Color32::from_rgb(23, 162, 184),
        }
    }

    /// Dark theme UI colors.
    pub fn dark() -> Self {
        Self {
            accent: Color32::from_rgb(100, 180, 255),
            accent_hover: Color32::from_rgb(130, 200, 255),
            success: Color32::from_rgb(75, 210, 100),
            warning: Color32::from_rgb(255, 210, 50),
            error: Color32::from_rgb(255, 100, 100),
            info: Color32::from_rgb(80, 200, 220),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_colors_light() {
        let colors = ThemeColors::light();
        assert!(colors.base.background.r() > 200);
        assert!(!colors.is_dark());
    }

    #[test]
    fn test_theme_colors_dark() {
        let colors = ThemeColors::dark();
        assert!(colors.base.background.r() < 50);
        assert!(colors.is_dark());
    }

    #[test]
    fn test_theme_colors_from_theme() {
        let dark_colors = ThemeColors::from_theme(Theme::Dark, &Visuals::light());
        assert!(dark_colors.is_dark());

        let light_colors = ThemeColors::from_theme(Theme::Light, &Visuals::dark());
        assert!(!light_colors.is_dark());
    }

    #[test]
    fn test_from_theme_system_follows_visuals() {
        let dark = ThemeColors::from_theme(Theme::System, &Visuals::dark());
        assert!(dark.is_dark());

        let light = ThemeColors::from_theme(Theme::System, &Visuals::light());
        assert!(!light.is_dark());
    }

    #[test]
    fn test_text_colors_contrast() {
        // Light theme: dark text on light background
        let light = TextColors::light();
        assert!(light.primary.r() < 50);

        // Dark theme: light text on dark background
        let dark = TextColors::dark();
        assert!(dark.primary.r() > 200);
    }

    #[test]
    fn test_ui_colors_feedback() {
        let colors = UiColors::light();

        // Success should be greenish
        assert!(colors.success.g() > colors.success.r());

        // Error should be reddish
        assert!(colors.error.r() > colors.error.g());

        // Warning should be yellowish
        assert!(colors.warning.r() > 200 && colors.warning.g() > 150);
    }

    #[test]
    fn test_to_visuals_light() {
        let colors = ThemeColors::light();
        let visuals = colors.to_visuals();

        assert!(!visuals.dark_mode);
        assert_eq!(visuals.panel_fill, colors.base.background);
    }

    #[test]
    fn test_to_visuals_dark() {
        let colors = ThemeColors::dark();
        let visuals = colors.to_visuals();

        assert!(visuals.dark_mode);
        assert_eq!(visuals.panel_fill, colors.base.background);
        assert_eq!(visuals.hyperlink_color, colors.text.link);
    }

    #[test]
    fn test_visuals_for_theme_system() {
        // System theme follows the provided visuals
        let dark_visuals = ThemeColors::visuals_for_theme(Theme::System, &Visuals::dark());
        assert!(dark_visuals.dark_mode);

        let light_visuals = ThemeColors::visuals_for_theme(Theme::System, &Visuals::light());
        assert!(!light_visuals.dark_mode);
    }

    #[test]
    fn test_dark_shadows_more_pronounced() {
        let dark = ThemeColors::dark().to_visuals();
        let light = ThemeColors::light().to_visuals();
        assert!(dark.window_shadow.color.a() > light.window_shadow.color.a());
    }
}
