//! Read-only markdown preview widget
//!
//! Renders a parsed markdown tree into egui labels. The preview sits next
//! to the body editor and mirrors what the published page will contain:
//! headings, emphasis, code, quotes, lists, and links.

use crate::config::Theme;
use crate::markdown::parser::{
    parse_markdown, HeadingLevel, ListKind, MarkdownNode, NodeKind, TableAlignment,
};
use egui::{Color32, FontId, RichText, Ui, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Color palette for the preview pane and exported pages.
#[derive(Debug, Clone, Copy)]
pub struct PreviewColors {
    /// Background color
    pub background: Color32,
    /// Primary text color
    pub text: Color32,
    /// Heading text color
    pub heading: Color32,
    /// Code background color
    pub code_bg: Color32,
    /// Code text color
    pub code_text: Color32,
    /// Block quote border color
    pub quote_border: Color32,
    /// Block quote text color
    pub quote_text: Color32,
    /// Link color
    pub link: Color32,
    /// Horizontal rule color
    pub rule: Color32,
    /// List bullet/number color
    pub list_marker: Color32,
    /// Task list checkbox color
    pub checkbox: Color32,
}

impl PreviewColors {
    /// Create colors for the given theme.
    pub fn from_theme(theme: Theme, visuals: &egui::Visuals) -> Self {
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

    /// Dark theme colors.
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            text: Color32::from_rgb(220, 220, 220),
            heading: Color32::from_rgb(100, 180, 255),
            code_bg: Color32::from_rgb(45, 45, 45),
            code_text: Color32::from_rgb(200, 200, 150),
            quote_border: Color32::from_rgb(80, 80, 80),
            quote_text: Color32::from_rgb(180, 180, 180),
            link: Color32::from_rgb(100, 180, 255),
            rule: Color32::from_rgb(80, 80, 80),
            list_marker: Color32::from_rgb(150, 150, 150),
            checkbox: Color32::from_rgb(100, 180, 255),
        }
    }

    /// Light theme colors.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(30, 30, 30),
            heading: Color32::from_rgb(0, 100, 180),
            code_bg: Color32::from_rgb(245, 245, 245),
            code_text: Color32::from_rgb(80, 80, 80),
            quote_border: Color32::from_rgb(200, 200, 200),
            quote_text: Color32::from_rgb(100, 100, 100),
            link: Color32::from_rgb(0, 100, 180),
            rule: Color32::from_rgb(200, 200, 200),
            list_marker: Color32::from_rgb(100, 100, 100),
            checkbox: Color32::from_rgb(0, 100, 180),
        }
    }

    /// Whether this palette is a dark one.
    pub fn is_dark(&self) -> bool {
        self.background.r() < 128
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Style Accumulation
// ─────────────────────────────────────────────────────────────────────────────

/// Text styling accumulated from parent inline nodes, so nested emphasis
/// like ***bold italic*** renders both styles.
#[derive(Debug, Clone, Copy, Default)]
struct InlineStyle {
    bold: bool,
    italic: bool,
    strikethrough: bool,
}

impl InlineStyle {
    fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    fn apply(&self, text: RichText, font_size: f32) -> RichText {
        let mut styled = text.size(font_size);
        if self.bold {
            styled = styled.strong();
        }
        if self.italic {
            styled = styled.italics();
        }
        if self.strikethrough {
            styled = styled.strikethrough();
        }
        styled
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only preview of markdown source.
///
/// Parses on every show, which is cheap at post sizes.
#[must_use = "call .show(ui) to render the preview"]
pub struct MarkdownPreview<'a> {
    markdown: &'a str,
    font_size: f32,
    theme: Theme,
}

impl<'a> MarkdownPreview<'a> {
    /// Create a preview of the given markdown source.
    pub fn new(markdown: &'a str) -> Self {
        Self {
            markdown,
            font_size: 14.0,
            theme: Theme::System,
        }
    }

    /// Set the base font size.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the color theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the preview into the given Ui.
    pub fn show(self, ui: &mut Ui) {
        let colors = PreviewColors::from_theme(self.theme, ui.visuals());
        let root = parse_markdown(self.markdown);

        for child in &root.children {
            render_node(ui, child, &colors, self.font_size, 0);
        }
    }
}

/// Font size multiplier for a heading level.
fn heading_scale(level: HeadingLevel) -> f32 {
    match level {
        HeadingLevel::H1 => 1.8,
        HeadingLevel::H2 => 1.5,
        HeadingLevel::H3 => 1.3,
        HeadingLevel::H4 => 1.15,
        HeadingLevel::H5 => 1.05,
        HeadingLevel::H6 => 1.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_node(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    match &node.kind {
        NodeKind::Paragraph => {
            render_inline_content(ui, node, colors, font_size, indent_level);
            ui.add_space(6.0);
        }
        NodeKind::Heading(level) => render_heading(ui, node, colors, font_size, *level),
        NodeKind::CodeBlock { language, literal } => {
            render_code_block(ui, colors, font_size, language, literal);
        }
        NodeKind::BlockQuote => render_blockquote(ui, node, colors, font_size, indent_level),
        NodeKind::List(kind) => render_list(ui, node, colors, font_size, indent_level, *kind),
        NodeKind::ThematicBreak => render_thematic_break(ui, colors),
        NodeKind::Table { alignments } => render_table(ui, node, colors, font_size, alignments),
        NodeKind::HtmlBlock(html) => {
            // No HTML rendering in the preview; show the source as-is.
            ui.label(
                RichText::new(html.trim_end())
                    .color(colors.quote_text)
                    .font(FontId::monospace(font_size * 0.9)),
            );
            ui.add_space(6.0);
        }
        _ => {
            for child in &node.children {
                render_node(ui, child, colors, font_size, indent_level);
            }
        }
    }
}

fn render_heading(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    base_font_size: f32,
    level: HeadingLevel,
) {
    let font_size = base_font_size * heading_scale(level);

    let top_margin = match level {
        HeadingLevel::H1 => 8.0,
        HeadingLevel::H2 => 6.0,
        _ => 4.0,
    };
    ui.add_space(top_margin);

    ui.label(
        RichText::new(node.text_content())
            .color(colors.heading)
            .strong()
            .size(font_size),
    );
    ui.add_space(2.0);
}

fn render_code_block(
    ui: &mut Ui,
    colors: &PreviewColors,
    font_size: f32,
    language: &str,
    literal: &str,
) {
    ui.add_space(4.0);
    egui::Frame::none()
        .fill(colors.code_bg)
        .inner_margin(8.0)
        .rounding(4.0)
        .show(ui, |ui| {
            if !language.is_empty() {
                ui.label(
                    RichText::new(language)
                        .color(colors.quote_text)
                        .size(font_size * 0.8),
                );
            }
            ui.label(
                RichText::new(literal.trim_end())
                    .color(colors.code_text)
                    .font(FontId::monospace(font_size * 0.9)),
            );
        });
    ui.add_space(4.0);
}

fn render_blockquote(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    ui.horizontal(|ui| {
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(4.0, ui.available_height()), egui::Sense::hover());
        ui.painter().rect_filled(rect, 0.0, colors.quote_border);

        ui.add_space(8.0);

        ui.vertical(|ui| {
            for child in &node.children {
                render_node(ui, child, colors, font_size, indent_level + 1);
            }
        });
    });
}

fn render_list(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
    kind: ListKind,
) {
    let mut item_number = match kind {
        ListKind::Ordered { start } => start,
        ListKind::Bullet => 0,
    };

    for child in &node.children {
        match child.kind {
            NodeKind::Item => {
                let marker = match kind {
                    ListKind::Bullet => "•".to_string(),
                    ListKind::Ordered { .. } => format!("{}.", item_number),
                };
                render_list_item(ui, child, colors, font_size, indent_level, &marker, None);
                item_number += 1;
            }
            NodeKind::TaskItem { checked } => {
                let marker = if checked { "☑" } else { "☐" };
                render_list_item(
                    ui,
                    child,
                    colors,
                    font_size,
                    indent_level,
                    marker,
                    Some(colors.checkbox),
                );
            }
            _ => {}
        }
    }

    if indent_level == 0 {
        ui.add_space(4.0);
    }
}

fn render_list_item(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
    marker: &str,
    marker_color: Option<Color32>,
) {
    ui.horizontal(|ui| {
        ui.add_space(4.0 + indent_level as f32 * 20.0);
        ui.label(
            RichText::new(marker)
                .color(marker_color.unwrap_or(colors.list_marker))
                .size(font_size),
        );

        ui.vertical(|ui| {
            for child in &node.children {
                match &child.kind {
                    // Item content aligns with the marker, so no extra indent.
                    NodeKind::Paragraph => {
                        render_inline_content(ui, child, colors, font_size, 0);
                    }
                    _ => render_node(ui, child, colors, font_size, 0),
                }
            }
        });
    });
}

fn render_thematic_break(ui: &mut Ui, colors: &PreviewColors) {
    ui.add_space(4.0);
    let (rect, _) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors.rule);
    ui.add_space(4.0);
}

fn render_table(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    alignments: &[TableAlignment],
) {
    ui.add_space(4.0);

    // Salt the grid id with the table text so several tables in one
    // document keep separate column-width state.
    let grid_id = ("markdown_table", node.text_content());

    egui::Grid::new(grid_id)
        .striped(true)
        .spacing(Vec2::new(16.0, 4.0))
        .show(ui, |ui| {
            for row in &node.children {
                let header = match row.kind {
                    NodeKind::TableRow { header } => header,
                    _ => continue,
                };

                for (col, cell) in row.children.iter().enumerate() {
                    let align = alignments
                        .get(col)
                        .copied()
                        .unwrap_or(TableAlignment::None);
                    let layout = match align {
                        TableAlignment::Right => {
                            egui::Layout::right_to_left(egui::Align::Center)
                        }
                        TableAlignment::Center => {
                            egui::Layout::centered_and_justified(egui::Direction::LeftToRight)
                        }
                        TableAlignment::Left | TableAlignment::None => {
                            egui::Layout::left_to_right(egui::Align::Center)
                        }
                    };

                    // Cell text is flattened like headings; emphasis inside
                    // table cells is rare enough not to matter here.
                    ui.with_layout(layout, |ui| {
                        let text = RichText::new(cell.text_content()).size(font_size);
                        let text = if header {
                            text.color(colors.heading).strong()
                        } else {
                            text.color(colors.text)
                        };
                        ui.label(text);
                    });
                }
                ui.end_row();
            }
        });

    ui.add_space(4.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_inline_content(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    indent_level: usize,
) {
    ui.horizontal_wrapped(|ui| {
        ui.add_space(4.0 + indent_level as f32 * 20.0);
        // Inline pieces join without gaps; spaces live inside the text.
        ui.spacing_mut().item_spacing.x = 0.0;

        let style = InlineStyle::default();
        for child in &node.children {
            render_inline_node(ui, child, colors, font_size, style);
        }
    });
}

fn render_inline_node(
    ui: &mut Ui,
    node: &MarkdownNode,
    colors: &PreviewColors,
    font_size: f32,
    style: InlineStyle,
) {
    match &node.kind {
        NodeKind::Text(text) => {
            let rich_text = RichText::new(text).color(colors.text);
            ui.label(style.apply(rich_text, font_size));
        }

        NodeKind::Strong => {
            let new_style = style.with_bold();
            for child in &node.children {
                render_inline_node(ui, child, colors, font_size, new_style);
            }
        }

        NodeKind::Emphasis => {
            let new_style = style.with_italic();
            for child in &node.children {
                render_inline_node(ui, child, colors, font_size, new_style);
            }
        }

        NodeKind::Strikethrough => {
            let new_style = style.with_strikethrough();
            for child in &node.children {
                render_inline_node(ui, child, colors, font_size, new_style);
            }
        }

        NodeKind::Code(code) => {
            // Inline code keeps its own styling regardless of surrounding emphasis.
            ui.label(
                RichText::new(code)
                    .color(colors.code_text)
                    .font(FontId::monospace(font_size * 0.9))
                    .background_color(colors.code_bg),
            );
        }

        NodeKind::Link { url, title } => {
            let text = node.text_content();
            let display = if text.is_empty() { url.clone() } else { text };
            let response = ui.hyperlink_to(
                RichText::new(display).color(colors.link).size(font_size),
                url,
            );
            if !title.is_empty() {
                response.on_hover_text(title);
            }
        }

        NodeKind::Image { url, title } => {
            // Images are not fetched; link the alt text to the source.
            let alt = node.text_content();
            let display = if alt.is_empty() { url.clone() } else { alt };
            let hover = if title.is_empty() { url } else { title };
            ui.hyperlink_to(
                RichText::new(display)
                    .color(colors.link)
                    .italics()
                    .size(font_size),
                url,
            )
            .on_hover_text(hover);
        }

        NodeKind::HtmlInline(html) => {
            ui.label(
                RichText::new(html)
                    .color(colors.quote_text)
                    .font(FontId::monospace(font_size * 0.9)),
            );
        }

        NodeKind::SoftBreak => {
            ui.label(RichText::new(" ").size(font_size));
        }

        NodeKind::LineBreak => {
            ui.end_row();
        }

        _ => {
            for child in &node.children {
                render_inline_node(ui, child, colors, font_size, style);
            }
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
    fn test_light_and_dark_palettes_differ() {
        let light = PreviewColors::light();
        let dark = PreviewColors::dark();
        assert_ne!(light.text, dark.text);
        assert_ne!(light.code_bg, dark.code_bg);
    }

    #[test]
    fn test_from_theme_explicit_choices() {
        let visuals = egui::Visuals::light();
        let colors = PreviewColors::from_theme(Theme::Dark, &visuals);
        assert_eq!(colors.text, PreviewColors::dark().text);

        let colors = PreviewColors::from_theme(Theme::Light, &egui::Visuals::dark());
        assert_eq!(colors.text, PreviewColors::light().text);
    }

    #[test]
    fn test_from_theme_system_follows_visuals() {
        let colors = PreviewColors::from_theme(Theme::System, &egui::Visuals::dark());
        assert_eq!(colors.text, PreviewColors::dark().text);

        let colors = PreviewColors::from_theme(Theme::System, &egui::Visuals::light());
        assert_eq!(colors.text, PreviewColors::light().text);
    }

    #[test]
    fn test_heading_scale_decreases_with_level() {
        assert!(heading_scale(HeadingLevel::H1) > heading_scale(HeadingLevel::H2));
        assert!(heading_scale(HeadingLevel::H2) > heading_scale(HeadingLevel::H3));
        assert_eq!(heading_scale(HeadingLevel::H6), 1.0);
    }

    #[test]
    fn test_inline_style_accumulates() {
        let style = InlineStyle::default().with_bold().with_italic();
        assert!(style.bold);
        assert!(style.italic);
        assert!(!style.strikethrough);
    }
}
