//! HTML generation for published posts
//!
//! Turns a post into a standalone HTML document with inlined theme CSS, or
//! into a bare fragment for the clipboard. The body conversion uses the
//! same comrak options as the preview, so what you see is what you publish.

use crate::error::{Error, Result};
use crate::markdown::{PreviewColors, RenderOptions};
use crate::post::PostMeta;
use comrak::markdown_to_html;
use eframe::egui;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Convert markdown to an HTML fragment (no doctype or head).
///
/// Suitable for pasting into a blog engine or rich-text editor.
pub fn render_html_body(markdown: &str) -> String {
    let options = RenderOptions::default().to_comrak_options();
    markdown_to_html(markdown, &options)
}

/// Generate a complete standalone HTML document for a post.
///
/// The document carries the post title and category, the tag line, the
/// converted body, and theme CSS inlined in the head.
pub fn render_post_document(meta: &PostMeta, body: &str, colors: &PreviewColors) -> String {
    let html_body = render_html_body(body);
    let theme_css = generate_theme_css(colors);

    let tag_line = meta
        .tags
        .iter()
        .map(|tag| format!("#{}", html_escape(tag)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Quill">
    <title>{title}</title>
    <style>
{base_css}

{theme_css}
    </style>
</head>
<body>
    <article class="markdown-body">
        <h1 class="post-title">{title}</h1>
        <p class="post-meta">{category} · {tags}</p>
{body}
    </article>
</body>
</html>"#,
        title = html_escape(&meta.title),
        base_css = BASE_CSS,
        theme_css = theme_css,
        category = html_escape(meta.category.display_name()),
        tags = tag_line,
        body = html_body,
    )
}

/// Write a post as a standalone HTML file.
pub fn export_html_file(
    output_path: &Path,
    meta: &PostMeta,
    body: &str,
    colors: &PreviewColors,
) -> Result<()> {
    let html = render_post_document(meta, body, colors);

    std::fs::write(output_path, html).map_err(|e| Error::PostWrite {
        path: output_path.to_path_buf(),
        source: e,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for post rendering (layout, typography).
const BASE_CSS: &str = r#"
/* Reset and base styles */
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

/* Article container */
.markdown-body {
    max-width: 720px;
    margin: 0 auto;
    padding: 32px 24px;
}

/* Post header */
.markdown-body .post-title {
    margin-top: 0;
}

.markdown-body .post-meta {
    font-size: 0.9em;
    margin-top: -8px;
}

/* Headings */
.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.markdown-body h1 { font-size: 2em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.markdown-body h2 { font-size: 1.5em; border-bottom: 1px solid; padding-bottom: 0.3em; }
.markdown-body h3 { font-size: 1.25em; }
.markdown-body h4 { font-size: 1em; }
.markdown-body h5 { font-size: 0.875em; }
.markdown-body h6 { font-size: 0.85em; }

/* Paragraphs */
.markdown-body p {
    margin-top: 0;
    margin-bottom: 16px;
}

/* Links */
.markdown-body a {
    text-decoration: none;
}

.markdown-body a:hover {
    text-decoration: underline;
}

/* Lists */
.markdown-body ul,
.markdown-body ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.markdown-body li {
    margin-bottom: 4px;
}

/* Task lists */
.markdown-body ul.contains-task-list {
    list-style-type: none;
    padding-left: 0;
}

.markdown-body .task-list-item {
    padding-left: 1.5em;
    position: relative;
}

.markdown-body .task-list-item input[type="checkbox"] {
    position: absolute;
    left: 0;
    top: 0.3em;
}

/* Blockquotes */
.markdown-body blockquote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    border-left: 4px solid;
}

.markdown-body blockquote > :first-child {
    margin-top: 0;
}

.markdown-body blockquote > :last-child {
    margin-bottom: 0;
}

/* Code */
.markdown-body code {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', 'Monaco', monospace;
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}

.markdown-body pre {
    margin-top: 0;
    margin-bottom: 16px;
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    line-height: 1.45;
}

.markdown-body pre code {
    padding: 0;
    background: transparent;
    border-radius: 0;
    font-size: 0.875em;
}

/* Tables */
.markdown-body table {
    border-collapse: collapse;
    width: 100%;
    margin-bottom: 16px;
}

.markdown-body th,
.markdown-body td {
    padding: 8px 12px;
    border: 1px solid;
}

.markdown-body th {
    font-weight: 600;
    text-align: left;
}

.markdown-body tr:nth-child(even) td {
    background-color: rgba(128, 128, 128, 0.05);
}

/* Horizontal rule */
.markdown-body hr {
    height: 2px;
    margin: 24px 0;
    border: none;
}

/* Images */
.markdown-body img {
    max-width: 100%;
    height: auto;
    border-radius: 4px;
}

/* Strong and emphasis */
.markdown-body strong {
    font-weight: 600;
}

.markdown-body em {
    font-style: italic;
}

/* Strikethrough */
.markdown-body del {
    text-decoration: line-through;
}
"#;

/// Generate theme-specific CSS from the preview palette.
fn generate_theme_css(colors: &PreviewColors) -> String {
    format!(
        r#"
/* Theme colors */
:root {{
    color-scheme: {color_scheme};
}}

body {{
    background-color: {bg};
    color: {text};
}}

.markdown-body h1,
.markdown-body h2,
.markdown-body h3,
.markdown-body h4,
.markdown-body h5,
.markdown-body h6 {{
    color: {heading};
}}

.markdown-body h1,
.markdown-body h2 {{
    border-bottom-color: {border};
}}

.markdown-body .post-meta {{
    color: {muted};
}}

.markdown-body a {{
    color: {link};
}}

.markdown-body blockquote {{
    color: {blockquote_text};
    border-left-color: {blockquote_border};
}}

.markdown-body code {{
    background-color: {code_bg};
    color: {code_text};
}}

.markdown-body pre {{
    background-color: {code_bg};
    border: 1px solid {border};
}}

.markdown-body th,
.markdown-body td {{
    border-color: {border};
}}

.markdown-body th {{
    background-color: {code_bg};
}}

.markdown-body hr {{
    background-color: {hr};
}}
"#,
        color_scheme = if colors.is_dark() { "dark" } else { "light" },
        bg = color32_to_css(colors.background),
        text = color32_to_css(colors.text),
        heading = color32_to_css(colors.heading),
        border = color32_to_css(colors.quote_border),
        muted = color32_to_css(colors.quote_text),
        link = color32_to_css(colors.link),
        blockquote_text = color32_to_css(colors.quote_text),
        blockquote_border = color32_to_css(colors.quote_border),
        code_bg = color32_to_css(colors.code_bg),
        code_text = color32_to_css(colors.code_text),
        hr = color32_to_css(colors.rule),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert Color32 to CSS color string.
fn color32_to_css(color: egui::Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
