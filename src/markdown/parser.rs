//! Markdown parsing using comrak
//!
//! This module wraps comrak's parser behind a small node tree tailored to
//! what the preview pane renders. The same options drive HTML export so
//! the preview and the published page agree on what the source means.

use comrak::{
    nodes::{
        AstNode, ListType as ComrakListType, NodeValue, TableAlignment as ComrakTableAlignment,
    },
    parse_document, Arena, Options,
};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing and rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable pipe tables
    pub tables: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Make URLs safe by removing potentially dangerous protocols
    pub safe_urls: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            tables: true,
            tasklist: true,
            autolink: true,
            safe_urls: true,
        }
    }
}

impl RenderOptions {
    /// Convert to comrak Options.
    pub(crate) fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.tasklist = self.tasklist;
        options.extension.autolink = self.autolink;

        options.render.unsafe_ = !self.safe_urls;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Tree
// ─────────────────────────────────────────────────────────────────────────────

/// Heading level (H1-H6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
    H5 = 5,
    H6 = 6,
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        match level {
            1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }
}

/// List kind (ordered or unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered { start: u32 },
}

/// Table cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlignment {
    None,
    Left,
    Center,
    Right,
}

impl From<ComrakTableAlignment> for TableAlignment {
    fn from(align: ComrakTableAlignment) -> Self {
        match align {
            ComrakTableAlignment::None => TableAlignment::None,
            ComrakTableAlignment::Left => TableAlignment::Left,
            ComrakTableAlignment::Center => TableAlignment::Center,
            ComrakTableAlignment::Right => TableAlignment::Right,
        }
    }
}

/// The kind of a markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root document node
    Document,
    /// Paragraph
    Paragraph,
    /// Heading (H1-H6)
    Heading(HeadingLevel),
    /// Fenced or indented code block
    CodeBlock { language: String, literal: String },
    /// Block quote (>)
    BlockQuote,
    /// List container
    List(ListKind),
    /// List item
    Item,
    /// Task list item marker
    TaskItem { checked: bool },
    /// Thematic break (horizontal rule)
    ThematicBreak,
    /// Table with per-column alignments
    Table { alignments: Vec<TableAlignment> },
    /// Table row
    TableRow { header: bool },
    /// Table cell
    TableCell,
    /// Raw HTML block, shown as literal text
    HtmlBlock(String),
    /// Inline text content
    Text(String),
    /// Inline code
    Code(String),
    /// Emphasis (italic)
    Emphasis,
    /// Strong emphasis (bold)
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Link
    Link { url: String, title: String },
    /// Image; the preview shows its alt text as a link
    Image { url: String, title: String },
    /// Inline HTML, shown as literal text
    HtmlInline(String),
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
}

/// A node in the parsed markdown tree.
#[derive(Debug, Clone)]
pub struct MarkdownNode {
    /// What this node is
    pub kind: NodeKind,
    /// Child nodes
    pub children: Vec<MarkdownNode>,
}

impl MarkdownNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.kind {
            NodeKind::Text(t) => output.push_str(t),
            NodeKind::Code(t) => output.push_str(t),
            NodeKind::SoftBreak => output.push(' '),
            NodeKind::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text into a node tree with default options.
pub fn parse_markdown(markdown: &str) -> MarkdownNode {
    parse_markdown_with_options(markdown, &RenderOptions::default())
}

/// Parse markdown text into a node tree.
///
/// Comrak accepts any input, so this never fails: malformed markdown just
/// parses as the literal text it is.
pub fn parse_markdown_with_options(markdown: &str, options: &RenderOptions) -> MarkdownNode {
    let arena = Arena::new();
    let comrak_options = options.to_comrak_options();

    let root = parse_document(&arena, markdown, &comrak_options);
    convert_node(root)
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a comrak AST node to our MarkdownNode structure.
fn convert_node<'a>(node: &'a AstNode<'a>) -> MarkdownNode {
    let ast = node.data.borrow();

    let mut markdown_node = MarkdownNode::new(convert_node_value(&ast.value));
    for child in node.children() {
        markdown_node.children.push(convert_node(child));
    }
    markdown_node
}

/// Convert a comrak NodeValue to our NodeKind.
fn convert_node_value(value: &NodeValue) -> NodeKind {
    match value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::Heading(heading) => NodeKind::Heading(HeadingLevel::from(heading.level)),
        NodeValue::CodeBlock(code) => NodeKind::CodeBlock {
            language: code.info.clone(),
            literal: code.literal.clone(),
        },
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::List(list) => NodeKind::List(match list.list_type {
            ComrakListType::Bullet => ListKind::Bullet,
            ComrakListType::Ordered => ListKind::Ordered {
                start: list.start as u32,
            },
        }),
        NodeValue::Item(_) => NodeKind::Item,
        NodeValue::TaskItem(checked) => NodeKind::TaskItem {
            checked: checked.map(|c| c == 'x' || c == 'X').unwrap_or(false),
        },
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::Table(table) => NodeKind::Table {
            alignments: table
                .alignments
                .iter()
                .map(|a| TableAlignment::from(*a))
                .collect(),
        },
        NodeValue::TableRow(header) => NodeKind::TableRow { header: *header },
        NodeValue::TableCell => NodeKind::TableCell,
        NodeValue::HtmlBlock(html) => NodeKind::HtmlBlock(html.literal.clone()),
        NodeValue::Text(text) => NodeKind::Text(text.clone()),
        NodeValue::Code(code) => NodeKind::Code(code.literal.clone()),
        NodeValue::Emph => NodeKind::Emphasis,
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Strikethrough => NodeKind::Strikethrough,
        NodeValue::Link(link) => NodeKind::Link {
            url: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(image) => NodeKind::Image {
            url: image.url.clone(),
            title: image.title.clone(),
        },
        NodeValue::HtmlInline(html) => NodeKind::HtmlInline(html.clone()),
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::LineBreak,
        // Nodes from extensions we don't enable; keep their text visible.
        _ => NodeKind::Text(String::new()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
