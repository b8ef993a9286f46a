//! Markdown handling for Quill
//!
//! Parsing and rendering are built on comrak, a CommonMark + GFM
//! compatible parser. This module covers the pieces the composer needs:
//!
//! - Parse markdown into a small node tree
//! - Render the tree as a read-only preview in egui
//! - Reduce markdown to plain-text summaries for draft listings
//!
//! HTML document assembly for publishing lives in the `export` module,
//! built on the same [`RenderOptions`] so the preview and the published
//! output always agree.

mod parser;
mod preview;
mod summary;

pub use parser::RenderOptions;
pub use preview::{MarkdownPreview, PreviewColors};
pub use summary::{short_summary, text_summary};
