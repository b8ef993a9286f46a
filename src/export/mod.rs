//! Post export module for Quill
//!
//! Exporting takes a finished post out of the composer: as a standalone
//! themed HTML file on disk, or as rendered HTML on the clipboard for
//! pasting into a blog engine.

mod clipboard;
mod html;

pub use clipboard::{copy_post_html, ClipboardError};
pub use html::export_html_file;
