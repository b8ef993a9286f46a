//! Native file dialog integration using the rfd crate
//!
//! This module provides functions to open native file picker dialogs
//! for publishing posts, exporting HTML, and choosing a tag catalog.

use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for supported file types.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];
const TEXT_EXTENSIONS: &[&str] = &["txt"];

/// Opens a native save dialog for publishing a post as a Markdown file.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn publish_post_dialog(
    initial_dir: Option<&PathBuf>,
    default_name: &str,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Publish Post")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Opens a native save dialog for exporting a post as standalone HTML.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn export_html_dialog(initial_dir: Option<&PathBuf>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export Post as HTML")
        .add_filter("HTML Files", HTML_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

/// Opens a native file picker for choosing a tag catalog file
/// (one tag per line).
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn pick_tag_catalog_dialog(initial_dir: Option<&PathBuf>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Choose Tag Catalog")
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}
