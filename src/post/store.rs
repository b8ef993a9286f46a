//! Draft storage on disk
//!
//! Drafts live as individual Markdown files (with front matter) under the
//! platform data directory, e.g. `~/.local/share/quill/drafts/` on Linux.
//! File names are derived from the post title; saves are atomic (write to
//! a temporary file, then rename over the target).

use crate::error::{Error, Result};
use crate::markdown::short_summary;
use crate::post::frontmatter::{self, PostMeta};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the data directory
const APP_NAME: &str = "quill";

/// Subdirectory of the data directory that holds draft files
const DRAFTS_DIR_NAME: &str = "drafts";

/// Extension for post files
const POST_EXTENSION: &str = "md";

/// Extension used for the temporary file during atomic writes
const TEMP_EXTENSION: &str = "md.tmp";

// ─────────────────────────────────────────────────────────────────────────────
// Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific data directory for the application.
///
/// - **Windows**: `%APPDATA%\quill\`
/// - **macOS**: `~/Library/Application Support/quill/`
/// - **Linux**: `~/.local/share/quill/`
///
/// # Errors
///
/// Returns `Error::DataDirNotFound` if the data directory cannot be
/// determined (e.g., if the HOME environment variable is not set).
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::DataDirNotFound)
}

/// Get the directory that holds draft files.
pub fn get_drafts_dir() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DRAFTS_DIR_NAME))
}

/// Ensure the drafts directory exists, creating it if necessary.
fn ensure_drafts_dir() -> Result<PathBuf> {
    let drafts_dir = get_drafts_dir()?;

    if !drafts_dir.exists() {
        debug!("Creating drafts directory: {}", drafts_dir.display());
        fs::create_dir_all(&drafts_dir).map_err(|e| Error::PostWrite {
            path: drafts_dir.clone(),
            source: e,
        })?;
    }

    Ok(drafts_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Draft Listing
// ─────────────────────────────────────────────────────────────────────────────

/// A draft as it appears in the draft picker: where it lives, its metadata,
/// and a short plain-text summary of the body.
#[derive(Debug, Clone)]
pub struct DraftEntry {
    pub path: PathBuf,
    pub meta: PostMeta,
    pub summary: String,
}

/// List all drafts in the default drafts directory, newest first.
///
/// Returns an empty list when the directory does not exist yet.
pub fn list_drafts() -> Result<Vec<DraftEntry>> {
    list_drafts_in(&get_drafts_dir()?)
}

/// List all drafts in `dir`, sorted by last update (newest first).
///
/// Files that cannot be read or parsed are skipped with a warning so one
/// corrupt draft never hides the rest.
pub fn list_drafts_in(dir: &Path) -> Result<Vec<DraftEntry>> {
    if !dir.exists() {
        debug!("Drafts directory {} does not exist yet", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| Error::PostRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut drafts = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(POST_EXTENSION) {
            continue;
        }

        match load_post(&path) {
            Ok((meta, body)) => drafts.push(DraftEntry {
                path,
                summary: short_summary(&body),
                meta,
            }),
            Err(e) => {
                warn!("Skipping unreadable draft {}: {}", path.display(), e);
            }
        }
    }

    drafts.sort_by(|a, b| b.meta.updated_at.cmp(&a.meta.updated_at));
    Ok(drafts)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load / Save
// ─────────────────────────────────────────────────────────────────────────────

/// Load a post file, returning its metadata and Markdown body.
pub fn load_post(path: &Path) -> Result<(PostMeta, String)> {
    let source = fs::read_to_string(path).map_err(|e| Error::PostRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    frontmatter::decode(&source)
}

/// Save a draft to the default drafts directory.
///
/// When `existing` is set, the draft is written back to that path;
/// otherwise a new file name is derived from the title. Returns the path
/// the draft was written to.
pub fn save_draft(meta: &PostMeta, body: &str, existing: Option<&Path>) -> Result<PathBuf> {
    let drafts_dir = ensure_drafts_dir()?;
    save_draft_in(&drafts_dir, meta, body, existing)
}

/// [`save_draft`] into an explicit directory.
pub fn save_draft_in(
    dir: &Path,
    meta: &PostMeta,
    body: &str,
    existing: Option<&Path>,
) -> Result<PathBuf> {
    let path = match existing {
        Some(path) => path.to_path_buf(),
        None => unique_draft_path(dir, &meta.title),
    };

    let contents = frontmatter::encode(meta, body)?;
    write_atomic(&path, &contents)?;

    info!("Draft saved to {}", path.display());
    Ok(path)
}

/// Write a post to `path` with the draft flag cleared.
///
/// This is the final step of publishing: the destination comes from a save
/// dialog, and the file on disk is marked as published.
pub fn publish_to(path: &Path, meta: &PostMeta, body: &str) -> Result<()> {
    let mut published = meta.clone();
    published.draft = false;
    published.touch();

    let contents = frontmatter::encode(&published, body)?;
    write_atomic(path, &contents)?;

    info!("Post published to {}", path.display());
    Ok(())
}

/// Write `contents` to `path` atomically: write a temporary sibling file,
/// then rename it over the target.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension(TEMP_EXTENSION);

    fs::write(&temp_path, contents).map_err(|e| Error::PostWrite {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::PostWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// File Naming
// ─────────────────────────────────────────────────────────────────────────────

/// Derive a file-system friendly slug from a post title.
///
/// Lowercases, keeps alphanumerics, turns separator runs into single
/// hyphens, and drops everything else. Empty results fall back to
/// `untitled`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for ch in title.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if (ch.is_whitespace() || ch == '-' || ch == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

/// Pick a path for a new draft, appending `-2`, `-3`, ... on collisions.
fn unique_draft_path(dir: &Path, title: &str) -> PathBuf {
    let slug = slugify(title);

    let candidate = dir.join(format!("{}.{}", slug, POST_EXTENSION));
    if !candidate.exists() {
        return candidate;
    }

    for n in 2.. {
        let candidate = dir.join(format!("{}-{}.{}", slug, n, POST_EXTENSION));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("the candidate loop always finds a free name");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
