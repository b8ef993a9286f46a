//! Tag catalog
//!
//! The catalog is the ordered universe of known tags the suggestion panel
//! draws from. It is supplied to the picker at construction; the picker
//! never goes looking for it. The app seeds it from a `tags.txt` next to
//! the config file when present, falling back to a builtin set.

use crate::error::{Error, Result};
use std::path::Path;

/// Builtin catalog used when no tag file exists. Ordered by how often the
/// community uses them, which is the order suggestions surface in.
const DEFAULT_TAGS: &[&str] = &[
    "serve",
    "backhand",
    "forehand",
    "footwork",
    "spin",
    "loop",
    "block",
    "chop",
    "rubber",
    "blade",
    "paddle",
    "training",
    "drills",
    "strategy",
    "tournament",
    "equipment",
    "beginner",
    "advanced",
    "practice",
    "technique",
];

/// An ordered, read-only list of known tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCatalog {
    entries: Vec<String>,
}

impl TagCatalog {
    /// Build a catalog from entries, preserving order. Entries are trimmed;
    /// empties and exact duplicates are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.iter().any(|e| e == trimmed) {
                continue;
            }
            seen.push(trimmed.to_string());
        }
        Self { entries: seen }
    }

    /// The builtin catalog.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_TAGS.iter().copied())
    }

    /// Load a catalog from a file with one tag per line. Lines starting
    /// with `#` are comments.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::PostRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(
            content.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    /// Iterate the entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_preserves_order() {
        let catalog = TagCatalog::new(["zeta", "alpha", "mid"]);
        let entries: Vec<&str> = catalog.iter().collect();
        assert_eq!(entries, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_new_trims_and_drops_empty() {
        let catalog = TagCatalog::new(["  spin  ", "", "   ", "loop"]);
        let entries: Vec<&str> = catalog.iter().collect();
        assert_eq!(entries, vec!["spin", "loop"]);
    }

    #[test]
    fn test_new_drops_exact_duplicates() {
        let catalog = TagCatalog::new(["spin", "loop", "spin", "Spin"]);
        let entries: Vec<&str> = catalog.iter().collect();
        // Case-sensitive identity: "Spin" is a distinct entry.
        assert_eq!(entries, vec!["spin", "loop", "Spin"]);
    }

    #[test]
    fn test_builtin_is_non_empty() {
        let catalog = TagCatalog::builtin();
        assert!(catalog.len() >= 10);
        assert!(catalog.iter().any(|t| t == "serve"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# community tags").unwrap();
        writeln!(file, "serve").unwrap();
        writeln!(file, "  backhand  ").unwrap();
        writeln!(file).unwrap();
        drop(file);

        let catalog = TagCatalog::load(&path).unwrap();
        let entries: Vec<&str> = catalog.iter().collect();
        assert_eq!(entries, vec!["serve", "backhand"]);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(TagCatalog::load(&path).is_err());
    }
}
