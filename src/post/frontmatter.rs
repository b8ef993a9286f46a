//! TOML front matter for post files
//!
//! Posts are stored as Markdown files with the metadata in a TOML block
//! between `+++` fences, the way static site generators expect them:
//!
//! ```text
//! +++
//! title = "My first loop"
//! category = "technique"
//! tags = ["spin", "footwork"]
//! draft = true
//! +++
//!
//! Body starts here.
//! ```

use crate::error::{Error, Result};
use crate::post::form::Category;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fence line delimiting the TOML block.
pub const FRONT_MATTER_FENCE: &str = "+++";

// ─────────────────────────────────────────────────────────────────────────────
// Post Metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata carried in a post file's front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    /// Post title.
    pub title: String,
    /// Post category.
    #[serde(default)]
    pub category: Category,
    /// Selected tags, in insertion order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the post is still a draft.
    #[serde(default)]
    pub draft: bool,
    /// Creation time, seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
    /// Last save time, seconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: u64,
}

impl PostMeta {
    /// Fresh draft metadata stamped with the current time.
    pub fn new_draft(title: impl Into<String>) -> Self {
        let now = now_unix();
        Self {
            title: title.into(),
            category: Category::default(),
            tags: Vec::new(),
            draft: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the updated timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_unix();
    }
}

/// Current time in seconds since the Unix epoch. Clocks before the epoch
/// collapse to zero rather than failing.
pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Encode / Decode
// ─────────────────────────────────────────────────────────────────────────────

/// Render a post file: fenced TOML front matter, a blank line, the body.
pub fn encode(meta: &PostMeta, body: &str) -> Result<String> {
    let toml = toml::to_string(meta)?;
    Ok(format!(
        "{fence}\n{toml}{fence}\n\n{body}",
        fence = FRONT_MATTER_FENCE,
        toml = toml,
        body = body
    ))
}

/// Split a post file into metadata and body.
///
/// The file must open with a `+++` fence line and contain a closing fence;
/// anything else is a malformed post. The conventional blank line after
/// the closing fence is not part of the body.
pub fn decode(source: &str) -> Result<(PostMeta, String)> {
    let mut lines = source.lines();
    match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_FENCE => {}
        _ => {
            return Err(Error::FrontMatter {
                message: "missing opening +++ fence".to_string(),
                source: None,
            })
        }
    }

    let mut meta_lines: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in &mut lines {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        meta_lines.push(line);
    }
    if !closed {
        return Err(Error::FrontMatter {
            message: "unterminated front matter block".to_string(),
            source: None,
        });
    }

    let meta: PostMeta = toml::from_str(&meta_lines.join("\n"))?;

    let body = lines.collect::<Vec<&str>>().join("\n");
    let body = body.strip_prefix('\n').unwrap_or(&body).to_string();
    Ok((meta, body))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> PostMeta {
        PostMeta {
            title: "My first loop".to_string(),
            category: Category::Technique,
            tags: vec!["spin".to_string(), "footwork".to_string()],
            draft: true,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_100,
        }
    }

    #[test]
    fn test_encode_layout() {
        let encoded = encode(&sample_meta(), "Keep the elbow in.").unwrap();
        assert!(encoded.starts_with("+++\n"));
        assert!(encoded.contains("title = \"My first loop\""));
        assert!(encoded.contains("category = \"technique\""));
        assert!(encoded.contains("draft = true"));
        assert!(encoded.ends_with("+++\n\nKeep the elbow in."));
    }

    #[test]
    fn test_roundtrip() {
        let meta = sample_meta();
        let body = "# Heading\n\nSome **bold** text.\n\n- a list";
        let encoded = encode(&meta, body).unwrap();
        let (meta_back, body_back) = decode(&encoded).unwrap();
        assert_eq!(meta_back, meta);
        assert_eq!(body_back, body);
    }

    #[test]
    fn test_decode_minimal_front_matter() {
        let source = "+++\ntitle = \"Hi\"\n+++\n\nbody";
        let (meta, body) = decode(source).unwrap();
        assert_eq!(meta.title, "Hi");
        assert_eq!(meta.category, Category::Other);
        assert!(meta.tags.is_empty());
        assert!(!meta.draft);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_decode_missing_opening_fence() {
        let err = decode("title = \"Hi\"\n").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_decode_unterminated_block() {
        let err = decode("+++\ntitle = \"Hi\"\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unterminated"));
    }

    #[test]
    fn test_decode_invalid_toml() {
        let err = decode("+++\ntitle = = \"Hi\"\n+++\n").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_decode_empty_body() {
        let (_, body) = decode("+++\ntitle = \"Hi\"\n+++\n").unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn test_body_with_fence_lines_survives() {
        // Only the first bare fence line closes the block; fence-looking
        // lines in the body are plain text.
        let body = "before\n\n+++\n\nafter";
        let encoded = encode(&sample_meta(), body).unwrap();
        let (_, body_back) = decode(&encoded).unwrap();
        assert_eq!(body_back, body);
    }

    #[test]
    fn test_new_draft_stamps_times() {
        let meta = PostMeta::new_draft("T");
        assert!(meta.draft);
        assert_eq!(meta.created_at, meta.updated_at);
        assert!(meta.created_at > 0);
    }

    #[test]
    fn test_touch_updates_timestamp() {
        let mut meta = sample_meta();
        let before = meta.updated_at;
        meta.touch();
        assert!(meta.updated_at >= before);
    }
}
