//! Post form model and validation
//!
//! A post is a title, a category, a Markdown body, and a serialized tag
//! field. The limits mirror what the forum accepts, so a post that
//! validates here is publishable as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum body length, in characters.
pub const MAX_BODY_LEN: usize = 10_000;

/// Maximum serialized tag field length, in characters.
pub const MAX_TAG_FIELD_LEN: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// Category
// ─────────────────────────────────────────────────────────────────────────────

/// The fixed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technique,
    Equipment,
    Tournament,
    Training,
    #[default]
    Other,
}

impl Category {
    /// All categories, in the order the picker lists them.
    pub const ALL: [Category; 5] = [
        Category::Technique,
        Category::Equipment,
        Category::Tournament,
        Category::Training,
        Category::Other,
    ];

    /// Human-readable name for UI display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Technique => "Technique",
            Category::Equipment => "Equipment",
            Category::Tournament => "Tournament",
            Category::Training => "Training",
            Category::Other => "Other",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    TitleRequired,
    TitleTooLong { len: usize },
    BodyRequired,
    BodyTooLong { len: usize },
    TagFieldTooLong { len: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::TitleRequired => write!(f, "Title is required"),
            FieldError::TitleTooLong { len } => {
                write!(f, "Title is {} characters (maximum {})", len, MAX_TITLE_LEN)
            }
            FieldError::BodyRequired => write!(f, "Content is required"),
            FieldError::BodyTooLong { len } => {
                write!(f, "Content is {} characters (maximum {})", len, MAX_BODY_LEN)
            }
            FieldError::TagFieldTooLong { len } => {
                write!(
                    f,
                    "Tags are {} characters (maximum {})",
                    len, MAX_TAG_FIELD_LEN
                )
            }
        }
    }
}

/// Validate the submittable fields of a post. Returns every failure, in
/// field order; an empty vec means the post can be saved or published.
///
/// Lengths are counted in characters, matching the limits the forum
/// enforces server-side.
pub fn validate(title: &str, body: &str, tag_field: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let title_len = title.chars().count();
    if title.trim().is_empty() {
        errors.push(FieldError::TitleRequired);
    } else if title_len > MAX_TITLE_LEN {
        errors.push(FieldError::TitleTooLong { len: title_len });
    }

    let body_len = body.chars().count();
    if body.trim().is_empty() {
        errors.push(FieldError::BodyRequired);
    } else if body_len > MAX_BODY_LEN {
        errors.push(FieldError::BodyTooLong { len: body_len });
    }

    let tag_len = tag_field.chars().count();
    if tag_len > MAX_TAG_FIELD_LEN {
        errors.push(FieldError::TagFieldTooLong { len: tag_len });
    }

    errors
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_post_has_no_errors() {
        let errors = validate("My first loop", "Keep the elbow in.", "technique,spin");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_title_rejected() {
        let errors = validate("   ", "body", "");
        assert_eq!(errors, vec![FieldError::TitleRequired]);
    }

    #[test]
    fn test_long_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LEN + 1);
        let errors = validate(&title, "body", "");
        assert_eq!(
            errors,
            vec![FieldError::TitleTooLong {
                len: MAX_TITLE_LEN + 1
            }]
        );
    }

    #[test]
    fn test_title_at_limit_accepted() {
        let title = "x".repeat(MAX_TITLE_LEN);
        assert!(validate(&title, "body", "").is_empty());
    }

    #[test]
    fn test_empty_body_rejected() {
        let errors = validate("title", "", "");
        assert_eq!(errors, vec![FieldError::BodyRequired]);
    }

    #[test]
    fn test_long_body_rejected() {
        let body = "y".repeat(MAX_BODY_LEN + 1);
        let errors = validate("title", &body, "");
        assert!(matches!(errors[0], FieldError::BodyTooLong { .. }));
    }

    #[test]
    fn test_long_tag_field_rejected() {
        let tags = "t".repeat(MAX_TAG_FIELD_LEN + 1);
        let errors = validate("title", "body", &tags);
        assert!(matches!(errors[0], FieldError::TagFieldTooLong { .. }));
    }

    #[test]
    fn test_multiple_errors_collected_in_field_order() {
        let errors = validate("", "", "");
        assert_eq!(
            errors,
            vec![FieldError::TitleRequired, FieldError::BodyRequired]
        );
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        // 100 multi-byte characters are within the title limit.
        let title = "å".repeat(MAX_TITLE_LEN);
        assert!(validate(&title, "body", "").is_empty());
    }

    #[test]
    fn test_category_display_names() {
        assert_eq!(Category::Technique.display_name(), "Technique");
        assert_eq!(Category::Other.display_name(), "Other");
        assert_eq!(Category::ALL.len(), 5);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Tournament).unwrap();
        assert_eq!(json, "\"tournament\"");
        let back: Category = serde_json::from_str("\"training\"").unwrap();
        assert_eq!(back, Category::Training);
    }

    #[test]
    fn test_field_error_messages() {
        let msg = FieldError::TitleTooLong { len: 120 }.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("100"));
    }
}
