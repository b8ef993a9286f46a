//! Post model for Quill
//!
//! This module covers everything a post is outside the editor widgets:
//! the submission form fields and their validation rules, the TOML front
//! matter that wraps each Markdown file, and the on-disk draft store.

mod form;
mod frontmatter;
mod store;

pub use form::{validate, Category, FieldError, MAX_BODY_LEN, MAX_TAG_FIELD_LEN, MAX_TITLE_LEN};
pub use frontmatter::{now_unix, PostMeta};
pub use store::{list_drafts, load_post, publish_to, save_draft, slugify, DraftEntry};
