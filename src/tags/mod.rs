//! Tag selection for posts
//!
//! A post carries up to five distinct tags. This module owns the selected
//! list, its comma-joined serialized form, and the autocomplete suggestions
//! drawn from an injected catalog of known tags.

mod catalog;
mod picker;

pub use catalog::TagCatalog;
pub use picker::{
    split_tag_field, AddOutcome, TagPicker, MAX_SUGGESTIONS, MAX_TAGS, TAG_LIMIT_MESSAGE,
};
