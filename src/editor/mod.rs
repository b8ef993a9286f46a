//! Editor module for Quill
//!
//! This module contains the post body editor: the edit buffer with its
//! byte-offset selection model, the inline formatting commands behind the
//! toolbar, and the egui widget that ties the two together.

mod buffer;
mod format;
mod widget;

pub use buffer::EditBuffer;
pub use format::{apply, FormatOutcome, InlineCommand};
pub use widget::{ComposerEditor, EditorOutput};
