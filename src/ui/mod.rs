//! UI components for Quill
//!
//! This module contains reusable UI widgets and components.

mod draft_picker;
mod settings;
mod tag_row;
mod toolbar;

pub use draft_picker::DraftPicker;
pub use settings::SettingsPanel;
pub use tag_row::TagRow;
pub use toolbar::{Toolbar, ToolbarAction};
