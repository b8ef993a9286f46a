//! File operations module for Quill
//!
//! This module provides functionality for file dialogs,
//! including publishing and exporting posts using native system dialogs.

pub mod dialogs;
