//! Search support
//!
//! Debounce scheduling for lookup surfaces such as the draft picker.

mod debounce;

pub use debounce::{DebouncedLookup, DueLookup, DEFAULT_DEBOUNCE_SECS, MIN_QUERY_LEN};
