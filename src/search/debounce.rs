//! Debounced lookup scheduling
//!
//! Search-style lookups should not fire on every keystroke: a lookup runs
//! only after the user pauses, and a newer keystroke supersedes anything
//! still pending. This is modeled without timers or threads: the caller
//! injects the current time (seconds, as the GUI frame clock provides it)
//! and polls once per frame. A generation counter identifies the newest
//! input so results that return for a superseded query can be discarded.

/// Pause length before a pending lookup fires.
pub const DEFAULT_DEBOUNCE_SECS: f64 = 0.3;

/// Queries shorter than this (in characters) clear the results instead of
/// scheduling a lookup.
pub const MIN_QUERY_LEN: usize = 2;

/// A lookup that has become due.
#[derive(Debug, Clone, PartialEq)]
pub struct DueLookup {
    /// The query to run.
    pub query: String,
    /// Generation at the time the query was entered; compare with
    /// [`DebouncedLookup::is_current`] before applying results.
    pub generation: u64,
}

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due: f64,
    generation: u64,
}

/// Debounce state for one lookup surface.
#[derive(Debug, Clone)]
pub struct DebouncedLookup {
    delay: f64,
    min_len: usize,
    generation: u64,
    pending: Option<Pending>,
}

impl DebouncedLookup {
    /// Debouncer with the standard 300 ms window and 2-character minimum.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE_SECS)
    }

    /// Debouncer with a custom window.
    pub fn with_delay(delay: f64) -> Self {
        Self {
            delay,
            min_len: MIN_QUERY_LEN,
            generation: 0,
            pending: None,
        }
    }

    /// Record a keystroke. Every call supersedes whatever was pending and
    /// bumps the generation. Returns `true` when a lookup was scheduled;
    /// `false` means the query was too short and the caller should clear
    /// any visible results.
    pub fn note_input(&mut self, query: &str, now: f64) -> bool {
        self.generation = self.generation.wrapping_add(1);
        let query = query.trim();
        if query.chars().count() < self.min_len {
            self.pending = None;
            return false;
        }
        self.pending = Some(Pending {
            query: query.to_string(),
            due: now + self.delay,
            generation: self.generation,
        });
        true
    }

    /// Hand out the pending lookup once its due time has passed. Fires at
    /// most once per scheduled input.
    pub fn poll(&mut self, now: f64) -> Option<DueLookup> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            let pending = self.pending.take()?;
            return Some(DueLookup {
                query: pending.query,
                generation: pending.generation,
            });
        }
        None
    }

    /// Whether results stamped with `generation` are still the newest.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Whether a lookup is waiting for its due time.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending lookup without bumping the generation.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for DebouncedLookup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_waits_for_pause() {
        let mut d = DebouncedLookup::new();
        assert!(d.note_input("spin", 10.0));
        assert_eq!(d.poll(10.1), None);
        assert_eq!(d.poll(10.2), None);
        let due = d.poll(10.3).expect("due after the window");
        assert_eq!(due.query, "spin");
    }

    #[test]
    fn test_lookup_fires_once() {
        let mut d = DebouncedLookup::new();
        d.note_input("spin", 0.0);
        assert!(d.poll(1.0).is_some());
        assert_eq!(d.poll(2.0), None);
    }

    #[test]
    fn test_new_input_supersedes_pending() {
        let mut d = DebouncedLookup::new();
        d.note_input("spi", 0.0);
        d.note_input("spin", 0.1);
        // The first query never fires; only the newest does, later.
        assert_eq!(d.poll(0.35), None);
        let due = d.poll(0.4).expect("newest query fires");
        assert_eq!(due.query, "spin");
    }

    #[test]
    fn test_short_query_clears_pending() {
        let mut d = DebouncedLookup::new();
        assert!(d.note_input("spin", 0.0));
        assert!(!d.note_input("s", 0.1));
        assert!(!d.has_pending());
        assert_eq!(d.poll(10.0), None);
    }

    #[test]
    fn test_min_length_counts_characters() {
        let mut d = DebouncedLookup::new();
        // One multi-byte character is still one character.
        assert!(!d.note_input("中", 0.0));
        assert!(d.note_input("中中", 0.0));
    }

    #[test]
    fn test_input_is_trimmed() {
        let mut d = DebouncedLookup::new();
        assert!(d.note_input("  spin  ", 0.0));
        let due = d.poll(1.0).unwrap();
        assert_eq!(due.query, "spin");
    }

    #[test]
    fn test_stale_generation_detected() {
        let mut d = DebouncedLookup::new();
        d.note_input("spin", 0.0);
        let due = d.poll(1.0).unwrap();
        assert!(d.is_current(due.generation));
        // A later keystroke makes those results stale.
        d.note_input("loop", 1.1);
        assert!(!d.is_current(due.generation));
    }

    #[test]
    fn test_short_query_still_bumps_generation() {
        let mut d = DebouncedLookup::new();
        d.note_input("spin", 0.0);
        let due = d.poll(1.0).unwrap();
        d.note_input("s", 1.1);
        assert!(!d.is_current(due.generation));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut d = DebouncedLookup::new();
        d.note_input("spin", 0.0);
        d.cancel();
        assert_eq!(d.poll(10.0), None);
    }

    #[test]
    fn test_custom_delay() {
        let mut d = DebouncedLookup::with_delay(1.0);
        d.note_input("spin", 0.0);
        assert_eq!(d.poll(0.5), None);
        assert!(d.poll(1.0).is_some());
    }
}
