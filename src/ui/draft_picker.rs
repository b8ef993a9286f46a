//! Draft Picker UI Component for Quill
//!
//! A keyboard-driven overlay (Ctrl+P) for jumping to a saved draft.
//! Typing fuzzy-matches against draft titles and summaries; the match
//! pass is debounced so it runs after the user pauses rather than on
//! every keystroke, and results stamped by a superseded keystroke are
//! discarded.

use crate::post::DraftEntry;
use crate::search::DebouncedLookup;
use eframe::egui::{self, Color32, Key, RichText, Sense};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;
use std::path::PathBuf;

/// Maximum number of rows shown.
const MAX_RESULTS: usize = 15;

/// Output of showing the draft picker for one frame.
#[derive(Debug, Default)]
pub struct DraftPickerOutput {
    /// Draft the user chose to open.
    pub selected: Option<PathBuf>,
    /// Whether the picker closed this frame.
    pub closed: bool,
}

/// Fuzzy draft picker state.
pub struct DraftPicker {
    is_open: bool,
    query: String,
    selected_index: usize,
    matcher: SkimMatcherV2,
    lookup: DebouncedLookup,
    /// All drafts, newest first, captured when the picker opens.
    drafts: Vec<DraftEntry>,
    /// Indices into `drafts` for the rows currently shown.
    results: Vec<usize>,
}

impl DraftPicker {
    pub fn new() -> Self {
        Self {
            is_open: false,
            query: String::new(),
            selected_index: 0,
            matcher: SkimMatcherV2::default(),
            lookup: DebouncedLookup::new(),
            drafts: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Open the picker over a fresh draft listing (newest first).
    pub fn open(&mut self, drafts: Vec<DraftEntry>) {
        debug!("Draft picker opened with {} drafts", drafts.len());
        self.is_open = true;
        self.query.clear();
        self.selected_index = 0;
        self.drafts = drafts;
        self.lookup.cancel();
        self.reset_results();
    }

    /// Close the picker and clear the query.
    pub fn close(&mut self) {
        self.is_open = false;
        self.query.clear();
        self.selected_index = 0;
        self.lookup.cancel();
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Show the picker. `now` is the frame clock in seconds, used for the
    /// debounce window.
    pub fn show(&mut self, ctx: &egui::Context, now: f64, is_dark: bool) -> DraftPickerOutput {
        let mut output = DraftPickerOutput::default();

        if !self.is_open {
            return output;
        }

        // Run a lookup that became due after the typing pause. Results for
        // a query the user has since replaced are dropped unseen.
        if let Some(due) = self.lookup.poll(now) {
            if self.lookup.is_current(due.generation) {
                self.run_filter(&due.query);
            }
        }

        // Colors
        let bg_color = if is_dark {
            Color32::from_rgb(35, 35, 40)
        } else {
            Color32::from_rgb(255, 255, 255)
        };

        let border_color = if is_dark {
            Color32::from_rgb(80, 80, 90)
        } else {
            Color32::from_rgb(180, 180, 190)
        };

        let text_color = if is_dark {
            Color32::from_rgb(220, 220, 220)
        } else {
            Color32::from_rgb(40, 40, 40)
        };

        let secondary_color = if is_dark {
            Color32::from_rgb(140, 140, 150)
        } else {
            Color32::from_rgb(100, 100, 110)
        };

        let selected_bg = if is_dark {
            Color32::from_rgb(55, 65, 85)
        } else {
            Color32::from_rgb(220, 230, 245)
        };

        let hover_bg = if is_dark {
            Color32::from_rgb(45, 50, 60)
        } else {
            Color32::from_rgb(235, 240, 248)
        };

        // Handle keyboard shortcuts while open
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                output.closed = true;
            }
            if i.key_pressed(Key::ArrowDown) && !self.results.is_empty() {
                self.selected_index = (self.selected_index + 1) % self.results.len();
            }
            if i.key_pressed(Key::ArrowUp) && !self.results.is_empty() {
                self.selected_index = if self.selected_index == 0 {
                    self.results.len() - 1
                } else {
                    self.selected_index - 1
                };
            }
            if i.key_pressed(Key::Enter) {
                if let Some(&draft_idx) = self.results.get(self.selected_index) {
                    output.selected = Some(self.drafts[draft_idx].path.clone());
                    output.closed = true;
                }
            }
        });

        // Show the overlay
        egui::Area::new(egui::Id::new("draft_picker_overlay"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 100.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(bg_color)
                    .stroke(egui::Stroke::new(1.0, border_color))
                    .rounding(8.0)
                    .shadow(egui::epaint::Shadow {
                        offset: [0.0, 4.0].into(),
                        blur: 12.0,
                        spread: 0.0,
                        color: Color32::from_black_alpha(60),
                    })
                    .show(ui, |ui| {
                        ui.set_width(500.0);

                        ui.add_space(8.0);

                        // Search input
                        ui.horizontal(|ui| {
                            ui.add_space(12.0);
                            ui.label(RichText::new("🔍").size(16.0));
                            ui.add_space(4.0);

                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.query)
                                    .hint_text("Search drafts...")
                                    .frame(false)
                                    .desired_width(450.0)
                                    .font(egui::TextStyle::Body),
                            );

                            // Auto-focus the input
                            response.request_focus();

                            if response.changed() {
                                self.selected_index = 0;
                                // Short or cleared queries fall back to the
                                // plain newest-first listing immediately.
                                if !self.lookup.note_input(&self.query, now) {
                                    self.reset_results();
                                }
                            }

                            ui.add_space(8.0);
                        });

                        ui.add_space(4.0);
                        ui.separator();
                        ui.add_space(4.0);

                        // Results list
                        if self.results.is_empty() {
                            let message = if self.drafts.is_empty() {
                                "No drafts saved yet"
                            } else {
                                "No matching drafts"
                            };
                            ui.horizontal(|ui| {
                                ui.add_space(16.0);
                                ui.label(
                                    RichText::new(message).color(secondary_color).italics(),
                                );
                            });
                            ui.add_space(8.0);
                        } else {
                            let now_secs = crate::post::now_unix();

                            for (idx, &draft_idx) in self.results.iter().enumerate() {
                                let is_selected = idx == self.selected_index;
                                let entry = &self.drafts[draft_idx];

                                let response = ui
                                    .horizontal(|ui| {
                                        let row_response = ui.interact(
                                            ui.available_rect_before_wrap(),
                                            ui.id().with(idx),
                                            Sense::click(),
                                        );

                                        // Draw background
                                        if is_selected {
                                            ui.painter().rect_filled(
                                                row_response.rect.expand2(egui::vec2(8.0, 2.0)),
                                                4.0,
                                                selected_bg,
                                            );
                                        } else if row_response.hovered() {
                                            ui.painter().rect_filled(
                                                row_response.rect.expand2(egui::vec2(8.0, 2.0)),
                                                4.0,
                                                hover_bg,
                                            );
                                        }

                                        ui.add_space(16.0);

                                        ui.label(RichText::new("📝").size(14.0));

                                        ui.add_space(8.0);

                                        // Title
                                        let title = if entry.meta.title.trim().is_empty() {
                                            "Untitled"
                                        } else {
                                            entry.meta.title.as_str()
                                        };
                                        ui.label(RichText::new(title).color(text_color).strong());

                                        // First line of the body
                                        if !entry.summary.is_empty() {
                                            ui.add_space(8.0);
                                            ui.label(
                                                RichText::new(clip_chars(&entry.summary, 48))
                                                    .color(secondary_color)
                                                    .small(),
                                            );
                                        }

                                        // Last-edited age
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                ui.add_space(16.0);
                                                let age = now_secs
                                                    .saturating_sub(entry.meta.updated_at);
                                                ui.label(
                                                    RichText::new(age_label(age))
                                                        .color(secondary_color)
                                                        .size(12.0),
                                                );
                                            },
                                        );

                                        row_response
                                    })
                                    .inner;

                                if response.clicked() {
                                    output.selected = Some(entry.path.clone());
                                    output.closed = true;
                                }

                                ui.add_space(2.0);
                            }
                            ui.add_space(4.0);
                        }

                        // Keyboard hints
                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.add_space(12.0);
                            ui.label(
                                RichText::new("↑↓ Navigate  ⏎ Open  Esc Close")
                                    .color(secondary_color)
                                    .small(),
                            );
                        });
                        ui.add_space(6.0);
                    });
            });

        if output.closed {
            self.close();
        }

        output
    }

    /// The default listing: the first drafts in stored order.
    fn reset_results(&mut self) {
        self.results = (0..self.drafts.len().min(MAX_RESULTS)).collect();
        self.selected_index = 0;
    }

    /// Score drafts against `query` and keep the best matches.
    fn run_filter(&mut self, query: &str) {
        let mut scored: Vec<(usize, i64)> = Vec::new();

        for (idx, entry) in self.drafts.iter().enumerate() {
            let title_score = self.matcher.fuzzy_match(&entry.meta.title, query);
            let summary_score = self.matcher.fuzzy_match(&entry.summary, query);

            // Title hits rank above body hits.
            let score = match (title_score, summary_score) {
                (Some(t), Some(s)) => Some(t * 2 + s),
                (Some(t), None) => Some(t * 2),
                (None, Some(s)) => Some(s),
                (None, None) => None,
            };

            if let Some(score) = score {
                scored.push((idx, score));
            }
        }

        scored.sort_by(|a, b| b.1.cmp(&a.1));

        self.results = scored
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(idx, _)| idx)
            .collect();
        self.selected_index = 0;
    }
}

impl Default for DraftPicker {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Truncate to `max` characters, appending an ellipsis when clipped.
fn clip_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max).collect();
    format!("{}…", clipped.trim_end())
}

/// Compact "how long ago" label for a draft's last edit.
fn age_label(age_secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    if age_secs < MINUTE {
        "just now".to_string()
    } else if age_secs < HOUR {
        format!("{}m ago", age_secs / MINUTE)
    } else if age_secs < DAY {
        format!("{}h ago", age_secs / HOUR)
    } else {
        format!("{}d ago", age_secs / DAY)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostMeta;

    fn entry(title: &str, summary: &str) -> DraftEntry {
        DraftEntry {
            path: PathBuf::from(format!("/drafts/{}.md", title)),
            meta: PostMeta::new_draft(title),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn test_picker_starts_closed() {
        let picker = DraftPicker::new();
        assert!(!picker.is_open());
    }

    #[test]
    fn test_open_shows_listing_order() {
        let mut picker = DraftPicker::new();
        picker.open(vec![
            entry("Newest", ""),
            entry("Middle", ""),
            entry("Oldest", ""),
        ]);

        assert!(picker.is_open());
        assert_eq!(picker.results, vec![0, 1, 2]);
    }

    #[test]
    fn test_close_clears_query() {
        let mut picker = DraftPicker::new();
        picker.open(vec![entry("Draft", "")]);
        picker.query = "dra".to_string();
        picker.close();

        assert!(!picker.is_open());
        assert!(picker.query.is_empty());
    }

    #[test]
    fn test_filter_prefers_title_matches() {
        let mut picker = DraftPicker::new();
        picker.open(vec![
            entry("Weekly training log", "Notes from the gym"),
            entry("Gear review", "My new gym bag and training shoes"),
        ]);

        picker.run_filter("training");

        // Both match, but the title hit ranks first.
        assert_eq!(picker.results.first(), Some(&0));
        assert_eq!(picker.results.len(), 2);
    }

    #[test]
    fn test_filter_drops_non_matches() {
        let mut picker = DraftPicker::new();
        picker.open(vec![
            entry("Footwork drills", ""),
            entry("Tournament recap", ""),
        ]);

        picker.run_filter("footwork");

        assert_eq!(picker.results, vec![0]);
    }

    #[test]
    fn test_filter_caps_results() {
        let mut picker = DraftPicker::new();
        let drafts: Vec<DraftEntry> = (0..30)
            .map(|i| entry(&format!("Draft {}", i), ""))
            .collect();
        picker.open(drafts);

        picker.run_filter("draft");

        assert_eq!(picker.results.len(), MAX_RESULTS);
    }

    #[test]
    fn test_clip_chars() {
        assert_eq!(clip_chars("short", 10), "short");
        assert_eq!(clip_chars("a longer sentence", 8), "a longer…");
    }

    #[test]
    fn test_age_label() {
        assert_eq!(age_label(5), "just now");
        assert_eq!(age_label(120), "2m ago");
        assert_eq!(age_label(7200), "2h ago");
        assert_eq!(age_label(172_800), "2d ago");
    }
}
