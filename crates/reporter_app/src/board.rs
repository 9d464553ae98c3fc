use std::collections::BTreeMap;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reporter_core::StageKey;

/// Append-only list of labeled progress indicators.
///
/// The session driver replays the full ordered row list after every state
/// change; a board appends rows it has not seen before and updates the
/// values of the rest. Rows never move or disappear within a session.
pub trait StageBoard {
    fn upsert_stage(&mut self, key: StageKey, label: &str, value: f64);
    fn banner(&mut self, text: &str);
    fn download_ready(&mut self, url: &str);
}

/// Terminal board: one indicatif bar per stage key, max 100.
pub struct TerminalBoard {
    multi: MultiProgress,
    bars: BTreeMap<StageKey, ProgressBar>,
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: BTreeMap::new(),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{prefix:>4} [{bar:40.cyan/blue}] {pos:>3}/100 {msg}")
            .expect("progress template")
            .progress_chars("#>-")
    }
}

impl StageBoard for TerminalBoard {
    fn upsert_stage(&mut self, key: StageKey, label: &str, value: f64) {
        let bar = self.bars.entry(key).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(100));
            bar.set_style(Self::bar_style());
            bar.set_prefix(key.to_string());
            bar.set_message(label.to_string());
            bar
        });
        bar.set_position(value.round() as u64);
    }

    fn banner(&mut self, text: &str) {
        // println keeps the message above the live bars.
        let _ = self.multi.println(text);
    }

    fn download_ready(&mut self, url: &str) {
        for bar in self.bars.values() {
            bar.finish();
        }
        let _ = self.multi.println(format!("Download the report: {url}"));
    }
}
