use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::timestamp::Timestamp;

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(\d{1,2}:\d{2}:\d{2})\]").unwrap());

/// Low-effort reaction spam: the whole message is a stretched yes/no/me/ya/ye.
static REACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\[\d{1,2}:\d{2}:\d{2}\]\s+[^:]+:\s+(?:yes+|no+|me+|ya+|ye+)\s*$").unwrap()
});

static SUB_GIFT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" gifted a Tier \d sub to ").unwrap());

/// Classify one chat line. Returns the timestamp for signal lines; noise
/// (reaction spam, sub-gift announcements) and lines without a parseable
/// leading timestamp yield `None`.
pub fn signal_timestamp(line: &str) -> Option<Timestamp> {
    if REACTION_RE.is_match(line) || SUB_GIFT_RE.is_match(line) {
        return None;
    }
    let caps = TIMESTAMP_RE.captures(line)?;
    Timestamp::parse(&caps[1])
}

/// Per-second message counts in first-seen order. Chat logs are written
/// chronologically; a log that violates that is re-sorted so downstream
/// bucketing never sees out-of-order timestamps.
#[derive(Debug, Default)]
pub struct ActivityHistogram {
    entries: Vec<(Timestamp, u32)>,
    index: HashMap<Timestamp, usize>,
}

impl ActivityHistogram {
    /// Build a histogram from a chat log, one message per line.
    pub fn from_chat_log(text: &str) -> Self {
        let mut histogram = ActivityHistogram::default();
        for line in text.lines() {
            if let Some(time) = signal_timestamp(line) {
                histogram.record(time);
            }
        }
        histogram.sort_if_needed();
        histogram
    }

    fn sort_if_needed(&mut self) {
        if self.entries.is_sorted_by_key(|&(t, _)| t) {
            return;
        }
        warn!("Chat log timestamps out of order; sorting chronologically");
        self.entries.sort_by_key(|&(t, _)| t);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, &(t, _))| (t, i))
            .collect();
    }

    fn record(&mut self, time: Timestamp) {
        match self.index.get(&time) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(time, self.entries.len());
                self.entries.push((time, 1));
            }
        }
    }

    pub fn entries(&self) -> &[(Timestamp, u32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of signal messages counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, c)| u64::from(c)).sum()
    }
}

pub fn chat_log_path(dir: &Path, vod_id: &str) -> PathBuf {
    dir.join(format!("{vod_id}.txt"))
}

/// Load the chat log for a VOD, if one has been saved. A missing file is a
/// normal "no data" outcome, not an error.
pub fn load_chat_log(dir: &Path, vod_id: &str) -> Option<String> {
    let path = chat_log_path(dir, vod_id);
    match std::fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            debug!("No chat log at {}: {e}", path.display());
            None
        }
    }
}
