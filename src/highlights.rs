use log::debug;

use crate::buckets::{self, Bucket};
use crate::chatlog::ActivityHistogram;
use crate::timestamp::Timestamp;

/// A candidate highlight: where to start watching and how busy chat was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub time: Timestamp,
    pub score: u32,
}

/// Tuning for one analysis run. All values are strictly positive.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// Bucket length in seconds.
    pub interval_secs: u32,
    /// How many highlights to pick.
    pub highlight_count: u32,
    /// Seconds to rewind each pick so the link starts before the spike.
    pub preroll_secs: u32,
    /// Warm-up/cool-down window trimmed from each end, in minutes.
    pub trim_minutes: u32,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            interval_secs: 10,
            highlight_count: 10,
            preroll_secs: 30,
            trim_minutes: 10,
        }
    }
}

/// Why a run produced no highlights. The two causes are kept distinct so a
/// caller can tell "no chat at all" from "chat too short to survive trimming".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Highlights(Vec<Highlight>),
    /// Empty transcript, or every line was noise.
    EmptyChat,
    /// Fewer trimmed buckets than requested highlights.
    InsufficientBuckets,
}

/// Pick one peak per slice of the trimmed bucket sequence.
///
/// `slice = len / n`; a highlight is emitted at every `slice` boundary until
/// `n` have been produced, then the trailing remainder is ignored. Within a
/// slice the earliest maximum wins ties. Returns `None` when `n` is zero or
/// there are fewer buckets than requested highlights.
pub fn select(trimmed: &[Bucket], n: u32, preroll_secs: u32) -> Option<Vec<Highlight>> {
    if n == 0 {
        return None;
    }
    let slice = trimmed.len() / n as usize;
    if slice == 0 {
        return None;
    }

    let mut highlights = Vec::with_capacity(n as usize);
    let mut peak: Option<Bucket> = None;

    for (i, &bucket) in trimmed.iter().enumerate() {
        match peak {
            Some(p) if bucket.count > p.count => peak = Some(bucket),
            Some(_) => {}
            None => peak = Some(bucket),
        }
        if (i + 1) % slice == 0 {
            let p = peak.take().unwrap_or(bucket);
            highlights.push(Highlight {
                time: p.start.saturating_sub_seconds(preroll_secs),
                score: p.count,
            });
            if highlights.len() == n as usize {
                break;
            }
        }
    }

    Some(highlights)
}

/// Run the whole pipeline over one chat log.
pub fn analyze(chat_log: &str, params: &Params) -> Outcome {
    let histogram = ActivityHistogram::from_chat_log(chat_log);
    if histogram.is_empty() {
        return Outcome::EmptyChat;
    }

    let raw = buckets::bucketize(&histogram, params.interval_secs);
    let trim = buckets::trim_count(params.trim_minutes, params.interval_secs);
    let trimmed = buckets::trim_edges(&raw, trim);
    debug!(
        "{} messages, {} buckets, {} after trimming",
        histogram.total(),
        raw.len(),
        trimmed.len()
    );

    match select(&trimmed, params.highlight_count, params.preroll_secs) {
        Some(highlights) => Outcome::Highlights(highlights),
        None => Outcome::InsufficientBuckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32) -> Timestamp {
        Timestamp::new(h, m, s).unwrap()
    }

    fn bucket(m: u32, s: u32, count: u32) -> Bucket {
        Bucket { start: ts(0, m, s), count }
    }

    #[test]
    fn test_select_picks_slice_maxima() {
        let buckets = vec![
            bucket(10, 0, 3),
            bucket(10, 10, 9),
            bucket(10, 20, 1),
            bucket(10, 30, 2),
            bucket(10, 40, 2),
            bucket(10, 50, 8),
        ];
        let highlights = select(&buckets, 2, 30).unwrap();
        assert_eq!(highlights.len(), 2);
        // Peak of buckets 0..3 is 9 at 0:10:10, shifted back 30s
        assert_eq!(highlights[0], Highlight { time: ts(0, 9, 40), score: 9 });
        // Peak of buckets 3..6 is 8 at 0:10:50
        assert_eq!(highlights[1], Highlight { time: ts(0, 10, 20), score: 8 });
    }

    #[test]
    fn test_select_earliest_wins_ties() {
        let buckets = vec![bucket(10, 0, 5), bucket(10, 10, 5), bucket(10, 20, 5)];
        let highlights = select(&buckets, 1, 0).unwrap();
        assert_eq!(highlights, vec![Highlight { time: ts(0, 10, 0), score: 5 }]);
    }

    #[test]
    fn test_select_caps_at_requested_count() {
        // 7 buckets, n=3 -> slice=2, boundaries at 2, 4, 6; the 7th bucket
        // falls in the ignored remainder
        let buckets: Vec<Bucket> = (0..7).map(|i| bucket(10 + i, 0, i)).collect();
        let highlights = select(&buckets, 3, 0).unwrap();
        assert_eq!(highlights.len(), 3);
        assert_eq!(highlights[2].score, 5);
    }

    #[test]
    fn test_select_exact_count_when_divisible() {
        let buckets: Vec<Bucket> = (0..20).map(|i| bucket(10, i * 10 % 60, i)).collect();
        let highlights = select(&buckets, 4, 0).unwrap();
        assert_eq!(highlights.len(), 4);
    }

    #[test]
    fn test_select_too_few_buckets() {
        let buckets = vec![bucket(10, 0, 1), bucket(10, 10, 2)];
        assert_eq!(select(&buckets, 3, 0), None);
        assert_eq!(select(&[], 1, 0), None);
    }

    #[test]
    fn test_select_zero_requested() {
        let buckets = vec![bucket(10, 0, 1), bucket(10, 10, 2)];
        assert_eq!(select(&buckets, 0, 0), None);
    }

    #[test]
    fn test_select_preroll_clamps_at_zero() {
        let buckets = vec![bucket(0, 10, 4)];
        let highlights = select(&buckets, 1, 60).unwrap();
        assert_eq!(highlights[0].time, ts(0, 0, 0));
    }

    #[test]
    fn test_analyze_empty_chat() {
        assert_eq!(analyze("", &Params::default()), Outcome::EmptyChat);
        assert_eq!(
            analyze("[0:00:01] a: yessss\n", &Params::default()),
            Outcome::EmptyChat
        );
    }

    #[test]
    fn test_analyze_too_short_for_trimming() {
        // A few minutes of chat cannot survive the default 10-minute trim
        let log = "[0:00:01] a: hello\n[0:01:00] b: anyone here\n";
        assert_eq!(analyze(log, &Params::default()), Outcome::InsufficientBuckets);
    }

    fn busy_log() -> String {
        // One message every 30 seconds for two hours, with a burst at 1:00:00
        let mut log = String::new();
        for i in 0..240 {
            let t = ts(0, 0, 0).add_seconds(i * 30);
            log.push_str(&format!("[{t}] viewer{i}: talking about the game\n"));
        }
        for i in 0..20 {
            log.push_str(&format!("[1:00:00] hype{i}: WHAT JUST HAPPENED\n"));
        }
        log
    }

    #[test]
    fn test_analyze_finds_burst() {
        let params = Params { interval_secs: 60, highlight_count: 4, preroll_secs: 30, trim_minutes: 10 };
        let Outcome::Highlights(highlights) = analyze(&busy_log(), &params) else {
            panic!("expected highlights");
        };
        assert_eq!(highlights.len(), 4);
        let top = highlights.iter().max_by_key(|h| h.score).unwrap();
        // The burst bucket holds 20 hype messages plus the regular chatter
        assert!(top.score >= 20);
        assert_eq!(top.time, ts(0, 59, 30));
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let log = busy_log();
        let params = Params { interval_secs: 60, highlight_count: 4, preroll_secs: 30, trim_minutes: 10 };
        assert_eq!(analyze(&log, &params), analyze(&log, &params));
    }
}
