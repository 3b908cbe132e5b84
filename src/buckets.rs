use crate::chatlog::ActivityHistogram;
use crate::timestamp::Timestamp;

/// A fixed-length time window `[start, start + interval)` with the number of
/// chat messages that fell inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub start: Timestamp,
    pub count: u32,
}

/// Fold the histogram into fixed-length buckets, in chronological order.
/// The trailing in-progress bucket is always flushed, so bucket counts sum
/// to the histogram total.
pub fn bucketize(histogram: &ActivityHistogram, interval_secs: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut current: Option<(Timestamp, Timestamp, u32)> = None; // (start, end, count)

    for &(time, count) in histogram.entries() {
        match current {
            Some((start, end, acc)) if time <= end => {
                current = Some((start, end, acc + count));
            }
            Some((start, _, acc)) => {
                buckets.push(Bucket { start, count: acc });
                current = Some((time, time.add_seconds(interval_secs), count));
            }
            None => {
                current = Some((time, time.add_seconds(interval_secs), count));
            }
        }
    }

    if let Some((start, _, acc)) = current {
        buckets.push(Bucket { start, count: acc });
    }

    buckets
}

/// How many buckets to shave off each edge for a warm-up/cool-down window of
/// `trim_minutes` at bucket length `interval_secs`.
pub fn trim_count(trim_minutes: u32, interval_secs: u32) -> u32 {
    (trim_minutes * 60 / interval_secs).saturating_sub(1)
}

/// Drop `trim_count + 1` buckets from each end to suppress intro/outro
/// chatter. A sequence too short to trim yields an empty result, which is a
/// valid "no highlights" outcome.
pub fn trim_edges(buckets: &[Bucket], trim_count: u32) -> Vec<Bucket> {
    let edge = trim_count as usize + 1;
    if buckets.len() < 2 * edge {
        return Vec::new();
    }
    buckets[edge..buckets.len() - edge].to_vec()
}
