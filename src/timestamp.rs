use std::fmt;

/// A point in VOD time. Hours are unbounded (a stream can run past 24h);
/// minutes and seconds are always < 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if minute < 60 && second < 60 {
            Some(Timestamp { hour, minute, second })
        } else {
            None
        }
    }

    /// Parse `H:MM:SS` or `HH:MM:SS`. Out-of-range minutes or seconds fail.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, ':');
        let hour = parts.next()?.parse().ok()?;
        let minute = parts.next()?.parse().ok()?;
        let second = parts.next()?.parse().ok()?;
        Timestamp::new(hour, minute, second)
    }

    fn total_seconds(self) -> u64 {
        u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second)
    }

    fn from_total_seconds(total: u64) -> Self {
        Timestamp {
            hour: (total / 3600) as u32,
            minute: (total % 3600 / 60) as u32,
            second: (total % 60) as u32,
        }
    }

    /// Advance by `n` seconds, carrying into minutes and hours (no 24h wrap).
    pub fn add_seconds(self, n: u32) -> Self {
        Timestamp::from_total_seconds(self.total_seconds() + u64::from(n))
    }

    /// Move back by `n` seconds; `None` if the result would precede `0:00:00`.
    pub fn checked_sub_seconds(self, n: u32) -> Option<Self> {
        self.total_seconds()
            .checked_sub(u64::from(n))
            .map(Timestamp::from_total_seconds)
    }

    /// Move back by `n` seconds, clamping at `0:00:00`. Used for pre-roll:
    /// a peak near the start of a VOD links to the video start.
    pub fn saturating_sub_seconds(self, n: u32) -> Self {
        self.checked_sub_seconds(n)
            .unwrap_or(Timestamp { hour: 0, minute: 0, second: 0 })
    }

    /// Render the `HhMMmSSs` offset form used in player deep links.
    pub fn to_url_offset(self) -> String {
        format!("{}h{:02}m{:02}s", self.hour, self.minute, self.second)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32) -> Timestamp {
        Timestamp::new(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(Timestamp::parse("1:02:03"), Some(ts(1, 2, 3)));
        assert_eq!(Timestamp::parse("12:59:59"), Some(ts(12, 59, 59)));
        assert_eq!(Timestamp::parse("0:00:00"), Some(ts(0, 0, 0)));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(Timestamp::parse("1:60:00"), None);
        assert_eq!(Timestamp::parse("1:00:99"), None);
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Timestamp::parse("1:02"), None);
        assert_eq!(Timestamp::parse("abc"), None);
        assert_eq!(Timestamp::parse(""), None);
    }

    #[test]
    fn test_display_unpadded_hour() {
        assert_eq!(ts(1, 2, 3).to_string(), "1:02:03");
        assert_eq!(ts(0, 0, 9).to_string(), "0:00:09");
        assert_eq!(ts(25, 10, 0).to_string(), "25:10:00");
    }

    #[test]
    fn test_add_seconds_carries() {
        assert_eq!(ts(0, 0, 55).add_seconds(10), ts(0, 1, 5));
        assert_eq!(ts(0, 59, 59).add_seconds(1), ts(1, 0, 0));
        // No wrap at 24h
        assert_eq!(ts(23, 59, 59).add_seconds(2), ts(24, 0, 1));
    }

    #[test]
    fn test_sub_seconds_borrows() {
        assert_eq!(ts(1, 0, 0).checked_sub_seconds(1), Some(ts(0, 59, 59)));
        assert_eq!(ts(0, 1, 5).checked_sub_seconds(10), Some(ts(0, 0, 55)));
    }

    #[test]
    fn test_sub_seconds_underflow() {
        assert_eq!(ts(0, 0, 10).checked_sub_seconds(30), None);
        assert_eq!(ts(0, 0, 10).saturating_sub_seconds(30), ts(0, 0, 0));
    }

    #[test]
    fn test_add_sub_round_trip() {
        for &(h, m, s) in &[(0, 0, 0), (0, 59, 59), (3, 12, 45), (100, 0, 1)] {
            for &n in &[0u32, 1, 59, 60, 3600, 86_399] {
                let t = ts(h, m, s);
                assert_eq!(t.add_seconds(n).checked_sub_seconds(n), Some(t));
            }
        }
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(ts(2, 0, 0) > ts(1, 59, 59));
        assert!(ts(0, 10, 0) < ts(0, 10, 1));
        // Orders correctly even where string comparison would not
        assert!(ts(100, 0, 0) > ts(99, 59, 59));
    }

    #[test]
    fn test_url_offset() {
        assert_eq!(ts(1, 2, 3).to_url_offset(), "1h02m03s");
        assert_eq!(ts(0, 45, 9).to_url_offset(), "0h45m09s");
    }
}
