//! Time utilities

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Parse a duration such as `3600`, `45s`, `90m`, `24h` or `7d`.
///
/// A bare number is read as seconds.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (value, unit) = input.split_at(split);
    let value: u64 = value.parse().ok()?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    value.checked_mul(multiplier).map(Duration::from_secs)
}

/// Check if `at` lies between two datetimes (inclusive)
pub fn is_between(at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    at >= start && at <= end
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3600"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("90m"), Some(Duration::from_secs(90 * 60)));
        assert_eq!(parse_duration(" 24h "), Some(Duration::from_secs(24 * 3600)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(7 * 86400)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn test_is_between_is_inclusive() {
        let start = Utc::now();
        let end = start + ChronoDuration::hours(1);

        assert!(is_between(start, start, end));
        assert!(is_between(end, start, end));
        assert!(!is_between(end + ChronoDuration::seconds(1), start, end));
    }
}
