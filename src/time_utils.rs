// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Seconds in a whole day, the granularity of submission calendar keys.
pub const SECS_PER_DAY: i64 = 86_400;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a day index (whole days since the Unix epoch) as `YYYY-MM-DD`.
pub fn format_day(day_index: i64) -> Option<String> {
    DateTime::from_timestamp(day_index * SECS_PER_DAY, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day() {
        // 2024-01-15 is 19737 days after the epoch
        assert_eq!(format_day(19_737).as_deref(), Some("2024-01-15"));
        assert_eq!(format_day(0).as_deref(), Some("1970-01-01"));
    }
}
