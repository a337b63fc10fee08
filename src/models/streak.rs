//! Streak and submission aggregates derived from a submission calendar.
//!
//! The calendar arrives from the upstream stats API as a map of
//! day-boundary Unix timestamps (decimal strings) to submission counts.
//! It is read once per request; nothing here persists between requests.

use std::collections::HashMap;

use crate::time_utils::SECS_PER_DAY;

/// Day-key (seconds since epoch, day-truncated, decimal string) to
/// submission count, exactly as the upstream provider encodes it.
pub type SubmissionCalendar = HashMap<String, u64>;

/// Derived streak and submission totals.
///
/// `current_streak <= max_streak` holds for every input: the current
/// streak is one of the runs the max-streak scan considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakResult {
    /// Consecutive active days ending at the most recent present key.
    pub current_streak: u32,
    /// Longest run of consecutive active days anywhere in the calendar.
    pub max_streak: u32,
    /// Distinct days with a positive submission count.
    pub total_active_days: u32,
    /// Sum of all submission counts, zero-valued days included.
    pub total_submissions: u64,
    /// Day index (days since epoch) of the most recent active day.
    pub last_active_day: Option<i64>,
}

impl StreakResult {
    /// Compute all aggregates in one pass over the sorted calendar.
    ///
    /// The current-streak scan anchors at the most recent key present in
    /// the calendar, not at wall-clock "today": a trailing key with count
    /// zero breaks the streak immediately, and a calendar that simply
    /// omits recent days is scanned from its newest entry. Keys that do
    /// not parse as integers are ignored.
    pub fn from_calendar(calendar: &SubmissionCalendar) -> Self {
        let mut days: Vec<(i64, u64)> = calendar
            .iter()
            .filter_map(|(key, &count)| {
                key.trim()
                    .parse::<i64>()
                    .ok()
                    .map(|secs| (secs.div_euclid(SECS_PER_DAY), count))
            })
            .collect();
        days.sort_unstable_by_key(|&(day, _)| day);

        let total_submissions: u64 = days.iter().map(|&(_, count)| count).sum();
        let total_active_days = days.iter().filter(|&&(_, count)| count > 0).count() as u32;
        let last_active_day = days
            .iter()
            .rev()
            .find(|&&(_, count)| count > 0)
            .map(|&(day, _)| day);

        // Max streak: ascending walk. A zero-count day and a gap of more
        // than one day both end the run; the final run is flushed after
        // the loop, not only at detected breaks.
        let mut max_streak: u32 = 0;
        let mut run: u32 = 0;
        let mut prev_active_day: Option<i64> = None;
        for &(day, count) in &days {
            if count == 0 {
                max_streak = max_streak.max(run);
                run = 0;
                prev_active_day = None;
                continue;
            }
            match prev_active_day {
                Some(prev) if day - prev == 1 => run += 1,
                _ => {
                    max_streak = max_streak.max(run);
                    run = 1;
                }
            }
            prev_active_day = Some(day);
        }
        max_streak = max_streak.max(run);

        // Current streak: descending walk from the most recent key.
        let mut current_streak: u32 = 0;
        let mut newest_first = days.iter().rev().peekable();
        while let Some(&(day, count)) = newest_first.next() {
            if count == 0 {
                break;
            }
            current_streak += 1;
            if let Some(&&(older_day, _)) = newest_first.peek() {
                if day - older_day > 1 {
                    break;
                }
            }
        }

        Self {
            current_streak,
            max_streak,
            total_active_days,
            total_submissions,
            last_active_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a calendar from (day index, count) pairs.
    fn calendar(entries: &[(i64, u64)]) -> SubmissionCalendar {
        entries
            .iter()
            .map(|&(day, count)| ((day * SECS_PER_DAY).to_string(), count))
            .collect()
    }

    #[test]
    fn test_empty_calendar_is_all_zero() {
        let result = StreakResult::from_calendar(&SubmissionCalendar::new());

        assert_eq!(result, StreakResult::default());
    }

    #[test]
    fn test_single_active_day() {
        let result = StreakResult::from_calendar(&calendar(&[(19_737, 4)]));

        assert_eq!(result.current_streak, 1);
        assert_eq!(result.max_streak, 1);
        assert_eq!(result.total_active_days, 1);
        assert_eq!(result.total_submissions, 4);
        assert_eq!(result.last_active_day, Some(19_737));
    }

    #[test]
    fn test_zero_count_day_breaks_runs() {
        // day0: 3, day1: 2, day2: 0, day3: 5 (consecutive days)
        let result = StreakResult::from_calendar(&calendar(&[
            (100, 3),
            (101, 2),
            (102, 0),
            (103, 5),
        ]));

        assert_eq!(result.max_streak, 2); // day0-day1 run
        assert_eq!(result.current_streak, 1); // day3 only, day2 breaks it
        assert_eq!(result.total_active_days, 3);
        assert_eq!(result.total_submissions, 10);
    }

    #[test]
    fn test_two_day_gap_breaks_chain() {
        // Active days two days apart are isolated length-1 runs.
        let result = StreakResult::from_calendar(&calendar(&[(100, 1), (102, 1)]));

        assert_eq!(result.max_streak, 1);
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.total_active_days, 2);
    }

    #[test]
    fn test_zero_count_on_most_recent_day_zeroes_current_streak() {
        // "Today" present with count 0, "yesterday" active: the scan
        // anchors at the most recent key, so the streak is broken.
        let result = StreakResult::from_calendar(&calendar(&[(200, 3), (201, 0)]));

        assert_eq!(result.current_streak, 0);
        assert_eq!(result.max_streak, 1);
        assert_eq!(result.last_active_day, Some(200));
    }

    #[test]
    fn test_current_streak_spans_consecutive_trailing_days() {
        let result = StreakResult::from_calendar(&calendar(&[
            (100, 1),
            (103, 2),
            (104, 1),
            (105, 7),
        ]));

        assert_eq!(result.current_streak, 3);
        assert_eq!(result.max_streak, 3);
        assert_eq!(result.total_submissions, 11);
    }

    #[test]
    fn test_current_streak_never_exceeds_max_streak() {
        let cases: Vec<Vec<(i64, u64)>> = vec![
            vec![],
            vec![(10, 0)],
            vec![(10, 1), (11, 1), (12, 1)],
            vec![(10, 1), (11, 1), (13, 1)],
            vec![(10, 5), (11, 0), (12, 5), (13, 5)],
            vec![(10, 1), (12, 0), (14, 2), (15, 2), (16, 0)],
        ];

        for entries in cases {
            let result = StreakResult::from_calendar(&calendar(&entries));
            assert!(
                result.current_streak <= result.max_streak,
                "violated for {:?}: {:?}",
                entries,
                result
            );
        }
    }

    #[test]
    fn test_totals_are_independent_of_streaks() {
        let result = StreakResult::from_calendar(&calendar(&[
            (10, 2),
            (15, 0),
            (20, 3),
            (30, 0),
            (40, 5),
        ]));

        assert_eq!(result.total_active_days, 3);
        assert_eq!(result.total_submissions, 10);
    }

    #[test]
    fn test_unparseable_keys_are_ignored() {
        let mut cal = calendar(&[(100, 2)]);
        cal.insert("not-a-number".to_string(), 99);

        let result = StreakResult::from_calendar(&cal);

        assert_eq!(result.total_submissions, 2);
        assert_eq!(result.total_active_days, 1);
    }
}
