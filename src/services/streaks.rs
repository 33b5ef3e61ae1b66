use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::activity::{ActivityDay, ActivityStatistics};

/// Summarise a contribution calendar relative to `today`.
///
/// Input order does not matter. A date missing between two records counts
/// as a zero day, so it breaks a run. Records dated after `today` are skipped
/// by the current-streak walk but still feed `longest_streak` and `best_day`.
/// Only gaps between records count: the current streak starts at the latest
/// record not after `today`, however far back that record is.
pub fn compute_statistics(days: &[ActivityDay], today: NaiveDate) -> ActivityStatistics {
    if days.is_empty() {
        return ActivityStatistics::default();
    }

    let sorted = chronological(days);

    let mut longest_streak = 0u32;
    let mut best_day = 0u32;
    let mut streak = 0u32;
    let mut prev_date: Option<NaiveDate> = None;

    for day in &sorted {
        best_day = best_day.max(day.count);

        if day.count == 0 {
            streak = 0;
        } else if prev_date.map_or(true, |prev| is_next_day(prev, day.date)) {
            streak += 1;
        } else {
            streak = 1;
        }
        longest_streak = longest_streak.max(streak);
        prev_date = Some(day.date);
    }

    // Walk back from the latest record not after today
    let mut current_streak = 0u32;
    let mut later: Option<NaiveDate> = None;

    for day in sorted.iter().rev().filter(|d| d.date <= today) {
        if day.count == 0 {
            break;
        }
        if let Some(later) = later {
            if !is_next_day(day.date, later) {
                break;
            }
        }
        current_streak += 1;
        later = Some(day.date);
    }

    ActivityStatistics {
        current_streak,
        longest_streak,
        best_day,
        days_considered: sorted.len() as u32,
    }
}

/// Ascending by date, one entry per date. Duplicates keep the larger count.
fn chronological(days: &[ActivityDay]) -> Vec<&ActivityDay> {
    let mut by_date: BTreeMap<NaiveDate, &ActivityDay> = BTreeMap::new();

    for day in days {
        by_date
            .entry(day.date)
            .and_modify(|existing| {
                tracing::debug!(date = %day.date, "Duplicate activity date, keeping larger count");
                if day.count > existing.count {
                    *existing = day;
                }
            })
            .or_insert(day);
    }

    by_date.into_values().collect()
}

fn is_next_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn day(d: &str, count: u32) -> ActivityDay {
        ActivityDay {
            date: date(d),
            count,
            color_hint: "#ebedf0".into(),
        }
    }

    fn stats(current: u32, longest: u32, best: u32, considered: u32) -> ActivityStatistics {
        ActivityStatistics {
            current_streak: current,
            longest_streak: longest,
            best_day: best,
            days_considered: considered,
        }
    }

    #[test]
    fn test_empty_calendar_is_all_zero() {
        for today in ["1999-12-31", "2024-01-01", "2030-06-15"] {
            assert_eq!(compute_statistics(&[], date(today)), ActivityStatistics::default());
        }
    }

    #[test]
    fn test_zero_day_breaks_current_streak() {
        let days = vec![
            day("2024-01-01", 5),
            day("2024-01-02", 3),
            day("2024-01-03", 0),
            day("2024-01-04", 2),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-04")), stats(1, 2, 5, 4));
    }

    #[test]
    fn test_single_zero_day() {
        let days = vec![day("2024-01-01", 0)];
        assert_eq!(compute_statistics(&days, date("2024-01-01")), stats(0, 0, 0, 1));
    }

    #[test]
    fn test_unbroken_run_ending_today() {
        let days = vec![
            day("2024-01-01", 1),
            day("2024-01-02", 1),
            day("2024-01-03", 1),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-03")), stats(3, 3, 1, 3));
    }

    #[test]
    fn test_future_day_is_skipped_for_current_streak() {
        let days = vec![
            day("2024-01-01", 1),
            day("2024-01-02", 1),
            day("2024-01-05", 9),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-02")), stats(2, 2, 9, 3));
    }

    #[test]
    fn test_future_zero_day_does_not_reset_current_streak() {
        let days = vec![
            day("2024-01-01", 4),
            day("2024-01-02", 4),
            day("2024-01-03", 0),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-02")).current_streak, 2);
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let unsorted = vec![
            day("2024-01-03", 0),
            day("2024-01-01", 2),
            day("2024-01-02", 2),
        ];
        let mut sorted = unsorted.clone();
        sorted.sort_by_key(|d| d.date);

        let today = date("2024-01-03");
        assert_eq!(compute_statistics(&unsorted, today), stats(0, 2, 2, 3));
        assert_eq!(compute_statistics(&unsorted, today), compute_statistics(&sorted, today));
    }

    #[test]
    fn test_permutations_give_identical_results() {
        let days = vec![
            day("2024-02-27", 3),
            day("2024-02-28", 0),
            day("2024-02-29", 7),
            day("2024-03-01", 1),
            day("2024-03-02", 2),
        ];
        let today = date("2024-03-02");
        let expected = compute_statistics(&days, today);
        assert_eq!(expected, stats(3, 3, 7, 5));

        let mut rotated = days.clone();
        for _ in 0..days.len() {
            rotated.rotate_left(1);
            assert_eq!(compute_statistics(&rotated, today), expected);
        }
        let reversed: Vec<_> = days.iter().rev().cloned().collect();
        assert_eq!(compute_statistics(&reversed, today), expected);
    }

    #[test]
    fn test_missing_date_breaks_runs() {
        let days = vec![
            day("2024-01-01", 1),
            day("2024-01-02", 1),
            day("2024-01-04", 1),
            day("2024-01-05", 1),
        ];
        let result = compute_statistics(&days, date("2024-01-05"));
        assert_eq!(result.current_streak, 2);
        assert_eq!(result.longest_streak, 2);
    }

    #[test]
    fn test_current_streak_need_not_touch_today() {
        let days = vec![day("2024-01-01", 1), day("2024-01-02", 6)];
        let result = compute_statistics(&days, date("2024-03-01"));
        assert_eq!(result.current_streak, 2);
    }

    #[test]
    fn test_all_future_days_still_count_for_longest() {
        let days = vec![
            day("2024-05-01", 2),
            day("2024-05-02", 2),
            day("2024-05-03", 2),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-01")), stats(0, 3, 2, 3));
    }

    #[test]
    fn test_longest_covers_current_run_when_past() {
        let days = vec![
            day("2024-01-01", 1),
            day("2024-01-02", 0),
            day("2024-01-03", 1),
            day("2024-01-04", 1),
            day("2024-01-05", 1),
        ];
        let result = compute_statistics(&days, date("2024-01-05"));
        assert_eq!(result.current_streak, 3);
        assert!(result.longest_streak >= result.current_streak);
    }

    #[test]
    fn test_duplicate_dates_are_coalesced() {
        let days = vec![
            day("2024-01-01", 1),
            day("2024-01-02", 0),
            day("2024-01-02", 4),
            day("2024-01-03", 1),
        ];
        assert_eq!(compute_statistics(&days, date("2024-01-03")), stats(3, 3, 4, 3));
    }

    #[test]
    fn test_all_zero_calendar() {
        let days = vec![day("2024-01-01", 0), day("2024-01-02", 0)];
        assert_eq!(compute_statistics(&days, date("2024-01-02")), stats(0, 0, 0, 2));
    }
}
