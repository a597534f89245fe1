//! Daily streak computation
//!
//! A streak is a run of consecutive calendar days with at least one
//! completion. Days are taken in each completion's recorded local offset.

use chrono::NaiveDate;

use crate::progress::SessionCompletion;

/// Unique meditation days, ascending
pub fn meditation_days(completions: &[SessionCompletion]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = completions.iter().map(|c| c.completed_on()).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Consecutive days ending today
///
/// If the user has not meditated yet today the streak is still alive as long
/// as yesterday counts, so the run is measured back from yesterday.
pub fn calculate_current_streak(completions: &[SessionCompletion], today: NaiveDate) -> u32 {
    let days = meditation_days(completions);
    let Some(&last) = days.last() else {
        return 0;
    };

    let mut expected = if last == today {
        today
    } else if today.pred_opt() == Some(last) {
        last
    } else {
        return 0;
    };

    let mut streak = 0;
    for day in days.iter().rev() {
        if *day != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive days ever
pub fn calculate_longest_streak(completions: &[SessionCompletion]) -> u32 {
    let days = meditation_days(completions);
    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for pair in days.windows(2) {
        if pair[0].succ_opt() == Some(pair[1]) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

pub fn has_meditated_today(completions: &[SessionCompletion], today: NaiveDate) -> bool {
    completions.iter().any(|c| c.completed_on() == today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(calculate_current_streak(&[], day("2025-03-10")), 0);
        assert_eq!(calculate_longest_streak(&[]), 0);
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let history = vec![
            completion_at(1, "2025-03-08T08:00:00+00:00"),
            completion_at(1, "2025-03-09T08:00:00+00:00"),
            completion_at(2, "2025-03-09T20:00:00+00:00"),
            completion_at(1, "2025-03-10T08:00:00+00:00"),
        ];
        assert_eq!(calculate_current_streak(&history, day("2025-03-10")), 3);
    }

    #[test]
    fn test_streak_survives_until_end_of_next_day() {
        let history = vec![
            completion_at(1, "2025-03-08T08:00:00+00:00"),
            completion_at(1, "2025-03-09T08:00:00+00:00"),
        ];
        assert_eq!(calculate_current_streak(&history, day("2025-03-10")), 2);
        assert_eq!(calculate_current_streak(&history, day("2025-03-11")), 0);
    }

    #[test]
    fn test_gap_breaks_streak() {
        let history = vec![
            completion_at(1, "2025-03-05T08:00:00+00:00"),
            completion_at(1, "2025-03-06T08:00:00+00:00"),
            completion_at(1, "2025-03-09T08:00:00+00:00"),
            completion_at(1, "2025-03-10T08:00:00+00:00"),
        ];
        assert_eq!(calculate_current_streak(&history, day("2025-03-10")), 2);
        assert_eq!(calculate_longest_streak(&history), 2);
    }

    #[test]
    fn test_longest_streak_across_history() {
        let history = vec![
            completion_at(1, "2025-01-01T08:00:00+00:00"),
            completion_at(1, "2025-01-02T08:00:00+00:00"),
            completion_at(1, "2025-01-03T08:00:00+00:00"),
            completion_at(1, "2025-01-04T08:00:00+00:00"),
            completion_at(1, "2025-02-01T08:00:00+00:00"),
        ];
        assert_eq!(calculate_longest_streak(&history), 4);
        assert!(has_meditated_today(&history, day("2025-02-01")));
        assert!(!has_meditated_today(&history, day("2025-02-02")));
    }

    #[test]
    fn test_local_offset_decides_the_day() {
        // 23:30 in UTC-5 is already the next day in UTC
        let history = vec![completion_at(1, "2025-03-09T23:30:00-05:00")];
        assert!(has_meditated_today(&history, day("2025-03-09")));
    }
}
