//! Derived summary counters
//!
//! Totals, streaks, XP and level are all functions of history. They are
//! rebuilt here in one place instead of being bumped incrementally.

use chrono::NaiveDate;

use crate::achievements::AchievementEvaluator;
use crate::leveling::calculate_level_from_xp_with;
use crate::progress::{
    calculate_current_streak, calculate_longest_streak, SessionCompletion, UserMeditationProgress,
};

/// XP from completions plus reward XP of every unlocked achievement
pub fn total_experience(progress: &UserMeditationProgress) -> u32 {
    session_experience(progress).saturating_add(AchievementEvaluator::builtin().total_xp(progress))
}

fn session_experience(progress: &UserMeditationProgress) -> u32 {
    progress
        .completed_sessions
        .iter()
        .fold(0u32, |acc, c| acc.saturating_add(c.xp_earned))
}

/// Rebuild every summary counter from history
pub fn refresh_counters(progress: &UserMeditationProgress, today: NaiveDate) -> UserMeditationProgress {
    refresh_counters_with(progress, today, &AchievementEvaluator::builtin())
}

/// Rebuild every summary counter with a specific catalog and config
///
/// Level feeds mastery achievements, whose rewards feed XP, which feeds
/// level. Starting from the minimum level and re-evaluating until the level
/// stops moving settles this; each pass can only raise the level, so it
/// terminates within `max_level` passes.
pub fn refresh_counters_with(
    progress: &UserMeditationProgress,
    today: NaiveDate,
    evaluator: &AchievementEvaluator<'_>,
) -> UserMeditationProgress {
    let config = evaluator.config();
    let history = &progress.completed_sessions;

    let mut next = progress.clone();
    next.total_sessions = history.len() as u32;
    next.total_meditation_minutes = total_minutes(history);
    next.current_streak = calculate_current_streak(history, today);
    next.longest_streak = calculate_longest_streak(history);
    next.last_meditation_date = history.iter().map(|c| c.completed_on()).max();

    let session_xp = session_experience(progress);
    next.current_level = config.min_level;
    for _ in 0..=config.max_level {
        next.experience_points = session_xp.saturating_add(evaluator.total_xp(&next));
        let level = config.clamp_level(calculate_level_from_xp_with(config, next.experience_points));
        if level == next.current_level {
            break;
        }
        next.current_level = level;
    }

    tracing::debug!(
        "Refreshed counters for {}: {} sessions, {} xp, level {}",
        next.user_id,
        next.total_sessions,
        next.experience_points,
        next.current_level
    );
    next
}

/// Sum of actual durations in whole minutes (floored)
fn total_minutes(history: &[SessionCompletion]) -> u32 {
    let seconds: u64 = history.iter().map(|c| c.actual_duration_seconds as u64).sum();
    (seconds / 60).min(u32::MAX as u64) as u32
}

/// Append a completion and rebuild the counters
///
/// A completion of one of the user's custom sessions also bumps that
/// session's `times_completed`.
pub fn record_completion(
    progress: &UserMeditationProgress,
    completion: SessionCompletion,
    today: NaiveDate,
) -> UserMeditationProgress {
    let mut next = progress.clone();
    if let Some(custom) = next
        .custom_sessions
        .iter_mut()
        .find(|s| s.id == completion.session_id)
    {
        custom.times_completed += 1;
    }
    next.last_updated = completion.completed_at;
    next.completed_sessions.push(completion);
    refresh_counters(&next, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;
    use crate::core::ScoringConfig;
    use chrono::DateTime;

    fn fresh() -> UserMeditationProgress {
        let now = DateTime::parse_from_rfc3339("2026-01-01T08:00:00+00:00").unwrap();
        UserMeditationProgress::new("user", now)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_history_is_level_one() {
        let progress = refresh_counters(&fresh(), day("2026-01-01"));
        assert_eq!(progress.total_sessions, 0);
        assert_eq!(progress.total_meditation_minutes, 0);
        assert_eq!(progress.experience_points, 0);
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.last_meditation_date, None);
    }

    #[test]
    fn test_first_completion_counts_reward_xp() {
        let completion = completion_at(1, "2026-01-01T07:00:00+00:00");
        let progress = record_completion(&fresh(), completion, day("2026-01-01"));

        assert_eq!(progress.total_sessions, 1);
        assert_eq!(progress.total_meditation_minutes, 10);
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.longest_streak, 1);
        // 25 from the session, 10 from first_session
        assert_eq!(progress.experience_points, 35);
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.last_meditation_date, Some(day("2026-01-01")));
    }

    #[test]
    fn test_level_settles_with_mastery_rewards() {
        let mut progress = fresh();
        for i in 0..10 {
            progress.completed_sessions.push(completion_at(
                i + 1,
                &format!("2026-01-{:02}T07:00:00+00:00", i + 1),
            ));
        }
        let progress = refresh_counters(&progress, day("2026-01-10"));

        // 250 session xp + first_session 10 + ten_sessions 50 + streak_3 30
        // + streak_7 100 + time_dedication_100 100 + perfectionist 300
        // = 840 -> level 2, which unlocks level_up (+50) -> 890, still level 2
        assert_eq!(progress.current_level, 2);
        assert_eq!(progress.experience_points, 890);
        assert_eq!(progress.current_streak, 10);
    }

    #[test]
    fn test_minutes_are_floored() {
        let mut progress = fresh();
        let mut c = completion_at(1, "2026-01-01T07:00:00+00:00");
        c.actual_duration_seconds = 119;
        progress.completed_sessions.push(c);
        let progress = refresh_counters(&progress, day("2026-01-01"));
        assert_eq!(progress.total_meditation_minutes, 1);
    }

    #[test]
    fn test_swapped_level_bounds_do_not_panic() {
        let config = ScoringConfig { min_level: 3, max_level: 2, ..Default::default() };
        let evaluator = AchievementEvaluator::new(crate::achievements::ACHIEVEMENTS, config);
        let mut progress = fresh();
        progress
            .completed_sessions
            .push(completion_at(1, "2026-01-01T07:00:00+00:00"));
        let progress = refresh_counters_with(&progress, day("2026-01-01"), &evaluator);
        assert!((2..=3).contains(&progress.current_level));
        assert_eq!(progress.total_sessions, 1);
    }
}
