//! Unlock ledger
//!
//! Records unlocks on the progress aggregate so they persist after the
//! underlying requirement lapses. Entries are only ever added or bumped.

use chrono::{DateTime, FixedOffset};

use crate::achievements::{Achievement, AchievementEvaluator};
use crate::progress::{UnlockedAchievement, UserMeditationProgress};

/// Record every newly satisfied achievement
///
/// Returns the updated progress and the achievements unlocked by this call.
/// Repeatable achievements that are already recorded get their
/// `times_unlocked` bumped instead of a second entry.
pub fn record_unlocks(
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> (UserMeditationProgress, Vec<&'static Achievement>) {
    record_unlocks_with(&AchievementEvaluator::builtin(), progress, now)
}

pub fn record_unlocks_with<'a>(
    evaluator: &AchievementEvaluator<'a>,
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> (UserMeditationProgress, Vec<&'a Achievement>) {
    let new = evaluator.check_new(progress, &progress.unlocked_achievements);
    if new.is_empty() {
        return (progress.clone(), new);
    }

    let mut next = progress.clone();
    for achievement in &new {
        match next
            .unlocked_achievements
            .iter_mut()
            .find(|u| u.achievement_id == achievement.id)
        {
            Some(entry) => {
                entry.times_unlocked += 1;
                entry.unlocked_at = now;
            }
            None => next.unlocked_achievements.push(UnlockedAchievement {
                achievement_id: achievement.id.to_string(),
                unlocked_at: now,
                times_unlocked: 1,
            }),
        }
        tracing::info!("{} unlocked achievement {}", next.user_id, achievement.id);
    }
    next.last_updated = now;
    (next, new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;

    #[test]
    fn test_unlocks_are_recorded_once() {
        let now = DateTime::parse_from_rfc3339("2026-02-01T10:00:00+00:00").unwrap();
        let mut progress = UserMeditationProgress::new("user", now);
        progress
            .completed_sessions
            .push(completion_at(1, "2026-02-01T09:00:00+00:00"));

        let (progress, new) = record_unlocks(&progress, now);
        assert_eq!(new.len(), 1);
        assert_eq!(progress.unlocked_achievements.len(), 1);
        assert_eq!(progress.unlocked_achievements[0].achievement_id, "first_session");

        let (again, new) = record_unlocks(&progress, now);
        assert!(new.is_empty());
        assert_eq!(again, progress);
    }
}
