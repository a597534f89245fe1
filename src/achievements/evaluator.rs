//! Achievement evaluation over a progress snapshot
//!
//! All functions are pure. An achievement counts as unlocked when its
//! requirement currently holds or when the unlock ledger on the progress
//! aggregate already records it, so a broken streak never takes a badge away.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::Serialize;

use crate::achievements::{Achievement, Category, Rarity, ACHIEVEMENTS};
use crate::core::ScoringConfig;
use crate::progress::{UnlockedAchievement, UserMeditationProgress};

/// Tracker reading for one achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub achievement_id: &'static str,
    pub current: u32,
    pub target: u32,
    pub unit: &'static str,
    /// `round(current / target * 100)`, capped at 100
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub total: u32,
    pub unlocked: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_achievements: u32,
    pub unlocked_count: u32,
    /// Reward XP of the whole catalog
    pub total_xp: u32,
    pub earned_xp: u32,
    pub completion_percentage: u32,
    pub by_category: BTreeMap<Category, BucketCount>,
    pub by_rarity: BTreeMap<Rarity, BucketCount>,
}

#[derive(Debug, Clone)]
pub struct AlmostUnlocked<'a> {
    pub achievement: &'a Achievement,
    pub progress: AchievementProgress,
}

/// Evaluates a catalog against progress snapshots
pub struct AchievementEvaluator<'a> {
    catalog: &'a [Achievement],
    config: ScoringConfig,
}

impl AchievementEvaluator<'static> {
    /// Built-in catalog with default weights
    pub fn builtin() -> Self {
        Self::new(ACHIEVEMENTS, ScoringConfig::default())
    }
}

impl<'a> AchievementEvaluator<'a> {
    pub fn new(catalog: &'a [Achievement], config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &'a [Achievement] {
        self.catalog
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Malformed requirements are logged and treated as not met
    fn requirement_met(&self, achievement: &Achievement, progress: &UserMeditationProgress) -> bool {
        match achievement.requirement.is_met(progress) {
            Ok(met) => met,
            Err(e) => {
                tracing::warn!("Error checking achievement {}: {}", achievement.id, e);
                false
            }
        }
    }

    pub fn is_unlocked(&self, achievement: &Achievement, progress: &UserMeditationProgress) -> bool {
        progress.has_unlock_record(achievement.id) || self.requirement_met(achievement, progress)
    }

    /// Achievements whose requirement holds and that are not yet in
    /// `previously_unlocked` (repeatable ones are always re-reported)
    pub fn check_new(
        &self,
        progress: &UserMeditationProgress,
        previously_unlocked: &[UnlockedAchievement],
    ) -> Vec<&'a Achievement> {
        let seen: AHashSet<&str> = previously_unlocked
            .iter()
            .map(|u| u.achievement_id.as_str())
            .collect();

        self.catalog
            .iter()
            .filter(|a| a.repeatable || !seen.contains(a.id))
            .filter(|a| self.requirement_met(a, progress))
            .collect()
    }

    /// Unlocked achievements in catalog order
    pub fn unlocked(&self, progress: &UserMeditationProgress) -> Vec<&'a Achievement> {
        self.catalog
            .iter()
            .filter(|a| self.is_unlocked(a, progress))
            .collect()
    }

    /// Tracker reading, or `None` when the achievement has no tracker
    pub fn progress_toward(
        &self,
        achievement: &Achievement,
        progress: &UserMeditationProgress,
    ) -> Option<AchievementProgress> {
        let unit = achievement.tracker_unit?;
        let tracker = match achievement.requirement.tracker(progress, unit) {
            Ok(tracker) => tracker,
            Err(e) => {
                tracing::warn!("Error tracking progress for {}: {}", achievement.id, e);
                return None;
            }
        };

        let ratio = tracker.current as f64 / tracker.target as f64;
        let percentage = (ratio * 100.0).round().min(100.0) as u32;

        Some(AchievementProgress {
            achievement_id: achievement.id,
            current: tracker.current,
            target: tracker.target,
            unit: tracker.unit,
            percentage,
        })
    }

    /// Reward XP of every unlocked achievement
    pub fn total_xp(&self, progress: &UserMeditationProgress) -> u32 {
        self.unlocked(progress)
            .iter()
            .fold(0u32, |acc, a| acc.saturating_add(a.reward_xp))
    }

    pub fn stats(&self, progress: &UserMeditationProgress) -> AchievementStats {
        let unlocked: AHashSet<&str> = self.unlocked(progress).iter().map(|a| a.id).collect();

        let mut by_category: BTreeMap<Category, BucketCount> =
            Category::ALL.iter().map(|c| (*c, BucketCount::default())).collect();
        let mut by_rarity: BTreeMap<Rarity, BucketCount> =
            Rarity::ALL.iter().map(|r| (*r, BucketCount::default())).collect();

        let mut total_xp = 0u32;
        let mut earned_xp = 0u32;
        for achievement in self.catalog {
            let is_unlocked = unlocked.contains(achievement.id);
            total_xp = total_xp.saturating_add(achievement.reward_xp);
            if is_unlocked {
                earned_xp = earned_xp.saturating_add(achievement.reward_xp);
            }
            for bucket in [
                by_category.entry(achievement.category).or_default(),
                by_rarity.entry(achievement.rarity).or_default(),
            ] {
                bucket.total += 1;
                if is_unlocked {
                    bucket.unlocked += 1;
                }
            }
        }

        let total_achievements = self.catalog.len() as u32;
        let unlocked_count = unlocked.len() as u32;
        let completion_percentage = if total_achievements == 0 {
            0
        } else {
            (unlocked_count as f64 / total_achievements as f64 * 100.0).round() as u32
        };

        AchievementStats {
            total_achievements,
            unlocked_count,
            total_xp,
            earned_xp,
            completion_percentage,
            by_category,
            by_rarity,
        }
    }

    /// Locked, trackable achievements at or past the "almost" threshold,
    /// closest to done first
    pub fn almost_unlocked(&self, progress: &UserMeditationProgress) -> Vec<AlmostUnlocked<'a>> {
        let threshold = self.config.almost_unlocked_percentage;
        let mut almost: Vec<AlmostUnlocked<'a>> = self
            .catalog
            .iter()
            .filter(|a| !self.is_unlocked(a, progress))
            .filter_map(|a| {
                self.progress_toward(a, progress)
                    .filter(|p| p.percentage >= threshold)
                    .map(|p| AlmostUnlocked {
                        achievement: a,
                        progress: p,
                    })
            })
            .collect();

        almost.sort_by(|a, b| b.progress.percentage.cmp(&a.progress.percentage));
        almost
    }

    /// Score used to rank locked achievements for the user to work on next
    pub fn recommendation_score(
        &self,
        achievement: &Achievement,
        progress: &UserMeditationProgress,
    ) -> f64 {
        let tracked = self
            .progress_toward(achievement, progress)
            .map_or(0.0, |p| p.percentage as f64);
        let rarity = self.config.rarity_weight(achievement.rarity);
        let reward = (achievement.reward_xp as f64 / self.config.reward_xp_divisor)
            .min(self.config.reward_xp_cap);
        tracked + rarity + reward
    }

    /// Top `limit` locked, non-hidden achievements; ties keep catalog order
    pub fn recommended(&self, progress: &UserMeditationProgress, limit: usize) -> Vec<&'a Achievement> {
        let mut scored: Vec<(&'a Achievement, f64)> = self
            .catalog
            .iter()
            .filter(|a| !a.hidden && !self.is_unlocked(a, progress))
            .map(|a| (a, self.recommendation_score(a, progress)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(limit).map(|(a, _)| a).collect()
    }
}

pub fn check_new_achievements(
    progress: &UserMeditationProgress,
    previously_unlocked: &[UnlockedAchievement],
) -> Vec<&'static Achievement> {
    AchievementEvaluator::builtin().check_new(progress, previously_unlocked)
}

pub fn get_unlocked_achievements(progress: &UserMeditationProgress) -> Vec<&'static Achievement> {
    AchievementEvaluator::builtin().unlocked(progress)
}

pub fn get_progress_toward_achievement(
    achievement: &Achievement,
    progress: &UserMeditationProgress,
) -> Option<AchievementProgress> {
    AchievementEvaluator::builtin().progress_toward(achievement, progress)
}

pub fn calculate_total_xp(progress: &UserMeditationProgress) -> u32 {
    AchievementEvaluator::builtin().total_xp(progress)
}

pub fn get_achievement_stats(progress: &UserMeditationProgress) -> AchievementStats {
    AchievementEvaluator::builtin().stats(progress)
}

pub fn get_almost_unlocked_achievements(
    progress: &UserMeditationProgress,
) -> Vec<AlmostUnlocked<'static>> {
    AchievementEvaluator::builtin().almost_unlocked(progress)
}

pub fn get_recommended_achievements(
    progress: &UserMeditationProgress,
    limit: usize,
) -> Vec<&'static Achievement> {
    AchievementEvaluator::builtin().recommended(progress, limit)
}
