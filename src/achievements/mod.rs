//! Achievement system
//!
//! Achievements are static catalog data: each carries a `Requirement` that a
//! central interpreter evaluates against a progress snapshot. Nothing here
//! holds state between calls; the only persisted piece is the unlock ledger
//! on the progress aggregate itself.

pub mod catalog;
pub mod evaluator;
pub mod ledger;
pub mod requirement;

use serde::{Deserialize, Serialize};

pub use catalog::{
    get_achievement_by_id, get_achievements_by_category, get_achievements_by_rarity,
    search_achievements, try_get_achievement, validate_catalog, ACHIEVEMENTS,
};
pub use evaluator::{
    calculate_total_xp, check_new_achievements, get_achievement_stats,
    get_almost_unlocked_achievements, get_progress_toward_achievement,
    get_recommended_achievements, get_unlocked_achievements, AchievementEvaluator,
    AchievementProgress, AchievementStats, AlmostUnlocked, BucketCount,
};
pub use ledger::{record_unlocks, record_unlocks_with};
pub use requirement::{Requirement, RequirementError, TrackerProgress};

/// What kind of milestone an achievement marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Practice,
    Streak,
    Cultural,
    Mastery,
    Special,
    Time,
    /// Reserved for sharing features; no catalog entries yet
    Social,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Practice,
        Category::Streak,
        Category::Cultural,
        Category::Mastery,
        Category::Special,
        Category::Time,
        Category::Social,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Practice => "practice",
            Category::Streak => "streak",
            Category::Cultural => "cultural",
            Category::Mastery => "mastery",
            Category::Special => "special",
            Category::Time => "time",
            Category::Social => "social",
        }
    }
}

/// How hard an achievement is to earn, easiest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// 0 for common .. 4 for legendary
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Catalog entry for an achievement
///
/// Display text is referenced by i18n key only.
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: &'static str,
    pub title_key: &'static str,
    pub description_key: &'static str,
    pub icon: &'static str,
    pub category: Category,
    pub rarity: Rarity,
    pub requirement: Requirement,
    pub reward_xp: u32,
    /// Shown as "???" until unlocked and never recommended
    pub hidden: bool,
    /// Declared for future use; no catalog entry sets it
    pub repeatable: bool,
    /// Unit label when incremental progress can be shown
    pub tracker_unit: Option<&'static str>,
}

impl Achievement {
    pub fn is_trackable(&self) -> bool {
        self.tracker_unit.is_some()
    }
}
