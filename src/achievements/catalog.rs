//! Built-in achievement catalog
//!
//! Order matters: it is the tie-break order for every ranked list.

use crate::achievements::{Achievement, Category, Rarity, Requirement};
use crate::core::{Result, SlowspotError};

pub static ACHIEVEMENTS: &[Achievement] = &[
    // === PRACTICE ===
    Achievement {
        id: "first_session",
        title_key: "achievements.firstSession.title",
        description_key: "achievements.firstSession.description",
        icon: "🌟",
        category: Category::Practice,
        rarity: Rarity::Common,
        requirement: Requirement::Sessions(1),
        reward_xp: 10,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "ten_sessions",
        title_key: "achievements.tenSessions.title",
        description_key: "achievements.tenSessions.description",
        icon: "⭐",
        category: Category::Practice,
        rarity: Rarity::Common,
        requirement: Requirement::Sessions(10),
        reward_xp: 50,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("sessions"),
    },
    Achievement {
        id: "fifty_sessions",
        title_key: "achievements.fiftySessions.title",
        description_key: "achievements.fiftySessions.description",
        icon: "💫",
        category: Category::Practice,
        rarity: Rarity::Uncommon,
        requirement: Requirement::Sessions(50),
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("sessions"),
    },
    Achievement {
        id: "hundred_sessions",
        title_key: "achievements.hundredSessions.title",
        description_key: "achievements.hundredSessions.description",
        icon: "🏆",
        category: Category::Practice,
        rarity: Rarity::Rare,
        requirement: Requirement::Sessions(100),
        reward_xp: 500,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("sessions"),
    },
    Achievement {
        id: "thousand_sessions",
        title_key: "achievements.thousandSessions.title",
        description_key: "achievements.thousandSessions.description",
        icon: "👑",
        category: Category::Practice,
        rarity: Rarity::Legendary,
        requirement: Requirement::Sessions(1000),
        reward_xp: 5000,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("sessions"),
    },
    // === STREAK ===
    Achievement {
        id: "streak_3",
        title_key: "achievements.streak3.title",
        description_key: "achievements.streak3.description",
        icon: "🔥",
        category: Category::Streak,
        rarity: Rarity::Common,
        requirement: Requirement::Streak(3),
        reward_xp: 30,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "streak_7",
        title_key: "achievements.streak7.title",
        description_key: "achievements.streak7.description",
        icon: "🔥🔥",
        category: Category::Streak,
        rarity: Rarity::Uncommon,
        requirement: Requirement::Streak(7),
        reward_xp: 100,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "streak_14",
        title_key: "achievements.streak14.title",
        description_key: "achievements.streak14.description",
        icon: "🔥🔥🔥",
        category: Category::Streak,
        rarity: Rarity::Rare,
        requirement: Requirement::Streak(14),
        reward_xp: 250,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "streak_30",
        title_key: "achievements.streak30.title",
        description_key: "achievements.streak30.description",
        icon: "🌋",
        category: Category::Streak,
        rarity: Rarity::Epic,
        requirement: Requirement::Streak(30),
        reward_xp: 600,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "streak_100",
        title_key: "achievements.streak100.title",
        description_key: "achievements.streak100.description",
        icon: "☀️",
        category: Category::Streak,
        rarity: Rarity::Legendary,
        requirement: Requirement::Streak(100),
        reward_xp: 2000,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "streak_365",
        title_key: "achievements.streak365.title",
        description_key: "achievements.streak365.description",
        icon: "🎆",
        category: Category::Streak,
        rarity: Rarity::Legendary,
        requirement: Requirement::Streak(365),
        reward_xp: 10000,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    // === CULTURAL ===
    Achievement {
        id: "zen_explorer",
        title_key: "achievements.zenExplorer.title",
        description_key: "achievements.zenExplorer.description",
        icon: "🧘",
        category: Category::Cultural,
        rarity: Rarity::Uncommon,
        requirement: Requirement::CultureSessions {
            culture: "zen",
            count: 5,
        },
        reward_xp: 150,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("Zen sessions"),
    },
    Achievement {
        id: "vipassana_practitioner",
        title_key: "achievements.vipassanaPractitioner.title",
        description_key: "achievements.vipassanaPractitioner.description",
        icon: "🕉️",
        category: Category::Cultural,
        rarity: Rarity::Uncommon,
        requirement: Requirement::CultureSessions {
            culture: "vipassana",
            count: 5,
        },
        reward_xp: 150,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("Vipassana sessions"),
    },
    Achievement {
        id: "vedic_master",
        title_key: "achievements.vedicMaster.title",
        description_key: "achievements.vedicMaster.description",
        icon: "📿",
        category: Category::Cultural,
        rarity: Rarity::Rare,
        requirement: Requirement::CultureSessions {
            culture: "vedic",
            count: 10,
        },
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("Vedic sessions"),
    },
    Achievement {
        id: "taoist_sage",
        title_key: "achievements.taoistSage.title",
        description_key: "achievements.taoistSage.description",
        icon: "☯️",
        category: Category::Cultural,
        rarity: Rarity::Rare,
        requirement: Requirement::CultureSessions {
            culture: "taoist",
            count: 10,
        },
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "sufi_mystic",
        title_key: "achievements.sufiMystic.title",
        description_key: "achievements.sufiMystic.description",
        icon: "🌙",
        category: Category::Cultural,
        rarity: Rarity::Rare,
        requirement: Requirement::CultureSessions {
            culture: "sufi",
            count: 10,
        },
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "christian_contemplative",
        title_key: "achievements.christianContemplative.title",
        description_key: "achievements.christianContemplative.description",
        icon: "✝️",
        category: Category::Cultural,
        rarity: Rarity::Rare,
        requirement: Requirement::CultureSessions {
            culture: "christian",
            count: 10,
        },
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "world_traveler",
        title_key: "achievements.worldTraveler.title",
        description_key: "achievements.worldTraveler.description",
        icon: "🌍",
        category: Category::Cultural,
        rarity: Rarity::Epic,
        requirement: Requirement::UniqueCultures(6),
        reward_xp: 1000,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("traditions"),
    },
    // === MASTERY ===
    Achievement {
        id: "level_up",
        title_key: "achievements.levelUp.title",
        description_key: "achievements.levelUp.description",
        icon: "⬆️",
        category: Category::Mastery,
        rarity: Rarity::Common,
        requirement: Requirement::Level(2),
        reward_xp: 50,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "intermediate",
        title_key: "achievements.intermediate.title",
        description_key: "achievements.intermediate.description",
        icon: "📈",
        category: Category::Mastery,
        rarity: Rarity::Uncommon,
        requirement: Requirement::Level(3),
        reward_xp: 200,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "advanced",
        title_key: "achievements.advanced.title",
        description_key: "achievements.advanced.description",
        icon: "🎓",
        category: Category::Mastery,
        rarity: Rarity::Rare,
        requirement: Requirement::Level(4),
        reward_xp: 500,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "master",
        title_key: "achievements.master.title",
        description_key: "achievements.master.description",
        icon: "👨‍🏫",
        category: Category::Mastery,
        rarity: Rarity::Epic,
        requirement: Requirement::Level(5),
        reward_xp: 1000,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "time_dedication_100",
        title_key: "achievements.timeDedication100.title",
        description_key: "achievements.timeDedication100.description",
        icon: "⏱️",
        category: Category::Mastery,
        rarity: Rarity::Uncommon,
        requirement: Requirement::TotalMinutes(100),
        reward_xp: 100,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("minutes"),
    },
    Achievement {
        id: "time_dedication_1000",
        title_key: "achievements.timeDedication1000.title",
        description_key: "achievements.timeDedication1000.description",
        icon: "⏳",
        category: Category::Mastery,
        rarity: Rarity::Rare,
        requirement: Requirement::TotalMinutes(1000),
        reward_xp: 1000,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("minutes"),
    },
    Achievement {
        id: "time_dedication_10000",
        title_key: "achievements.timeDedication10000.title",
        description_key: "achievements.timeDedication10000.description",
        icon: "♾️",
        category: Category::Mastery,
        rarity: Rarity::Legendary,
        requirement: Requirement::TotalMinutes(10000),
        reward_xp: 10000,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("minutes"),
    },
    // === TIME OF DAY ===
    Achievement {
        id: "early_bird",
        title_key: "achievements.earlyBird.title",
        description_key: "achievements.earlyBird.description",
        icon: "🌅",
        category: Category::Time,
        rarity: Rarity::Uncommon,
        requirement: Requirement::HourWindow {
            start: 5,
            end: 7,
            count: 5,
        },
        reward_xp: 100,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("morning sessions"),
    },
    Achievement {
        id: "night_owl",
        title_key: "achievements.nightOwl.title",
        description_key: "achievements.nightOwl.description",
        icon: "🦉",
        category: Category::Time,
        rarity: Rarity::Uncommon,
        requirement: Requirement::HourWindow {
            start: 22,
            end: 5,
            count: 5,
        },
        reward_xp: 100,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "weekend_warrior",
        title_key: "achievements.weekendWarrior.title",
        description_key: "achievements.weekendWarrior.description",
        icon: "🏖️",
        category: Category::Time,
        rarity: Rarity::Uncommon,
        requirement: Requirement::WeekendSessions(10),
        reward_xp: 80,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "midday_refresh",
        title_key: "achievements.middayRefresh.title",
        description_key: "achievements.middayRefresh.description",
        icon: "☀️",
        category: Category::Time,
        rarity: Rarity::Uncommon,
        requirement: Requirement::HourWindow {
            start: 11,
            end: 14,
            count: 10,
        },
        reward_xp: 80,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    // === SPECIAL ===
    Achievement {
        id: "perfectionist",
        title_key: "achievements.perfectionist.title",
        description_key: "achievements.perfectionist.description",
        icon: "💯",
        category: Category::Special,
        rarity: Rarity::Rare,
        requirement: Requirement::TrailingFullCompletions(10),
        reward_xp: 300,
        hidden: true,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "mood_improver",
        title_key: "achievements.moodImprover.title",
        description_key: "achievements.moodImprover.description",
        icon: "😊",
        category: Category::Special,
        rarity: Rarity::Uncommon,
        requirement: Requirement::MoodImprovements(20),
        reward_xp: 150,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "marathon_meditator",
        title_key: "achievements.marathonMeditator.title",
        description_key: "achievements.marathonMeditator.description",
        icon: "🏃",
        category: Category::Special,
        rarity: Rarity::Epic,
        requirement: Requirement::LongSessions {
            min_seconds: 1200,
            count: 10,
        },
        reward_xp: 500,
        hidden: true,
        repeatable: false,
        tracker_unit: None,
    },
    Achievement {
        id: "explorer",
        title_key: "achievements.explorer.title",
        description_key: "achievements.explorer.description",
        icon: "🗺️",
        category: Category::Special,
        rarity: Rarity::Rare,
        requirement: Requirement::UniqueSessions(20),
        reward_xp: 250,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("unique sessions"),
    },
    Achievement {
        id: "completionist",
        title_key: "achievements.completionist.title",
        description_key: "achievements.completionist.description",
        icon: "🎯",
        category: Category::Special,
        rarity: Rarity::Legendary,
        requirement: Requirement::UniqueSessions(40),
        reward_xp: 5000,
        hidden: false,
        repeatable: false,
        tracker_unit: Some("sessions"),
    },
    Achievement {
        id: "reflection_master",
        title_key: "achievements.reflectionMaster.title",
        description_key: "achievements.reflectionMaster.description",
        icon: "📝",
        category: Category::Special,
        rarity: Rarity::Uncommon,
        requirement: Requirement::SessionsWithNotes(25),
        reward_xp: 100,
        hidden: false,
        repeatable: false,
        tracker_unit: None,
    },
];

pub fn get_achievement_by_id(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

pub fn try_get_achievement(id: &str) -> Result<&'static Achievement> {
    get_achievement_by_id(id).ok_or_else(|| SlowspotError::AchievementNotFound(id.to_string()))
}

/// First malformed requirement in `catalog`, if any
pub fn validate_catalog(catalog: &[Achievement]) -> Result<()> {
    for achievement in catalog {
        if let Err(e) = achievement.requirement.validate() {
            return Err(SlowspotError::InvalidRequirement {
                id: achievement.id.to_string(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}

pub fn get_achievements_by_category(category: Category) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| a.category == category).collect()
}

pub fn get_achievements_by_rarity(rarity: Rarity) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| a.rarity == rarity).collect()
}

/// Case-insensitive substring search over id, i18n keys and category
pub fn search_achievements(query: &str) -> Vec<&'static Achievement> {
    let query = query.to_lowercase();
    ACHIEVEMENTS
        .iter()
        .filter(|a| {
            a.id.contains(&query)
                || a.title_key.to_lowercase().contains(&query)
                || a.description_key.to_lowercase().contains(&query)
                || a.category.name().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let ids: AHashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
        assert_eq!(ACHIEVEMENTS.len(), 35);
    }

    #[test]
    fn test_every_requirement_is_well_formed() {
        assert!(validate_catalog(ACHIEVEMENTS).is_ok());

        let mut broken = ACHIEVEMENTS[0].clone();
        broken.requirement = Requirement::Sessions(0);
        assert!(matches!(
            validate_catalog(&[broken]),
            Err(SlowspotError::InvalidRequirement { id, .. }) if id == "first_session"
        ));
    }

    #[test]
    fn test_lookup_by_id() {
        let a = get_achievement_by_id("world_traveler").unwrap();
        assert_eq!(a.reward_xp, 1000);
        assert_eq!(a.tracker_unit, Some("traditions"));
        assert!(get_achievement_by_id("nope").is_none());
        assert!(matches!(
            try_get_achievement("nope"),
            Err(SlowspotError::AchievementNotFound(_))
        ));
    }

    #[test]
    fn test_social_category_is_empty() {
        assert!(get_achievements_by_category(Category::Social).is_empty());
        assert_eq!(get_achievements_by_category(Category::Streak).len(), 6);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(search_achievements("STREAK").len(), 6);
        assert_eq!(search_achievements("mastery").len(), 7);
        assert_eq!(search_achievements("").len(), ACHIEVEMENTS.len());
    }
}
