//! Built-in filter presets offered as one-tap chips

use crate::sessions::{DurationRange, SessionFilters, SortBy, SortOrder};

#[derive(Debug, Clone)]
pub struct FilterPreset {
    pub id: &'static str,
    pub name_key: &'static str,
    pub description_key: &'static str,
    pub icon: &'static str,
    pub duration_range: Option<DurationRange>,
    pub levels: &'static [u8],
    pub purposes: &'static [&'static str],
    pub has_instructions: Option<bool>,
    pub favorites_only: bool,
    pub sort_by: SortBy,
    pub sort_order: Option<SortOrder>,
}

impl FilterPreset {
    pub fn filters(&self) -> SessionFilters {
        SessionFilters {
            duration_range: self.duration_range,
            levels: self.levels.to_vec(),
            purposes: self.purposes.iter().map(|p| p.to_string()).collect(),
            has_instructions: self.has_instructions,
            show_favorites_only: self.favorites_only,
            sort_by: Some(self.sort_by),
            sort_order: self.sort_order,
            ..SessionFilters::default()
        }
    }
}

const fn preset(id: &'static str, name_key: &'static str, description_key: &'static str, icon: &'static str, sort_by: SortBy) -> FilterPreset {
    FilterPreset {
        id,
        name_key,
        description_key,
        icon,
        duration_range: None,
        levels: &[],
        purposes: &[],
        has_instructions: None,
        favorites_only: false,
        sort_by,
        sort_order: None,
    }
}

pub static FILTER_PRESETS: &[FilterPreset] = &[
    FilterPreset {
        duration_range: Some(DurationRange::new(5, 10)),
        sort_order: Some(SortOrder::Asc),
        ..preset(
            "quick_sessions",
            "filters.presets.quickSessions.name",
            "filters.presets.quickSessions.description",
            "⚡",
            SortBy::Duration,
        )
    },
    FilterPreset {
        duration_range: Some(DurationRange::new(15, 20)),
        levels: &[3, 4, 5],
        sort_order: Some(SortOrder::Desc),
        ..preset(
            "deep_practice",
            "filters.presets.deepPractice.name",
            "filters.presets.deepPractice.description",
            "🧘",
            SortBy::Level,
        )
    },
    FilterPreset {
        levels: &[1, 2],
        has_instructions: Some(true),
        sort_order: Some(SortOrder::Asc),
        ..preset(
            "beginner_friendly",
            "filters.presets.beginnerFriendly.name",
            "filters.presets.beginnerFriendly.description",
            "🌱",
            SortBy::Level,
        )
    },
    FilterPreset {
        purposes: &["morning"],
        duration_range: Some(DurationRange::new(5, 15)),
        ..preset(
            "morning_routine",
            "filters.presets.morningRoutine.name",
            "filters.presets.morningRoutine.description",
            "🌅",
            SortBy::Duration,
        )
    },
    FilterPreset {
        purposes: &["stress"],
        ..preset(
            "stress_relief",
            "filters.presets.stressRelief.name",
            "filters.presets.stressRelief.description",
            "😌",
            SortBy::Recommended,
        )
    },
    FilterPreset {
        purposes: &["sleep"],
        sort_order: Some(SortOrder::Desc),
        ..preset(
            "sleep_preparation",
            "filters.presets.sleepPreparation.name",
            "filters.presets.sleepPreparation.description",
            "🌙",
            SortBy::Duration,
        )
    },
    preset(
        "cultural_exploration",
        "filters.presets.culturalExploration.name",
        "filters.presets.culturalExploration.description",
        "🌍",
        SortBy::Title,
    ),
    FilterPreset {
        favorites_only: true,
        ..preset(
            "favorites",
            "filters.presets.favorites.name",
            "filters.presets.favorites.description",
            "⭐",
            SortBy::Recent,
        )
    },
];

pub fn get_filter_preset(id: &str) -> Option<&'static FilterPreset> {
    FILTER_PRESETS.iter().find(|p| p.id == id)
}

/// Filters of a preset; unknown IDs give empty filters
pub fn apply_filter_preset(id: &str) -> SessionFilters {
    match get_filter_preset(id) {
        Some(preset) => preset.filters(),
        None => {
            tracing::debug!("Unknown filter preset {}", id);
            SessionFilters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::count_active_filters;

    #[test]
    fn test_deep_practice_preset() {
        let filters = apply_filter_preset("deep_practice");
        assert_eq!(filters.duration_range, Some(DurationRange::new(15, 20)));
        assert_eq!(filters.levels, vec![3, 4, 5]);
        assert_eq!(filters.sort_by, Some(SortBy::Level));
        assert_eq!(filters.sort_order, Some(SortOrder::Desc));
        assert_eq!(count_active_filters(&filters), 2);
    }

    #[test]
    fn test_unknown_preset_is_empty() {
        assert_eq!(apply_filter_preset("nope"), SessionFilters::default());
    }

    #[test]
    fn test_preset_ids_unique() {
        let mut ids: Vec<_> = FILTER_PRESETS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
