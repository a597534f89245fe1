//! User preferences, presets and breathing patterns
//!
//! Stored preference blobs are merged over `UserPreferences::default()`, so
//! older blobs missing newer keys still load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ranked_counts, Result};
use crate::progress::{
    BreathingPatternId, ExperienceLevel, InstructionStyle, ReminderFrequency,
    UserMeditationProgress,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMetrics {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    // Instructions
    pub instruction_style: InstructionStyle,
    pub always_skip_instructions: bool,
    /// Seconds, 0..=300
    pub breathing_prep_duration: u32,
    pub reminder_frequency: ReminderFrequency,

    // Audio and haptics
    pub voice_guidance_enabled: bool,
    pub haptic_feedback_enabled: bool,
    /// 0..=100
    pub ambient_sound_volume: u8,
    /// 0..=100
    pub chime_volume: u8,

    pub preferred_cultures: Vec<String>,
    pub preferred_occasions: Vec<String>,
    pub preferred_breathing_pattern: BreathingPatternId,

    pub experience_level: ExperienceLevel,
    /// 1..=5
    pub self_reported_level: u8,

    pub theme: Theme,
    pub language: String,
    pub display_metrics: DisplayMetrics,

    // Notifications
    pub daily_reminder_enabled: bool,
    /// "HH:MM", 24-hour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_reminder_time: Option<String>,
    pub streak_reminder_enabled: bool,
    pub achievement_notifications_enabled: bool,

    // Privacy
    pub track_mood_data: bool,
    pub share_anonymous_data: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            instruction_style: InstructionStyle::Detailed,
            always_skip_instructions: false,
            breathing_prep_duration: 60,
            reminder_frequency: ReminderFrequency::Normal,
            voice_guidance_enabled: false,
            haptic_feedback_enabled: true,
            ambient_sound_volume: 50,
            chime_volume: 70,
            preferred_cultures: Vec::new(),
            preferred_occasions: Vec::new(),
            preferred_breathing_pattern: BreathingPatternId::Box,
            experience_level: ExperienceLevel::Beginner,
            self_reported_level: 1,
            theme: Theme::Auto,
            language: "en".to_string(),
            display_metrics: DisplayMetrics::Metric,
            daily_reminder_enabled: false,
            daily_reminder_time: None,
            streak_reminder_enabled: true,
            achievement_notifications_enabled: true,
            track_mood_data: true,
            share_anonymous_data: false,
        }
    }
}

/// Partial preferences; `None` leaves the current value alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_style: Option<InstructionStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_skip_instructions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing_prep_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_frequency: Option<ReminderFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_guidance_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub haptic_feedback_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_sound_volume: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chime_volume: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_cultures: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_occasions: Option<Vec<String>>,
}

impl PreferencesPatch {
    pub const EMPTY: PreferencesPatch = PreferencesPatch {
        instruction_style: None,
        always_skip_instructions: None,
        breathing_prep_duration: None,
        reminder_frequency: None,
        voice_guidance_enabled: None,
        haptic_feedback_enabled: None,
        ambient_sound_volume: None,
        chime_volume: None,
        preferred_cultures: None,
        preferred_occasions: None,
    };
}

impl UserPreferences {
    /// Copy with every `Some` field of `patch` applied
    pub fn merge(&self, patch: &PreferencesPatch) -> UserPreferences {
        let mut merged = self.clone();
        if let Some(v) = patch.instruction_style {
            merged.instruction_style = v;
        }
        if let Some(v) = patch.always_skip_instructions {
            merged.always_skip_instructions = v;
        }
        if let Some(v) = patch.breathing_prep_duration {
            merged.breathing_prep_duration = v;
        }
        if let Some(v) = patch.reminder_frequency {
            merged.reminder_frequency = v;
        }
        if let Some(v) = patch.voice_guidance_enabled {
            merged.voice_guidance_enabled = v;
        }
        if let Some(v) = patch.haptic_feedback_enabled {
            merged.haptic_feedback_enabled = v;
        }
        if let Some(v) = patch.ambient_sound_volume {
            merged.ambient_sound_volume = v;
        }
        if let Some(v) = patch.chime_volume {
            merged.chime_volume = v;
        }
        if let Some(v) = &patch.preferred_cultures {
            merged.preferred_cultures = v.clone();
        }
        if let Some(v) = &patch.preferred_occasions {
            merged.preferred_occasions = v.clone();
        }
        merged
    }
}

pub fn merge_with_defaults(patch: &PreferencesPatch) -> UserPreferences {
    UserPreferences::default().merge(patch)
}

#[derive(Debug, Clone)]
pub struct PreferencePreset {
    pub id: &'static str,
    pub name_key: &'static str,
    pub description_key: &'static str,
    pub icon: &'static str,
    pub preferences: PreferencesPatch,
}

pub static PREFERENCE_PRESETS: &[PreferencePreset] = &[
    PreferencePreset {
        id: "beginner",
        name_key: "presets.beginner.name",
        description_key: "presets.beginner.description",
        icon: "🌱",
        preferences: PreferencesPatch {
            instruction_style: Some(InstructionStyle::Detailed),
            always_skip_instructions: Some(false),
            breathing_prep_duration: Some(90),
            reminder_frequency: Some(ReminderFrequency::Frequent),
            voice_guidance_enabled: Some(true),
            haptic_feedback_enabled: Some(true),
            ..PreferencesPatch::EMPTY
        },
    },
    PreferencePreset {
        id: "experienced",
        name_key: "presets.experienced.name",
        description_key: "presets.experienced.description",
        icon: "🧘",
        preferences: PreferencesPatch {
            instruction_style: Some(InstructionStyle::Moderate),
            always_skip_instructions: Some(false),
            breathing_prep_duration: Some(60),
            reminder_frequency: Some(ReminderFrequency::Normal),
            voice_guidance_enabled: Some(false),
            haptic_feedback_enabled: Some(true),
            ..PreferencesPatch::EMPTY
        },
    },
    PreferencePreset {
        id: "expert",
        name_key: "presets.expert.name",
        description_key: "presets.expert.description",
        icon: "⚡",
        preferences: PreferencesPatch {
            instruction_style: Some(InstructionStyle::Minimal),
            always_skip_instructions: Some(true),
            breathing_prep_duration: Some(30),
            reminder_frequency: Some(ReminderFrequency::Rare),
            voice_guidance_enabled: Some(false),
            haptic_feedback_enabled: Some(false),
            ..PreferencesPatch::EMPTY
        },
    },
    PreferencePreset {
        id: "mindful",
        name_key: "presets.mindful.name",
        description_key: "presets.mindful.description",
        icon: "🌸",
        preferences: PreferencesPatch {
            instruction_style: Some(InstructionStyle::Detailed),
            always_skip_instructions: Some(false),
            breathing_prep_duration: Some(120),
            reminder_frequency: Some(ReminderFrequency::Frequent),
            ambient_sound_volume: Some(30),
            chime_volume: Some(50),
            ..PreferencesPatch::EMPTY
        },
    },
    PreferencePreset {
        id: "quick",
        name_key: "presets.quick.name",
        description_key: "presets.quick.description",
        icon: "⏱️",
        preferences: PreferencesPatch {
            instruction_style: Some(InstructionStyle::Minimal),
            always_skip_instructions: Some(true),
            breathing_prep_duration: Some(0),
            reminder_frequency: Some(ReminderFrequency::None),
            voice_guidance_enabled: Some(false),
            ..PreferencesPatch::EMPTY
        },
    },
];

/// Apply a preset; unknown IDs leave the preferences unchanged
pub fn apply_preset(preset_id: &str, current: &UserPreferences) -> UserPreferences {
    match PREFERENCE_PRESETS.iter().find(|p| p.id == preset_id) {
        Some(preset) => current.merge(&preset.preferences),
        None => {
            tracing::debug!("Unknown preference preset {}", preset_id);
            current.clone()
        }
    }
}

/// Suggested settings derived from practice history
pub fn get_recommended_preferences(progress: &UserMeditationProgress) -> PreferencesPatch {
    let (style, breathing) = match progress.total_sessions {
        0..=9 => (InstructionStyle::Detailed, 90),
        10..=49 => (InstructionStyle::Moderate, 60),
        _ => (InstructionStyle::Minimal, 30),
    };

    let history = &progress.completed_sessions;
    let average_completion = if history.is_empty() {
        0.0
    } else {
        history.iter().map(|c| c.completion_percentage as f64).sum::<f64>() / history.len() as f64
    };
    let reminders = if average_completion < 70.0 {
        ReminderFrequency::Frequent
    } else if average_completion < 90.0 {
        ReminderFrequency::Normal
    } else {
        ReminderFrequency::Rare
    };

    let cultures = top_tags(history.iter().filter_map(|c| c.culture_tag.as_deref()), 3);
    let occasions = top_tags(history.iter().filter_map(|c| c.purpose_tag.as_deref()), 3);

    PreferencesPatch {
        instruction_style: Some(style),
        breathing_prep_duration: Some(breathing),
        reminder_frequency: Some(reminders),
        preferred_cultures: (!cultures.is_empty()).then_some(cultures),
        preferred_occasions: (!occasions.is_empty()).then_some(occasions),
        ..PreferencesPatch::EMPTY
    }
}

fn top_tags<'a>(tags: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    ranked_counts(tags.filter(|t| !t.is_empty()))
        .into_iter()
        .take(limit)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Breathing prep duration must be between 0-300 seconds")]
    BreathingPrepDuration,
    #[error("Ambient sound volume must be between 0-100")]
    AmbientSoundVolume,
    #[error("Chime volume must be between 0-100")]
    ChimeVolume,
    #[error("Self-reported level must be between 1-5")]
    SelfReportedLevel,
    #[error("Daily reminder time must be in HH:MM format")]
    DailyReminderTime,
}

/// Every range violation, or `Ok` when the preferences are usable
pub fn validate_preferences(prefs: &UserPreferences) -> std::result::Result<(), Vec<PreferenceError>> {
    let mut errors = Vec::new();
    if prefs.breathing_prep_duration > 300 {
        errors.push(PreferenceError::BreathingPrepDuration);
    }
    if prefs.ambient_sound_volume > 100 {
        errors.push(PreferenceError::AmbientSoundVolume);
    }
    if prefs.chime_volume > 100 {
        errors.push(PreferenceError::ChimeVolume);
    }
    if !(1..=5).contains(&prefs.self_reported_level) {
        errors.push(PreferenceError::SelfReportedLevel);
    }
    if let Some(time) = prefs.daily_reminder_time.as_deref() {
        if !time.is_empty() && !is_clock_time(time) {
            errors.push(PreferenceError::DailyReminderTime);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Strict two-digit "HH:MM", 00:00 to 23:59
fn is_clock_time(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let two_digits = |hi: u8, lo: u8| -> Option<u8> {
        (hi.is_ascii_digit() && lo.is_ascii_digit()).then(|| (hi - b'0') * 10 + (lo - b'0'))
    };
    matches!(
        (two_digits(bytes[0], bytes[1]), two_digits(bytes[3], bytes[4])),
        (Some(h), Some(m)) if h < 24 && m < 60
    )
}

pub fn serialize_preferences(prefs: &UserPreferences) -> Result<String> {
    Ok(serde_json::to_string(prefs)?)
}

pub fn try_deserialize_preferences(data: &str) -> Result<UserPreferences> {
    Ok(serde_json::from_str(data)?)
}

/// Parse stored preferences, falling back to defaults when unreadable
pub fn deserialize_preferences(data: &str) -> UserPreferences {
    match try_deserialize_preferences(data) {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!("Failed to parse preferences: {}", e);
            UserPreferences::default()
        }
    }
}

/// Carry over every still-valid key of an older preference blob
///
/// Keys that no longer exist are dropped; keys whose value no longer fits
/// keep their default.
pub fn migrate_preferences(old: &serde_json::Value) -> UserPreferences {
    let defaults = UserPreferences::default();
    let (Ok(serde_json::Value::Object(mut merged)), Some(old)) =
        (serde_json::to_value(&defaults), old.as_object())
    else {
        return defaults;
    };

    let keys: Vec<String> = merged.keys().cloned().collect();
    for key in keys {
        let Some(value) = old.get(&key).filter(|v| !v.is_null()) else {
            continue;
        };
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<UserPreferences>(serde_json::Value::Object(merged.clone())).is_err() {
            tracing::debug!("Dropping incompatible preference {}", key);
            match previous {
                Some(previous) => merged.insert(key, previous),
                None => merged.remove(&key),
            };
        }
    }
    // daily_reminder_time is skipped while unset, so it is not in the default keys
    if let Some(time) = old.get("dailyReminderTime").and_then(|v| v.as_str()) {
        merged.insert("dailyReminderTime".into(), time.into());
    }

    serde_json::from_value(serde_json::Value::Object(merged)).unwrap_or(defaults)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingPattern {
    pub id: BreathingPatternId,
    pub name_key: &'static str,
    pub description_key: &'static str,
    /// Seconds per phase
    pub inhale: u32,
    pub hold_after_inhale: Option<u32>,
    pub exhale: u32,
    pub hold_after_exhale: Option<u32>,
    pub rounds: u32,
    pub benefits_key: &'static str,
}

pub static BREATHING_PATTERNS: &[BreathingPattern] = &[
    BreathingPattern {
        id: BreathingPatternId::Box,
        name_key: "breathing.box.name",
        description_key: "breathing.box.description",
        inhale: 4,
        hold_after_inhale: Some(4),
        exhale: 4,
        hold_after_exhale: Some(4),
        rounds: 4,
        benefits_key: "breathing.box.benefits",
    },
    BreathingPattern {
        id: BreathingPatternId::FourSevenEight,
        name_key: "breathing.478.name",
        description_key: "breathing.478.description",
        inhale: 4,
        hold_after_inhale: Some(7),
        exhale: 8,
        hold_after_exhale: None,
        rounds: 4,
        benefits_key: "breathing.478.benefits",
    },
    BreathingPattern {
        id: BreathingPatternId::Equal,
        name_key: "breathing.equal.name",
        description_key: "breathing.equal.description",
        inhale: 5,
        hold_after_inhale: None,
        exhale: 5,
        hold_after_exhale: None,
        rounds: 6,
        benefits_key: "breathing.equal.benefits",
    },
    BreathingPattern {
        id: BreathingPatternId::Calm,
        name_key: "breathing.calm.name",
        description_key: "breathing.calm.description",
        inhale: 3,
        hold_after_inhale: None,
        exhale: 6,
        hold_after_exhale: None,
        rounds: 5,
        benefits_key: "breathing.calm.benefits",
    },
];

pub fn get_breathing_pattern(id: BreathingPatternId) -> Option<&'static BreathingPattern> {
    BREATHING_PATTERNS.iter().find(|p| p.id == id)
}

/// Total seconds for all rounds of a pattern
pub fn calculate_breathing_duration(pattern: &BreathingPattern) -> u32 {
    let cycle = pattern.inhale
        + pattern.hold_after_inhale.unwrap_or(0)
        + pattern.exhale
        + pattern.hold_after_exhale.unwrap_or(0);
    cycle * pattern.rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;
    use chrono::DateTime;

    #[test]
    fn test_partial_blob_keeps_defaults() {
        let prefs = deserialize_preferences(r#"{"chimeVolume": 20, "theme": "dark"}"#);
        assert_eq!(prefs.chime_volume, 20);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.breathing_prep_duration, 60);
        assert!(prefs.haptic_feedback_enabled);
    }

    #[test]
    fn test_garbage_blob_falls_back() {
        assert_eq!(deserialize_preferences("]]"), UserPreferences::default());
        assert!(try_deserialize_preferences("]]").is_err());
    }

    #[test]
    fn test_presets() {
        let expert = apply_preset("expert", &UserPreferences::default());
        assert_eq!(expert.instruction_style, InstructionStyle::Minimal);
        assert!(expert.always_skip_instructions);
        assert!(!expert.haptic_feedback_enabled);
        assert_eq!(expert.chime_volume, 70);

        let same = apply_preset("unknown", &expert);
        assert_eq!(same, expert);
    }

    #[test]
    fn test_validation_collects_every_error() {
        let prefs = UserPreferences {
            breathing_prep_duration: 301,
            chime_volume: 101,
            daily_reminder_time: Some("24:00".into()),
            ..Default::default()
        };
        assert_eq!(
            validate_preferences(&prefs),
            Err(vec![
                PreferenceError::BreathingPrepDuration,
                PreferenceError::ChimeVolume,
                PreferenceError::DailyReminderTime,
            ])
        );
        assert!(validate_preferences(&UserPreferences::default()).is_ok());
    }

    #[test]
    fn test_clock_time_format() {
        assert!(is_clock_time("07:30"));
        assert!(is_clock_time("23:59"));
        assert!(!is_clock_time("7:30"));
        assert!(!is_clock_time("12:60"));
        assert!(!is_clock_time("ab:cd"));
    }

    #[test]
    fn test_recommended_preferences_from_history() {
        let now = DateTime::parse_from_rfc3339("2026-03-01T08:00:00+00:00").unwrap();
        let mut progress = UserMeditationProgress::new("user", now);
        for (i, culture) in ["zen", "vedic", "zen", "sufi", "taoist", "vedic", "zen"].iter().enumerate() {
            let mut c = completion_at(i as u32, "2026-02-20T08:00:00+00:00");
            c.culture_tag = Some(culture.to_string());
            c.completion_percentage = 80;
            progress.completed_sessions.push(c);
        }
        progress.total_sessions = 7;

        let patch = get_recommended_preferences(&progress);
        assert_eq!(patch.instruction_style, Some(InstructionStyle::Detailed));
        assert_eq!(patch.breathing_prep_duration, Some(90));
        assert_eq!(patch.reminder_frequency, Some(ReminderFrequency::Normal));
        assert_eq!(
            patch.preferred_cultures,
            Some(vec!["zen".to_string(), "vedic".to_string(), "sufi".to_string()])
        );
        assert_eq!(patch.preferred_occasions, None);
    }

    #[test]
    fn test_breathing_durations() {
        let seconds: Vec<_> = BREATHING_PATTERNS.iter().map(calculate_breathing_duration).collect();
        assert_eq!(seconds, vec![64, 76, 60, 45]);
        assert_eq!(
            get_breathing_pattern(BreathingPatternId::Calm).map(|p| p.rounds),
            Some(5)
        );
    }

    #[test]
    fn test_migration_keeps_valid_keys_only() {
        let old = serde_json::json!({
            "chimeVolume": 10,
            "theme": "sepia",
            "legacyFlag": true,
            "dailyReminderTime": "06:45"
        });
        let prefs = migrate_preferences(&old);
        assert_eq!(prefs.chime_volume, 10);
        assert_eq!(prefs.theme, Theme::Auto);
        assert_eq!(prefs.daily_reminder_time.as_deref(), Some("06:45"));
    }
}
