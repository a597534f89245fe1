//! Progress data model
//!
//! `UserMeditationProgress` is the root aggregate persisted by the storage
//! collaborator as one JSON blob per user. Field names serialize in camelCase
//! to match that blob.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{CompletionId, MoodRating, SessionId, TimeOfDay};

/// Self-assessed practice experience
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
}

/// How much pre-session guidance the user asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionStyle {
    #[default]
    Detailed,
    Moderate,
    Minimal,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Frequent,
    #[default]
    Normal,
    Rare,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreathingPatternId {
    #[default]
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "4-7-8")]
    FourSevenEight,
    #[serde(rename = "equal")]
    Equal,
    #[serde(rename = "calm")]
    Calm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuitReason {
    Distracted,
    Uncomfortable,
    Time,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    TooEasy,
    JustRight,
    TooHard,
}

/// One finished (fully or partially) meditation
///
/// Created once at session end by `create_session_completion` and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCompletion {
    pub id: CompletionId,
    pub session_id: SessionId,
    #[serde(default)]
    pub session_title: String,

    // Copied from the session so history can be filtered without the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_tag: Option<String>,
    #[serde(default = "default_level")]
    pub level: u8,

    pub started_at: DateTime<FixedOffset>,
    pub completed_at: DateTime<FixedOffset>,
    pub planned_duration_seconds: u32,
    pub actual_duration_seconds: u32,

    pub completed_fully: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quit_reason: Option<QuitReason>,
    /// 0-100, clamped
    pub completion_percentage: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_before: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_after: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_before: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_after: Option<MoodRating>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enjoyment: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpfulness: Option<MoodRating>,

    #[serde(default)]
    pub xp_earned: u32,
}

fn default_level() -> u8 {
    1
}

impl SessionCompletion {
    /// Mood change when both ratings were given
    pub fn mood_delta(&self) -> Option<i32> {
        match (self.mood_before, self.mood_after) {
            (Some(before), Some(after)) => Some(after.delta_from(before)),
            _ => None,
        }
    }

    pub fn mood_improved(&self) -> bool {
        self.mood_delta().map_or(false, |delta| delta > 0)
    }

    /// Calendar day the completion happened on, in the user's local offset
    pub fn completed_on(&self) -> NaiveDate {
        self.completed_at.date_naive()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> u32 {
        self.completed_at.weekday().num_days_from_sunday()
    }
}

/// Free-form reflection attached to a completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNote {
    pub id: Uuid,
    pub session_id: SessionId,
    pub session_completion_id: CompletionId,
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub breakthroughs: Vec<String>,
    #[serde(default = "default_true")]
    pub want_to_try_again: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_improvements: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Mood sample taken around a completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: DateTime<FixedOffset>,
    pub session_completion_id: CompletionId,
    pub session_id: SessionId,
    pub before_meditation: MoodRating,
    pub after_meditation: MoodRating,
    pub mood_change: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_before: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_after: Option<MoodRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_change: Option<i32>,
    pub time_of_day: TimeOfDay,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
}

/// Persisted unlock event
///
/// Achievements are granted by appending one of these; once present the
/// achievement stays unlocked even if its predicate later turns false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub unlocked_at: DateTime<FixedOffset>,
    #[serde(default = "default_times_unlocked")]
    pub times_unlocked: u32,
}

fn default_times_unlocked() -> u32 {
    1
}

/// A user-built session (IDs start at 10000)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSession {
    pub id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_session_id: Option<SessionId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_seconds: u32,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_id: Option<String>,
    #[serde(default)]
    pub custom_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture_tag: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub last_modified: DateTime<FixedOffset>,
    #[serde(default)]
    pub times_completed: u32,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Root progress aggregate, one per local user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserMeditationProgress {
    pub user_id: String,
    pub created_at: DateTime<FixedOffset>,
    pub last_updated: DateTime<FixedOffset>,

    // History
    pub completed_sessions: Vec<SessionCompletion>,

    // Derived counters, see `refresh_counters`
    pub total_meditation_minutes: u32,
    pub total_sessions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_meditation_date: Option<NaiveDate>,
    pub current_level: u8,
    pub experience_points: u32,

    pub experience_level: ExperienceLevel,
    pub unlocked_sessions: Vec<SessionId>,

    // Preferences
    pub preferred_instruction_style: InstructionStyle,
    pub always_skip_instructions: bool,
    pub voice_guidance_enabled: bool,
    pub haptic_feedback_enabled: bool,
    pub favorite_sessions: Vec<SessionId>,
    pub hidden_sessions: Vec<SessionId>,
    pub custom_sessions: Vec<CustomSession>,
    pub favorite_instruction_ids: Vec<String>,
    pub preferred_cultures: Vec<String>,
    pub preferred_occasions: Vec<String>,

    // Reflections
    pub session_notes: Vec<SessionNote>,
    pub mood_tracker: Vec<MoodEntry>,

    // Gamification
    pub unlocked_achievements: Vec<UnlockedAchievement>,

    pub breathing_prep_duration: u32,
    pub reminder_frequency: ReminderFrequency,
    pub preferred_breathing_pattern: BreathingPatternId,
}

impl Default for UserMeditationProgress {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            created_at: DateTime::default(),
            last_updated: DateTime::default(),
            completed_sessions: Vec::new(),
            total_meditation_minutes: 0,
            total_sessions: 0,
            current_streak: 0,
            longest_streak: 0,
            last_meditation_date: None,
            current_level: 1,
            experience_points: 0,
            experience_level: ExperienceLevel::Beginner,
            unlocked_sessions: Vec::new(),
            preferred_instruction_style: InstructionStyle::Detailed,
            always_skip_instructions: false,
            voice_guidance_enabled: false,
            haptic_feedback_enabled: true,
            favorite_sessions: Vec::new(),
            hidden_sessions: Vec::new(),
            custom_sessions: Vec::new(),
            favorite_instruction_ids: Vec::new(),
            preferred_cultures: Vec::new(),
            preferred_occasions: Vec::new(),
            session_notes: Vec::new(),
            mood_tracker: Vec::new(),
            unlocked_achievements: Vec::new(),
            breathing_prep_duration: 60,
            reminder_frequency: ReminderFrequency::Normal,
            preferred_breathing_pattern: BreathingPatternId::Box,
        }
    }
}

impl UserMeditationProgress {
    /// Fresh progress for a new local user
    pub fn new(user_id: impl Into<String>, now: DateTime<FixedOffset>) -> Self {
        Self {
            user_id: user_id.into(),
            created_at: now,
            last_updated: now,
            ..Default::default()
        }
    }

    /// All completions of one catalog session, in history order
    pub fn completions_of(&self, session_id: SessionId) -> impl Iterator<Item = &SessionCompletion> {
        self.completed_sessions
            .iter()
            .filter(move |c| c.session_id == session_id)
    }

    pub fn completion_count(&self, session_id: SessionId) -> usize {
        self.completions_of(session_id).count()
    }

    /// Most recent completion time of a session, if it was ever completed
    pub fn last_completion_time(&self, session_id: SessionId) -> Option<DateTime<FixedOffset>> {
        self.completions_of(session_id).map(|c| c.completed_at).max()
    }

    pub fn is_favorite(&self, session_id: SessionId) -> bool {
        self.favorite_sessions.contains(&session_id)
    }

    pub fn is_hidden(&self, session_id: SessionId) -> bool {
        self.hidden_sessions.contains(&session_id)
    }

    pub fn has_unlock_record(&self, achievement_id: &str) -> bool {
        self.unlocked_achievements
            .iter()
            .any(|u| u.achievement_id == achievement_id)
    }

    /// Notes recorded against a specific completion
    pub fn notes_for(&self, completion_id: CompletionId) -> impl Iterator<Item = &SessionNote> {
        self.session_notes
            .iter()
            .filter(move |n| n.session_completion_id == completion_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_roundtrips_camel_case() {
        let now = DateTime::parse_from_rfc3339("2025-01-05T07:00:00+01:00").unwrap();
        let progress = UserMeditationProgress::new("local-user", now);
        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"completedSessions\""));
        assert!(json.contains("\"preferredBreathingPattern\":\"box\""));

        let parsed: UserMeditationProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, progress);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: UserMeditationProgress =
            serde_json::from_str(r#"{"userId":"u1","reminderFrequency":"rare"}"#).unwrap();
        assert_eq!(parsed.user_id, "u1");
        assert_eq!(parsed.reminder_frequency, ReminderFrequency::Rare);
        assert!(parsed.completed_sessions.is_empty());
    }

    #[test]
    fn test_breathing_pattern_wire_names() {
        let p: BreathingPatternId = serde_json::from_str("\"4-7-8\"").unwrap();
        assert_eq!(p, BreathingPatternId::FourSevenEight);
        let d: Difficulty = serde_json::from_str("\"too_easy\"").unwrap();
        assert_eq!(d, Difficulty::TooEasy);
    }
}
