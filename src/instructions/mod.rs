//! Pre-session instructions
//!
//! The instruction table is static data referencing display text by i18n
//! key. Adaptation never allocates new steps or reminders: every tier is a
//! prefix of the base lists, so adapted instructions still borrow from the
//! static table.

pub mod adaptive;
pub mod catalog;
pub mod fallback;

use serde::Serialize;

use crate::progress::BreathingPatternId;

pub use adaptive::{
    adapt_instruction, adapt_instruction_with, analyze_user_experience,
    determine_instruction_level, determine_instruction_level_with, generate_adaptive_reminders,
    get_adaptive_instruction, get_personalized_recommendations, AdaptationLevel,
    AdaptiveReminder, AdaptiveReminderKind, RecommendationReason, ReminderPriority,
    SessionRecommendation, UserExperienceMetrics,
};
pub use catalog::{DEFAULT_INSTRUCTION, PRE_SESSION_INSTRUCTIONS};
pub use fallback::{
    get_available_instruction_ids, get_instruction_by_id, get_instruction_for_session,
    get_instruction_with_fallback, instruction_exists, validate_session_instructions,
    InstructionIssue, InstructionReport, IssueKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    BreathAwareness,
    BodyScan,
    LovingKindness,
    OpenAwareness,
    Vipassana,
    Zen,
}

/// When a practice is best suited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeTime {
    Any,
    Morning,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Gentle,
    Encouragement,
    Technique,
}

/// One physical setup step; text lives under `{key}.title` / `{key}.description`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStep {
    pub order: u8,
    pub icon: &'static str,
    pub key: &'static str,
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalPreparation {
    pub intention_key: &'static str,
    pub focus_point_key: &'static str,
    pub challenge_keys: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingPrep {
    pub duration_seconds: u32,
    pub pattern: BreathingPatternId,
    pub instruction_key: &'static str,
}

/// Reminder spoken `time_seconds` into the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReminder {
    pub time_seconds: u32,
    pub message_key: &'static str,
    pub kind: ReminderKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreSessionInstruction {
    pub id: &'static str,
    pub session_level: u8,
    pub technique: Technique,
    pub time_of_day: PracticeTime,
    pub title_key: &'static str,
    pub subtitle_key: &'static str,
    pub physical_setup: &'static [SetupStep],
    pub mental_preparation: Option<MentalPreparation>,
    pub session_tips: &'static [&'static str],
    pub breathing_prep: Option<BreathingPrep>,
    pub reminders: &'static [SessionReminder],
}

impl PreSessionInstruction {
    /// True when there is nothing left to show before the session
    pub fn is_empty(&self) -> bool {
        self.physical_setup.is_empty()
            && self.mental_preparation.is_none()
            && self.breathing_prep.is_none()
            && self.reminders.is_empty()
    }
}
