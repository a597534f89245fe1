//! Per-user meditation progress
//!
//! `UserMeditationProgress` is the aggregate everything else reads. History
//! (completions, notes, mood entries, unlock ledger) is the source of truth;
//! the summary counters on it are derived and rebuilt by `refresh_counters`.

pub mod completion;
pub mod counters;
pub mod model;
pub mod reflection;
pub mod storage;
pub mod streaks;

#[cfg(test)]
pub mod test_support;

pub use completion::{
    completion_percentage, create_session_completion, create_session_completion_with, session_xp,
    was_session_successful, was_session_successful_with, CompletionParams,
};
pub use counters::{record_completion, refresh_counters, refresh_counters_with, total_experience};
pub use model::{
    BreathingPatternId, CustomSession, Difficulty, ExperienceLevel, InstructionStyle, MoodEntry,
    QuitReason, ReminderFrequency, SessionCompletion, SessionNote, UnlockedAchievement,
    UserMeditationProgress,
};
pub use reflection::{
    calculate_mood_improvement, create_mood_entry, create_session_note, get_applicable_prompts,
    get_suggested_next_session, NoteParams, PromptCondition, ReflectionPrompt, REFLECTION_PROMPTS,
};
pub use storage::{load_progress_or_default, progress_to_json, try_load_progress};
pub use streaks::{
    calculate_current_streak, calculate_longest_streak, has_meditated_today, meditation_days,
};
