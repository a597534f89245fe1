//! Post-session reflection: notes, mood entries, prompts and follow-ups

use chrono::{DateTime, Datelike, FixedOffset};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::core::{CompletionId, MoodRating, SessionId, TimeOfDay};
use crate::progress::completion::was_session_successful;
use crate::progress::{Difficulty, MoodEntry, SessionCompletion, SessionNote};
use crate::sessions::MeditationSession;

/// Positive tags a user can pick after a session
pub const POSITIVE_INSIGHTS: &[&str] = &[
    "more_calm",
    "less_stressed",
    "more_focused",
    "more_present",
    "more_energized",
    "more_patient",
    "more_grateful",
    "deeper_relaxation",
    "mental_clarity",
    "emotional_release",
];

pub const CHALLENGE_TAGS: &[&str] = &[
    "mind_wandering",
    "physical_discomfort",
    "restlessness",
    "drowsiness",
    "difficulty_focusing",
    "time_dragged",
    "external_distractions",
    "emotional_difficulty",
];

pub const BREAKTHROUGH_TAGS: &[&str] = &[
    "deep_stillness",
    "moment_of_clarity",
    "emotional_insight",
    "physical_release",
    "new_understanding",
    "letting_go",
    "acceptance",
    "connection",
];

/// When a reflection prompt should be offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCondition {
    /// Both mood ratings given and they differ
    MoodChanged,
    /// Difficulty was anything but "just right" (including not answered)
    DifficultyOff,
    Always,
}

#[derive(Debug, Clone)]
pub struct ReflectionPrompt {
    pub id: &'static str,
    pub question_key: &'static str,
    pub condition: PromptCondition,
}

pub static REFLECTION_PROMPTS: &[ReflectionPrompt] = &[
    ReflectionPrompt {
        id: "mood_change",
        question_key: "reflection.prompts.moodChange.question",
        condition: PromptCondition::MoodChanged,
    },
    ReflectionPrompt {
        id: "difficulty_notice",
        question_key: "reflection.prompts.difficultyNotice.question",
        condition: PromptCondition::DifficultyOff,
    },
    ReflectionPrompt {
        id: "what_noticed",
        question_key: "reflection.prompts.whatNoticed.question",
        condition: PromptCondition::Always,
    },
    ReflectionPrompt {
        id: "carry_forward",
        question_key: "reflection.prompts.carryForward.question",
        condition: PromptCondition::Always,
    },
    ReflectionPrompt {
        id: "tomorrow_different",
        question_key: "reflection.prompts.tomorrowDifferent.question",
        condition: PromptCondition::Always,
    },
];

impl ReflectionPrompt {
    pub fn applies_to(&self, completion: &SessionCompletion) -> bool {
        match self.condition {
            PromptCondition::MoodChanged => completion.mood_delta().map_or(false, |d| d != 0),
            PromptCondition::DifficultyOff => completion.difficulty != Some(Difficulty::JustRight),
            PromptCondition::Always => true,
        }
    }
}

pub fn get_applicable_prompts(completion: &SessionCompletion) -> Vec<&'static ReflectionPrompt> {
    REFLECTION_PROMPTS
        .iter()
        .filter(|p| p.applies_to(completion))
        .collect()
}

/// Optional parts of a note
#[derive(Debug, Clone, Default)]
pub struct NoteParams {
    pub note: Option<String>,
    pub insights: Vec<String>,
    pub challenges: Vec<String>,
    pub breakthroughs: Vec<String>,
    pub want_to_try_again: Option<bool>,
    pub suggested_improvements: Option<String>,
}

pub fn create_session_note(
    session_id: SessionId,
    completion_id: CompletionId,
    params: NoteParams,
    now: DateTime<FixedOffset>,
) -> SessionNote {
    SessionNote {
        id: Uuid::new_v4(),
        session_id,
        session_completion_id: completion_id,
        date: now,
        note: params.note.unwrap_or_default(),
        insights: params.insights,
        challenges: params.challenges,
        breakthroughs: params.breakthroughs,
        want_to_try_again: params.want_to_try_again.unwrap_or(true),
        suggested_improvements: params.suggested_improvements,
    }
}

pub fn create_mood_entry(
    session_id: SessionId,
    completion_id: CompletionId,
    before: MoodRating,
    after: MoodRating,
    energy: Option<(MoodRating, MoodRating)>,
    now: DateTime<FixedOffset>,
) -> MoodEntry {
    MoodEntry {
        id: Uuid::new_v4(),
        date: now,
        session_completion_id: completion_id,
        session_id,
        before_meditation: before,
        after_meditation: after,
        mood_change: after.delta_from(before),
        energy_before: energy.map(|(b, _)| b),
        energy_after: energy.map(|(_, a)| a),
        energy_change: energy.map(|(b, a)| a.delta_from(b)),
        time_of_day: TimeOfDay::of(&now),
        day_of_week: now.weekday().num_days_from_sunday(),
    }
}

/// Mood change as a percentage of the largest possible change (4 steps)
pub fn calculate_mood_improvement(before: MoodRating, after: MoodRating) -> i32 {
    (after.delta_from(before) as f64 / 4.0 * 100.0).round() as i32
}

/// Pick a follow-up session for a just-finished completion
///
/// Successful sessions lead to a random similar session; otherwise the
/// reported difficulty steers one level up or down within the same purpose.
pub fn get_suggested_next_session<'a, R: Rng + ?Sized>(
    completion: &SessionCompletion,
    sessions: &'a [MeditationSession],
    rng: &mut R,
) -> Option<&'a MeditationSession> {
    let others = || sessions.iter().filter(|s| s.id != completion.session_id);

    if was_session_successful(completion) {
        let similar: Vec<&MeditationSession> = others()
            .filter(|s| {
                s.culture_tag == completion.culture_tag
                    || s.purpose_tag == completion.purpose_tag
                    || s.level == completion.level
            })
            .collect();
        if let Some(pick) = similar.choose(rng) {
            return Some(*pick);
        }
    }

    match completion.difficulty {
        Some(Difficulty::TooEasy) => {
            others().find(|s| s.level > completion.level && s.purpose_tag == completion.purpose_tag)
        }
        Some(Difficulty::TooHard) => {
            others().find(|s| s.level < completion.level && s.purpose_tag == completion.purpose_tag)
        }
        _ => None,
    }
}
