//! Session completion factory and success classification

use chrono::{DateTime, FixedOffset};

use crate::core::{CompletionId, MoodRating, ScoringConfig};
use crate::progress::{Difficulty, QuitReason, SessionCompletion};
use crate::sessions::MeditationSession;

/// What the UI knows when a session ends
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub started_at: DateTime<FixedOffset>,
    pub completed_at: DateTime<FixedOffset>,
    pub completed_fully: bool,
    pub actual_duration_seconds: u32,
    pub mood_before: Option<MoodRating>,
    pub mood_after: Option<MoodRating>,
    pub energy_before: Option<MoodRating>,
    pub energy_after: Option<MoodRating>,
    pub difficulty: Option<Difficulty>,
    pub enjoyment: Option<MoodRating>,
    pub helpfulness: Option<MoodRating>,
    pub quit_reason: Option<QuitReason>,
}

impl CompletionParams {
    pub fn new(
        started_at: DateTime<FixedOffset>,
        completed_at: DateTime<FixedOffset>,
        actual_duration_seconds: u32,
        completed_fully: bool,
    ) -> Self {
        Self {
            started_at,
            completed_at,
            completed_fully,
            actual_duration_seconds,
            mood_before: None,
            mood_after: None,
            energy_before: None,
            energy_after: None,
            difficulty: None,
            enjoyment: None,
            helpfulness: None,
            quit_reason: None,
        }
    }

    pub fn with_mood(mut self, before: MoodRating, after: MoodRating) -> Self {
        self.mood_before = Some(before);
        self.mood_after = Some(after);
        self
    }

    pub fn with_feedback(mut self, enjoyment: MoodRating, helpfulness: MoodRating) -> Self {
        self.enjoyment = Some(enjoyment);
        self.helpfulness = Some(helpfulness);
        self
    }
}

/// `round(actual / planned * 100)` clamped to 100
///
/// A zero planned duration counts as fully done.
pub fn completion_percentage(actual_seconds: u32, planned_seconds: u32) -> u8 {
    if planned_seconds == 0 {
        return 100;
    }
    let pct = (actual_seconds as f64 / planned_seconds as f64 * 100.0).round();
    pct.min(100.0) as u8
}

/// XP granted for one completion
pub fn session_xp(
    config: &ScoringConfig,
    completed_fully: bool,
    completion_percentage: u8,
    mood_before: Option<MoodRating>,
    mood_after: Option<MoodRating>,
) -> u32 {
    let mut xp = config.session_base_xp;
    if completed_fully {
        xp += config.completed_fully_xp;
    }
    if completion_percentage >= 100 {
        xp += config.full_duration_xp;
    }
    if let (Some(before), Some(after)) = (mood_before, mood_after) {
        if after > before {
            xp += config.mood_improved_xp;
        }
    }
    xp
}

/// Build the immutable completion record for a finished session
pub fn create_session_completion(
    session: &MeditationSession,
    params: CompletionParams,
) -> SessionCompletion {
    create_session_completion_with(&ScoringConfig::default(), session, params)
}

pub fn create_session_completion_with(
    config: &ScoringConfig,
    session: &MeditationSession,
    params: CompletionParams,
) -> SessionCompletion {
    let completion_percentage =
        completion_percentage(params.actual_duration_seconds, session.duration_seconds);
    let xp_earned = session_xp(
        config,
        params.completed_fully,
        completion_percentage,
        params.mood_before,
        params.mood_after,
    );

    SessionCompletion {
        id: CompletionId::new(),
        session_id: session.id,
        session_title: session.title.clone(),
        culture_tag: session.culture_tag.clone(),
        purpose_tag: session.purpose_tag.clone(),
        level: session.level,
        started_at: params.started_at,
        completed_at: params.completed_at,
        planned_duration_seconds: session.duration_seconds,
        actual_duration_seconds: params.actual_duration_seconds,
        completed_fully: params.completed_fully,
        quit_reason: params.quit_reason,
        completion_percentage,
        mood_before: params.mood_before,
        mood_after: params.mood_after,
        energy_before: params.energy_before,
        energy_after: params.energy_after,
        difficulty: params.difficulty,
        enjoyment: params.enjoyment,
        helpfulness: params.helpfulness,
        xp_earned,
    }
}

/// Weighted success heuristic over finish, mood, enjoyment and helpfulness
pub fn was_session_successful(completion: &SessionCompletion) -> bool {
    was_session_successful_with(&ScoringConfig::default(), completion)
}

pub fn was_session_successful_with(config: &ScoringConfig, completion: &SessionCompletion) -> bool {
    let high = |rating: Option<MoodRating>| {
        rating.map_or(false, |r| r.value() >= config.success_rating_threshold)
    };

    let mut score = 0;
    if completion.completed_fully {
        score += config.success_completed_fully_weight;
    }
    if completion.mood_improved() {
        score += config.success_mood_weight;
    }
    if high(completion.enjoyment) {
        score += config.success_enjoyment_weight;
    }
    if high(completion.helpfulness) {
        score += config.success_helpfulness_weight;
    }

    score >= config.success_threshold
}
