//! Adaptive instruction selection
//!
//! Each call picks an adaptation tier from scratch out of a priority-ordered
//! rule list; there is no persisted state and no hysteresis between calls.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::core::ScoringConfig;
use crate::instructions::{get_instruction_for_session, BreathingPrep, PreSessionInstruction};
use crate::progress::{InstructionStyle, ReminderFrequency, UserMeditationProgress};
use crate::sessions::MeditationSession;

// Personalized recommendation weights
pub const LEVEL_MATCH_SCORE: f64 = 30.0;
pub const LEVEL_STRETCH_SCORE: f64 = 20.0;
pub const PREFERRED_CULTURE_SCORE: f64 = 25.0;
pub const PREFERRED_PURPOSE_SCORE: f64 = 25.0;
pub const MOOD_CHANGE_WEIGHT: f64 = 10.0;
pub const SAME_DAY_PENALTY: f64 = 20.0;
pub const UNEXPLORED_SCORE: f64 = 5.0;

/// How much pre-session guidance to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptationLevel {
    Full,
    Simplified,
    Minimal,
    Skip,
}

/// What the selector knows about the user and this session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserExperienceMetrics {
    pub total_sessions: u32,
    pub total_minutes: u32,
    pub current_streak: u32,
    pub level: u8,
    pub times_completed_this_session: u32,
    /// Completions sharing the session's culture or purpose tag
    pub times_completed_similar_sessions: u32,
    /// Mean completion percentage, 0.0 to 100.0
    pub average_completion_rate: f64,
    /// Share of fully completed sessions among the most recent ones, 0.0 to 1.0
    pub recent_success_rate: f64,
    pub completes_full_sessions: bool,
    pub engages_with_instructions: bool,
    pub needs_reminders: bool,
}

pub fn analyze_user_experience(
    session: &MeditationSession,
    progress: &UserMeditationProgress,
) -> UserExperienceMetrics {
    analyze_user_experience_with(&ScoringConfig::default(), session, progress)
}

pub fn analyze_user_experience_with(
    config: &ScoringConfig,
    session: &MeditationSession,
    progress: &UserMeditationProgress,
) -> UserExperienceMetrics {
    let history = &progress.completed_sessions;

    let shares_tag = |ours: &Option<String>, theirs: &Option<String>| {
        matches!((ours, theirs), (Some(a), Some(b)) if a == b)
    };
    let similar = history
        .iter()
        .filter(|c| {
            shares_tag(&session.culture_tag, &c.culture_tag)
                || shares_tag(&session.purpose_tag, &c.purpose_tag)
        })
        .count();

    let average_completion_rate = if history.is_empty() {
        0.0
    } else {
        history.iter().map(|c| c.completion_percentage as f64).sum::<f64>() / history.len() as f64
    };

    let recent = &history[history.len().saturating_sub(config.recent_window)..];
    let recent_success_rate = if recent.is_empty() {
        0.0
    } else {
        recent.iter().filter(|c| c.completed_fully).count() as f64 / recent.len() as f64
    };

    UserExperienceMetrics {
        total_sessions: history.len() as u32,
        total_minutes: progress.total_meditation_minutes,
        current_streak: progress.current_streak,
        level: progress.current_level,
        times_completed_this_session: progress.completion_count(session.id) as u32,
        times_completed_similar_sessions: similar as u32,
        average_completion_rate,
        recent_success_rate,
        completes_full_sessions: average_completion_rate >= 80.0,
        engages_with_instructions: progress.preferred_instruction_style != InstructionStyle::None
            && !progress.always_skip_instructions,
        needs_reminders: progress.reminder_frequency != ReminderFrequency::None,
    }
}

pub fn determine_instruction_level(metrics: &UserExperienceMetrics) -> AdaptationLevel {
    determine_instruction_level_with(&ScoringConfig::default(), metrics)
}

pub fn determine_instruction_level_with(
    config: &ScoringConfig,
    metrics: &UserExperienceMetrics,
) -> AdaptationLevel {
    if !metrics.engages_with_instructions {
        return AdaptationLevel::Skip;
    }

    let times = metrics.times_completed_this_session;
    if times == 0 {
        return AdaptationLevel::Full;
    }
    if times < config.minimal_after_repeats {
        return AdaptationLevel::Simplified;
    }
    if times < config.skip_after_repeats {
        return AdaptationLevel::Minimal;
    }
    AdaptationLevel::Skip
}

pub fn adapt_instruction(base: &PreSessionInstruction, level: AdaptationLevel) -> PreSessionInstruction {
    adapt_instruction_with(&ScoringConfig::default(), base, level)
}

/// Strip guidance down to the given tier
pub fn adapt_instruction_with(
    config: &ScoringConfig,
    base: &PreSessionInstruction,
    level: AdaptationLevel,
) -> PreSessionInstruction {
    match level {
        AdaptationLevel::Full => base.clone(),
        AdaptationLevel::Simplified => {
            let steps = base.physical_setup.len().min(config.simplified_step_cap);
            let reminders = base.reminders.len().div_ceil(2);
            PreSessionInstruction {
                physical_setup: &base.physical_setup[..steps],
                breathing_prep: base.breathing_prep.map(|prep| BreathingPrep {
                    duration_seconds: (prep.duration_seconds + 1) / 2,
                    ..prep
                }),
                reminders: &base.reminders[..reminders],
                ..base.clone()
            }
        }
        AdaptationLevel::Minimal => PreSessionInstruction {
            breathing_prep: None,
            mental_preparation: None,
            reminders: &base.reminders[..base.reminders.len().min(1)],
            ..base.clone()
        },
        AdaptationLevel::Skip => PreSessionInstruction {
            physical_setup: &[],
            breathing_prep: None,
            mental_preparation: None,
            reminders: &[],
            ..base.clone()
        },
    }
}

/// Instruction for `session`, adapted to the user's history with it
pub fn get_adaptive_instruction(
    session: &MeditationSession,
    progress: &UserMeditationProgress,
) -> PreSessionInstruction {
    let base = get_instruction_for_session(session);
    let metrics = analyze_user_experience(session, progress);
    let level = determine_instruction_level(&metrics);
    tracing::debug!("Instruction {} adapted to {:?} for session {}", base.id, level, session.id);
    adapt_instruction(base, level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveReminderKind {
    Encouragement,
    Technique,
    Refocus,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveReminder {
    pub time_seconds: u32,
    pub message_key: &'static str,
    pub kind: AdaptiveReminderKind,
    pub priority: ReminderPriority,
}

fn at_fraction(duration_seconds: u32, fraction: f64) -> u32 {
    (duration_seconds as f64 * fraction).round() as u32
}

/// In-session reminders tailored to the user's history, ordered by time
pub fn generate_adaptive_reminders(
    session: &MeditationSession,
    progress: &UserMeditationProgress,
) -> Vec<AdaptiveReminder> {
    let metrics = analyze_user_experience(session, progress);
    let duration = session.duration_seconds;
    let mut reminders = Vec::new();

    let past: Vec<_> = progress.completions_of(session.id).collect();
    let recent_quits = past[past.len().saturating_sub(3)..]
        .iter()
        .filter(|c| !c.completed_fully)
        .count();

    if recent_quits >= 2 {
        reminders.push(AdaptiveReminder {
            time_seconds: at_fraction(duration, 0.3),
            message_key: "reminders.adaptive.doingGreat",
            kind: AdaptiveReminderKind::Encouragement,
            priority: ReminderPriority::High,
        });
        reminders.push(AdaptiveReminder {
            time_seconds: at_fraction(duration, 0.6),
            message_key: "reminders.adaptive.almostThere",
            kind: AdaptiveReminderKind::Encouragement,
            priority: ReminderPriority::High,
        });
    }

    if duration >= 600 {
        reminders.push(AdaptiveReminder {
            time_seconds: at_fraction(duration, 0.5),
            message_key: "reminders.adaptive.halfway",
            kind: AdaptiveReminderKind::Progress,
            priority: ReminderPriority::Normal,
        });
    }

    if metrics.level <= 2 {
        reminders.push(AdaptiveReminder {
            time_seconds: at_fraction(duration, 0.25),
            message_key: "reminders.adaptive.mindWanders",
            kind: AdaptiveReminderKind::Technique,
            priority: ReminderPriority::Normal,
        });
    }

    if duration >= 300 && metrics.needs_reminders {
        reminders.push(AdaptiveReminder {
            time_seconds: at_fraction(duration, 0.5),
            message_key: "reminders.adaptive.returnToBreath",
            kind: AdaptiveReminderKind::Refocus,
            priority: ReminderPriority::Normal,
        });
    }

    reminders.sort_by_key(|r| r.time_seconds);
    reminders
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    MatchesLevel,
    SlightChallenge,
    FavoriteTradition,
    AlignsWithGoals,
    ImprovedMood,
    NewToYou,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRecommendation<'a> {
    pub session: &'a MeditationSession,
    pub reasons: Vec<RecommendationReason>,
    pub score: f64,
}

/// Top `limit` sessions with a positive personal score, best first
pub fn get_personalized_recommendations<'a>(
    sessions: &'a [MeditationSession],
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
    limit: usize,
) -> Vec<SessionRecommendation<'a>> {
    let mut recommendations: Vec<SessionRecommendation<'a>> = sessions
        .iter()
        .filter_map(|session| {
            let (score, reasons) = personal_score(session, progress, now);
            (score > 0.0).then_some(SessionRecommendation {
                session,
                reasons,
                score,
            })
        })
        .collect();

    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations.truncate(limit);
    recommendations
}

fn personal_score(
    session: &MeditationSession,
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> (f64, Vec<RecommendationReason>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if session.level == progress.current_level {
        score += LEVEL_MATCH_SCORE;
        reasons.push(RecommendationReason::MatchesLevel);
    } else if session.level as u16 == progress.current_level as u16 + 1 {
        score += LEVEL_STRETCH_SCORE;
        reasons.push(RecommendationReason::SlightChallenge);
    }

    if let Some(culture) = &session.culture_tag {
        if progress.preferred_cultures.contains(culture) {
            score += PREFERRED_CULTURE_SCORE;
            reasons.push(RecommendationReason::FavoriteTradition);
        }
    }
    if let Some(purpose) = &session.purpose_tag {
        if progress.preferred_occasions.contains(purpose) {
            score += PREFERRED_PURPOSE_SCORE;
            reasons.push(RecommendationReason::AlignsWithGoals);
        }
    }

    let past: Vec<_> = progress.completions_of(session.id).collect();
    if past.is_empty() {
        score += UNEXPLORED_SCORE;
        reasons.push(RecommendationReason::NewToYou);
    } else {
        // Completions without mood ratings count as no change
        let total: i32 = past.iter().filter_map(|c| c.mood_delta()).sum();
        let average = total as f64 / past.len() as f64;
        if average > 0.0 {
            score += average * MOOD_CHANGE_WEIGHT;
            reasons.push(RecommendationReason::ImprovedMood);
        }

        if let Some(last) = past.iter().map(|c| c.completed_at).max() {
            let days = (now - last).num_milliseconds() as f64 / 86_400_000.0;
            if days < 1.0 {
                score -= SAME_DAY_PENALTY;
            }
        }
    }

    (score, reasons)
}
