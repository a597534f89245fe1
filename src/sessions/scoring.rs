//! Session recommendation score
//!
//! A linear sum of hand-tuned terms; the weights live in `ScoringConfig`.

use chrono::{DateTime, FixedOffset};

use crate::core::ScoringConfig;
use crate::progress::UserMeditationProgress;
use crate::sessions::MeditationSession;

pub fn get_recommendation_score(
    session: &MeditationSession,
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> f64 {
    get_recommendation_score_with(&ScoringConfig::default(), session, progress, now)
}

pub fn get_recommendation_score_with(
    config: &ScoringConfig,
    session: &MeditationSession,
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> f64 {
    let mut score = level_match(config, session.level as i32 - progress.current_level as i32);

    if let Some(last) = progress.last_completion_time(session.id) {
        let days = (now - last).num_milliseconds() as f64 / 86_400_000.0;
        if days > 0.0 && days < config.recency_window_days {
            score += config.recency_bonus;
        }
    }

    let deltas: Vec<i32> = progress
        .completions_of(session.id)
        .filter_map(|c| c.mood_delta())
        .collect();
    if !deltas.is_empty() {
        let average = deltas.iter().sum::<i32>() as f64 / deltas.len() as f64;
        score += average * config.mood_delta_weight;
    }

    if let Some(culture) = session.culture_tag.as_deref() {
        let same = progress
            .completed_sessions
            .iter()
            .filter(|c| c.culture_tag.as_deref() == Some(culture))
            .count();
        score += repeat_bonus(same, config.culture_repeat_step, config.culture_repeat_cap);
    }

    if let Some(purpose) = session.purpose_tag.as_deref() {
        let same = progress
            .completed_sessions
            .iter()
            .filter(|c| c.purpose_tag.as_deref() == Some(purpose))
            .count();
        score += repeat_bonus(same, config.purpose_repeat_step, config.purpose_repeat_cap);
    }

    score
}

fn level_match(config: &ScoringConfig, diff: i32) -> f64 {
    match diff {
        0 => config.level_exact_bonus,
        1 => config.level_above_bonus,
        -1 => config.level_below_bonus,
        d => -(d.abs() as f64) * config.level_distance_penalty,
    }
}

fn repeat_bonus(count: usize, step: f64, cap: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        (count as f64 * step).min(cap)
    }
}
