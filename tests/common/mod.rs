//! Fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset};

use slowspot::progress::{
    create_session_completion, record_completion, CompletionParams, UserMeditationProgress,
};
use slowspot::sessions::MeditationSession;

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

pub fn session(
    id: u32,
    level: u8,
    culture: Option<&str>,
    purpose: Option<&str>,
    minutes: u32,
) -> MeditationSession {
    MeditationSession {
        id,
        title: format!("Session {}", id),
        language_code: "en".into(),
        duration_seconds: minutes * 60,
        culture_tag: culture.map(String::from),
        purpose_tag: purpose.map(String::from),
        level,
        description: String::new(),
        instruction_id: None,
        is_custom: false,
    }
}

/// Ten sessions spread over levels 1-3, durations 3-20 minutes
pub fn catalog() -> Vec<MeditationSession> {
    vec![
        session(1, 1, Some("zen"), Some("calm"), 5),
        session(2, 1, Some("vedic"), Some("sleep"), 10),
        session(3, 2, Some("zen"), Some("focus"), 15),
        session(4, 2, Some("sufi"), Some("calm"), 8),
        session(5, 3, Some("taoist"), Some("energy"), 20),
        session(6, 1, None, Some("calm"), 3),
        session(7, 2, Some("vipassana"), None, 10),
        session(8, 3, Some("zen"), Some("sleep"), 12),
        session(9, 1, Some("christian"), Some("focus"), 7),
        session(10, 2, Some("vedic"), Some("energy"), 5),
    ]
}

pub fn fresh_progress() -> UserMeditationProgress {
    UserMeditationProgress::new("tester", ts("2026-01-01T06:00:00+00:00"))
}

/// Complete `session` fully at `at`, recording it into `progress`
pub fn complete(
    progress: &UserMeditationProgress,
    session: &MeditationSession,
    at: DateTime<FixedOffset>,
) -> UserMeditationProgress {
    let started = at - Duration::seconds(session.duration_seconds as i64);
    let params = CompletionParams::new(started, at, session.duration_seconds, true);
    let completion = create_session_completion(session, params);
    record_completion(progress, completion, at.date_naive())
}

/// One full completion of `session` per day, starting 2026-01-01 07:00 UTC
pub fn daily_practice(session: &MeditationSession, days: u32) -> UserMeditationProgress {
    let start = ts("2026-01-01T07:00:00+00:00");
    (0..days).fold(fresh_progress(), |progress, day| {
        complete(&progress, session, start + Duration::days(day as i64))
    })
}
