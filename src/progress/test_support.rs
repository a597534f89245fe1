//! Builders shared by unit tests

use chrono::DateTime;

use crate::core::CompletionId;
use crate::progress::SessionCompletion;
use crate::sessions::MeditationSession;

/// A fully completed 10-minute session at `completed_at` (RFC 3339)
pub fn completion_at(session_id: u32, completed_at: &str) -> SessionCompletion {
    let completed_at = DateTime::parse_from_rfc3339(completed_at).unwrap();
    SessionCompletion {
        id: CompletionId::new(),
        session_id,
        session_title: format!("Session {}", session_id),
        culture_tag: None,
        purpose_tag: None,
        level: 1,
        started_at: completed_at - chrono::Duration::minutes(10),
        completed_at,
        planned_duration_seconds: 600,
        actual_duration_seconds: 600,
        completed_fully: true,
        quit_reason: None,
        completion_percentage: 100,
        mood_before: None,
        mood_after: None,
        energy_before: None,
        energy_after: None,
        difficulty: None,
        enjoyment: None,
        helpfulness: None,
        xp_earned: 25,
    }
}

pub fn catalog_session(
    id: u32,
    level: u8,
    culture: Option<&str>,
    purpose: Option<&str>,
    duration_seconds: u32,
) -> MeditationSession {
    MeditationSession {
        id,
        title: format!("Session {}", id),
        language_code: "en".into(),
        duration_seconds,
        culture_tag: culture.map(String::from),
        purpose_tag: purpose.map(String::from),
        level,
        description: String::new(),
        instruction_id: None,
        is_custom: false,
    }
}
