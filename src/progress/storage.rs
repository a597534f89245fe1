//! JSON persistence for the progress aggregate
//!
//! The host owns the storage medium; this only maps between the aggregate
//! and its camelCase JSON form.

use chrono::{DateTime, FixedOffset};

use crate::core::Result;
use crate::progress::UserMeditationProgress;

/// Parse a stored progress document
pub fn try_load_progress(json: &str) -> Result<UserMeditationProgress> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a stored progress document, starting fresh when it is unreadable
///
/// A corrupt document is logged and replaced by a brand new aggregate for
/// `user_id`; the caller decides whether to overwrite what was stored.
pub fn load_progress_or_default(
    json: &str,
    user_id: &str,
    now: DateTime<FixedOffset>,
) -> UserMeditationProgress {
    match try_load_progress(json) {
        Ok(progress) => progress,
        Err(e) => {
            tracing::warn!("Discarding unreadable progress for {}: {}", user_id, e);
            UserMeditationProgress::new(user_id, now)
        }
    }
}

pub fn progress_to_json(progress: &UserMeditationProgress) -> Result<String> {
    Ok(serde_json::to_string_pretty(progress)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-03-01T08:00:00+01:00").unwrap()
    }

    #[test]
    fn test_corrupt_document_falls_back_to_fresh_progress() {
        let progress = load_progress_or_default("{not json", "user-1", now());
        assert_eq!(progress.user_id, "user-1");
        assert_eq!(progress.current_level, 1);
        assert!(progress.completed_sessions.is_empty());
    }

    #[test]
    fn test_saved_progress_loads_back() {
        let mut progress = UserMeditationProgress::new("user-2", now());
        progress
            .completed_sessions
            .push(completion_at(3, "2026-03-01T07:30:00+01:00"));
        progress.favorite_sessions.push(3);

        let json = progress_to_json(&progress).unwrap();
        assert!(json.contains("\"completedSessions\""));

        let loaded = try_load_progress(&json).unwrap();
        assert_eq!(loaded, progress);
    }
}
