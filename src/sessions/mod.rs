//! Session catalog, filtering and ranking
//!
//! The session catalog itself is compiled into the app and handed to these
//! functions read-only; user-built sessions are merged in via
//! `CustomSession::to_session`.

pub mod available;
pub mod filters;
pub mod presets;
pub mod scoring;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::core::{Result, SessionId, SlowspotError};
use crate::progress::CustomSession;

pub use available::{get_available_filters, AvailableFilters, TagCount};
pub use filters::{
    are_filters_empty, clear_filters, count_active_filters, filter_and_sort_sessions,
    filter_sessions, DurationRange, SessionFilters,
};
pub use presets::{apply_filter_preset, get_filter_preset, FilterPreset, FILTER_PRESETS};
pub use scoring::{get_recommendation_score, get_recommendation_score_with};
pub use sort::{sort_sessions, sort_sessions_with, SortBy, SortOrder};

/// A meditation session from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationSession {
    pub id: SessionId,
    pub title: String,
    #[serde(default = "default_language")]
    pub language_code: String,
    pub duration_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose_tag: Option<String>,
    pub level: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_id: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

fn default_language() -> String {
    "en".to_string()
}

impl MeditationSession {
    /// Duration rounded to whole minutes, as shown in the UI
    pub fn duration_minutes(&self) -> u32 {
        ((self.duration_seconds as u64 + 30) / 60) as u32
    }
}

/// Reject catalog entries the scoring engine cannot work with
pub fn validate_session(session: &MeditationSession) -> Result<()> {
    let invalid = |reason: &str| SlowspotError::InvalidSession {
        id: session.id,
        reason: reason.to_string(),
    };
    if session.duration_seconds == 0 {
        return Err(invalid("zero duration"));
    }
    if !(1..=5).contains(&session.level) {
        return Err(invalid("level outside 1-5"));
    }
    if session.title.trim().is_empty() {
        return Err(invalid("empty title"));
    }
    Ok(())
}

impl CustomSession {
    /// View of a custom session as a catalog entry
    pub fn to_session(&self) -> MeditationSession {
        MeditationSession {
            id: self.id,
            title: self.title.clone(),
            language_code: default_language(),
            duration_seconds: self.duration_seconds,
            culture_tag: self.culture_tag.clone(),
            purpose_tag: self.custom_tags.first().cloned(),
            level: self.level,
            description: self.description.clone(),
            instruction_id: self.instruction_id.clone(),
            is_custom: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_minutes_rounds_half_up() {
        let mut session = MeditationSession {
            id: 1,
            title: "Breath".into(),
            language_code: "en".into(),
            duration_seconds: 299,
            culture_tag: None,
            purpose_tag: None,
            level: 1,
            description: String::new(),
            instruction_id: None,
            is_custom: false,
        };
        assert_eq!(session.duration_minutes(), 5);
        session.duration_seconds = 450;
        assert_eq!(session.duration_minutes(), 8);
        session.duration_seconds = 449;
        assert_eq!(session.duration_minutes(), 7);
        session.duration_seconds = u32::MAX;
        assert_eq!(session.duration_minutes(), 71_582_788);
    }

    #[test]
    fn test_validate_session() {
        let mut session = crate::progress::test_support::catalog_session(3, 2, None, None, 600);
        assert!(validate_session(&session).is_ok());
        session.level = 6;
        assert!(matches!(
            validate_session(&session),
            Err(SlowspotError::InvalidSession { id: 3, .. })
        ));
    }
}
