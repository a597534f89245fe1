//! Declarative session filters
//!
//! Each active criterion is an independent predicate and a session passes
//! only if it satisfies all of them, so the order criteria are checked in
//! never changes the result.

use ahash::AHashSet;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::SessionId;
use crate::progress::UserMeditationProgress;
use crate::sessions::{sort_sessions, MeditationSession, SortBy, SortOrder};

/// Inclusive bounds in whole minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl DurationRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        self.min.map_or(true, |min| minutes >= min) && self.max.map_or(true, |max| minutes <= max)
    }
}

/// Filter and sort criteria built by the catalog screen
///
/// Empty lists and `None` mean "not filtering on this".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionFilters {
    pub search_query: Option<String>,
    /// Exact durations in minutes
    pub durations: Vec<u32>,
    pub duration_range: Option<DurationRange>,
    pub levels: Vec<u8>,
    pub culture_tags: Vec<String>,
    pub purposes: Vec<String>,
    pub show_favorites_only: bool,
    pub show_hidden_sessions: bool,
    pub show_custom_sessions_only: bool,
    pub show_completed_only: bool,
    pub show_uncompleted_only: bool,
    pub has_instructions: Option<bool>,
    /// Instruction IDs
    pub instruction_types: Vec<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

/// Sets derived from progress once per filter pass
struct ProgressSets {
    favorites: AHashSet<SessionId>,
    hidden: AHashSet<SessionId>,
    completed: AHashSet<SessionId>,
}

impl ProgressSets {
    fn of(progress: &UserMeditationProgress) -> Self {
        Self {
            favorites: progress.favorite_sessions.iter().copied().collect(),
            hidden: progress.hidden_sessions.iter().copied().collect(),
            completed: progress.completed_sessions.iter().map(|c| c.session_id).collect(),
        }
    }
}

impl SessionFilters {
    fn search_term(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }

    fn matches(
        &self,
        session: &MeditationSession,
        query: Option<&str>,
        sets: Option<&ProgressSets>,
    ) -> bool {
        if let Some(query) = query {
            let hit = session.title.to_lowercase().contains(query)
                || session.description.to_lowercase().contains(query)
                || tag_contains(&session.culture_tag, query)
                || tag_contains(&session.purpose_tag, query);
            if !hit {
                return false;
            }
        }

        let minutes = session.duration_minutes();
        if !self.durations.is_empty() && !self.durations.contains(&minutes) {
            return false;
        }
        if let Some(range) = &self.duration_range {
            if !range.contains(minutes) {
                return false;
            }
        }

        if !self.levels.is_empty() && !self.levels.contains(&session.level) {
            return false;
        }
        if !self.culture_tags.is_empty() && !tag_in(&session.culture_tag, &self.culture_tags) {
            return false;
        }
        if !self.purposes.is_empty() && !tag_in(&session.purpose_tag, &self.purposes) {
            return false;
        }

        if self.show_custom_sessions_only && !session.is_custom {
            return false;
        }

        // Progress-backed criteria are skipped when no progress is supplied
        if let Some(sets) = sets {
            if self.show_favorites_only && !sets.favorites.contains(&session.id) {
                return false;
            }
            if !self.show_hidden_sessions && sets.hidden.contains(&session.id) {
                return false;
            }
            if self.show_completed_only && !sets.completed.contains(&session.id) {
                return false;
            }
            if self.show_uncompleted_only && sets.completed.contains(&session.id) {
                return false;
            }
        }

        if let Some(wanted) = self.has_instructions {
            if session.instruction_id.is_some() != wanted {
                return false;
            }
        }
        if !self.instruction_types.is_empty() && !tag_in(&session.instruction_id, &self.instruction_types) {
            return false;
        }

        true
    }
}

fn tag_contains(tag: &Option<String>, query: &str) -> bool {
    tag.as_deref()
        .map_or(false, |t| t.to_lowercase().contains(query))
}

fn tag_in(tag: &Option<String>, wanted: &[String]) -> bool {
    tag.as_deref()
        .map_or(false, |t| !t.is_empty() && wanted.iter().any(|w| w == t))
}

/// Sessions passing every active criterion, in input order
pub fn filter_sessions<'a>(
    sessions: &'a [MeditationSession],
    filters: &SessionFilters,
    progress: Option<&UserMeditationProgress>,
) -> Vec<&'a MeditationSession> {
    let query = filters.search_term();
    let sets = progress.map(ProgressSets::of);
    sessions
        .iter()
        .filter(|s| filters.matches(s, query.as_deref(), sets.as_ref()))
        .collect()
}

/// Filter, then sort if the filters carry a sort key
pub fn filter_and_sort_sessions<'a>(
    sessions: &'a [MeditationSession],
    filters: &SessionFilters,
    progress: Option<&UserMeditationProgress>,
    now: DateTime<FixedOffset>,
) -> Vec<&'a MeditationSession> {
    let filtered = filter_sessions(sessions, filters, progress);
    match filters.sort_by {
        Some(sort_by) => sort_sessions(
            filtered,
            sort_by,
            filters.sort_order.unwrap_or_default(),
            progress,
            now,
        ),
        None => filtered,
    }
}

/// True when no filter criterion is active
///
/// Sort settings and `show_hidden_sessions` do not count as filters.
pub fn are_filters_empty(filters: &SessionFilters) -> bool {
    count_active_filters(filters) == 0
}

pub fn count_active_filters(filters: &SessionFilters) -> usize {
    [
        filters.search_query.as_deref().map_or(false, |q| !q.is_empty()),
        !filters.durations.is_empty(),
        filters.duration_range.is_some(),
        !filters.levels.is_empty(),
        !filters.culture_tags.is_empty(),
        !filters.purposes.is_empty(),
        filters.show_favorites_only,
        filters.show_custom_sessions_only,
        filters.show_completed_only,
        filters.show_uncompleted_only,
        filters.has_instructions.is_some(),
        !filters.instruction_types.is_empty(),
    ]
    .iter()
    .filter(|active| **active)
    .count()
}

/// Filters reset to "everything, by title"
pub fn clear_filters() -> SessionFilters {
    SessionFilters {
        sort_by: Some(SortBy::Title),
        sort_order: Some(SortOrder::Asc),
        ..SessionFilters::default()
    }
}
