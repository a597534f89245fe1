//! Session ordering
//!
//! Keys are computed once per session and the sort is stable: sessions with
//! equal keys keep their input order in both directions.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::ScoringConfig;
use crate::progress::UserMeditationProgress;
use crate::sessions::{get_recommendation_score_with, MeditationSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Title,
    Duration,
    Level,
    /// Most recently completed first
    Recent,
    /// Most completed first
    Popular,
    /// Highest recommendation score first
    Recommended,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    /// Reverses the comparator
    Desc,
}

enum SortKey {
    Text(String),
    Number(i64),
    Score(f64),
    /// Progress-backed key without progress: everything compares equal
    Unranked,
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.cmp(b),
            (SortKey::Score(a), SortKey::Score(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

pub fn sort_sessions<'a, I>(
    sessions: I,
    sort_by: SortBy,
    order: SortOrder,
    progress: Option<&UserMeditationProgress>,
    now: DateTime<FixedOffset>,
) -> Vec<&'a MeditationSession>
where
    I: IntoIterator<Item = &'a MeditationSession>,
{
    sort_sessions_with(&ScoringConfig::default(), sessions, sort_by, order, progress, now)
}

pub fn sort_sessions_with<'a, I>(
    config: &ScoringConfig,
    sessions: I,
    sort_by: SortBy,
    order: SortOrder,
    progress: Option<&UserMeditationProgress>,
    now: DateTime<FixedOffset>,
) -> Vec<&'a MeditationSession>
where
    I: IntoIterator<Item = &'a MeditationSession>,
{
    let mut keyed: Vec<(SortKey, &'a MeditationSession)> = sessions
        .into_iter()
        .map(|s| (sort_key(config, s, sort_by, progress, now), s))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, s)| s).collect()
}

/// Ascending key for `sort_by`; "most first" orderings are negated here
fn sort_key(
    config: &ScoringConfig,
    session: &MeditationSession,
    sort_by: SortBy,
    progress: Option<&UserMeditationProgress>,
    now: DateTime<FixedOffset>,
) -> SortKey {
    match (sort_by, progress) {
        (SortBy::Title, _) => SortKey::Text(session.title.to_lowercase()),
        (SortBy::Duration, _) => SortKey::Number(session.duration_seconds as i64),
        (SortBy::Level, _) => SortKey::Number(session.level as i64),
        (SortBy::Recent, Some(p)) => {
            let last = p
                .last_completion_time(session.id)
                .map_or(0, |t| t.timestamp_millis());
            SortKey::Number(-last)
        }
        (SortBy::Popular, Some(p)) => SortKey::Number(-(p.completion_count(session.id) as i64)),
        (SortBy::Recommended, Some(p)) => {
            SortKey::Score(-get_recommendation_score_with(config, session, p, now))
        }
        (_, None) => SortKey::Unranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::{catalog_session, completion_at};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-03-10T08:00:00+00:00").unwrap()
    }

    fn ids(list: &[&MeditationSession]) -> Vec<u32> {
        list.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_desc_keeps_ties_in_input_order() {
        let sessions = vec![
            catalog_session(1, 2, None, None, 600),
            catalog_session(2, 1, None, None, 600),
            catalog_session(3, 2, None, None, 300),
        ];
        let asc = sort_sessions(&sessions, SortBy::Level, SortOrder::Asc, None, now());
        assert_eq!(ids(&asc), vec![2, 1, 3]);
        let desc = sort_sessions(&sessions, SortBy::Level, SortOrder::Desc, None, now());
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let mut a = catalog_session(1, 1, None, None, 600);
        a.title = "breath".into();
        let mut b = catalog_session(2, 1, None, None, 600);
        b.title = "Awareness".into();
        let sessions = vec![a, b];
        let sorted = sort_sessions(&sessions, SortBy::Title, SortOrder::Asc, None, now());
        assert_eq!(ids(&sorted), vec![2, 1]);
    }

    #[test]
    fn test_progress_orderings_are_noops_without_progress() {
        let sessions = vec![
            catalog_session(3, 1, None, None, 600),
            catalog_session(1, 1, None, None, 600),
        ];
        for sort_by in [SortBy::Recent, SortBy::Popular, SortBy::Recommended] {
            let sorted = sort_sessions(&sessions, sort_by, SortOrder::Desc, None, now());
            assert_eq!(ids(&sorted), vec![3, 1]);
        }
    }

    #[test]
    fn test_recent_and_popular() {
        let sessions = vec![
            catalog_session(1, 1, None, None, 600),
            catalog_session(2, 1, None, None, 600),
            catalog_session(3, 1, None, None, 600),
        ];
        let mut progress = UserMeditationProgress::new("user", now());
        progress.completed_sessions = vec![
            completion_at(2, "2026-03-01T08:00:00+00:00"),
            completion_at(3, "2026-03-05T08:00:00+00:00"),
            completion_at(2, "2026-03-02T08:00:00+00:00"),
        ];

        let recent = sort_sessions(&sessions, SortBy::Recent, SortOrder::Asc, Some(&progress), now());
        assert_eq!(ids(&recent), vec![3, 2, 1]);

        let popular = sort_sessions(&sessions, SortBy::Popular, SortOrder::Asc, Some(&progress), now());
        assert_eq!(ids(&popular), vec![2, 3, 1]);
    }
}
