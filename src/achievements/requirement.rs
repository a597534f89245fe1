//! Declarative achievement requirements
//!
//! Every requirement reads as "some measure of the progress snapshot is at
//! least a target". The measure is computed here; catalog entries only
//! carry data.

use ahash::AHashSet;
use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::progress::{SessionCompletion, UserMeditationProgress};

/// Malformed requirement data
///
/// Evaluation fails closed on these: the achievement is treated as locked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    #[error("target must be at least 1")]
    ZeroTarget,
    #[error("empty hour window {start}..{end}")]
    EmptyHourWindow { start: u32, end: u32 },
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Completions recorded
    Sessions(u32),
    /// Current daily streak
    Streak(u32),
    /// Completions tagged with one culture
    CultureSessions { culture: &'static str, count: u32 },
    /// Distinct non-empty culture tags completed
    UniqueCultures(u32),
    /// Stored user level
    Level(u8),
    /// Stored total minutes
    TotalMinutes(u32),
    /// Completions whose local hour falls in `start..end`
    ///
    /// The window wraps past midnight when `start > end`.
    HourWindow { start: u32, end: u32, count: u32 },
    /// Completions on a Saturday or Sunday (local)
    WeekendSessions(u32),
    /// The last `n` completions were all completed fully
    ///
    /// Measured as the number of fully completed sessions in the trailing
    /// window, but only once at least `n` completions exist.
    TrailingFullCompletions(u32),
    /// Completions where mood after was strictly higher than before
    MoodImprovements(u32),
    /// Completions that actually lasted at least `min_seconds`
    LongSessions { min_seconds: u32, count: u32 },
    /// Distinct catalog sessions completed
    UniqueSessions(u32),
    /// Completions with at least one non-empty reflection note
    SessionsWithNotes(u32),
}

/// Incremental progress toward a requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerProgress {
    pub current: u32,
    pub target: u32,
    pub unit: &'static str,
}

impl Requirement {
    pub fn target(&self) -> u32 {
        match *self {
            Requirement::Sessions(n)
            | Requirement::Streak(n)
            | Requirement::UniqueCultures(n)
            | Requirement::TotalMinutes(n)
            | Requirement::WeekendSessions(n)
            | Requirement::TrailingFullCompletions(n)
            | Requirement::MoodImprovements(n)
            | Requirement::UniqueSessions(n)
            | Requirement::SessionsWithNotes(n) => n,
            Requirement::Level(level) => level as u32,
            Requirement::CultureSessions { count, .. }
            | Requirement::HourWindow { count, .. }
            | Requirement::LongSessions { count, .. } => count,
        }
    }

    pub fn validate(&self) -> Result<(), RequirementError> {
        if self.target() == 0 {
            return Err(RequirementError::ZeroTarget);
        }
        if let Requirement::HourWindow { start, end, .. } = *self {
            if start > 23 {
                return Err(RequirementError::HourOutOfRange(start));
            }
            if end > 24 {
                return Err(RequirementError::HourOutOfRange(end));
            }
            if start == end {
                return Err(RequirementError::EmptyHourWindow { start, end });
            }
        }
        Ok(())
    }

    /// Current value of the measured quantity
    pub fn measure(&self, progress: &UserMeditationProgress) -> Result<u32, RequirementError> {
        self.validate()?;
        let history = &progress.completed_sessions;

        let value = match *self {
            Requirement::Sessions(_) => len(history.len()),
            Requirement::Streak(_) => progress.current_streak,
            Requirement::CultureSessions { culture, .. } => count(history, |c| {
                c.culture_tag.as_deref() == Some(culture)
            }),
            Requirement::UniqueCultures(_) => {
                let cultures: AHashSet<&str> = history
                    .iter()
                    .filter_map(|c| c.culture_tag.as_deref())
                    .filter(|tag| !tag.is_empty())
                    .collect();
                len(cultures.len())
            }
            Requirement::Level(_) => progress.current_level as u32,
            Requirement::TotalMinutes(_) => progress.total_meditation_minutes,
            Requirement::HourWindow { start, end, .. } => count(history, |c| {
                in_hour_window(c.completed_at.hour(), start, end)
            }),
            Requirement::WeekendSessions(_) => count(history, |c| {
                matches!(c.completed_at.weekday(), Weekday::Sat | Weekday::Sun)
            }),
            Requirement::TrailingFullCompletions(n) => {
                let n = n as usize;
                if history.len() < n {
                    0
                } else {
                    count(&history[history.len() - n..], |c| c.completed_fully)
                }
            }
            Requirement::MoodImprovements(_) => count(history, |c| c.mood_improved()),
            Requirement::LongSessions { min_seconds, .. } => {
                count(history, |c| c.actual_duration_seconds >= min_seconds)
            }
            Requirement::UniqueSessions(_) => {
                let ids: AHashSet<_> = history.iter().map(|c| c.session_id).collect();
                len(ids.len())
            }
            Requirement::SessionsWithNotes(_) => {
                let noted: AHashSet<_> = progress
                    .session_notes
                    .iter()
                    .filter(|n| !n.note.trim().is_empty())
                    .map(|n| n.session_completion_id)
                    .collect();
                count(history, |c| noted.contains(&c.id))
            }
        };
        Ok(value)
    }

    pub fn is_met(&self, progress: &UserMeditationProgress) -> Result<bool, RequirementError> {
        Ok(self.measure(progress)? >= self.target())
    }

    pub fn tracker(
        &self,
        progress: &UserMeditationProgress,
        unit: &'static str,
    ) -> Result<TrackerProgress, RequirementError> {
        Ok(TrackerProgress {
            current: self.measure(progress)?,
            target: self.target(),
            unit,
        })
    }
}

fn in_hour_window(hour: u32, start: u32, end: u32) -> bool {
    if start < end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

fn count(history: &[SessionCompletion], pred: impl Fn(&SessionCompletion) -> bool) -> u32 {
    len(history.iter().filter(|c| pred(c)).count())
}

fn len(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::test_support::completion_at;
    use chrono::DateTime;

    fn progress_with(completions: Vec<SessionCompletion>) -> UserMeditationProgress {
        let now = DateTime::parse_from_rfc3339("2026-01-01T00:00:00+00:00").unwrap();
        let mut progress = UserMeditationProgress::new("user", now);
        progress.completed_sessions = completions;
        progress
    }

    #[test]
    fn test_night_window_wraps_midnight() {
        assert!(in_hour_window(23, 22, 5));
        assert!(in_hour_window(0, 22, 5));
        assert!(in_hour_window(4, 22, 5));
        assert!(!in_hour_window(5, 22, 5));
        assert!(!in_hour_window(21, 22, 5));
        assert!(in_hour_window(6, 5, 7));
        assert!(!in_hour_window(7, 5, 7));
    }

    #[test]
    fn test_hour_is_read_in_local_offset() {
        // 06:30 local in +09:00 is 21:30 UTC the previous day
        let progress = progress_with(vec![completion_at(1, "2026-01-05T06:30:00+09:00")]);
        let early = Requirement::HourWindow { start: 5, end: 7, count: 1 };
        assert!(early.is_met(&progress).unwrap());
    }

    #[test]
    fn test_trailing_window_needs_full_length() {
        let mut history: Vec<_> = (0..9)
            .map(|i| completion_at(i, "2026-01-05T10:00:00+00:00"))
            .collect();
        let req = Requirement::TrailingFullCompletions(10);
        assert_eq!(req.measure(&progress_with(history.clone())).unwrap(), 0);

        history.push(completion_at(9, "2026-01-05T11:00:00+00:00"));
        assert!(req.is_met(&progress_with(history.clone())).unwrap());

        history.push(SessionCompletion {
            completed_fully: false,
            ..completion_at(10, "2026-01-05T12:00:00+00:00")
        });
        let progress = progress_with(history);
        assert_eq!(req.measure(&progress).unwrap(), 9);
        assert!(!req.is_met(&progress).unwrap());
    }

    #[test]
    fn test_malformed_requirements_are_errors() {
        let progress = progress_with(vec![]);
        assert_eq!(
            Requirement::Sessions(0).is_met(&progress),
            Err(RequirementError::ZeroTarget)
        );
        assert_eq!(
            Requirement::HourWindow { start: 6, end: 6, count: 1 }.measure(&progress),
            Err(RequirementError::EmptyHourWindow { start: 6, end: 6 })
        );
    }

    #[test]
    fn test_unique_cultures_ignore_empty_tags() {
        let mut a = completion_at(1, "2026-01-05T10:00:00+00:00");
        a.culture_tag = Some("zen".into());
        let mut b = completion_at(2, "2026-01-05T11:00:00+00:00");
        b.culture_tag = Some(String::new());
        let mut c = completion_at(3, "2026-01-05T12:00:00+00:00");
        c.culture_tag = Some("zen".into());
        let progress = progress_with(vec![a, b, c]);
        assert_eq!(Requirement::UniqueCultures(6).measure(&progress).unwrap(), 1);
    }
}
