//! Practice analytics for the insights dashboard
//!
//! Everything here is read-only over a progress snapshot. Calendar days and
//! hours are taken in each record's own offset.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use serde::Serialize;

use crate::core::{most_frequent, ScoringConfig, TimeOfDay};
use crate::leveling::calculate_level_from_xp_with;
use crate::progress::{meditation_days, MoodEntry, SessionCompletion, UserMeditationProgress};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_minutes: u32,
    pub total_sessions: u32,
    /// Minutes
    pub average_session_duration: f64,
    pub longest_session: f64,
    pub shortest_session: f64,

    pub current_streak: u32,
    pub longest_streak: u32,
    pub meditation_days: u32,
    /// 0-100, share of days since the first session that had practice
    pub consistency_score: u32,

    /// 0-100
    pub completion_rate: u32,
    pub average_mood_improvement: f64,
    pub successful_sessions: u32,
    pub total_xp: u32,
    pub current_level: u8,

    pub favorite_culture: Option<String>,
    pub favorite_purpose: Option<String>,
    pub favorite_time_of_day: Option<TimeOfDay>,
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn average_mood_change<'a>(completions: impl Iterator<Item = &'a SessionCompletion>) -> f64 {
    average(completions.filter_map(|c| c.mood_delta()).map(|d| d as f64))
}

pub fn calculate_overall_stats(
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> OverallStats {
    let completions = &progress.completed_sessions;

    let durations: Vec<f64> = completions
        .iter()
        .map(|c| c.actual_duration_seconds as f64 / 60.0)
        .collect();
    let longest_session = durations.iter().copied().reduce(f64::max);
    let shortest_session = durations.iter().copied().reduce(f64::min);

    let unique_days = meditation_days(completions).len() as u32;
    let days_since_start = completions
        .iter()
        .map(|c| c.completed_at)
        .min()
        .map_or(0.0, |first| ((now - first).num_seconds() as f64 / 86_400.0).ceil());
    let consistency_score = if days_since_start > 0.0 {
        ((unique_days as f64 / days_since_start * 100.0).round() as u32).min(100)
    } else {
        0
    };

    let completion_rate = if completions.is_empty() {
        0
    } else {
        let full = completions.iter().filter(|c| c.completed_fully).count();
        (full as f64 / completions.len() as f64 * 100.0).round() as u32
    };

    let successful_sessions = completions
        .iter()
        .filter(|c| c.completed_fully && c.mood_delta().map_or(false, |d| d >= 0))
        .count() as u32;

    OverallStats {
        total_minutes: progress.total_meditation_minutes,
        total_sessions: progress.total_sessions,
        average_session_duration: average(durations.iter().copied()),
        longest_session: longest_session.unwrap_or(0.0),
        shortest_session: shortest_session.unwrap_or(0.0),
        current_streak: progress.current_streak,
        longest_streak: progress.longest_streak,
        meditation_days: unique_days,
        consistency_score,
        completion_rate,
        average_mood_improvement: average_mood_change(completions.iter()),
        successful_sessions,
        total_xp: progress.experience_points,
        current_level: progress.current_level,
        favorite_culture: most_frequent(completions.iter().filter_map(|c| c.culture_tag.clone())),
        favorite_purpose: most_frequent(completions.iter().filter_map(|c| c.purpose_tag.clone())),
        favorite_time_of_day: most_frequent(completions.iter().map(|c| TimeOfDay::of(&c.completed_at))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrend {
    pub date: NaiveDate,
    pub avg_before: f64,
    pub avg_after: f64,
    pub avg_change: f64,
    pub session_count: u32,
}

/// Earliest instant inside a look-back window; `None` when it reaches past
/// the representable calendar, meaning everything is inside
fn window_start(now: DateTime<FixedOffset>, span: Duration) -> Option<DateTime<FixedOffset>> {
    now.checked_sub_signed(span)
}

/// Daily mood averages over the last `days` days, oldest first
pub fn calculate_mood_trends(
    entries: &[MoodEntry],
    days: u32,
    now: DateTime<FixedOffset>,
) -> Vec<MoodTrend> {
    let start = window_start(now, Duration::days(days as i64));

    let mut daily: BTreeMap<NaiveDate, Vec<&MoodEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|e| start.map_or(true, |s| e.date >= s)) {
        daily.entry(entry.date.date_naive()).or_default().push(entry);
    }

    daily
        .into_iter()
        .map(|(date, entries)| {
            let avg_before = average(entries.iter().map(|e| e.before_meditation.value() as f64));
            let avg_after = average(entries.iter().map(|e| e.after_meditation.value() as f64));
            MoodTrend {
                date,
                avg_before,
                avg_after,
                avg_change: avg_after - avg_before,
                session_count: entries.len() as u32,
            }
        })
        .collect()
}

/// Aggregate for one bucket of completions (an hour or a weekday)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticePattern {
    /// Hour 0-23, or weekday 0 = Sunday .. 6 = Saturday
    pub bucket: u32,
    pub session_count: u32,
    pub avg_completion_rate: f64,
    pub avg_mood_improvement: f64,
}

impl PracticePattern {
    fn from_bucket(bucket: u32, sessions: &[&SessionCompletion]) -> Self {
        PracticePattern {
            bucket,
            session_count: sessions.len() as u32,
            avg_completion_rate: average(sessions.iter().map(|s| s.completion_percentage as f64)),
            avg_mood_improvement: average_mood_change(sessions.iter().copied()),
        }
    }
}

/// One entry per hour that has any completions, by hour
pub fn analyze_time_patterns(completions: &[SessionCompletion]) -> Vec<PracticePattern> {
    let mut hourly: BTreeMap<u32, Vec<&SessionCompletion>> = BTreeMap::new();
    for c in completions {
        hourly.entry(c.completed_at.hour()).or_default().push(c);
    }
    hourly
        .into_iter()
        .map(|(hour, sessions)| PracticePattern::from_bucket(hour, &sessions))
        .collect()
}

/// Always seven entries, Sunday first
pub fn analyze_weekly_patterns(completions: &[SessionCompletion]) -> Vec<PracticePattern> {
    let mut weekly: [Vec<&SessionCompletion>; 7] = Default::default();
    for c in completions {
        weekly[c.weekday_index() as usize].push(c);
    }
    weekly
        .iter()
        .enumerate()
        .map(|(day, sessions)| PracticePattern::from_bucket(day as u32, sessions))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Pattern,
    Achievement,
    Suggestion,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

/// Interpolation values for an insight's i18n strings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightData {
    Streak { streak: u32 },
    Minutes { minutes: u32 },
    TimeOfDay {
        #[serde(rename = "timeOfDay")]
        time_of_day: TimeOfDay,
    },
    BestTime { hour: u32, improvement: f64 },
    MoodImprovement { improvement: f64 },
    Consistency { score: u32 },
    CompletionRate { rate: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInsight {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title_key: &'static str,
    pub description_key: &'static str,
    pub priority: InsightPriority,
    pub data: InsightData,
}

impl GeneratedInsight {
    fn new(id: &'static str, kind: InsightKind, priority: InsightPriority, data: InsightData) -> Self {
        let (title_key, description_key) = match id {
            "streak_7" => ("insights.streak7.title", "insights.streak7.description"),
            "minutes_1000" => ("insights.minutes1000.title", "insights.minutes1000.description"),
            "time_pattern" => ("insights.timePattern.title", "insights.timePattern.description"),
            "best_time" => ("insights.bestTime.title", "insights.bestTime.description"),
            "mood_improvement" => (
                "insights.moodImprovement.title",
                "insights.moodImprovement.description",
            ),
            "consistency_suggestion" => (
                "insights.consistencySuggestion.title",
                "insights.consistencySuggestion.description",
            ),
            _ => (
                "insights.completionSuggestion.title",
                "insights.completionSuggestion.description",
            ),
        };
        GeneratedInsight {
            id,
            kind,
            title_key,
            description_key,
            priority,
            data,
        }
    }
}

/// Rule-based insights, highest priority first
pub fn generate_insights(
    progress: &UserMeditationProgress,
    now: DateTime<FixedOffset>,
) -> Vec<GeneratedInsight> {
    use InsightKind::*;
    use InsightPriority::*;

    let stats = calculate_overall_stats(progress, now);
    let mut insights = Vec::new();

    if (7..14).contains(&stats.current_streak) {
        insights.push(GeneratedInsight::new(
            "streak_7",
            Milestone,
            High,
            InsightData::Streak { streak: stats.current_streak },
        ));
    }

    if (1000..1500).contains(&stats.total_minutes) {
        insights.push(GeneratedInsight::new(
            "minutes_1000",
            Milestone,
            High,
            InsightData::Minutes { minutes: stats.total_minutes },
        ));
    }

    if let Some(time_of_day) = stats.favorite_time_of_day {
        insights.push(GeneratedInsight::new(
            "time_pattern",
            Pattern,
            Medium,
            InsightData::TimeOfDay { time_of_day },
        ));
    }

    // Earliest hour wins ties
    let mut patterns = analyze_time_patterns(&progress.completed_sessions);
    patterns.sort_by(|a, b| b.avg_mood_improvement.total_cmp(&a.avg_mood_improvement));
    if let Some(best) = patterns.first().filter(|p| p.session_count >= 3) {
        insights.push(GeneratedInsight::new(
            "best_time",
            Pattern,
            Medium,
            InsightData::BestTime {
                hour: best.bucket,
                improvement: best.avg_mood_improvement,
            },
        ));
    }

    if stats.average_mood_improvement >= 1.0 {
        insights.push(GeneratedInsight::new(
            "mood_improvement",
            Achievement,
            High,
            InsightData::MoodImprovement {
                improvement: (stats.average_mood_improvement * 10.0).round() / 10.0,
            },
        ));
    }

    if stats.consistency_score < 50 && stats.total_sessions >= 10 {
        insights.push(GeneratedInsight::new(
            "consistency_suggestion",
            Suggestion,
            Medium,
            InsightData::Consistency { score: stats.consistency_score },
        ));
    }

    if stats.completion_rate < 70 && stats.total_sessions >= 10 {
        insights.push(GeneratedInsight::new(
            "completion_suggestion",
            Suggestion,
            Medium,
            InsightData::CompletionRate { rate: stats.completion_rate },
        ));
    }

    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    tracing::debug!("Generated {} insights", insights.len());
    insights
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOverTime {
    /// Sunday starting the week
    pub date: NaiveDate,
    pub cumulative_minutes: u32,
    pub cumulative_sessions: u32,
    pub level: u32,
    pub xp: u32,
}

pub fn calculate_progress_over_time(
    completions: &[SessionCompletion],
    weeks: u32,
    now: DateTime<FixedOffset>,
) -> Vec<ProgressOverTime> {
    calculate_progress_over_time_with(&ScoringConfig::default(), completions, weeks, now)
}

/// Weekly cumulative totals over the last `weeks` weeks
///
/// Only session XP is counted; the level is read off the same curve the
/// progress aggregate uses.
pub fn calculate_progress_over_time_with(
    config: &ScoringConfig,
    completions: &[SessionCompletion],
    weeks: u32,
    now: DateTime<FixedOffset>,
) -> Vec<ProgressOverTime> {
    let start = window_start(now, Duration::weeks(weeks as i64));

    let mut weekly: BTreeMap<NaiveDate, Vec<&SessionCompletion>> = BTreeMap::new();
    for c in completions.iter().filter(|c| start.map_or(true, |s| c.completed_at >= s)) {
        let day = c.completed_on();
        let week_start = day - Duration::days(c.weekday_index() as i64);
        weekly.entry(week_start).or_default().push(c);
    }

    let mut minutes = 0.0;
    let mut sessions = 0u32;
    let mut xp = 0u32;
    weekly
        .into_iter()
        .map(|(date, week)| {
            for c in week {
                minutes += c.actual_duration_seconds as f64 / 60.0;
                sessions += 1;
                xp = xp.saturating_add(c.xp_earned);
            }
            let level = config.clamp_level(calculate_level_from_xp_with(config, xp)) as u32;
            ProgressOverTime {
                date,
                cumulative_minutes: minutes.round() as u32,
                cumulative_sessions: sessions,
                level,
                xp,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MoodRating;
    use crate::progress::test_support::completion_at;
    use crate::progress::{create_mood_entry, refresh_counters};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn with_mood(mut c: SessionCompletion, before: u8, after: u8) -> SessionCompletion {
        c.mood_before = Some(MoodRating::new(before).unwrap());
        c.mood_after = Some(MoodRating::new(after).unwrap());
        c
    }

    fn three_day_progress() -> UserMeditationProgress {
        let mut progress = UserMeditationProgress::new("user", ts("2026-01-01T00:00:00+00:00"));
        let mut first = with_mood(completion_at(1, "2026-01-01T08:00:00+00:00"), 2, 4);
        first.culture_tag = Some("zen".into());
        let mut second = with_mood(completion_at(2, "2026-01-02T08:30:00+00:00"), 3, 4);
        second.culture_tag = Some("vedic".into());
        second.actual_duration_seconds = 300;
        second.completed_fully = false;
        let mut third = completion_at(3, "2026-01-03T19:00:00+00:00");
        third.culture_tag = Some("vedic".into());
        progress.completed_sessions = vec![first, second, third];
        refresh_counters(&progress, ts("2026-01-03T20:00:00+00:00").date_naive())
    }

    #[test]
    fn test_overall_stats() {
        let stats = calculate_overall_stats(&three_day_progress(), ts("2026-01-05T08:00:00+00:00"));
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.meditation_days, 3);
        assert_eq!(stats.consistency_score, 75);
        assert_eq!(stats.completion_rate, 67);
        assert_eq!(stats.longest_session, 10.0);
        assert_eq!(stats.shortest_session, 5.0);
        assert_eq!(stats.average_mood_improvement, 1.5);
        assert_eq!(stats.successful_sessions, 1);
        assert_eq!(stats.favorite_culture.as_deref(), Some("vedic"));
        assert_eq!(stats.favorite_purpose, None);
        assert_eq!(stats.favorite_time_of_day, Some(TimeOfDay::Morning));
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let progress = UserMeditationProgress::new("user", ts("2026-01-01T00:00:00+00:00"));
        let stats = calculate_overall_stats(&progress, ts("2026-01-05T08:00:00+00:00"));
        assert_eq!(stats.consistency_score, 0);
        assert_eq!(stats.average_session_duration, 0.0);
        assert_eq!(stats.favorite_time_of_day, None);
    }

    #[test]
    fn test_weekly_patterns_cover_all_days() {
        let progress = three_day_progress();
        let weekly = analyze_weekly_patterns(&progress.completed_sessions);
        assert_eq!(weekly.len(), 7);
        // 2026-01-01 is a Thursday
        assert_eq!(weekly[4].session_count, 1);
        assert_eq!(weekly[4].avg_mood_improvement, 2.0);
        assert_eq!(weekly[0].session_count, 0);
    }

    #[test]
    fn test_time_patterns_by_hour() {
        let progress = three_day_progress();
        let hours: Vec<_> = analyze_time_patterns(&progress.completed_sessions)
            .iter()
            .map(|p| (p.bucket, p.session_count))
            .collect();
        assert_eq!(hours, vec![(8, 2), (19, 1)]);
    }

    #[test]
    fn test_mood_trends_window() {
        let progress = three_day_progress();
        let entries: Vec<MoodEntry> = progress
            .completed_sessions
            .iter()
            .filter(|c| c.mood_before.is_some())
            .map(|c| {
                create_mood_entry(
                    c.session_id,
                    c.id,
                    c.mood_before.unwrap(),
                    c.mood_after.unwrap(),
                    None,
                    c.completed_at,
                )
            })
            .collect();

        let trends = calculate_mood_trends(&entries, 30, ts("2026-01-10T00:00:00+00:00"));
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(trends[0].avg_change, 2.0);

        let recent = calculate_mood_trends(&entries, 8, ts("2026-01-10T00:00:00+00:00"));
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn test_unbounded_windows_include_everything() {
        let progress = three_day_progress();
        let now = ts("2026-01-10T00:00:00+00:00");
        let entries: Vec<MoodEntry> = progress
            .completed_sessions
            .iter()
            .filter_map(|c| {
                Some(create_mood_entry(c.session_id, c.id, c.mood_before?, c.mood_after?, None, c.completed_at))
            })
            .collect();

        assert_eq!(calculate_mood_trends(&entries, u32::MAX, now).len(), 2);

        let points = calculate_progress_over_time(&progress.completed_sessions, u32::MAX, now);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cumulative_sessions, 3);
    }

    #[test]
    fn test_insights_sorted_by_priority() {
        let insights = generate_insights(&three_day_progress(), ts("2026-01-05T08:00:00+00:00"));
        let ids: Vec<_> = insights.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["mood_improvement", "time_pattern"]);
        assert_eq!(
            insights[0].data,
            InsightData::MoodImprovement { improvement: 1.5 }
        );
    }

    #[test]
    fn test_progress_over_time_weeks() {
        let progress = three_day_progress();
        let points = calculate_progress_over_time(
            &progress.completed_sessions,
            12,
            ts("2026-01-10T00:00:00+00:00"),
        );
        // Thursday to Saturday of one week
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2025, 12, 28).unwrap());
        assert_eq!(points[0].cumulative_minutes, 25);
        assert_eq!(points[0].cumulative_sessions, 3);
        assert_eq!(points[0].level, 1);
    }
}
