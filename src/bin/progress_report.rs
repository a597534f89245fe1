//! Progress Report
//!
//! Reads a stored progress blob and prints level, achievement standing and
//! what to practice next.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;
use serde::Serialize;

use slowspot::achievements::{
    try_get_achievement, validate_catalog, AchievementEvaluator, AchievementProgress,
    AchievementStats, ACHIEVEMENTS,
};
use slowspot::core::{Result, ScoringConfig};
use slowspot::insights::{generate_insights, GeneratedInsight};
use slowspot::instructions::get_personalized_recommendations;
use slowspot::leveling::{get_progress_to_next_level_with, LevelProgress};
use slowspot::progress::{refresh_counters_with, try_load_progress};
use slowspot::sessions::{validate_session, MeditationSession};

/// Progress Report - level, achievements and next steps for one user
#[derive(Parser, Debug)]
#[command(name = "progress_report")]
#[command(about = "Summarize a meditation progress blob")]
struct Args {
    /// Progress JSON blob as written by the app
    progress: PathBuf,

    /// Session catalog JSON (array of sessions) for session recommendations
    #[arg(long)]
    sessions: Option<PathBuf>,

    /// Scoring weights TOML; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 timestamp instead of the local clock
    #[arg(long)]
    now: Option<String>,

    /// Show the tracker of a single achievement
    #[arg(long)]
    achievement: Option<String>,

    /// How many recommendations to list
    #[arg(long, default_value_t = 3)]
    limit: usize,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct AchievementLine {
    id: &'static str,
    title_key: &'static str,
    /// `None` for achievements without a tracker
    percentage: Option<u32>,
}

#[derive(Serialize)]
struct SessionLine {
    id: u32,
    title: String,
    score: f64,
}

#[derive(Serialize)]
struct Report {
    user_id: String,
    level: u8,
    experience_points: u32,
    level_progress: LevelProgress,
    total_sessions: u32,
    total_minutes: u32,
    current_streak: u32,
    achievements: AchievementStats,
    almost_unlocked: Vec<AchievementLine>,
    recommended_achievements: Vec<AchievementLine>,
    recommended_sessions: Vec<SessionLine>,
    insights: Vec<GeneratedInsight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracked: Option<AchievementProgress>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slowspot=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let now = match args.now.as_deref() {
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(now) => now,
            Err(e) => {
                eprintln!("Invalid --now timestamp {}: {}", s, e);
                std::process::exit(2);
            }
        },
        None => Local::now().fixed_offset(),
    };

    let stored = try_load_progress(&std::fs::read_to_string(&args.progress)?)?;
    let sessions: Vec<MeditationSession> = match &args.sessions {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    tracing::info!(
        "Loaded {} completions, {} catalog sessions",
        stored.completed_sessions.len(),
        sessions.len()
    );

    for session in &sessions {
        validate_session(session)?;
    }
    validate_catalog(ACHIEVEMENTS)?;

    let evaluator = AchievementEvaluator::new(ACHIEVEMENTS, config);
    let progress = refresh_counters_with(&stored, now.date_naive(), &evaluator);
    let mut report = build_report(&evaluator, &progress, &sessions, now, args.limit);
    if let Some(id) = &args.achievement {
        let achievement = try_get_achievement(id)?;
        report.tracked = evaluator.progress_toward(achievement, &progress);
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn build_report(
    evaluator: &AchievementEvaluator<'_>,
    progress: &slowspot::progress::UserMeditationProgress,
    sessions: &[MeditationSession],
    now: DateTime<FixedOffset>,
    limit: usize,
) -> Report {
    let almost_unlocked = evaluator
        .almost_unlocked(progress)
        .into_iter()
        .map(|a| AchievementLine {
            id: a.achievement.id,
            title_key: a.achievement.title_key,
            percentage: Some(a.progress.percentage),
        })
        .collect();
    let recommended_achievements = evaluator
        .recommended(progress, limit)
        .into_iter()
        .map(|a| AchievementLine {
            id: a.id,
            title_key: a.title_key,
            percentage: evaluator.progress_toward(a, progress).map(|p| p.percentage),
        })
        .collect();
    let recommended_sessions = get_personalized_recommendations(sessions, progress, now, limit)
        .into_iter()
        .map(|r| SessionLine {
            id: r.session.id,
            title: r.session.title.clone(),
            score: r.score,
        })
        .collect();

    Report {
        user_id: progress.user_id.clone(),
        level: progress.current_level,
        experience_points: progress.experience_points,
        level_progress: get_progress_to_next_level_with(
            evaluator.config(),
            progress.experience_points,
            progress.current_level as u32,
        ),
        total_sessions: progress.total_sessions,
        total_minutes: progress.total_meditation_minutes,
        current_streak: progress.current_streak,
        achievements: evaluator.stats(progress),
        almost_unlocked,
        recommended_achievements,
        recommended_sessions,
        insights: generate_insights(progress, now),
        tracked: None,
    }
}

fn print_text(report: &Report) {
    println!("\n=== PROGRESS: {} ===", report.user_id);
    println!(
        "Level {} ({} XP, {}% to next)",
        report.level, report.experience_points, report.level_progress.percentage
    );
    println!(
        "{} sessions, {} minutes, {}-day streak",
        report.total_sessions, report.total_minutes, report.current_streak
    );
    println!(
        "Achievements: {}/{} ({}%), {} of {} XP",
        report.achievements.unlocked_count,
        report.achievements.total_achievements,
        report.achievements.completion_percentage,
        report.achievements.earned_xp,
        report.achievements.total_xp
    );

    if !report.almost_unlocked.is_empty() {
        println!("\nAlmost there:");
        for line in &report.almost_unlocked {
            print_achievement(line);
        }
    }

    println!("\nRecommended achievements:");
    for line in &report.recommended_achievements {
        print_achievement(line);
    }

    if !report.recommended_sessions.is_empty() {
        println!("\nTry next:");
        for line in &report.recommended_sessions {
            println!("  #{:<4} {:<32} {:.1}", line.id, line.title, line.score);
        }
    }

    if let Some(tracked) = &report.tracked {
        println!(
            "\n{}: {}/{} {} ({}%)",
            tracked.achievement_id, tracked.current, tracked.target, tracked.unit, tracked.percentage
        );
    }

    if !report.insights.is_empty() {
        println!("\nInsights:");
        for insight in &report.insights {
            println!("  [{:?}] {}", insight.priority, insight.title_key);
        }
    }
}

fn print_achievement(line: &AchievementLine) {
    match line.percentage {
        Some(pct) => println!("  {:<24} {:>3}%", line.id, pct),
        None => println!("  {:<24}    -", line.id),
    }
}
