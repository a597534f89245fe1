//! Adaptive guidance as a session is repeated

mod common;

use chrono::Duration;
use common::{catalog, complete, fresh_progress, ts};
use slowspot::instructions::{
    analyze_user_experience, determine_instruction_level, get_adaptive_instruction,
    get_instruction_for_session, AdaptationLevel,
};
use slowspot::progress::UserMeditationProgress;

fn repeated(times: u32) -> UserMeditationProgress {
    let session = &catalog()[0];
    let start = ts("2026-01-01T07:00:00+00:00");
    (0..times).fold(fresh_progress(), |p, i| {
        complete(&p, session, start + Duration::days(i as i64))
    })
}

fn tier(times: u32) -> AdaptationLevel {
    let metrics = analyze_user_experience(&catalog()[0], &repeated(times));
    determine_instruction_level(&metrics)
}

#[test]
fn test_tiers_follow_repeat_count() {
    assert_eq!(tier(0), AdaptationLevel::Full);
    assert_eq!(tier(1), AdaptationLevel::Simplified);
    assert_eq!(tier(3), AdaptationLevel::Simplified);
    assert_eq!(tier(4), AdaptationLevel::Minimal);
    assert_eq!(tier(9), AdaptationLevel::Minimal);
    assert_eq!(tier(10), AdaptationLevel::Skip);
}

#[test]
fn test_skipping_user_gets_no_guidance() {
    let mut progress = fresh_progress();
    progress.always_skip_instructions = true;
    let instruction = get_adaptive_instruction(&catalog()[0], &progress);
    assert!(instruction.is_empty());
}

#[test]
fn test_first_time_gets_full_instruction() {
    let session = &catalog()[0];
    let instruction = get_adaptive_instruction(session, &fresh_progress());
    let base = get_instruction_for_session(session);
    assert_eq!(instruction.physical_setup.len(), base.physical_setup.len());
    assert_eq!(instruction.reminders.len(), base.reminders.len());
}
