//! Filtering and ranking over a small catalog

mod common;

use common::{catalog, complete, fresh_progress, ts};
use proptest::prelude::*;
use slowspot::sessions::{
    apply_filter_preset, filter_and_sort_sessions, filter_sessions, DurationRange, MeditationSession,
    SessionFilters, SortBy, SortOrder,
};

fn ids(list: &[&MeditationSession]) -> Vec<u32> {
    list.iter().map(|s| s.id).collect()
}

#[test]
fn test_level_and_range_filters_commute() {
    let sessions = catalog();
    let levels = SessionFilters {
        levels: vec![1, 2],
        ..Default::default()
    };
    let range = SessionFilters {
        duration_range: Some(DurationRange::new(5, 10)),
        ..Default::default()
    };
    let both = SessionFilters {
        levels: vec![1, 2],
        duration_range: Some(DurationRange::new(5, 10)),
        ..Default::default()
    };

    let by_level: Vec<MeditationSession> =
        filter_sessions(&sessions, &levels, None).into_iter().cloned().collect();
    let level_then_range = ids(&filter_sessions(&by_level, &range, None));

    let by_range: Vec<MeditationSession> =
        filter_sessions(&sessions, &range, None).into_iter().cloned().collect();
    let range_then_level = ids(&filter_sessions(&by_range, &levels, None));

    let combined = ids(&filter_sessions(&sessions, &both, None));
    assert_eq!(level_then_range, combined);
    assert_eq!(range_then_level, combined);
    assert_eq!(combined, vec![1, 2, 4, 7, 9, 10]);
}

#[test]
fn test_duration_sort_is_stable() {
    let sessions = catalog();
    let filters = SessionFilters {
        sort_by: Some(SortBy::Duration),
        sort_order: Some(SortOrder::Asc),
        ..Default::default()
    };
    let sorted = filter_and_sort_sessions(&sessions, &filters, None, ts("2026-01-05T00:00:00+00:00"));
    // 5-minute sessions 1 and 10, and 10-minute sessions 2 and 7, keep catalog order
    assert_eq!(ids(&sorted), vec![6, 1, 10, 9, 4, 2, 7, 8, 3, 5]);
}

#[test]
fn test_completed_filter_uses_history() {
    let sessions = catalog();
    let progress = complete(&fresh_progress(), &sessions[3], ts("2026-01-02T08:00:00+00:00"));
    let filters = SessionFilters {
        show_completed_only: true,
        ..Default::default()
    };
    assert_eq!(ids(&filter_sessions(&sessions, &filters, Some(&progress))), vec![4]);

    let filters = SessionFilters {
        show_uncompleted_only: true,
        ..Default::default()
    };
    assert_eq!(filter_sessions(&sessions, &filters, Some(&progress)).len(), 9);
}

#[test]
fn test_unknown_preset_is_neutral() {
    let sessions = catalog();
    let filters = apply_filter_preset("no_such_preset");
    assert_eq!(filter_sessions(&sessions, &filters, None).len(), sessions.len());
}

proptest! {
    #[test]
    fn test_filters_commute(
        levels in proptest::collection::vec(1u8..=3, 0..3),
        min in 0u32..15,
        span in 0u32..15,
        culture in proptest::option::of(prop_oneof![Just("zen"), Just("vedic"), Just("sufi")]),
    ) {
        let sessions = catalog();
        let cultures: Vec<String> = culture.into_iter().map(String::from).collect();
        let a = SessionFilters { levels: levels.clone(), ..Default::default() };
        let b = SessionFilters {
            duration_range: Some(DurationRange::new(min, min + span)),
            culture_tags: cultures.clone(),
            ..Default::default()
        };
        let both = SessionFilters {
            levels,
            duration_range: Some(DurationRange::new(min, min + span)),
            culture_tags: cultures,
            ..Default::default()
        };

        let after_a: Vec<MeditationSession> =
            filter_sessions(&sessions, &a, None).into_iter().cloned().collect();
        let after_b: Vec<MeditationSession> =
            filter_sessions(&sessions, &b, None).into_iter().cloned().collect();
        let combined = ids(&filter_sessions(&sessions, &both, None));

        prop_assert_eq!(ids(&filter_sessions(&after_a, &b, None)), combined.clone());
        prop_assert_eq!(ids(&filter_sessions(&after_b, &a, None)), combined);
    }
}
