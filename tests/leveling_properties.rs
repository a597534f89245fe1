//! Properties of the XP curve

use proptest::prelude::*;
use slowspot::leveling::{calculate_level_from_xp, get_progress_to_next_level, get_xp_for_level};

proptest! {
    #[test]
    fn test_level_never_decreases_with_xp(a in 0u32..1_000_000, b in 0u32..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_level_from_xp(lo) <= calculate_level_from_xp(hi));
    }

    #[test]
    fn test_threshold_round_trip(level in 1u32..60) {
        let xp = get_xp_for_level(level) as u32;
        prop_assert_eq!(calculate_level_from_xp(xp), level);
        prop_assert_eq!(get_progress_to_next_level(xp, level).current, 0);
    }

    #[test]
    fn test_percentage_is_bounded(xp in 0u32..500_000, level in 1u32..40) {
        prop_assert!(get_progress_to_next_level(xp, level).percentage <= 100);
    }
}
