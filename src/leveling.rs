//! XP curve and level math
//!
//! Reaching level L takes `100 * L^2` XP. Level itself is unbounded here;
//! the progress aggregate clamps the stored level to the configured range.

use serde::Serialize;

use crate::core::ScoringConfig;

/// Where the user sits between their level and the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    /// XP earned past the current level's threshold
    ///
    /// Negative while the user is still below the threshold of the level
    /// passed in (e.g. level 1 with less than 100 XP).
    pub current: i64,
    /// XP between the current and next thresholds
    pub needed: u64,
    /// `current / needed` as a percentage, clamped to 0..=100
    pub percentage: u8,
}

pub fn get_xp_for_level(level: u32) -> u64 {
    get_xp_for_level_with(&ScoringConfig::default(), level)
}

pub fn get_xp_for_level_with(config: &ScoringConfig, level: u32) -> u64 {
    config.level_xp_factor as u64 * (level as u64).pow(2)
}

pub fn calculate_level_from_xp(xp: u32) -> u32 {
    calculate_level_from_xp_with(&ScoringConfig::default(), xp)
}

/// Highest level whose threshold is at or below `xp`, never below `min_level`
pub fn calculate_level_from_xp_with(config: &ScoringConfig, xp: u32) -> u32 {
    if config.level_xp_factor == 0 {
        return config.max_level as u32;
    }
    let xp = xp as u64;
    let mut level = 1u32;
    while get_xp_for_level_with(config, level + 1) <= xp {
        level += 1;
    }
    level.max(config.min_level as u32)
}

pub fn get_progress_to_next_level(xp: u32, level: u32) -> LevelProgress {
    get_progress_to_next_level_with(&ScoringConfig::default(), xp, level)
}

pub fn get_progress_to_next_level_with(config: &ScoringConfig, xp: u32, level: u32) -> LevelProgress {
    let floor = get_xp_for_level_with(config, level);
    let ceiling = get_xp_for_level_with(config, level + 1);

    let current = xp as i64 - floor as i64;
    let needed = ceiling - floor;
    let percentage = if needed == 0 {
        100
    } else {
        (current as f64 / needed as f64 * 100.0).round().clamp(0.0, 100.0) as u8
    };

    LevelProgress {
        current,
        needed,
        percentage,
    }
}
