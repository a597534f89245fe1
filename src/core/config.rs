//! Scoring configuration with documented constants
//!
//! Every heuristic weight in the engine is collected here. The values are
//! hand-tuned; changing a `Default` changes existing scores.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::achievements::Rarity;
use crate::core::error::{Result, SlowspotError};

/// Configuration for the scoring, leveling and adaptation heuristics
///
/// Loadable from TOML; any key left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    // === SESSION XP ===
    /// XP granted for any recorded completion, even a partial one
    pub session_base_xp: u32,

    /// Extra XP when the user did not quit early
    pub completed_fully_xp: u32,

    /// Extra XP when the actual duration reached the planned duration
    ///
    /// Stacks with `completed_fully_xp`: a user can finish "fully" on a
    /// shortened timer without reaching 100%.
    pub full_duration_xp: u32,

    /// Extra XP when mood after is strictly higher than mood before
    pub mood_improved_xp: u32,

    // === SUCCESS CLASSIFIER ===
    /// Points for finishing the session
    pub success_completed_fully_weight: u32,

    /// Points for a mood improvement
    pub success_mood_weight: u32,

    /// Points for enjoyment at or above `success_rating_threshold`
    pub success_enjoyment_weight: u32,

    /// Points for helpfulness at or above `success_rating_threshold`
    pub success_helpfulness_weight: u32,

    /// Minimum enjoyment/helpfulness rating that counts as "high"
    pub success_rating_threshold: u8,

    /// Total points at which a completion is classified as successful
    ///
    /// At 50, any two of the four signals are enough except
    /// enjoyment + helpfulness alone (20 + 20 = 40).
    pub success_threshold: u32,

    // === SESSION RECOMMENDATION ===
    /// Bonus when the session level equals the user level
    pub level_exact_bonus: f64,

    /// Bonus when the session is one level above the user
    pub level_above_bonus: f64,

    /// Bonus when the session is one level below the user
    pub level_below_bonus: f64,

    /// Penalty per level of distance when more than one level apart
    pub level_distance_penalty: f64,

    /// Bonus when the session was completed within `recency_window_days`
    pub recency_bonus: f64,

    /// Window (days) for the recency bonus
    pub recency_window_days: f64,

    /// Multiplier on the average mood delta of past completions
    pub mood_delta_weight: f64,

    /// Bonus per past completion sharing the session's culture tag
    pub culture_repeat_step: f64,

    /// Cap on the culture repeat bonus
    pub culture_repeat_cap: f64,

    /// Bonus per past completion sharing the session's purpose tag
    pub purpose_repeat_step: f64,

    /// Cap on the purpose repeat bonus
    pub purpose_repeat_cap: f64,

    // === ACHIEVEMENT RECOMMENDATION ===
    /// Weight per rarity, easiest first (common, uncommon, rare, epic, legendary)
    pub rarity_weights: [f64; 5],

    /// Reward XP is divided by this before being added to the score
    pub reward_xp_divisor: f64,

    /// Cap on the reward XP contribution
    pub reward_xp_cap: f64,

    /// Minimum tracker percentage for an achievement to count as "almost unlocked"
    pub almost_unlocked_percentage: u32,

    // === ADAPTIVE INSTRUCTIONS ===
    /// Completions of the same session from which instructions become minimal
    pub minimal_after_repeats: u32,

    /// Completions of the same session from which instructions are skipped
    pub skip_after_repeats: u32,

    /// How many trailing completions feed the recent success rate
    pub recent_window: usize,

    /// Physical setup steps kept by the simplified tier
    pub simplified_step_cap: usize,

    // === LEVELING ===
    /// XP curve factor: reaching level L needs `level_xp_factor * L^2`
    pub level_xp_factor: u32,

    /// Lowest level a user can have
    pub min_level: u8,

    /// Highest level stored on the progress aggregate
    pub max_level: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            // Session XP (10 base, max 30 per session)
            session_base_xp: 10,
            completed_fully_xp: 10,
            full_duration_xp: 5,
            mood_improved_xp: 5,

            // Success classifier
            success_completed_fully_weight: 30,
            success_mood_weight: 30,
            success_enjoyment_weight: 20,
            success_helpfulness_weight: 20,
            success_rating_threshold: 4,
            success_threshold: 50,

            // Session recommendation
            level_exact_bonus: 50.0,
            level_above_bonus: 30.0,
            level_below_bonus: 20.0,
            level_distance_penalty: 10.0,
            recency_bonus: 15.0,
            recency_window_days: 7.0,
            mood_delta_weight: 10.0,
            culture_repeat_step: 2.0,
            culture_repeat_cap: 20.0,
            purpose_repeat_step: 2.0,
            purpose_repeat_cap: 15.0,

            // Achievement recommendation
            rarity_weights: [50.0, 40.0, 30.0, 20.0, 10.0],
            reward_xp_divisor: 20.0,
            reward_xp_cap: 50.0,
            almost_unlocked_percentage: 50,

            // Adaptive instructions
            minimal_after_repeats: 4,
            skip_after_repeats: 10,
            recent_window: 5,
            simplified_step_cap: 3,

            // Leveling
            level_xp_factor: 100,
            min_level: 1,
            max_level: 5,
        }
    }
}

impl ScoringConfig {
    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject threshold pairs that contradict each other
    pub fn validate(&self) -> Result<()> {
        if self.min_level > self.max_level {
            return Err(SlowspotError::InvalidConfig(format!(
                "min_level {} exceeds max_level {}",
                self.min_level, self.max_level
            )));
        }
        if self.minimal_after_repeats > self.skip_after_repeats {
            return Err(SlowspotError::InvalidConfig(format!(
                "minimal_after_repeats {} exceeds skip_after_repeats {}",
                self.minimal_after_repeats, self.skip_after_repeats
            )));
        }
        Ok(())
    }

    /// Clamp a level into the configured bounds, tolerating swapped bounds
    pub fn clamp_level(&self, level: u32) -> u8 {
        let low = self.min_level.min(self.max_level);
        let high = self.min_level.max(self.max_level);
        level.clamp(low as u32, high as u32) as u8
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded scoring config from {}", path.display());
        Ok(config)
    }

    pub fn rarity_weight(&self, rarity: Rarity) -> f64 {
        self.rarity_weights[rarity.rank()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_weights() {
        let config = ScoringConfig::default();
        assert_eq!(config.rarity_weight(Rarity::Common), 50.0);
        assert_eq!(config.rarity_weight(Rarity::Legendary), 10.0);
        assert_eq!(config.success_threshold, 50);
        assert_eq!(config.level_xp_factor, 100);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ScoringConfig::from_toml_str("recency_bonus = 25.0\nmax_level = 7\n").unwrap();
        assert_eq!(config.recency_bonus, 25.0);
        assert_eq!(config.max_level, 7);
        assert_eq!(config.level_exact_bonus, 50.0);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(ScoringConfig::from_toml_str("recency_bonus = \"lots\"").is_err());
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let err = ScoringConfig::from_toml_str("min_level = 3\nmax_level = 2\n").unwrap_err();
        assert!(matches!(err, SlowspotError::InvalidConfig(_)));

        let err = ScoringConfig::from_toml_str("minimal_after_repeats = 12\n").unwrap_err();
        assert!(matches!(err, SlowspotError::InvalidConfig(_)));

        assert!(ScoringConfig::from_toml_str("min_level = 2\nmax_level = 2\n").is_ok());
    }

    #[test]
    fn test_clamp_level_tolerates_swapped_bounds() {
        let config = ScoringConfig { min_level: 3, max_level: 2, ..Default::default() };
        assert_eq!(config.clamp_level(0), 2);
        assert_eq!(config.clamp_level(9), 3);
        assert_eq!(ScoringConfig::default().clamp_level(9), 5);
        assert_eq!(ScoringConfig::default().clamp_level(0), 1);
    }
}
