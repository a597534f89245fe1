//! Core type definitions used throughout the codebase

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::SlowspotError;

/// Catalog session identifier (custom sessions start at 10000)
pub type SessionId = u32;

/// Unique identifier for a recorded completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionId(pub Uuid);

impl CompletionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompletionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompletionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Self-reported rating on the 1-5 scale (mood, energy, enjoyment, helpfulness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodRating(u8);

impl MoodRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, SlowspotError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SlowspotError::InvalidMoodRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Signed change from `before` to `self`
    pub fn delta_from(self, before: MoodRating) -> i32 {
        self.0 as i32 - before.0 as i32
    }
}

impl TryFrom<u8> for MoodRating {
    type Error = SlowspotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodRating> for u8 {
    fn from(rating: MoodRating) -> Self {
        rating.0
    }
}

/// Coarse bucket of the day a session happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// morning 5-12, afternoon 12-17, evening 17-21, night otherwise
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn of(timestamp: &DateTime<FixedOffset>) -> Self {
        Self::from_hour(timestamp.hour())
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}
