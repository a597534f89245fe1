//! Slowspot - meditation progress, achievements and session scoring

pub mod achievements;
pub mod core;
pub mod insights;
pub mod instructions;
pub mod leveling;
pub mod preferences;
pub mod progress;
pub mod sessions;
