use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlowspotError {
    #[error("Mood rating out of range (expected 1-5): {0}")]
    InvalidMoodRating(u8),

    #[error("Achievement not found: {0}")]
    AchievementNotFound(String),

    #[error("Invalid requirement for achievement {id}: {reason}")]
    InvalidRequirement { id: String, reason: String },

    #[error("Invalid session {id}: {reason}")]
    InvalidSession { id: u32, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SlowspotError>;
