pub mod config;
pub mod error;
pub mod tally;
pub mod types;

pub use config::ScoringConfig;
pub use error::{Result, SlowspotError};
pub use tally::{most_frequent, ranked_counts};
pub use types::{CompletionId, MoodRating, SessionId, TimeOfDay};
