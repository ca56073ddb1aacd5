//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating and forecasting scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid team size: expected exactly 2 players, got {found}")]
    InvalidTeamSize { found: usize },

    #[error("Invalid player state: {reason}")]
    InvalidPlayerState { reason: String },

    #[error("Invalid score: {reason}")]
    InvalidScore { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
