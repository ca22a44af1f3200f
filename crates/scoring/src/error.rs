//! Scoring error types.

use thiserror::Error;

/// Errors that can occur while turning a table into a summary.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Two headers normalize to the same key and the policy rejects that.
    #[error("Headers \"{first}\" and \"{second}\" both normalize to \"{key}\"")]
    HeaderCollision {
        key: String,
        first: String,
        second: String,
    },

    /// A configuration value could not be used.
    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
