use thiserror::Error;

/// Reasons a dashboard fetch can fail.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Network failure or invalid request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The payload carried an `error` field.
    #[error("{0}")]
    Api(String),

    /// The payload was not a summary.
    #[error("Invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
