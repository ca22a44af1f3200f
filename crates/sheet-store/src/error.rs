use thiserror::Error;

/// Errors that can occur when reading a backing table.
#[derive(Debug, Error)]
pub enum SheetStoreError {
    /// The named sheet does not exist in the store.
    #[error("Sheet \"{0}\" was not found; check the sheet name")]
    SheetNotFound(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored cells could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for sheet store operations.
pub type Result<T> = std::result::Result<T, SheetStoreError>;
