use thiserror::Error;

/// Application-wide error types for Dossier.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Source item cannot be fetched (e.g. empty URL).
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Unexpected fault while deriving profile fields from a document.
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// Reading the source items failed.
    #[error("Input error: {0}")]
    InputError(String),

    /// Persisting the snapshot failed.
    #[error("Output error: {0}")]
    OutputError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if this error ends the whole run rather than one item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::InputError(_) | AppError::OutputError(_) | AppError::ConfigError(_)
        )
    }
}
