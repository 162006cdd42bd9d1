//! Error types for Gjenbruk.

use thiserror::Error;

/// Library-level error type for Gjenbruk operations.
#[derive(Error, Debug)]
pub enum GjenbrukError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Empty transcript: {0}")]
    EmptyTranscript(String),

    #[error("Upstream API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for Gjenbruk operations.
pub type Result<T> = std::result::Result<T, GjenbrukError>;
