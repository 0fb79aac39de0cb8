use thiserror::Error;

use crate::storage::StoreError;

/// Centralized error type for the binary and the bot bootstrap.
///
/// Store failures keep their own classification (`StoreError::kind`);
/// this enum only aggregates them with Telegram, HTTP and configuration
/// failures so `main` can report a single error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Prize/user store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
