use thiserror::Error;

/// Centralized error types for the application
///
/// Uses `thiserror` for automatic error conversion and display formatting.
/// Note that "access denied" and "ledger unavailable" are *not* errors:
/// both are rendered as regular responses by the dispatcher.
#[derive(Error, Debug)]
pub enum AppError {
    /// Required configuration is missing (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
