// src/errors.rs

use thiserror::Error;

/// Errors originating from either the listings API (network, HTTP status,
/// payload shape) or the local layers (state storage, configuration).
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Config error: {0}")]
    Config(String),
}

// Type alias used across the crate.
pub type BrowserResult<T> = Result<T, BrowserError>;

impl BrowserError {
    /// Text shown to the user in the status line.
    pub fn user_message(&self) -> String {
        match self {
            BrowserError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for BrowserError {
    fn from(e: rusqlite::Error) -> Self {
        BrowserError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for BrowserError {
    fn from(e: serde_json::Error) -> Self {
        BrowserError::JsonParse(e.to_string())
    }
}
