//! Error types for fetching pages and reading the rows-per-page input.

use thiserror::Error;

/// Failure of a single page fetch. Logged, never shown to the user.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Rejected rows-per-page input. The display text is what the alert shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageSizeError {
    #[error("Enter a valid number of rows")]
    Empty,

    #[error("Enter a valid number of rows ('{0}' is not a number)")]
    NotANumber(String),

    #[error("Enter a valid number of rows (must be greater than zero)")]
    NotPositive,
}
