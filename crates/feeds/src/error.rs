//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching deals from the remote API.
///
/// Any of these aborts the current run; retry is left to the next
/// scheduler tick.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("API request failed: {0}")]
    ConnectionFailed(String),

    #[error("API returned HTTP {0}")]
    BadStatus(u16),

    #[error("failed to parse API response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else {
            FeedError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}
