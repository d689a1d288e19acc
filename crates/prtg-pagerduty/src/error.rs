//! Error types for event dispatch.

use thiserror::Error;

/// Errors that can occur when sending an event to `PagerDuty`.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// HTTP request failed or the response body could not be decoded
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// `PagerDuty` answered with a non-success status
    #[error("PagerDuty returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}
