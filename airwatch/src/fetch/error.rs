//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

/// Transport-level failure from an [`AsyncHttpClient`](super::AsyncHttpClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// Request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body could not be read
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Why a single fetch attempt failed. Every variant is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Body was empty, `null`, `[]` or `{}`
    #[error("Empty payload")]
    EmptyPayload,

    /// Body was not valid JSON
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Outcome of a failed fetch after retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Every attempt failed
    #[error("Fetch failed after {attempts} attempt(s): {last_error}")]
    Exhausted {
        attempts: u32,
        #[source]
        last_error: AttemptError,
    },

    /// Caller cancelled the fetch
    #[error("Fetch cancelled")]
    Cancelled,
}
