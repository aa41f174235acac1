//! Fetching station payloads over HTTP.
//!
//! [`AsyncHttpClient`] is the transport seam; [`JsonFetcher`] layers the
//! per-attempt timeout, retry policy and cancellation on top of it.

mod error;
pub(crate) mod http;
mod retry;

pub use error::{AttemptError, FetchError, HttpError};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use retry::{
    JsonFetcher, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};
