//! JSON fetching with a bounded retry policy.

use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::{AttemptError, FetchError};
use super::http::AsyncHttpClient;

/// Default number of attempts per fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(5000);

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How many times to try and how long to wait in between.
///
/// The wait is fixed, not exponential. At least one attempt is always made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt with no retry.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

/// Fetches JSON documents, retrying failed attempts.
///
/// An attempt fails on a transport error, a non-success status, a timeout,
/// or a body that is empty or not JSON. Each attempt gets its own timeout,
/// independent of how many attempts remain.
pub struct JsonFetcher<C> {
    client: C,
    timeout: Duration,
    policy: RetryPolicy,
}

impl<C> JsonFetcher<C> {
    /// The underlying transport.
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: AsyncHttpClient> JsonFetcher<C> {
    /// # Arguments
    ///
    /// * `client` - HTTP transport
    /// * `timeout` - Limit for a single attempt
    /// * `policy` - Attempt count and delay between attempts
    pub fn new(client: C, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            client,
            timeout,
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches `url` and decodes the body as JSON.
    ///
    /// Cancelling `cancel` aborts the request in flight or the wait
    /// between attempts.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Exhausted`] with the last attempt's error once every
    ///   attempt has failed
    /// * [`FetchError::Cancelled`] if `cancel` fires first
    pub async fn fetch_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Value, FetchError> {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                result = tokio::time::timeout(
                    self.timeout,
                    self.client.get_with_headers(url, headers),
                ) => result,
            };

            let outcome = match result {
                Ok(Ok(body)) => decode_payload(&body),
                Ok(Err(e)) => Err(AttemptError::Http(e)),
                Err(_) => Err(AttemptError::Timeout(self.timeout)),
            };

            let error = match outcome {
                Ok(value) => {
                    debug!(url = url, attempt, "Fetched payload");
                    return Ok(value);
                }
                Err(e) => e,
            };

            warn!(
                url = url,
                attempt,
                max_attempts,
                error = %error,
                "Fetch attempt failed"
            );

            if attempt >= max_attempts {
                return Err(FetchError::Exhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                _ = tokio::time::sleep(self.policy.delay) => {}
            }
        }
    }
}

/// Decodes a response body, rejecting documents with nothing in them.
fn decode_payload(body: &[u8]) -> Result<Value, AttemptError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AttemptError::EmptyPayload);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| AttemptError::Malformed(e.to_string()))?;

    let empty = match &value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if empty {
        return Err(AttemptError::EmptyPayload);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::http::tests::{ScriptedHttpClient, Step};
    use crate::fetch::HttpError;
    use serde_json::json;

    const URL: &str = "http://example.com/near/1/2";

    fn fetcher(steps: Vec<Step>, attempts: u32) -> JsonFetcher<ScriptedHttpClient> {
        JsonFetcher::new(
            ScriptedHttpClient::new(steps),
            Duration::from_secs(10),
            RetryPolicy::new(attempts, Duration::from_millis(5000)),
        )
    }

    #[test]
    fn test_policy_clamps_to_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
        assert_eq!(RetryPolicy::default().delay(), Duration::from_millis(5000));
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload(br#"{"pm25": 1}"#), Ok(json!({"pm25": 1})));
        assert_eq!(decode_payload(b"  "), Err(AttemptError::EmptyPayload));
        assert_eq!(decode_payload(b"null"), Err(AttemptError::EmptyPayload));
        assert_eq!(decode_payload(b"[]"), Err(AttemptError::EmptyPayload));
        assert_eq!(decode_payload(b"{}"), Err(AttemptError::EmptyPayload));
        assert!(matches!(
            decode_payload(b"<html>"),
            Err(AttemptError::Malformed(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fail_succeed_returns_payload() {
        let fetcher = fetcher(
            vec![
                ScriptedHttpClient::fail(),
                ScriptedHttpClient::fail(),
                ScriptedHttpClient::ok(r#"[{"pm25": 10}]"#),
            ],
            3,
        );

        let started = tokio::time::Instant::now();
        let value = fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(value, json!([{"pm25": 10}]));
        assert_eq!(fetcher.client.calls(), 3);
        // Two waits between three attempts
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(10_000));
        assert!(elapsed < Duration::from_millis(11_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_exhausts_after_max_attempts() {
        let fetcher = fetcher(vec![ScriptedHttpClient::fail()], 4);

        let err = fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(fetcher.client.calls(), 4);
        match err {
            FetchError::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 4);
                assert!(matches!(last_error, AttemptError::Http(HttpError::Request(_))));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_payload_is_retried() {
        let fetcher = fetcher(
            vec![
                ScriptedHttpClient::ok("[]"),
                ScriptedHttpClient::ok(r#"{"sensor": {"pm25": 3}}"#),
            ],
            3,
        );

        let value = fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(value["sensor"]["pm25"], 3);
        assert_eq!(fetcher.client.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_error_is_retried() {
        let fetcher = fetcher(
            vec![
                Step::Respond(Err(HttpError::Status {
                    status: 502,
                    url: URL.to_string(),
                })),
                ScriptedHttpClient::ok("[1]"),
            ],
            2,
        );

        assert!(fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_timeout_is_per_attempt() {
        let fetcher = fetcher(
            vec![
                Step::Stall(Duration::from_secs(60)),
                ScriptedHttpClient::ok("[1]"),
            ],
            2,
        );

        let value = fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(value, json!([1]));
        assert_eq!(fetcher.client.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_timeout_reports_timeout() {
        let fetcher = fetcher(vec![Step::Stall(Duration::from_secs(60))], 1);

        let err = fetcher
            .fetch_json(URL, &[], &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Exhausted {
                attempts: 1,
                last_error: AttemptError::Timeout(Duration::from_secs(10)),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start_makes_no_request() {
        let fetcher = fetcher(vec![ScriptedHttpClient::ok("[1]")], 3);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = fetcher.fetch_json(URL, &[], &cancel).await.unwrap_err();
        assert_eq!(err, FetchError::Cancelled);
        assert_eq!(fetcher.client.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_retry_wait() {
        let fetcher = fetcher(vec![ScriptedHttpClient::fail()], 5);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let err = fetcher.fetch_json(URL, &[], &cancel).await.unwrap_err();
        assert_eq!(err, FetchError::Cancelled);
        assert_eq!(fetcher.client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_request() {
        let fetcher = fetcher(vec![Step::Stall(Duration::from_secs(5))], 3);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = fetcher.fetch_json(URL, &[], &cancel).await.unwrap_err();
        assert_eq!(err, FetchError::Cancelled);
    }

    #[tokio::test]
    async fn test_headers_are_forwarded() {
        let fetcher = fetcher(vec![ScriptedHttpClient::ok("[1]")], 1);
        fetcher
            .fetch_json(URL, &[("X-API-Key", "secret")], &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            fetcher.client.seen_headers(),
            vec![vec![("X-API-Key".to_string(), "secret".to_string())]]
        );
    }
}
