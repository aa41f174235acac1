//! HTTP client abstraction for testability

use super::error::HttpError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Trait for asynchronous HTTP GET requests.
///
/// Lets the fetcher run against a scripted client in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;

    /// Performs an async HTTP GET request with custom headers.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `headers` - Slice of (header_name, header_value) tuples
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("airwatch/", env!("CARGO_PKG_VERSION"));

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// The fetcher applies its own per-attempt timeout as well; this one
    /// bounds the connection itself.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Vec<u8>, HttpError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(HttpError::Request(e.to_string()));
            }
        };

        if !response.status().is_success() {
            return Err(HttpError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(HttpError::Body(e.to_string()))
            }
        }
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.send(self.client.get(url), url).await
    }

    async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, HttpError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request, url).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// One scripted response.
    #[derive(Debug, Clone)]
    pub enum Step {
        Respond(Result<Vec<u8>, HttpError>),
        /// Sleep before answering with an empty array
        Stall(Duration),
    }

    /// Mock async HTTP client that plays back a script.
    ///
    /// The last step repeats once the script runs out.
    pub struct ScriptedHttpClient {
        steps: Mutex<VecDeque<Step>>,
        last: Mutex<Option<Step>>,
        calls: AtomicUsize,
        seen_headers: Mutex<Vec<Vec<(String, String)>>>,
    }

    impl ScriptedHttpClient {
        pub fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                last: Mutex::new(None),
                calls: AtomicUsize::new(0),
                seen_headers: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(body: &str) -> Step {
            Step::Respond(Ok(body.as_bytes().to_vec()))
        }

        pub fn fail() -> Step {
            Step::Respond(Err(HttpError::Request("connection refused".to_string())))
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn seen_headers(&self) -> Vec<Vec<(String, String)>> {
            self.seen_headers.lock().unwrap().clone()
        }

        fn next_step(&self) -> Step {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut last = self.last.lock().unwrap();
            match self.steps.lock().unwrap().pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().unwrap_or_else(Self::fail),
            }
        }

        async fn play(&self) -> Result<Vec<u8>, HttpError> {
            match self.next_step() {
                Step::Respond(result) => result,
                Step::Stall(delay) => {
                    tokio::time::sleep(delay).await;
                    Ok(b"[]".to_vec())
                }
            }
        }
    }

    impl AsyncHttpClient for ScriptedHttpClient {
        async fn get(&self, _url: &str) -> Result<Vec<u8>, HttpError> {
            self.play().await
        }

        async fn get_with_headers(
            &self,
            _url: &str,
            headers: &[(&str, &str)],
        ) -> Result<Vec<u8>, HttpError> {
            self.seen_headers.lock().unwrap().push(
                headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
            self.play().await
        }
    }

    #[tokio::test]
    async fn test_scripted_client_plays_in_order_then_repeats() {
        let client = ScriptedHttpClient::new(vec![
            ScriptedHttpClient::fail(),
            ScriptedHttpClient::ok("[1]"),
        ]);

        assert!(client.get("http://example.com").await.is_err());
        assert_eq!(client.get("http://example.com").await.unwrap(), b"[1]");
        assert_eq!(client.get("http://example.com").await.unwrap(), b"[1]");
        assert_eq!(client.calls(), 3);
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(AsyncReqwestClient::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_status_error_display() {
        let err = HttpError::Status {
            status: 503,
            url: "http://example.com".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://example.com");
    }
}
