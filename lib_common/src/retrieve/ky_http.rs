//! # HTTP Retrieval Utilities
//!
//! This module wraps `reqwest` into a small JSON client used by every market
//! fetcher. Each request is bound to a timeout. A failed direct request is
//! retried exactly once through a CORS-style relay that accepts
//! `<proxy_base><url-encoded target>` and returns the target's body untouched.
//!
//! The retry policy is data: a [`Route`] expands into an ordered list of
//! [`Attempt`]s and the client walks that list until one succeeds.

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every upstream request.
const USER_AGENT: &str = concat!("market-dashboard/", env!("CARGO_PKG_VERSION"));

/// Everything that can go wrong while turning a URL into JSON.
///
/// The board does not distinguish these; they exist for logs and tests.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not finish within the configured timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Effective target URL.
        url: String,
        /// Timeout that fired.
        timeout_ms: u64,
    },
    /// Connection, TLS or body-read failure.
    #[error("transport failure for {url}: {source}")]
    Transport {
        /// Effective target URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Effective target URL.
        url: String,
        /// Numeric status code.
        status: u16,
    },
    /// The body was not valid JSON.
    #[error("malformed JSON from {url}: {source}")]
    Decode {
        /// Effective target URL.
        url: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The JSON parsed but lacks a field the metric needs.
    #[error("unexpected payload: {0}")]
    Shape(String),
}

/// How a single request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Straight to the upstream URL.
    Direct,
    /// Through the relay proxy.
    Proxied,
}

/// Which attempts a source is allowed to use, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Try the upstream directly, then once through the relay.
    DirectFirst,
    /// The upstream refuses browser-style direct access; use the relay only.
    RelayOnly,
}

impl Route {
    /// The ordered attempt plan for this route.
    pub fn attempts(&self) -> &'static [Attempt] {
        match self {
            Route::DirectFirst => &[Attempt::Direct, Attempt::Proxied],
            Route::RelayOnly => &[Attempt::Proxied],
        }
    }
}

/// A JSON-over-HTTP client with timeout and relay fallback.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ResilientClient {
    /// Shared `reqwest` client (connection pooling).
    inner: Client,
    /// Relay prefix, e.g. `https://api.allorigins.win/raw?url=`.
    proxy_base: String,
    /// Per-attempt timeout.
    timeout: Duration,
}

impl ResilientClient {
    /// Creates a client.
    ///
    /// # Arguments
    /// * `proxy_base` - Relay prefix the url-encoded target is appended to.
    /// * `timeout` - Budget for each individual attempt.
    pub fn new(proxy_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            inner: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            proxy_base: proxy_base.into(),
            timeout,
        }
    }

    /// The per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the URL actually requested for an attempt.
    pub fn target_for(&self, url: &str, attempt: Attempt) -> String {
        match attempt {
            Attempt::Direct => url.to_string(),
            Attempt::Proxied => {
                let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
                format!("{}{}", self.proxy_base, encoded)
            }
        }
    }

    /// Fetches `url` and parses the body as JSON, following the route's attempt plan.
    ///
    /// Returns the first successful body. When every attempt fails, the error of
    /// the last attempt is returned.
    pub async fn fetch_json(&self, url: &str, route: Route) -> Result<Value, FetchError> {
        let mut last_error = None;

        for attempt in route.attempts() {
            let target = self.target_for(url, *attempt);
            log::debug!("GET {} ({:?})", target, attempt);

            match self.get_json(&target).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    log::debug!("{:?} attempt for {} failed: {}", attempt, url, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Shape(format!("no attempts planned for {url}"))))
    }

    /// One GET with the timeout applied to connect, headers and body.
    async fn get_json(&self, target: &str) -> Result<Value, FetchError> {
        let response = self
            .inner
            .get(target)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: target.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(target, e))?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: target.to_string(),
            source,
        })
    }

    fn classify(&self, target: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: target.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            FetchError::Transport {
                url: target.to_string(),
                source: e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_first_plans_two_attempts() {
        assert_eq!(Route::DirectFirst.attempts(), &[Attempt::Direct, Attempt::Proxied]);
        assert_eq!(Route::RelayOnly.attempts(), &[Attempt::Proxied]);
    }

    #[test]
    fn proxied_target_is_url_encoded() {
        let client = ResilientClient::new("https://relay.example/raw?url=", Duration::from_secs(1));
        let target = client.target_for(
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EIXIC?range=1d&interval=1d",
            Attempt::Proxied,
        );
        assert_eq!(
            target,
            "https://relay.example/raw?url=https%3A%2F%2Fquery1.finance.yahoo.com%2Fv8%2Ffinance%2Fchart%2F%255EIXIC%3Frange%3D1d%26interval%3D1d"
        );
        assert_eq!(client.target_for("https://a.b/c", Attempt::Direct), "https://a.b/c");
    }
}
