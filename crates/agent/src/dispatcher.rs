//! HTTP delivery of single telemetry events.
//!
//! [`Dispatcher`] formats one event as a form-encoded POST to the
//! collector's ingestion API, authenticated with the configured
//! operator credentials and project token. One attempt per event:
//! delivery is fire-and-forget end to end, so there is no retry or
//! backoff here.

use std::time::Duration;

use crate::config::AgentConfig;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for telemetry delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The collector returned a non-2xx status code.
    #[error("Ingestion endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Delivers telemetry events to the collector's ingestion API.
pub struct Dispatcher {
    client: reqwest::Client,
    config: AgentConfig,
}

impl Dispatcher {
    /// Create a new dispatcher with a pre-configured HTTP client.
    pub fn new(config: AgentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Deliver one captured exception to `/api/error/`.
    pub async fn send_error(
        &self,
        exception: &str,
        url: &str,
        traceback: &str,
    ) -> Result<(), DispatchError> {
        self.post(
            "/api/error/",
            &[
                ("exception", exception),
                ("url", url),
                ("traceback", traceback),
                ("token", &self.config.token),
            ],
        )
        .await
    }

    /// Deliver one request-timing sample to `/api/response/`.
    pub async fn send_response(&self, url: &str, elapsed: Duration) -> Result<(), DispatchError> {
        let time = elapsed.as_secs_f64().to_string();
        self.post(
            "/api/response/",
            &[("time", &time), ("url", url), ("token", &self.config.token)],
        )
        .await
    }

    /// Deliver one inbound-request record to `/api/request/`.
    pub async fn send_request(&self, url: &str) -> Result<(), DispatchError> {
        self.post(
            "/api/request/",
            &[("url", url), ("token", &self.config.token)],
        )
        .await
    }

    /// Execute a single form POST and check the response status.
    async fn post(&self, path: &str, fields: &[(&str, &str)]) -> Result<(), DispatchError> {
        let endpoint = format!("{}{}", self.config.api_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&endpoint)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .form(fields)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DispatchError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AgentConfig {
        AgentConfig::new("http://localhost:8000", "username", "password", "123")
    }

    #[test]
    fn new_does_not_panic() {
        let _dispatcher = Dispatcher::new(test_config());
    }

    #[test]
    fn dispatch_error_display_http_status() {
        let err = DispatchError::HttpStatus(403);
        assert_eq!(err.to_string(), "Ingestion endpoint returned HTTP 403");
    }

    #[test]
    fn dispatch_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = DispatchError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
