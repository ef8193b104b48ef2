//! HTTP webhook transport.

use super::{ClientTransport, SessionEvent, TransportFuture};
use crate::error::{GateError, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// POSTs each event as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookTransport {
    url: String,
    http: reqwest::Client,
}

impl WebhookTransport {
    /// Create a webhook transport with a 10 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(10))
    }

    /// Create a webhook transport with a custom request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(GateError::TransportFailure {
                transport: "webhook",
                cause: format!("URL must start with http:// or https://, got: {}", url),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GateError::TransportFailure {
                transport: "webhook",
                cause: e.to_string(),
            })?;

        Ok(Self { url, http })
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ClientTransport for WebhookTransport {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn send<'a>(&'a self, event: &'a SessionEvent) -> TransportFuture<'a> {
        Box::pin(async move {
            let body = serde_json::to_vec(&event.to_message())?;
            let response = self
                .http
                .post(&self.url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(|e| GateError::TransportFailure {
                    transport: "webhook",
                    cause: e.to_string(),
                })?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(GateError::TransportFailure {
                    transport: "webhook",
                    cause: format!("{} returned {}", self.url, status),
                })
            }
        })
    }
}
