//! Core client implementation.

use crate::error::{ClientError, Result};
use reqwest::{Client as HttpClient, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// A client for the prompt edit session endpoints.
///
/// # Example
///
/// ```no_run
/// use promptgate_client::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://localhost:8188")?;
///
/// for session in client.pending().await? {
///     client.confirm(&session.session_id, &session.edited_text).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// Base URL of the server.
    base_url: String,
    /// HTTP client.
    http: HttpClient,
}

impl Client {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { base_url, http })
    }

    /// Set a custom timeout for ordinary requests.
    ///
    /// Long-poll requests use their own timeout derived from the wait.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Build a full URL from a path.
    pub(crate) fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/prompt_edit/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        self.http
            .get(self.url(path))
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Execute a GET request with a per-request timeout.
    pub(crate) async fn get_with_timeout(&self, path: &str, timeout: Duration) -> Result<Response> {
        self.http
            .get(self.url(path))
            .timeout(timeout)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Handle a response and deserialize JSON.
    pub(crate) async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    /// Handle a `{"status": "success"}` acknowledgement.
    pub(crate) async fn handle_ack(&self, response: Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    /// Extract the server's error message.
    pub(crate) async fn api_error(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| {
                json["message"]
                    .as_str()
                    .or_else(|| json["error"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);

        ClientError::Api { status, message }
    }
}
