//! Trainctl HTTP Client
//!
//! A small, type-safe HTTP client for the training server API.
//!
//! The console uses it through the [`TrainingApi`] trait so the controller
//! can be tested without a server.
//!
//! # Example
//!
//! ```no_run
//! use trainctl_client::TrainingClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TrainingClient::new("http://localhost:5000");
//!
//!     let status = client.get_training_status().await?;
//!     println!("Training: {}", status.is_training);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod training;
mod videos;

// Re-export commonly used types
pub use api::TrainingApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the training server API
///
/// Endpoints are grouped into:
/// - Training control (status, start, stop)
/// - Recorded videos
#[derive(Debug, Clone)]
pub struct TrainingClient {
    /// Base URL of the server (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl TrainingClient {
    /// Create a new training client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the training server (e.g., "http://localhost:5000")
    ///
    /// # Example
    /// ```
    /// use trainctl_client::TrainingClient;
    ///
    /// let client = TrainingClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new training client with a custom HTTP client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the training server
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a training client whose requests give up after `timeout`
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use trainctl_client::TrainingClient;
    ///
    /// let client = TrainingClient::with_timeout("http://localhost:5000", Duration::from_secs(10))?;
    /// # Ok::<(), trainctl_client::ClientError>(())
    /// ```
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success status codes become [`ClientError::ApiError`], carrying the
    /// server's `message` field when the body has one. Bodies that fail to
    /// decode become [`ClientError::ParseError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                error_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extracts `message` from a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
