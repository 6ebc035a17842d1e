//! Sinta HTTP Client
//!
//! A small, type-safe HTTP client for the SINTA scraper web API.
//!
//! The monitor depends only on the [`StatusClient`] and [`JobApi`] traits;
//! [`ScraperClient`] is the reqwest-backed implementation of both.
//!
//! # Example
//!
//! ```no_run
//! use sinta_client::{ScraperClient, StatusClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScraperClient::new("http://localhost:5000");
//!
//!     let status = client.fetch_status().await?;
//!     println!("running={} progress={}%", status.running, status.progress);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;
mod lecturers;
mod outputs;

// Re-export commonly used types
pub use api::{JobApi, StatusClient};
pub use error::{ClientError, Result};
pub use sinta_core::domain::job::JobStatus;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the scraper web API
///
/// Endpoints are grouped by concern:
/// - Lecturer list (load, save)
/// - Scraping job (start, status)
/// - Output directories and their CSV files
#[derive(Debug, Clone)]
pub struct ScraperClient {
    /// Base URL of the web app (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ScraperClient {
    /// Create a new scraper client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the web app (e.g., "http://localhost:5000")
    ///
    /// # Example
    /// ```
    /// use sinta_client::ScraperClient;
    ///
    /// let client = ScraperClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new scraper client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the web app
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Build a URL from literal route segments followed by an output file
    ///
    /// `output_dir` may span several segments; every segment is percent-encoded.
    fn file_url(&self, route: &[&str], output_dir: &str, filename: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("{}: {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidConfig(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(route)
            .extend(output_dir.split('/').filter(|segment| !segment.is_empty()))
            .push(filename);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-2xx response into [`ClientError::ApiError`]
    ///
    /// The backend reports failures as `{"error": "..."}`; that message is
    /// used when present, the raw body otherwise.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorBody>(&error_text)
            .map(|body| body.error)
            .unwrap_or(error_text);

        Err(ClientError::api_error(status.as_u16(), message))
    }

    /// Handle an API response and deserialize JSON
    ///
    /// The body is read before decoding so that transport failures and
    /// malformed JSON stay distinguishable.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}
