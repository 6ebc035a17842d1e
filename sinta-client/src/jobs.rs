//! Scraping job endpoints

use sinta_core::domain::job::JobStatus;
use sinta_core::dto::Acknowledgement;
use sinta_core::dto::job::StartScraping;
use tracing::debug;

use crate::ScraperClient;
use crate::error::Result;

impl ScraperClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Start a scraping run
    ///
    /// # Arguments
    /// * `categories` - Category wire names; empty means every category
    ///
    /// # Returns
    /// The backend acknowledgement. A run already in progress is reported as
    /// `success: false`, not as an HTTP error.
    pub async fn post_start_scraping(&self, categories: Vec<String>) -> Result<Acknowledgement> {
        let url = self.url("/api/start-scraping");
        debug!(categories = ?categories, "Requesting scraping start");
        let response = self
            .client
            .post(&url)
            .json(&StartScraping { categories })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the current scraping status
    ///
    /// # Returns
    /// A fresh snapshot of the job
    pub async fn get_scraping_status(&self) -> Result<JobStatus> {
        let url = self.url("/api/scraping-status");
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
