//! Service seams consumed by the monitor
//!
//! The monitor only talks to the backend through these traits so that the
//! polling state machine can be driven by scripted clients in tests.

use async_trait::async_trait;
use sinta_core::domain::job::JobStatus;
use sinta_core::dto::Acknowledgement;

use crate::ScraperClient;
use crate::error::Result;

/// Read access to the scraping job status
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Performs one status round trip
    ///
    /// Never retries. A payload reporting `running: false` is a valid
    /// status, not an error.
    async fn fetch_status(&self) -> Result<JobStatus>;
}

/// Mutating endpoints used to submit a scraping job
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Replaces the backend's lecturer list
    async fn save_lecturers(&self, lecturer_ids: &[String]) -> Result<Acknowledgement>;

    /// Asks the backend to start a run over the given categories
    async fn start_scraping(&self, categories: &[String]) -> Result<Acknowledgement>;
}

#[async_trait]
impl StatusClient for ScraperClient {
    async fn fetch_status(&self) -> Result<JobStatus> {
        self.get_scraping_status().await
    }
}

#[async_trait]
impl JobApi for ScraperClient {
    async fn save_lecturers(&self, lecturer_ids: &[String]) -> Result<Acknowledgement> {
        self.post_lecturers(lecturer_ids.to_vec()).await
    }

    async fn start_scraping(&self, categories: &[String]) -> Result<Acknowledgement> {
        self.post_start_scraping(categories.to_vec()).await
    }
}
