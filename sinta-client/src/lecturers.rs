//! Lecturer list endpoints

use sinta_core::dto::Acknowledgement;
use sinta_core::dto::lecturer::{LecturerList, SaveLecturers};

use crate::ScraperClient;
use crate::error::Result;

impl ScraperClient {
    /// Load the lecturer IDs the backend will scrape
    pub async fn get_lecturers(&self) -> Result<Vec<String>> {
        let url = self.url("/api/lecturers");
        let response = self.client.get(&url).send().await?;

        let list: LecturerList = self.handle_response(response).await?;
        Ok(list.lecturer_ids)
    }

    /// Replace the backend's lecturer list
    ///
    /// # Arguments
    /// * `lecturer_ids` - SINTA author IDs in scrape order
    pub async fn post_lecturers(&self, lecturer_ids: Vec<String>) -> Result<Acknowledgement> {
        let url = self.url("/api/lecturers");
        let response = self
            .client
            .post(&url)
            .json(&SaveLecturers { lecturer_ids })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
