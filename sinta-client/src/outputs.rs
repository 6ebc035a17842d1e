//! Output directory endpoints

use sinta_core::domain::output::OutputDirectory;
use sinta_core::dto::output::{CsvPreview, OutputList};
use tracing::debug;

use crate::ScraperClient;
use crate::error::Result;

impl ScraperClient {
    /// List output directories of past runs, newest first
    pub async fn list_outputs(&self) -> Result<Vec<OutputDirectory>> {
        let url = self.url("/api/outputs");
        let response = self.client.get(&url).send().await?;

        let list: OutputList = self.handle_response(response).await?;
        Ok(list.outputs)
    }

    /// Download one CSV file of an output directory
    ///
    /// # Arguments
    /// * `output_dir` - Directory name as listed by [`ScraperClient::list_outputs`]
    /// * `filename` - CSV file inside that directory
    ///
    /// # Returns
    /// The raw file contents
    pub async fn download_file(&self, output_dir: &str, filename: &str) -> Result<Vec<u8>> {
        let url = self.file_url(&["download"], output_dir, filename)?;
        let response = self.client.get(url).send().await?;
        let response = self.check_status(response).await?;

        let bytes = response.bytes().await?;
        debug!(output_dir, filename, size = bytes.len(), "Downloaded output file");
        Ok(bytes.to_vec())
    }

    /// Fetch the parsed rows and summary statistics of one CSV file
    pub async fn get_csv_data(&self, output_dir: &str, filename: &str) -> Result<CsvPreview> {
        let url = self.file_url(&["api", "csv-data"], output_dir, filename)?;
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }
}
