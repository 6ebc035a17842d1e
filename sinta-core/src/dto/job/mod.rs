//! Scraping job DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/start-scraping`
///
/// An empty category list asks the backend to scrape every category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartScraping {
    pub categories: Vec<String>,
}
