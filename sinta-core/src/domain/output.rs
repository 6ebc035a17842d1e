//! Output directory domain types

use serde::{Deserialize, Serialize};

/// A dated directory of CSV files produced by a finished scraping run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDirectory {
    pub name: String,
    pub date: String,
    pub path: String,
    pub files_count: usize,
    #[serde(default)]
    pub files: Vec<String>,
}
