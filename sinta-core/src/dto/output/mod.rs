//! Output listing and CSV preview DTOs

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::output::OutputDirectory;

/// Reply of `GET /api/outputs`, newest directory first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputList {
    #[serde(default)]
    pub outputs: Vec<OutputDirectory>,
}

/// Reply of `GET /api/csv-data/<dir>/<file>`
///
/// Rows map column name to cell; empty cells arrive as `"-"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvPreview {
    #[serde(default)]
    pub success: bool,
    pub filename: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<BTreeMap<String, String>>,
    pub stats: CsvStats,
}

impl CsvPreview {
    /// Cells of one row in column order
    pub fn row_cells<'a>(&'a self, row: &'a BTreeMap<String, String>) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or("-"))
            .collect()
    }
}

/// Summary the backend computes for a previewed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub file_size: String,
    /// Category-specific figures such as `year_range` or `avg_sinta_score`
    #[serde(flatten)]
    pub extra: BTreeMap<String, StatValue>,
}

/// A category-specific statistic; the backend mixes numbers and text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Score(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Score(x) => write!(f, "{}", x),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_keeps_category_stats() {
        let preview: CsvPreview = serde_json::from_str(
            r#"{
                "success": true,
                "filename": "publikasi_scopus.csv",
                "columns": ["Judul", "Tahun", "Jurnal"],
                "data": [{"Judul": "Deep Learning", "Tahun": "2021", "Jurnal": "-"}],
                "stats": {
                    "total_rows": 1,
                    "total_columns": 3,
                    "file_size": "0.4 KB",
                    "year_range": "2021 - 2021",
                    "unique_journals": 0,
                    "avg_sinta_score": 412.5
                }
            }"#,
        )
        .unwrap();

        assert_eq!(preview.stats.total_rows, 1);
        assert_eq!(
            preview.stats.extra.get("year_range"),
            Some(&StatValue::Text("2021 - 2021".to_string()))
        );
        assert_eq!(
            preview.stats.extra.get("unique_journals"),
            Some(&StatValue::Count(0))
        );
        assert_eq!(
            preview.stats.extra.get("avg_sinta_score").map(ToString::to_string),
            Some("412.5".to_string())
        );
        assert_eq!(
            preview.row_cells(&preview.data[0]),
            vec!["Deep Learning", "2021", "-"]
        );
    }

    #[test]
    fn test_row_cells_fill_missing_columns() {
        let preview = CsvPreview {
            success: true,
            filename: "buku.csv".to_string(),
            columns: vec!["Judul".to_string(), "ISBN".to_string()],
            data: vec![BTreeMap::from([("Judul".to_string(), "Rust".to_string())])],
            stats: CsvStats {
                total_rows: 1,
                total_columns: 2,
                file_size: "0.1 KB".to_string(),
                extra: BTreeMap::new(),
            },
        };

        assert_eq!(preview.row_cells(&preview.data[0]), vec!["Rust", "-"]);
    }
}
