//! Scrape category domain type

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A category of SINTA data the backend knows how to scrape
///
/// Submitting no category at all asks the backend to scrape everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Buku,
    Haki,
    Publikasi,
    PublikasiScopus,
    PublikasiGs,
    PublikasiWos,
    Penelitian,
    Ppm,
    Profil,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Buku,
        Category::Haki,
        Category::Publikasi,
        Category::PublikasiScopus,
        Category::PublikasiGs,
        Category::PublikasiWos,
        Category::Penelitian,
        Category::Ppm,
        Category::Profil,
    ];

    /// Wire name accepted by `POST /api/start-scraping`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Buku => "buku",
            Category::Haki => "haki",
            Category::Publikasi => "publikasi",
            Category::PublikasiScopus => "publikasi-scopus",
            Category::PublikasiGs => "publikasi-gs",
            Category::PublikasiWos => "publikasi-wos",
            Category::Penelitian => "penelitian",
            Category::Ppm => "ppm",
            Category::Profil => "profil",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
