//! Lecturer list DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/lecturers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLecturers {
    /// SINTA author IDs, in the order they should be scraped
    pub lecturer_ids: Vec<String>,
}

/// Reply of `GET /api/lecturers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecturerList {
    #[serde(default)]
    pub lecturer_ids: Vec<String>,
}
