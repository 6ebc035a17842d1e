//! Data Transfer Objects for the scraper web API
//!
//! Request and response bodies exchanged with the backend. They mirror the
//! JSON the backend produces and are kept separate from the domain types.

pub mod job;
pub mod lecturer;
pub mod output;

use serde::{Deserialize, Serialize};

/// Generic `{success, error?, message?}` reply of the mutating endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Acknowledgement {
    /// Reason the backend gave for refusing a request, `None` when accepted
    pub fn rejection(&self) -> Option<String> {
        if self.success {
            return None;
        }

        Some(
            self.error
                .clone()
                .filter(|e| !e.is_empty())
                .or_else(|| self.message.clone().filter(|m| !m.is_empty()))
                .unwrap_or_else(|| "request rejected".to_string()),
        )
    }
}
