//! Job domain types

use serde::{Deserialize, Deserializer, Serialize};

/// Failure reason used when the backend reports neither an error nor a message.
pub const GENERIC_FAILURE_REASON: &str = "Terjadi kesalahan";

/// Snapshot of the scraping job as returned by `GET /api/scraping-status`
///
/// A new value is decoded for every poll; snapshots are replaced, never mutated.
/// `running == false` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub running: bool,
    #[serde(default, deserialize_with = "clamp_progress")]
    pub progress: u8,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub elapsed_time: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default, rename = "results", alias = "result")]
    pub result: Option<JobResult>,
}

/// Result of a finished scraping run
///
/// The backend sends `{}` before a run has produced anything, which decodes
/// as an unsuccessful result without an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Classification of a terminal status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed { reason: String },
}

impl JobStatus {
    /// Status of a run still in progress
    pub fn in_progress(progress: u8) -> Self {
        Self {
            running: true,
            progress: progress.min(100),
            message: None,
            elapsed_time: None,
            output_dir: None,
            result: None,
        }
    }

    /// Status of a run that has ended with the given result
    pub fn finished(result: JobResult) -> Self {
        Self {
            running: false,
            progress: if result.success { 100 } else { 0 },
            message: None,
            elapsed_time: None,
            output_dir: None,
            result: Some(result),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether polling must stop after observing this status
    pub fn is_terminal(&self) -> bool {
        !self.running
    }
}

impl JobResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

impl Outcome {
    /// Classifies a terminal status
    ///
    /// Failure reasons prefer `result.error`, then `message`, then
    /// [`GENERIC_FAILURE_REASON`]. Empty strings count as absent.
    pub fn classify(status: &JobStatus) -> Self {
        if status.result.as_ref().is_some_and(|r| r.success) {
            return Outcome::Completed;
        }

        let reason = status
            .result
            .as_ref()
            .and_then(|r| non_empty(r.error.as_deref()))
            .or_else(|| non_empty(status.message.as_deref()))
            .unwrap_or(GENERIC_FAILURE_REASON);

        Outcome::Failed {
            reason: reason.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Completed => write!(f, "completed"),
            Outcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn clamp_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0).clamp(0, 100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_running_payload() {
        let json = r#"{
            "running": true,
            "progress": 40,
            "message": "Scraping buku...",
            "results": {},
            "start_time": "Mon, 06 Jan 2025 10:00:00 GMT",
            "output_dir": "output-06012025",
            "elapsed_time": "0:01:12"
        }"#;

        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert!(status.running);
        assert_eq!(status.progress, 40);
        assert_eq!(status.message.as_deref(), Some("Scraping buku..."));
        assert_eq!(status.elapsed_time.as_deref(), Some("0:01:12"));
        assert_eq!(status.output_dir.as_deref(), Some("output-06012025"));
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_decode_idle_backend_payload() {
        let json = r#"{
            "running": false,
            "progress": 0,
            "message": "",
            "results": {},
            "start_time": null,
            "output_dir": null
        }"#;

        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert!(status.is_terminal());
        assert_eq!(status.output_dir, None);
        assert_eq!(status.elapsed_time, None);
        assert_eq!(status.result, Some(JobResult::default()));
    }

    #[test]
    fn test_decode_minimal_payload() {
        let status: JobStatus = serde_json::from_str(r#"{"running": false}"#).unwrap();
        assert_eq!(status.progress, 0);
        assert_eq!(status.result, None);
    }

    #[test]
    fn test_decode_accepts_singular_result_key() {
        let json = r#"{"running": false, "progress": 100, "result": {"success": true}}"#;
        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.result, Some(JobResult::succeeded()));
    }

    #[test]
    fn test_progress_is_clamped() {
        let high: JobStatus =
            serde_json::from_str(r#"{"running": true, "progress": 250}"#).unwrap();
        assert_eq!(high.progress, 100);

        let low: JobStatus = serde_json::from_str(r#"{"running": true, "progress": -3}"#).unwrap();
        assert_eq!(low.progress, 0);

        let null: JobStatus =
            serde_json::from_str(r#"{"running": true, "progress": null}"#).unwrap();
        assert_eq!(null.progress, 0);
    }

    #[test]
    fn test_missing_running_flag_is_rejected() {
        assert!(serde_json::from_str::<JobStatus>(r#"{"progress": 10}"#).is_err());
    }

    #[test]
    fn test_classify_success() {
        let status = JobStatus::finished(JobResult::succeeded());
        assert_eq!(Outcome::classify(&status), Outcome::Completed);
    }

    #[test]
    fn test_classify_prefers_result_error() {
        let status =
            JobStatus::finished(JobResult::failed("timeout")).with_message("Error: timeout");
        assert_eq!(
            Outcome::classify(&status),
            Outcome::Failed {
                reason: "timeout".to_string()
            }
        );
    }

    #[test]
    fn test_classify_falls_back_to_message() {
        let status = JobStatus::finished(JobResult::default()).with_message("Login gagal");
        assert_eq!(
            Outcome::classify(&status),
            Outcome::Failed {
                reason: "Login gagal".to_string()
            }
        );
    }

    #[test]
    fn test_classify_falls_back_to_generic_reason() {
        let mut status = JobStatus::finished(JobResult {
            success: false,
            error: Some(String::new()),
        });
        status.message = Some(String::new());

        assert_eq!(
            Outcome::classify(&status),
            Outcome::Failed {
                reason: GENERIC_FAILURE_REASON.to_string()
            }
        );

        status.result = None;
        status.message = None;
        assert!(!Outcome::classify(&status).is_success());
    }
}
