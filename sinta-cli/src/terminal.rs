//! Terminal presentation
//!
//! Renders job progress and notifications as colored lines on stdout.

use std::sync::Mutex;

use chrono::Local;
use colored::*;
use sinta_core::domain::job::JobStatus;
use sinta_monitor::{PresentationSink, ToastLevel};

const BAR_WIDTH: usize = 30;

/// Presentation sink for an interactive terminal
///
/// Identical consecutive snapshots are printed once.
pub struct TerminalSink {
    last_line: Mutex<Option<String>>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            last_line: Mutex::new(None),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSink for TerminalSink {
    fn render_progress(&self, status: &JobStatus) {
        let line = progress_line(status);

        let mut last = self
            .last_line
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if last.as_deref() == Some(line.as_str()) {
            return;
        }

        println!("{} {}", timestamp(), line);
        *last = Some(line);
    }

    fn show_toast(&self, message: &str, level: ToastLevel) {
        let marker = match level {
            ToastLevel::Info => "ℹ".blue(),
            ToastLevel::Success => "✓".green(),
            ToastLevel::Warning => "⚠".yellow(),
            ToastLevel::Error => "✗".red(),
        };
        println!("{} {} {}", timestamp(), marker, message);
    }

    fn set_running_indicator(&self, running: bool) {
        let indicator = if running {
            "Running".yellow().bold()
        } else {
            "Ready".green().bold()
        };
        println!("{} Status: {}", timestamp(), indicator);
    }

    fn set_loading(&self, visible: bool) {
        if visible {
            println!("{} {}", timestamp(), "Memulai scraping...".dimmed());
        }
    }
}

fn timestamp() -> ColoredString {
    Local::now().format("%H:%M:%S").to_string().dimmed()
}

/// Formats one snapshot: bar, percentage, message, elapsed time and output dir
pub(crate) fn progress_line(status: &JobStatus) -> String {
    let message = status
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or("Processing...");

    let mut line = format!(
        "{} {:>3}% {}",
        progress_bar(status.progress),
        status.progress,
        message
    );
    if let Some(elapsed) = status.elapsed_time.as_deref() {
        line.push_str(&format!(" | Waktu: {}", elapsed));
    }
    if let Some(dir) = status.output_dir.as_deref() {
        line.push_str(&format!(" | Output: {}", dir));
    }
    line
}

/// Fixed-width text progress bar for a percentage in 0..=100
pub(crate) fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_progress_line_falls_back_to_processing() {
        let status = JobStatus::in_progress(40).with_message("");
        assert_eq!(
            progress_line(&status),
            format!("{}  40% Processing...", progress_bar(40))
        );
    }

    #[test]
    fn test_progress_line_includes_elapsed_and_output() {
        let mut status = JobStatus::in_progress(70).with_message("Scraping publikasi");
        status.elapsed_time = Some("00:01:05".to_string());
        status.output_dir = Some("outputs/2024-05-01".to_string());

        assert_eq!(
            progress_line(&status),
            format!(
                "{}  70% Scraping publikasi | Waktu: 00:01:05 | Output: outputs/2024-05-01",
                progress_bar(70)
            )
        );
    }
}
