//! Presentation sink
//!
//! The monitor never draws anything itself. It emits render commands to a
//! [`PresentationSink`] and lets the attached front end decide how to show them.

use sinta_core::domain::job::JobStatus;
use tracing::{error, info, warn};

/// Severity of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Receiver of render commands
pub trait PresentationSink: Send + Sync {
    /// Shows the latest job snapshot
    fn render_progress(&self, status: &JobStatus);

    /// Shows a transient notification
    fn show_toast(&self, message: &str, level: ToastLevel);

    /// Switches the running/ready indicator
    fn set_running_indicator(&self, running: bool);

    /// Shows or hides the blocking loading modal around job submission
    fn set_loading(&self, visible: bool);
}

/// Sink that turns render commands into log events
///
/// Used when no interactive front end is attached, e.g. under cron.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn render_progress(&self, status: &JobStatus) {
        info!(
            running = status.running,
            progress = status.progress,
            message = status.message.as_deref().unwrap_or("Processing..."),
            elapsed = status.elapsed_time.as_deref().unwrap_or("-"),
            output_dir = status.output_dir.as_deref().unwrap_or("-"),
            "Scraping progress"
        );
    }

    fn show_toast(&self, message: &str, level: ToastLevel) {
        match level {
            ToastLevel::Info | ToastLevel::Success => info!(?level, "{}", message),
            ToastLevel::Warning => warn!("{}", message),
            ToastLevel::Error => error!("{}", message),
        }
    }

    fn set_running_indicator(&self, running: bool) {
        info!(
            indicator = if running { "Running" } else { "Ready" },
            "Status indicator"
        );
    }

    fn set_loading(&self, _visible: bool) {}
}
