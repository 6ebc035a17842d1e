//! Job controller
//!
//! Handles the client side of a scraping job:
//! - Validating and submitting the lecturer list and categories
//! - Starting the poll scheduler once the backend accepted the job
//! - Re-attaching to a job that is already running server-side
//! - Turning the terminal status into an [`Outcome`] and a notification

use sinta_client::{JobApi, StatusClient};
use sinta_core::domain::job::{JobStatus, Outcome};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::MonitorError;
use crate::presentation::{PresentationSink, ToastLevel};
use crate::scheduler::{Cadence, CadenceSettings, PollObserver, PollScheduler, PollState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracking {
    Idle,
    Submitting,
    Active,
}

/// Tracks at most one scraping job at a time
pub struct JobController {
    api: Arc<dyn JobApi>,
    status: Arc<dyn StatusClient>,
    scheduler: PollScheduler,
    sink: Arc<dyn PresentationSink>,
    tracking: Arc<Mutex<Tracking>>,
    outcomes: Arc<watch::Sender<Option<Outcome>>>,
}

impl JobController {
    /// Creates a controller with its own poll scheduler
    ///
    /// # Arguments
    /// * `api` - Submission endpoints
    /// * `status` - Status endpoint, shared with the scheduler
    /// * `sink` - Front end receiving render commands
    /// * `cadences` - Poll intervals
    pub fn new(
        api: Arc<dyn JobApi>,
        status: Arc<dyn StatusClient>,
        sink: Arc<dyn PresentationSink>,
        cadences: CadenceSettings,
    ) -> Self {
        let (outcomes, _) = watch::channel(None);

        Self {
            api,
            scheduler: PollScheduler::new(Arc::clone(&status), cadences),
            status,
            sink,
            tracking: Arc::new(Mutex::new(Tracking::Idle)),
            outcomes: Arc::new(outcomes),
        }
    }

    /// Subscribes to job outcomes
    ///
    /// The value is reset to `None` whenever a new job starts being tracked
    /// and set once the backend reports the job as finished.
    pub fn outcomes(&self) -> watch::Receiver<Option<Outcome>> {
        self.outcomes.subscribe()
    }

    pub fn poll_state(&self) -> PollState {
        self.scheduler.state()
    }

    /// Whether a job is being submitted or monitored
    pub fn is_tracking(&self) -> bool {
        *lock(&self.tracking) != Tracking::Idle
    }

    /// Submits a scraping job and starts monitoring it
    ///
    /// The lecturer list is saved before the run is requested. An empty
    /// category set asks the backend to scrape every category.
    pub async fn submit(
        &self,
        lecturer_ids: &[String],
        categories: &BTreeSet<String>,
    ) -> Result<(), MonitorError> {
        let claim = {
            let mut tracking = lock(&self.tracking);
            if *tracking != Tracking::Idle {
                Err(MonitorError::AlreadyRunning)
            } else if lecturer_ids.is_empty() {
                Err(MonitorError::Validation(
                    "at least one lecturer ID is required".to_string(),
                ))
            } else {
                *tracking = Tracking::Submitting;
                Ok(())
            }
        };

        if let Err(e) = claim {
            let (message, level) = match &e {
                MonitorError::AlreadyRunning => ("Scraping sudah berjalan!", ToastLevel::Warning),
                _ => ("Silakan masukkan minimal satu ID dosen!", ToastLevel::Error),
            };
            warn!(error = %e, "Job submission refused");
            self.sink.show_toast(message, level);
            return Err(e);
        }

        let guard = SubmissionGuard::new(&self.tracking);

        info!(
            lecturers = lecturer_ids.len(),
            categories = ?categories,
            "Submitting scraping job"
        );

        self.sink.set_loading(true);
        let requested = self.request_start(lecturer_ids, categories).await;
        self.sink.set_loading(false);

        if let Err(e) = requested {
            error!(error = %e, "Job submission failed");
            let message = match &e {
                MonitorError::Submission { message } => message.clone(),
                other => other.to_string(),
            };
            self.sink
                .show_toast(&format!("Error: {}", message), ToastLevel::Error);
            return Err(e);
        }

        self.begin_tracking(guard)?;
        self.sink.show_toast("Scraping dimulai!", ToastLevel::Success);

        Ok(())
    }

    /// Re-attaches to a job the backend is already running
    ///
    /// # Returns
    /// `true` if a running job was found and is now being monitored
    pub async fn resume_if_active(&self) -> Result<bool, MonitorError> {
        {
            let mut tracking = lock(&self.tracking);
            if *tracking != Tracking::Idle {
                return Err(MonitorError::AlreadyRunning);
            }
            *tracking = Tracking::Submitting;
        }
        let guard = SubmissionGuard::new(&self.tracking);

        let status = match self.status.fetch_status().await {
            Ok(status) => status,
            Err(e) => {
                error!(error = %e, "Failed to check initial job status");
                return Err(e.into());
            }
        };

        if !status.running {
            self.sink.set_running_indicator(false);
            return Ok(false);
        }

        info!(progress = status.progress, "Resuming monitoring of a running job");
        self.sink.render_progress(&status);
        self.begin_tracking(guard)?;

        Ok(true)
    }

    /// Stops monitoring the current job
    ///
    /// The server-side job keeps running; no outcome is published.
    pub fn stop(&self) {
        if self.release() {
            self.sink.set_running_indicator(false);
            info!("Stopped monitoring scraping job");
        }
    }

    /// Stops monitoring while the job keeps running server-side
    ///
    /// Unlike [`JobController::stop`] the running indicator is left alone,
    /// since the backend is still busy with the job.
    pub fn detach(&self) {
        if self.release() {
            info!("Detached from running scraping job");
        }
    }

    /// Stops the scheduler; returns whether a job was being monitored
    fn release(&self) -> bool {
        self.scheduler.stop();

        let mut tracking = lock(&self.tracking);
        if *tracking != Tracking::Active {
            return false;
        }
        *tracking = Tracking::Idle;
        true
    }

    /// Forwards a visibility change of the front end to the scheduler
    pub fn on_visibility_change(&self, hidden: bool) {
        self.scheduler.on_visibility_change(hidden);
    }

    async fn request_start(
        &self,
        lecturer_ids: &[String],
        categories: &BTreeSet<String>,
    ) -> Result<(), MonitorError> {
        let saved = self.api.save_lecturers(lecturer_ids).await?;
        if let Some(message) = saved.rejection() {
            return Err(MonitorError::submission(message));
        }

        let categories: Vec<String> = categories.iter().cloned().collect();
        let started = self.api.start_scraping(&categories).await?;
        if let Some(message) = started.rejection() {
            return Err(MonitorError::submission(message));
        }

        Ok(())
    }

    fn begin_tracking(&self, guard: SubmissionGuard<'_>) -> Result<(), MonitorError> {
        self.outcomes.send_replace(None);

        let observer = Arc::new(JobObserver {
            sink: Arc::clone(&self.sink),
            tracking: Arc::clone(&self.tracking),
            outcomes: Arc::clone(&self.outcomes),
        });

        *lock(&self.tracking) = Tracking::Active;
        self.scheduler.start(Cadence::Foreground, observer)?;
        guard.disarm();

        self.sink.set_running_indicator(true);
        Ok(())
    }
}

/// Resets tracking to idle unless the submission went through
///
/// Also covers a submission future dropped mid-request.
struct SubmissionGuard<'a> {
    tracking: &'a Mutex<Tracking>,
    armed: bool,
}

impl<'a> SubmissionGuard<'a> {
    fn new(tracking: &'a Mutex<Tracking>) -> Self {
        Self {
            tracking,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            *lock(self.tracking) = Tracking::Idle;
        }
    }
}

/// Poll observer bound to one tracked job
struct JobObserver {
    sink: Arc<dyn PresentationSink>,
    tracking: Arc<Mutex<Tracking>>,
    outcomes: Arc<watch::Sender<Option<Outcome>>>,
}

impl PollObserver for JobObserver {
    fn on_update(&self, status: &JobStatus) {
        self.sink.render_progress(status);
    }

    fn on_terminal(&self, status: JobStatus) {
        self.sink.set_running_indicator(false);

        let outcome = Outcome::classify(&status);
        match &outcome {
            Outcome::Completed => {
                let message = match status.output_dir.as_deref() {
                    Some(dir) => format!("Scraping selesai! Hasil tersimpan di {}", dir),
                    None => "Scraping selesai!".to_string(),
                };
                self.sink.show_toast(&message, ToastLevel::Success);
            }
            Outcome::Failed { reason } => {
                self.sink
                    .show_toast(&format!("Scraping gagal: {}", reason), ToastLevel::Error);
            }
        }

        info!(success = outcome.is_success(), %outcome, "Scraping job finished");

        // Published under the tracking lock: a new submission can only claim
        // the controller, and reset the outcome, after this one is visible
        let mut tracking = lock(&self.tracking);
        self.outcomes.send_replace(Some(outcome));
        *tracking = Tracking::Idle;
    }
}

fn lock(tracking: &Mutex<Tracking>) -> MutexGuard<'_, Tracking> {
    tracking.lock().unwrap_or_else(PoisonError::into_inner)
}
