//! Sinta Monitor
//!
//! Supervises a server-side SINTA scraping job from the client side.
//!
//! Architecture:
//! - Configuration: web app URL and polling cadences from environment or defaults
//! - Scheduler: the single status polling loop and its visibility-driven cadence
//! - Service: job submission and interpretation of terminal statuses
//! - Presentation: render commands emitted towards whatever front end is attached
//!
//! The backend is the source of truth for job progress. This crate never
//! retries submissions; it only keeps polling until the backend reports that
//! the job is no longer running.

pub mod config;
pub mod error;
pub mod presentation;
pub mod scheduler;
pub mod service;

pub use config::Config;
pub use error::MonitorError;
pub use presentation::{PresentationSink, ToastLevel, TracingSink};
pub use scheduler::{Cadence, CadenceSettings, PollObserver, PollScheduler, PollState};
pub use service::JobController;
