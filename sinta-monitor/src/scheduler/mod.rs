//! Scheduler layer for the monitor
//!
//! This layer owns the status polling loop. At most one loop is active per
//! [`PollScheduler`]; cadence follows the visibility of the front end.

pub mod cadence;
pub mod poller;

pub use cadence::{Cadence, CadenceSettings, PollState};
pub use poller::{PollObserver, PollScheduler};
