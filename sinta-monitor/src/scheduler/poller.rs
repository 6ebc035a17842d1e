//! Job status poller
//!
//! Polls the scraper backend for the job status on a timer and reports every
//! snapshot to an observer until the backend says the job is no longer running.
//!
//! Each active loop is a single spawned task that owns the only timer. Cadence
//! changes reach it through a channel and are applied between ticks, so a tick
//! is never lost or doubled by a visibility change. Fetches of the same
//! scheduler never overlap, and each one starts a full interval after the
//! previous one finished.

use sinta_client::{ClientError, StatusClient};
use sinta_core::domain::job::JobStatus;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::cadence::{Cadence, CadenceSettings, PollState};
use crate::error::MonitorError;

/// Receives the results of a poll loop
///
/// Callbacks run on the poll task between ticks and must not block.
pub trait PollObserver: Send + Sync {
    /// Called with every successfully fetched status, terminal ones included
    fn on_update(&self, status: &JobStatus);

    /// Called exactly once per loop with the terminal status, after `on_update`
    fn on_terminal(&self, status: JobStatus);
}

/// Owner of the single status polling loop
pub struct PollScheduler {
    client: Arc<dyn StatusClient>,
    cadences: CadenceSettings,
    shared: Arc<Mutex<Shared>>,
}

struct Shared {
    state: PollState,
    hidden: bool,
    /// Incremented on every start; a loop only touches state while it is current
    generation: u64,
    run: Option<ActiveRun>,
}

struct ActiveRun {
    commands: mpsc::UnboundedSender<LoopCommand>,
    task: JoinHandle<()>,
}

#[derive(Debug)]
enum LoopCommand {
    Rearm(Cadence),
}

impl PollScheduler {
    /// Creates an idle scheduler
    pub fn new(client: Arc<dyn StatusClient>, cadences: CadenceSettings) -> Self {
        Self {
            client,
            cadences,
            shared: Arc::new(Mutex::new(Shared {
                state: PollState::Idle,
                hidden: false,
                generation: 0,
                run: None,
            })),
        }
    }

    pub fn state(&self) -> PollState {
        lock(&self.shared).state
    }

    /// Starts polling
    ///
    /// The first tick fires one interval after the call. While the front end
    /// is hidden the loop starts in the background cadence whatever `cadence`
    /// asks for. Must be called from within a tokio runtime.
    ///
    /// # Returns
    /// The active state the scheduler entered
    pub fn start(
        &self,
        cadence: Cadence,
        observer: Arc<dyn PollObserver>,
    ) -> Result<PollState, MonitorError> {
        let mut shared = lock(&self.shared);

        if shared.state.is_active() {
            warn!(state = ?shared.state, "Refusing to start a second poll loop");
            return Err(MonitorError::AlreadyRunning);
        }

        let cadence = if shared.hidden {
            Cadence::Background
        } else {
            cadence
        };

        shared.generation += 1;
        let generation = shared.generation;
        let (commands, receiver) = mpsc::unbounded_channel();

        let poll_loop = PollLoop {
            client: Arc::clone(&self.client),
            cadences: self.cadences,
            shared: Arc::clone(&self.shared),
            generation,
            observer,
        };
        let task = tokio::spawn(poll_loop.run(cadence, receiver));

        // A loop that is still reporting its terminal status is detached, not aborted
        shared.run = Some(ActiveRun { commands, task });
        shared.state = PollState::active(cadence);

        info!(
            generation,
            ?cadence,
            interval_ms = self.cadences.interval(cadence).as_millis() as u64,
            "Poll loop started"
        );

        Ok(shared.state)
    }

    /// Stops polling
    ///
    /// Cancels the timer and any in-flight status check. Calling this on an
    /// idle scheduler does nothing.
    pub fn stop(&self) {
        let mut shared = lock(&self.shared);
        let previous = shared.state;

        if let Some(run) = shared.run.take() {
            if previous.is_active() {
                run.task.abort();
            }
        }

        if previous == PollState::Idle {
            return;
        }

        // Stopped is transient here: nothing is left to report
        shared.state = PollState::Idle;
        info!(generation = shared.generation, from = ?previous, "Poll loop stopped");
    }

    /// Switches cadence to match the visibility of the front end
    ///
    /// Visibility is remembered even while idle so that the next start picks
    /// the right cadence. An active loop re-arms its timer once its current
    /// tick, if any, has completed.
    pub fn on_visibility_change(&self, hidden: bool) {
        let mut shared = lock(&self.shared);
        shared.hidden = hidden;

        if !shared.state.is_active() {
            return;
        }

        let cadence = Cadence::for_visibility(hidden);
        if shared.state.cadence() == Some(cadence) {
            return;
        }

        let delivered = shared
            .run
            .as_ref()
            .is_some_and(|run| run.commands.send(LoopCommand::Rearm(cadence)).is_ok());

        if !delivered {
            warn!(hidden, "Poll loop is gone, cannot switch cadence");
            return;
        }

        shared.state = PollState::active(cadence);
        debug!(hidden, ?cadence, "Poll cadence switched");
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The body of one active poll loop
struct PollLoop {
    client: Arc<dyn StatusClient>,
    cadences: CadenceSettings,
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    observer: Arc<dyn PollObserver>,
}

impl PollLoop {
    async fn run(self, cadence: Cadence, mut commands: mpsc::UnboundedReceiver<LoopCommand>) {
        let mut ticker = self.arm(cadence);

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(LoopCommand::Rearm(cadence)) => {
                        ticker = self.arm(cadence);
                        debug!(generation = self.generation, ?cadence, "Poll timer re-armed");
                    }
                    None => return,
                },

                _ = ticker.tick() => {
                    if self.tick().await.is_break() {
                        return;
                    }
                    // The next check waits a full interval after this one ended
                    ticker.reset();
                }
            }
        }
    }

    /// Builds the loop's timer
    ///
    /// The run loop resets it after every check, so a slow fetch pushes the
    /// next one back instead of triggering it as soon as it returns.
    fn arm(&self, cadence: Cadence) -> Interval {
        let period = self.cadences.interval(cadence);
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    }

    async fn tick(&self) -> ControlFlow<()> {
        debug!(generation = self.generation, "Checking job status");

        let status = match self.client.fetch_status().await {
            Ok(status) => status,
            Err(e) if e.is_transient() => {
                warn!(
                    generation = self.generation,
                    kind = failure_kind(&e),
                    error = %e,
                    "Status check failed, retrying on next tick"
                );
                return ControlFlow::Continue(());
            }
            Err(e) => {
                error!(
                    generation = self.generation,
                    error = %e,
                    "Status check cannot succeed with this client, retrying on next tick"
                );
                return ControlFlow::Continue(());
            }
        };

        if !self.is_current() {
            return ControlFlow::Break(());
        }

        debug!(
            generation = self.generation,
            running = status.running,
            progress = status.progress,
            "Job status received"
        );
        self.observer.on_update(&status);

        if !status.is_terminal() {
            return ControlFlow::Continue(());
        }

        if !self.mark_stopped() {
            return ControlFlow::Break(());
        }

        info!(generation = self.generation, "Job reached terminal status");
        self.observer.on_terminal(status);
        self.settle();

        ControlFlow::Break(())
    }

    fn is_current(&self) -> bool {
        let shared = lock(&self.shared);
        shared.generation == self.generation && shared.state.is_active()
    }

    /// Claims the terminal transition; only one caller per loop can win it
    fn mark_stopped(&self) -> bool {
        let mut shared = lock(&self.shared);
        if shared.generation != self.generation || !shared.state.is_active() {
            return false;
        }

        shared.state = PollState::Stopped;
        true
    }

    /// Returns to idle unless the observer already started a new loop
    fn settle(&self) {
        let mut shared = lock(&self.shared);
        if shared.generation == self.generation && shared.state == PollState::Stopped {
            shared.state = PollState::Idle;
            shared.run = None;
        }
    }
}

fn failure_kind(e: &ClientError) -> &'static str {
    if e.is_network() {
        "network"
    } else if e.is_decode() {
        "decode"
    } else if e.is_server_error() {
        "server"
    } else {
        "api"
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
