//! Poll cadence and poll loop states

use std::time::Duration;

/// Interval class between two status checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Front end visible: 2 seconds
    Foreground,
    /// Front end hidden: 10 seconds
    Background,
}

impl Cadence {
    /// Cadence matching the current visibility of the front end
    pub fn for_visibility(hidden: bool) -> Self {
        if hidden {
            Cadence::Background
        } else {
            Cadence::Foreground
        }
    }

    pub fn default_interval(&self) -> Duration {
        match self {
            Cadence::Foreground => Duration::from_millis(2000),
            Cadence::Background => Duration::from_millis(10_000),
        }
    }
}

/// Concrete durations for each cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceSettings {
    pub foreground: Duration,
    pub background: Duration,
}

impl CadenceSettings {
    pub fn interval(&self, cadence: Cadence) -> Duration {
        match cadence {
            Cadence::Foreground => self.foreground,
            Cadence::Background => self.background,
        }
    }
}

impl Default for CadenceSettings {
    fn default() -> Self {
        Self {
            foreground: Cadence::Foreground.default_interval(),
            background: Cadence::Background.default_interval(),
        }
    }
}

/// State of a poll scheduler
///
/// `Idle → Active* → Stopped → Idle`. `Stopped` is only observable while a
/// terminal status is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    ActiveForeground,
    ActiveBackground,
    Stopped,
}

impl PollState {
    pub fn active(cadence: Cadence) -> Self {
        match cadence {
            Cadence::Foreground => PollState::ActiveForeground,
            Cadence::Background => PollState::ActiveBackground,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PollState::ActiveForeground | PollState::ActiveBackground)
    }

    /// Cadence of an active state
    pub fn cadence(&self) -> Option<Cadence> {
        match self {
            PollState::ActiveForeground => Some(Cadence::Foreground),
            PollState::ActiveBackground => Some(Cadence::Background),
            PollState::Idle | PollState::Stopped => None,
        }
    }
}
