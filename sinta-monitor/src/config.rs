//! Monitor configuration
//!
//! Defines the configurable parameters of the monitor: where the scraper web
//! app lives, how often to poll it, and how long a single request may take.

use std::time::Duration;

use crate::scheduler::{Cadence, CadenceSettings};

/// Monitor configuration
///
/// Poll intervals are configurable so that slow or remote backends can be
/// polled less aggressively.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scraper web app base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Poll interval while the front end is visible
    pub foreground_interval: Duration,

    /// Poll interval while the front end is hidden
    pub background_interval: Duration,

    /// Maximum time a single HTTP request may take
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            foreground_interval: Cadence::Foreground.default_interval(),
            background_interval: Cadence::Background.default_interval(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - SINTA_WEB_URL (optional, default: http://localhost:5000)
    /// - FOREGROUND_POLL_MS (optional, milliseconds, default: 2000)
    /// - BACKGROUND_POLL_MS (optional, milliseconds, default: 10000)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 30)
    ///
    /// Unset variables fall back to their defaults; set but unparsable ones
    /// are an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("SINTA_WEB_URL").unwrap_or(defaults.base_url);

        let foreground_interval = env_duration(
            "FOREGROUND_POLL_MS",
            Duration::from_millis,
            defaults.foreground_interval,
        )?;

        let background_interval = env_duration(
            "BACKGROUND_POLL_MS",
            Duration::from_millis,
            defaults.background_interval,
        )?;

        let request_timeout =
            env_duration("REQUEST_TIMEOUT", Duration::from_secs, defaults.request_timeout)?;

        Ok(Self {
            base_url,
            foreground_interval,
            background_interval,
            request_timeout,
        })
    }

    /// Overrides the base URL, keeping every other setting
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Poll intervals in the form the scheduler consumes
    pub fn cadence_settings(&self) -> CadenceSettings {
        CadenceSettings {
            foreground: self.foreground_interval,
            background: self.background_interval,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.foreground_interval.is_zero() {
            anyhow::bail!("foreground_interval must be greater than 0");
        }

        if self.background_interval < self.foreground_interval {
            anyhow::bail!("background_interval must not be shorter than foreground_interval");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

fn env_duration(
    name: &str,
    unit: fn(u64) -> Duration,
    default: Duration,
) -> anyhow::Result<Duration> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(unit)
            .map_err(|e| anyhow::anyhow!("{} must be a whole number, got '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string())
    }
}
