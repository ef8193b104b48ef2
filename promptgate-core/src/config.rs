//! Gate configuration.

use std::env;
use std::time::Duration;

/// Default deadline for a paused gate (one hour).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Default upper bound between checks of the confirmed flag.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for the wait gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Hard deadline after which a pending gate fails.
    timeout: Duration,
    /// Longest the gate sleeps before re-checking the session.
    poll_interval: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl GateConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PROMPTGATE_TIMEOUT_SECS`: gate deadline in seconds
    /// - `PROMPTGATE_POLL_INTERVAL_MS`: poll interval in milliseconds
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let timeout = env::var("PROMPTGATE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let poll_interval = env::var("PROMPTGATE_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        Self {
            timeout,
            poll_interval,
        }
    }

    /// Set the deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval. Zero is clamped to one millisecond.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Get the deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GateConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(3600));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn builder_overrides() {
        let config = GateConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::ZERO);

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
