//! Console configuration
//!
//! Server location, poll cadence and request timeout. The server URL comes
//! from the command line (or `TRAINCTL_SERVER_URL`); the rest can be tuned
//! through environment variables.

use std::time::Duration;

use crate::controller::PollIntervals;

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Training server base URL (e.g., "http://localhost:5000")
    pub server_url: String,

    /// Delay between polls while training runs
    pub active_poll_interval: Duration,

    /// Delay between polls while idle or after a failed poll
    pub idle_poll_interval: Duration,

    /// Upper bound on any single request
    pub request_timeout: Duration,

    /// Static path recorded videos are served under
    pub video_base_path: String,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(server_url: String) -> Self {
        Self {
            server_url,
            active_poll_interval: Duration::from_millis(1000),
            idle_poll_interval: Duration::from_millis(5000),
            request_timeout: Duration::from_secs(10),
            video_base_path: "/static/videos".to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Optional environment variables:
    /// - TRAINCTL_ACTIVE_POLL_MS (default: 1000)
    /// - TRAINCTL_IDLE_POLL_MS (default: 5000)
    /// - TRAINCTL_REQUEST_TIMEOUT_SECS (default: 10)
    /// - TRAINCTL_VIDEO_BASE (default: /static/videos)
    pub fn from_env(server_url: String) -> Self {
        Self::from_lookup(server_url, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source
    pub fn from_lookup(server_url: String, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new(server_url);

        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let active_poll_interval = millis("TRAINCTL_ACTIVE_POLL_MS", defaults.active_poll_interval);
        let idle_poll_interval = millis("TRAINCTL_IDLE_POLL_MS", defaults.idle_poll_interval);

        let request_timeout = lookup("TRAINCTL_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let video_base_path = lookup("TRAINCTL_VIDEO_BASE").unwrap_or(defaults.video_base_path);

        Self {
            server_url: defaults.server_url,
            active_poll_interval,
            idle_poll_interval,
            request_timeout,
            video_base_path,
        }
    }

    pub fn poll_intervals(&self) -> PollIntervals {
        PollIntervals {
            active: self.active_poll_interval,
            idle: self.idle_poll_interval,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.active_poll_interval.is_zero() || self.idle_poll_interval.is_zero() {
            anyhow::bail!("poll intervals must be greater than 0");
        }

        if self.active_poll_interval > self.idle_poll_interval {
            anyhow::bail!("active poll interval cannot be longer than the idle poll interval");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string())
    }
}
