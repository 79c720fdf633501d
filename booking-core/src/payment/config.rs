//! Payment session configuration.

use std::time::Duration;

/// Configuration parameters for a payment session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time between status checks. The countdown ticks at the same rate.
    pub poll_interval: Duration,

    /// Consecutive failed status checks tolerated before giving up.
    pub max_consecutive_errors: u32,

    /// Upper bound on a single status check.
    /// A check that takes longer counts as a failed one.
    pub request_timeout: Duration,
}

impl SessionConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        poll_interval: Duration,
        max_consecutive_errors: u32,
        request_timeout: Duration,
    ) -> Self {
        Self {
            poll_interval,
            max_consecutive_errors,
            request_timeout,
        }
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the error budget.
    pub fn with_max_consecutive_errors(mut self, max: u32) -> Self {
        self.max_consecutive_errors = max;
        self
    }

    /// Set the per-check timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_consecutive_errors: 3,
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();

        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_consecutive_errors, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn custom_config() {
        let config = SessionConfig::new(Duration::from_secs(5), 1, Duration::from_secs(4));

        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_consecutive_errors, 1);
        assert_eq!(config.request_timeout, Duration::from_secs(4));
    }

    #[test]
    fn builder_methods() {
        let config = SessionConfig::default()
            .with_poll_interval(Duration::from_millis(500))
            .with_max_consecutive_errors(5)
            .with_request_timeout(Duration::from_secs(1));

        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.max_consecutive_errors, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }
}
