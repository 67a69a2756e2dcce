use std::time::Duration;

use thiserror::Error;

use crate::history::MaxHistorySize;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("display limit must be at least 1")]
    ZeroDisplayLimit,
}

/// Validated engine configuration.
///
/// Constructed through [`EngineConfig::default`] and the `with_*` builders,
/// then checked once with [`EngineConfig::validate`] before the engine is
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Eviction bound of the history.
    pub max_size: MaxHistorySize,

    /// Number of entries a consumer shows by default.
    pub display_limit: usize,

    /// Delay between two change-token polls.
    pub poll_interval: Duration,

    /// Pause after a programmatic write before polling resumes.
    pub settle_delay: Duration,

    /// Capture whatever is on the clipboard the first time the monitor starts.
    pub capture_on_start: bool,
}

impl EngineConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);
    pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

    pub fn with_max_size(mut self, max_size: MaxHistorySize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_display_limit(mut self, display_limit: usize) -> Self {
        self.display_limit = display_limit;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_capture_on_start(mut self, capture_on_start: bool) -> Self {
        self.capture_on_start = capture_on_start;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.display_limit == 0 {
            return Err(ConfigError::ZeroDisplayLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_size: MaxHistorySize::default(),
            display_limit: Self::DEFAULT_DISPLAY_LIMIT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
            capture_on_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_contract() {
        let config = EngineConfig::default();
        assert_eq!(config.max_size.get(), 50);
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.display_limit, 20);
        assert!(config.capture_on_start);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let config = EngineConfig::default().with_poll_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn rejects_zero_display_limit() {
        let config = EngineConfig::default().with_display_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDisplayLimit));
    }

    #[test]
    fn zero_settle_delay_is_allowed() {
        let config = EngineConfig::default().with_settle_delay(Duration::ZERO);
        assert!(config.validate().is_ok());
    }
}
