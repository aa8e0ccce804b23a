// src/config.rs

//! Configuration types for the gate

// dependencies
use crate::errors::ConfigError;
use std::time::Duration;

/// Configuration for gate behavior
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub(crate) calls: usize,
    pub(crate) period_seconds: f64,
    pub(crate) auto_retry: bool,
    pub(crate) max_retries: u32,
}

impl Default for GateConfig {
    /// One call per 60 seconds, no auto-retry, three retries once enabled.
    fn default() -> Self {
        Self {
            calls: 1,
            period_seconds: 60.0,
            auto_retry: false,
            max_retries: 3,
        }
    }
}

impl GateConfig {
    /// Create a new configuration allowing `calls` per `period_seconds`
    pub fn new(calls: usize, period_seconds: f64) -> Self {
        Self {
            calls,
            period_seconds,
            ..Self::default()
        }
    }

    /// Builder-style: set the maximum number of admissions per window
    pub fn calls(mut self, calls: usize) -> Self {
        self.calls = calls;
        self
    }

    /// Builder-style: set the window width in seconds
    pub fn period(mut self, period_seconds: f64) -> Self {
        self.period_seconds = period_seconds;
        self
    }

    /// Builder-style: set the window width from a `Duration`
    pub fn period_duration(mut self, period: Duration) -> Self {
        self.period_seconds = period.as_secs_f64();
        self
    }

    /// Builder-style: sleep and retry on denial instead of failing at once
    pub fn auto_retry(mut self, auto_retry: bool) -> Self {
        self.auto_retry = auto_retry;
        self
    }

    /// Builder-style: bound the number of retries when auto-retry is on
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calls < 1 {
            return Err(ConfigError::InvalidCalls);
        }
        // NaN fails this comparison too
        if !(self.period_seconds > 0.0 && self.period_seconds.is_finite()) {
            return Err(ConfigError::InvalidPeriod);
        }
        // from_secs_f64 panics on periods too large for a Duration
        if Duration::try_from_secs_f64(self.period_seconds).is_err() {
            return Err(ConfigError::InvalidPeriod);
        }
        Ok(())
    }

    // window width in clock ticks; only meaningful after `validate`
    pub(crate) fn period_nanos(&self) -> u64 {
        Duration::try_from_secs_f64(self.period_seconds)
            .map_or(u64::MAX, |period| {
                u64::try_from(period.as_nanos()).unwrap_or(u64::MAX)
            })
            .max(1)
    }
}
