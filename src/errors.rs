// src/errors.rs

// error handling for the gate and its configuration

// dependencies
use std::convert::Infallible;
use std::time::Duration;

/// Boxed error returned by a fallible key extractor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for gate configuration issues.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `calls` was zero.
    #[error("calls must be at least 1")]
    InvalidCalls,
    /// `period` was zero, negative, NaN or infinite.
    #[error("period must be a positive, finite number of seconds")]
    InvalidPeriod,
}

/// A call was denied and no retries remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rate limit exceeded! Try again in {:.2} seconds.", .retry_after.as_secs_f64())]
pub struct RateLimitExceeded {
    retry_after: Duration,
}

impl RateLimitExceeded {
    pub fn new(retry_after: Duration) -> Self {
        Self { retry_after }
    }

    /// Time until the oldest call in the window expires.
    pub fn retry_after(&self) -> Duration {
        self.retry_after
    }

    pub fn retry_after_seconds(&self) -> f64 {
        self.retry_after.as_secs_f64()
    }
}

/// Everything that can come back from a gated invocation.
///
/// Failures of the key extractor and of the wrapped operation are carried
/// as-is; the gate never inspects or rewrites them.
#[derive(Debug, thiserror::Error)]
pub enum GateError<E = Infallible> {
    #[error(transparent)]
    RateLimited(#[from] RateLimitExceeded),
    #[error(transparent)]
    KeyExtraction(BoxError),
    #[error(transparent)]
    Operation(E),
}

impl<E> GateError<E> {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GateError::RateLimited(_))
    }

    /// Suggested wait, present only for rate-limit denials.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GateError::RateLimited(exceeded) => Some(exceeded.retry_after()),
            _ => None,
        }
    }

    /// The wrapped operation's own error, if that is what failed.
    pub fn into_operation(self) -> Option<E> {
        match self {
            GateError::Operation(err) => Some(err),
            _ => None,
        }
    }
}
