// src/lib.rs

//! # Slide Gate
//!
//! An in-process rate limiter that admits at most `calls` calls in any
//! trailing window of `period` seconds, optionally partitioned by key.
//!
//! The window is exact: every admitted call is timestamped on a monotonic
//! clock, and a call exactly `period` old no longer counts. Denied calls
//! are never recorded.
//!
//! ## Quick Example
//!
//! ```rust
//! use slide_gate::{Gate, GateConfig, GateError};
//!
//! let config = GateConfig::new(2, 1.0);
//! let gate = Gate::new(config).unwrap();
//!
//! assert_eq!(gate.call((), |()| "first").unwrap(), "first");
//! assert_eq!(gate.call((), |()| "second").unwrap(), "second");
//!
//! match gate.call((), |()| "third") {
//!     Err(GateError::RateLimited(exceeded)) => {
//!         println!("Rate limited - retry after {:.2}s", exceeded.retry_after_seconds());
//!     }
//!     other => panic!("expected a denial, got {other:?}"),
//! }
//! ```
//!
//! ## Known limitation
//!
//! Per-key call history lives as long as the gate. Keys are never evicted,
//! so unbounded key cardinality means unbounded memory.

// private modules
mod clock;
mod config;
mod errors;
mod gate;
mod window_store;

// public API exports
pub use clock::{Clock, MonotonicClock};
pub use config::GateConfig;
pub use errors::{BoxError, ConfigError, GateError, RateLimitExceeded};
pub use gate::{Gate, GlobalKey};
pub use window_store::{Decision, WindowStore};
