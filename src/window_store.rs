// src/window_store.rs

// slide-gate: exact sliding-window call accounting, partitioned by key.

// dependencies
use crate::clock::Clock;
use crate::config::GateConfig;
use crate::errors::ConfigError;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::hash::Hash;
use std::time::Duration;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The call may proceed; its timestamp has been recorded.
    Allowed,
    /// The call must not proceed; nothing was recorded.
    Denied {
        /// Time until the oldest recorded call leaves the window.
        retry_after: Duration,
    },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn retry_after_seconds(&self) -> Option<f64> {
        match self {
            Decision::Allowed => None,
            Decision::Denied { retry_after } => Some(retry_after.as_secs_f64()),
        }
    }
}

/// Per-key call logs for a sliding window of `period` admitting at most
/// `calls` timestamps.
///
/// K identifies a partition (user id, tenant, ...).
/// C is the clock the timestamps are read from.
///
/// Each log is a `VecDeque` of nanosecond readings in chronological order.
/// A decision runs entirely under the write guard of the key's `DashMap`
/// entry, so eviction, counting and recording are atomic per key. Guards
/// never escape this type.
///
/// Logs are created on first use and kept for the life of the store; a
/// caller with unbounded key cardinality grows memory without bound.
#[derive(Debug)]
pub struct WindowStore<K, C>
where
    K: Hash + Eq,
    C: Clock,
{
    calls: usize,
    period_nanos: u64,
    logs: DashMap<K, VecDeque<u64>>,
    clock: C,
}

impl<K, C> WindowStore<K, C>
where
    K: Hash + Eq,
    C: Clock,
{
    // caller guarantees `config` has been validated
    pub(crate) fn from_validated(config: &GateConfig, clock: C) -> Self {
        Self {
            calls: config.calls,
            period_nanos: config.period_nanos(),
            logs: DashMap::new(),
            clock,
        }
    }

    /// Create an empty store from a config object
    pub fn with_config(config: &GateConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, clock))
    }

    pub(crate) fn into_clock(self) -> C {
        self.clock
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period_nanos)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Admit or deny a call for `key` at `now`, recording it if admitted.
    ///
    /// `now` must come from this store's clock. A reading older than the
    /// newest recorded timestamp (a caller that sampled the clock before
    /// losing a race) is treated as that newest timestamp.
    pub fn record_or_reject(&self, key: K, now: u64) -> Decision {
        let mut log = self.logs.entry(key).or_default();
        self.decide(&mut log, now)
    }

    /// Same as [`record_or_reject`](Self::record_or_reject), sampling the
    /// clock while the key is locked.
    pub fn check(&self, key: K) -> Decision {
        let mut log = self.logs.entry(key).or_default();
        let now = self.clock.now();
        self.decide(&mut log, now)
    }

    /// Number of recorded calls for `key` still inside the window.
    pub fn in_window(&self, key: &K) -> usize {
        let now = self.clock.now();
        self.logs.get(key).map_or(0, |log| {
            log.iter()
                .filter(|&&t| !self.expired(t, now))
                .count()
        })
    }

    /// Number of partitions seen so far.
    pub fn key_count(&self) -> usize {
        self.logs.len()
    }

    fn decide(&self, log: &mut VecDeque<u64>, now: u64) -> Decision {
        let now = log.back().map_or(now, |&newest| now.max(newest));

        while let Some(&oldest) = log.front()
            && self.expired(oldest, now)
        {
            log.pop_front();
        }

        if log.len() < self.calls {
            log.push_back(now);
            return Decision::Allowed;
        }

        let retry_after_nanos = match log.front() {
            Some(&oldest) => oldest.saturating_add(self.period_nanos).saturating_sub(now),
            None => 0,
        };

        Decision::Denied {
            retry_after: Duration::from_nanos(retry_after_nanos),
        }
    }

    // the window is (now - period, now]: a call exactly one period old is out
    fn expired(&self, timestamp: u64, now: u64) -> bool {
        timestamp.saturating_add(self.period_nanos) <= now
    }
}
