// src/gate.rs

// slide-gate: the public entry point that wraps a call in an admission check.

// dependencies
use crate::clock::{Clock, MonotonicClock};
use crate::config::GateConfig;
use crate::errors::{BoxError, ConfigError, GateError, RateLimitExceeded};
use crate::window_store::{Decision, WindowStore};
use std::hash::Hash;
use std::time::Duration;
use tracing::{debug, trace};

/// Key type of a gate that shares one window between all calls.
pub type GlobalKey = ();

type KeyExtractor<A, K> = Box<dyn Fn(&A) -> Result<K, BoxError> + Send + Sync>;

/// Sliding-window gate around arbitrary operations.
///
/// A is the argument value handed to each gated operation (use a tuple for
/// several arguments). K is the partition key derived from `&A`; without a
/// key extractor every call shares a single window.
/// C is the clock type, defaulting to MonotonicClock.
///
/// ```rust
/// use slide_gate::{Gate, GateConfig};
///
/// let gate = Gate::new(GateConfig::new(5, 60.0))
///     .unwrap()
///     .key_by(|user_id: &u64| *user_id);
///
/// let greeting = gate.call(42, |user_id| format!("hello {user_id}"));
/// assert_eq!(greeting.unwrap(), "hello 42");
/// ```
pub struct Gate<A, K = GlobalKey, C = MonotonicClock>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    config: GateConfig,
    key_extractor: Option<KeyExtractor<A, K>>,
    // `None` is the shared partition used when there is no extractor
    store: WindowStore<Option<K>, C>,
}

impl<A> Gate<A, GlobalKey, MonotonicClock> {
    /// Create a gate with a single shared window on the monotonic clock
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<A, C> Gate<A, GlobalKey, C>
where
    C: Clock,
{
    /// Create a gate with a single shared window reading time from `clock`
    pub fn with_clock(config: GateConfig, clock: C) -> Result<Self, ConfigError> {
        let store = WindowStore::with_config(&config, clock)?;
        Ok(Self {
            config,
            key_extractor: None,
            store,
        })
    }
}

impl<A, K, C> Gate<A, K, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Partition calls by the key `extractor` derives from their arguments.
    ///
    /// Replaces any previous extractor and starts from empty call history,
    /// so attach it before the gate is shared.
    pub fn key_by<K2, F>(self, extractor: F) -> Gate<A, K2, C>
    where
        A: 'static,
        K2: Hash + Eq + Clone + 'static,
        F: Fn(&A) -> K2 + Send + Sync + 'static,
    {
        self.try_key_by(move |args: &A| Ok::<_, BoxError>(extractor(args)))
    }

    /// Like [`key_by`](Self::key_by) for extractors that can fail.
    ///
    /// A failing extractor makes the invocation return
    /// [`GateError::KeyExtraction`] with the extractor's error and the
    /// operation is not run.
    pub fn try_key_by<K2, F, X>(self, extractor: F) -> Gate<A, K2, C>
    where
        A: 'static,
        K2: Hash + Eq + Clone + 'static,
        F: Fn(&A) -> Result<K2, X> + Send + Sync + 'static,
        X: Into<BoxError> + 'static,
    {
        let clock = self.store.into_clock();
        Gate {
            store: WindowStore::from_validated(&self.config, clock),
            config: self.config,
            key_extractor: Some(Box::new(move |args: &A| -> Result<K2, BoxError> {
                extractor(args).map_err(Into::into)
            })),
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn calls(&self) -> usize {
        self.config.calls
    }

    pub fn period(&self) -> Duration {
        self.store.period()
    }

    pub fn auto_retry(&self) -> bool {
        self.config.auto_retry
    }

    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Run `operation(args)` if the call is admitted.
    ///
    /// On denial, either fails with [`GateError::RateLimited`] or, with
    /// auto-retry on, sleeps the suggested wait on the calling thread and
    /// asks again, at most `max_retries` times. Errors from the operation come
    /// back as [`GateError::Operation`] unchanged.
    pub fn invoke<R, E, F>(&self, args: A, operation: F) -> Result<R, GateError<E>>
    where
        F: FnOnce(A) -> Result<R, E>,
    {
        let key = self.partition(&args).map_err(GateError::KeyExtraction)?;
        self.admit(key)?;
        operation(args).map_err(GateError::Operation)
    }

    /// [`invoke`](Self::invoke) for operations that cannot fail.
    pub fn call<R, F>(&self, args: A, operation: F) -> Result<R, GateError>
    where
        F: FnOnce(A) -> R,
    {
        self.invoke(args, |args| Ok(operation(args)))
    }

    fn partition(&self, args: &A) -> Result<Option<K>, BoxError> {
        match &self.key_extractor {
            Some(extractor) => extractor(args).map(Some),
            None => Ok(None),
        }
    }

    // blocks until admitted or out of retries; no lock is held while sleeping
    fn admit(&self, key: Option<K>) -> Result<(), RateLimitExceeded> {
        let mut attempt: u32 = 0;
        loop {
            match self.store.check(key.clone()) {
                Decision::Allowed => {
                    trace!(attempt, "call admitted");
                    return Ok(());
                }
                Decision::Denied { retry_after } => {
                    if !self.config.auto_retry || attempt >= self.config.max_retries {
                        debug!(
                            attempts = attempt + 1,
                            retry_after = ?retry_after,
                            "Rate limit exceeded"
                        );
                        return Err(RateLimitExceeded::new(retry_after));
                    }

                    debug!(
                        attempt,
                        max_retries = self.config.max_retries,
                        retry_after = ?retry_after,
                        "Rate limited, sleeping before retry"
                    );
                    self.store.clock().sleep(retry_after);
                    attempt += 1;
                }
            }
        }
    }
}
