//! Oracle Prefetcher.
//!
//! The host-facing engine. It loads a recorded access log, keeps the request
//! queue filled `distance` trace entries ahead of confirmed live progress,
//! and reports readiness to the cache's prefetch-issue path. The engine never
//! issues anything itself; the consumer polls `next_ready_tick` and
//! `dequeue`.
//!
//! A missing or unreadable trace degrades the engine to a no-op: the error is
//! logged and returned, and the engine keeps answering "nothing pending".

use std::path::Path;

use super::Prefetcher;
use super::matcher::AccessMatcher;
use super::queue::PrefetchQueue;
use super::request::{PrefetchRequest, RequestSynthesizer};
use super::trace::PredictionTrace;
use crate::common::{ConfigError, PhysAddr, PrefetchError, Tick, TraceError};
use crate::config::OracleConfig;
use crate::sim::clock::{Clock, SimClock};
use crate::stats::PrefetchStats;

/// Trace-driven prefetch engine for one cache.
#[derive(Debug)]
pub struct OraclePrefetcher<C: Clock = SimClock> {
    trace: PredictionTrace,
    matcher: AccessMatcher,
    synthesizer: RequestSynthesizer,
    queue: PrefetchQueue,
    clock: C,
    synthesized: u64,
    matched: u64,
}

impl<C: Clock> OraclePrefetcher<C> {
    /// Creates an engine with an empty prediction sequence.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration; `prediction_file` is not read here.
    /// * `clock` - Tick source used to stamp synthesized requests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBlockSize` for an unusable block size.
    pub fn new(config: &OracleConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            trace: PredictionTrace::default(),
            matcher: AccessMatcher::new(config.distance, config.block_size),
            synthesizer: RequestSynthesizer::new(config.block_size, config.requestor_id),
            queue: PrefetchQueue::new(),
            clock,
            synthesized: 0,
            matched: 0,
        })
    }

    /// Creates an engine and initializes it from `config.prediction_file`.
    ///
    /// # Errors
    ///
    /// Returns `PrefetchError::Config` for an invalid configuration and
    /// `PrefetchError::Trace` when the prediction file cannot be read. Hosts
    /// that tolerate a missing trace should call [`OraclePrefetcher::new`] and
    /// [`OraclePrefetcher::initialize`] separately.
    pub fn from_config(config: &OracleConfig, clock: C) -> Result<Self, PrefetchError> {
        let mut engine = Self::new(config, clock)?;
        let _seeded = engine.initialize(&config.prediction_file)?;
        Ok(engine)
    }

    /// Loads the prediction trace and seeds the queue.
    ///
    /// Up to `distance` requests are queued, each stamped with the current
    /// tick. Re-initializing restarts matching and drops any queued requests.
    ///
    /// # Arguments
    ///
    /// * `path` - Recorded access log.
    ///
    /// # Returns
    ///
    /// The number of requests seeded.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Io` if the file cannot be read. The engine is
    /// left with an empty trace and stays usable as a no-op.
    pub fn initialize(&mut self, path: impl AsRef<Path>) -> Result<usize, TraceError> {
        match PredictionTrace::load(path) {
            Ok(trace) => Ok(self.initialize_with(trace)),
            Err(err) => {
                tracing::error!(%err, "oracle prefetcher disabled");
                let _seeded = self.initialize_with(PredictionTrace::default());
                Err(err)
            }
        }
    }

    /// Installs an already-built trace and seeds the queue.
    ///
    /// Counters restart with the new trace, so `stats()` only ever describes
    /// the trace currently installed.
    ///
    /// # Returns
    ///
    /// The number of requests seeded (`min(distance, trace.len())`).
    pub fn initialize_with(&mut self, trace: PredictionTrace) -> usize {
        let dropped = std::mem::take(&mut self.queue).len();
        if dropped > 0 {
            tracing::debug!(dropped, "re-initialized with requests still queued");
        }
        self.matcher = AccessMatcher::new(self.matcher.distance(), self.synthesizer.block_size());
        self.trace = trace;
        self.synthesized = 0;
        self.matched = 0;

        tracing::debug!(distance = self.matcher.distance(), "prefetch distance");
        let seed = self.matcher.seed(&self.trace);
        let seeded = seed.len();
        self.enqueue(seed);
        tracing::debug!(
            predictions = self.trace.len(),
            seeded,
            "oracle prefetcher initialized"
        );
        seeded
    }

    /// Observes one live access and refills the queue.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the access the cache just handled.
    pub fn notify(&mut self, addr: u64) {
        let before = self.matcher.notify_index();
        let refills = self.matcher.observe(&self.trace, addr);
        if self.matcher.notify_index() > before {
            self.matched += 1;
        }
        self.enqueue(refills);
    }

    /// Earliest tick at which a queued request is ready, or `None` if idle.
    #[inline]
    pub fn next_ready_tick(&self) -> Option<Tick> {
        self.queue.peek_ready_tick()
    }

    /// Hands the next ready request to the caller.
    pub fn dequeue(&mut self) -> Option<PrefetchRequest> {
        self.queue
            .dequeue()
            .map(super::queue::PendingPrefetch::into_request)
    }

    /// Number of queued, undelivered requests.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Prediction sequence in use.
    #[inline]
    pub const fn trace(&self) -> &PredictionTrace {
        &self.trace
    }

    /// Match cursor state.
    #[inline]
    pub const fn matcher(&self) -> &AccessMatcher {
        &self.matcher
    }

    /// Lookahead distance in trace entries.
    #[inline]
    pub const fn distance(&self) -> usize {
        self.matcher.distance()
    }

    /// Tick source.
    #[inline]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Snapshot of the engine counters.
    pub fn stats(&self) -> PrefetchStats {
        PrefetchStats {
            predictions: self.trace.len() as u64,
            synthesized: self.synthesized,
            issued: self.queue.issued(),
            matched: self.matched,
        }
    }

    /// Synthesizes and queues one request per address, all at the current tick.
    fn enqueue(&mut self, addrs: Vec<PhysAddr>) {
        if addrs.is_empty() {
            return;
        }
        let now = self.clock.now();
        for addr in addrs {
            tracing::debug!(addr = %addr, tick = now, "oracle prefetching address");
            self.queue.push(self.synthesizer.synthesize(addr, now));
            self.synthesized += 1;
        }
    }
}

impl<C: Clock + Send> Prefetcher for OraclePrefetcher<C> {
    fn notify(&mut self, addr: u64) {
        Self::notify(self, addr);
    }

    fn next_ready_tick(&self) -> Option<Tick> {
        Self::next_ready_tick(self)
    }

    fn dequeue(&mut self) -> Option<PrefetchRequest> {
        Self::dequeue(self)
    }

    fn pending(&self) -> usize {
        Self::pending(self)
    }
}
