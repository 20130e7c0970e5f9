//! Oracle prefetch engine components.
//!
//! This module contains the interface a cache uses to drive a queued
//! prefetcher, and the trace-driven implementation of it.

/// Access matcher (live progress through the recorded trace).
pub mod matcher;

/// Oracle prefetcher (host-facing engine).
pub mod oracle;

/// Time-ordered queue of pending prefetch requests.
pub mod queue;

/// Prefetch request objects and their factory.
pub mod request;

/// Prediction trace parsing and storage.
pub mod trace;

pub use self::matcher::AccessMatcher;
pub use self::oracle::OraclePrefetcher;
pub use self::queue::{PendingPrefetch, PrefetchQueue};
pub use self::request::{MemCmd, PrefetchRequest, RequestSynthesizer, TaskId};
pub use self::trace::{PredictionEntry, PredictionTrace, TraceLine, TraceSummary};

use crate::common::Tick;

/// Trait for queued cache prefetchers.
///
/// The cache notifies the prefetcher after every access it handles, and polls
/// it for requests at times of its own choosing. Ownership of a request moves
/// to the cache on `dequeue`.
pub trait Prefetcher: Send {
    /// Observes an access the cache has just handled.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was accessed
    fn notify(&mut self, addr: u64);

    /// Earliest tick at which a request can be issued, or `None` if idle.
    fn next_ready_tick(&self) -> Option<Tick>;

    /// Removes the next ready request, if any.
    fn dequeue(&mut self) -> Option<PrefetchRequest>;

    /// Number of requests queued but not yet dequeued.
    fn pending(&self) -> usize;
}
