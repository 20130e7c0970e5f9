//! Trace-driven ("oracle") prefetch engine.
//!
//! This crate replays the memory accesses recorded during a prior run as a
//! ground-truth oracle for a cache's prefetch-issue path. It provides:
//! 1. **Prediction store:** Parses a recorded access log into an ordered prediction sequence.
//! 2. **Request synthesis:** Builds block-aligned hardware prefetch requests.
//! 3. **Scheduling:** A time-ordered queue of synthesized requests with FIFO tie-breaking.
//! 4. **Matching:** A cursor that tracks live progress through the recorded trace.
//! 5. **Simulation:** A tick source abstraction, a trace replay driver, and statistics.

/// Common types (addresses, errors, tick constants).
pub mod common;
/// Engine configuration (defaults, JSON loading, validation).
pub mod config;
/// Prefetch engine components (trace, request, queue, matcher, oracle).
pub mod prefetch;
/// Host-side simulation support (clock, trace replay).
pub mod sim;
/// Prefetch statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `OracleConfig::default()` or deserialize from JSON.
pub use crate::config::OracleConfig;
/// The host-facing engine; construct with `OraclePrefetcher::from_config`.
pub use crate::prefetch::OraclePrefetcher;
/// Shared simulation clock handle.
pub use crate::sim::SimClock;
