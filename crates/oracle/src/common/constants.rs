//! Engine-wide constants.
//!
//! This module defines the tick type shared with the host clock and the
//! sentinel used when nothing is pending.

/// Discrete time unit of the host simulation clock.
pub type Tick = u64;

/// "Never" sentinel for hosts that schedule on a raw tick instead of `Option<Tick>`.
///
/// `OraclePrefetcher::next_ready_tick` returns `None` when the queue is empty;
/// `next_ready_tick().unwrap_or(MAX_TICK)` recovers the sentinel form.
pub const MAX_TICK: Tick = Tick::MAX;

/// Request-type prefix that marks write-back traffic in a trace line.
pub const WRITEBACK_PREFIX: &str = "Writeback";

/// Request type that marks clean-eviction traffic in a trace line.
pub const CLEAN_EVICT: &str = "CleanEvict";

/// Status word that marks a recorded access as a miss.
pub const MISS_STATUS: &str = "miss";
