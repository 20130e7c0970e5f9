//! Host-side simulation support.
//!
//! Provides the tick source the engine reads and a driver that replays a
//! recorded access log through an engine.

/// Tick source trait and the shared simulation clock.
pub mod clock;

/// Trace replay driver.
pub mod replay;

pub use clock::{Clock, SimClock};
pub use replay::{ReplayReport, TraceReplay};
