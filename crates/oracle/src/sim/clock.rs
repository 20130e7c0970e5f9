//! Simulation tick source.
//!
//! The engine never advances time; it only reads the host's current tick
//! when it stamps a synthesized request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::Tick;

/// Source of the host simulation's current tick.
pub trait Clock {
    /// Returns the current tick.
    fn now(&self) -> Tick;
}

/// Shared, host-driven simulation clock.
///
/// Clones share one tick value, so the host keeps a handle and advances it
/// while the engine holds another and reads it.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    tick: Arc<AtomicU64>,
}

impl SimClock {
    /// Creates a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at `tick`.
    pub fn at(tick: Tick) -> Self {
        Self {
            tick: Arc::new(AtomicU64::new(tick)),
        }
    }

    /// Moves the clock to `tick`.
    pub fn set(&self, tick: Tick) {
        self.tick.store(tick, Ordering::Relaxed);
    }

    /// Advances the clock by `delta` ticks and returns the new tick.
    pub fn advance(&self, delta: Tick) -> Tick {
        self.tick.fetch_add(delta, Ordering::Relaxed).saturating_add(delta)
    }
}

impl Clock for SimClock {
    #[inline]
    fn now(&self) -> Tick {
        self.tick.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Tick {
        (**self).now()
    }
}
