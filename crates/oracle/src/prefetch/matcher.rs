//! Access Matcher.
//!
//! Tracks how far the live access stream has progressed through the recorded
//! trace and decides which predictions to synthesize next.
//!
//! The cursor is the pair `(notify_index, hit_count)`; `notify_index +
//! hit_count` is the next unconfirmed prediction. On every observed access the
//! matcher first slides the fill window (position `notify_index + distance +
//! hit_count`) forward, then checks whether the access confirms the
//! unconfirmed prediction.
//!
//! The refill loop stops on the first *unconfirmed* entry that is a recorded
//! miss, not on the entry it just emitted. A run of recorded hits therefore
//! lets the window slide arbitrarily far in one notification.
//!
//! Once the cursor reaches the end of the trace the matcher clamps: nothing
//! is read past the end, refills stop and the match check is skipped. The
//! notification that moves the cursor onto the end marks the matcher
//! exhausted.

use super::trace::PredictionTrace;
use crate::common::PhysAddr;

/// Match cursor over a prediction trace.
#[derive(Clone, Debug)]
pub struct AccessMatcher {
    distance: usize,
    block_size: u64,
    notify_index: usize,
    hit_count: usize,
    exhausted: bool,
}

impl AccessMatcher {
    /// Creates a matcher at the start of the trace.
    ///
    /// # Arguments
    ///
    /// * `distance` - Lookahead window in trace entries.
    /// * `block_size` - Block size in bytes (power of two) used for matching.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is not a non-zero power of two.
    pub const fn new(distance: usize, block_size: usize) -> Self {
        assert!(block_size.is_power_of_two(), "block size must be a non-zero power of two");
        Self {
            distance,
            block_size: block_size as u64,
            notify_index: 0,
            hit_count: 0,
            exhausted: false,
        }
    }

    /// Index of the next unconfirmed entry, excluding the hit run.
    #[inline]
    pub const fn notify_index(&self) -> usize {
        self.notify_index
    }

    /// Length of the hit run the window has already extended across.
    #[inline]
    pub const fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Next unconfirmed prediction (`notify_index + hit_count`).
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.notify_index.saturating_add(self.hit_count)
    }

    /// Trace position of the next entry the refill loop would emit.
    #[inline]
    pub const fn window(&self) -> usize {
        self.cursor().saturating_add(self.distance)
    }

    /// Lookahead window in trace entries.
    #[inline]
    pub const fn distance(&self) -> usize {
        self.distance
    }

    /// Returns `true` once a notification has left the cursor at the end of the trace.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Addresses to queue at initialization: the first `min(distance, len)` entries.
    pub fn seed(&self, trace: &PredictionTrace) -> Vec<PhysAddr> {
        trace
            .iter()
            .take(self.distance)
            .map(|entry| entry.addr)
            .collect()
    }

    /// Observes one live access.
    ///
    /// # Arguments
    ///
    /// * `trace` - The prediction sequence this matcher walks.
    /// * `addr` - Address of the observed access.
    ///
    /// # Returns
    ///
    /// Addresses to synthesize, in push order. Empty once the window has
    /// passed the end of the trace.
    pub fn observe(&mut self, trace: &PredictionTrace, addr: u64) -> Vec<PhysAddr> {
        let refills = self.refill(trace);
        self.confirm(trace, PhysAddr::new(addr));
        refills
    }

    /// Slides the fill window forward across recorded hits.
    fn refill(&mut self, trace: &PredictionTrace) -> Vec<PhysAddr> {
        let mut refills = Vec::new();

        while let Some(target) = trace.get(self.window()) {
            refills.push(target.addr);

            // `cursor() <= window()`, so the unconfirmed entry exists.
            let unconfirmed_miss = trace.get(self.cursor()).is_none_or(|entry| entry.is_miss);
            if unconfirmed_miss {
                break;
            }
            self.hit_count += 1;
        }

        refills
    }

    /// Advances `notify_index` if `addr` hits the next unconfirmed prediction.
    fn confirm(&mut self, trace: &PredictionTrace, addr: PhysAddr) {
        let cursor = self.cursor();
        tracing::trace!(cursor, addr = %addr, "oracle notify");

        if let Some(expected) = trace.get(cursor) {
            if addr.same_block(expected.addr, self.block_size) {
                self.notify_index += 1;
            }
        }

        if !self.exhausted && self.cursor() >= trace.len() {
            self.exhausted = true;
            tracing::debug!(
                cursor = self.cursor(),
                predictions = trace.len(),
                "match cursor reached end of prediction trace"
            );
        }
    }
}
