//! Prefetch Scheduling Queue.
//!
//! A min-heap of synthesized, not-yet-issued prefetch requests ordered by
//! ready tick. Entries created at the same tick leave in the order they were
//! pushed: each push takes the next value of a strictly decreasing sequence
//! counter, and the larger (earlier) value wins ties.
//!
//! # Performance
//!
//! - `push()`: O(log N)
//! - `dequeue()`: O(log N)
//! - `peek_ready_tick()`: O(1)

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::request::PrefetchRequest;
use crate::common::Tick;

/// A queued request with its scheduling key.
#[derive(Debug)]
pub struct PendingPrefetch {
    request: PrefetchRequest,
    ready_tick: Tick,
    sequence: i64,
}

impl PendingPrefetch {
    /// Tick from which the request may be issued.
    #[inline]
    pub const fn ready_tick(&self) -> Tick {
        self.ready_tick
    }

    /// Tie-break key; larger values were pushed earlier.
    #[inline]
    pub const fn sequence(&self) -> i64 {
        self.sequence
    }

    /// Borrows the request.
    #[inline]
    pub const fn request(&self) -> &PrefetchRequest {
        &self.request
    }

    /// Takes ownership of the request.
    #[inline]
    pub fn into_request(self) -> PrefetchRequest {
        self.request
    }
}

impl PartialEq for PendingPrefetch {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingPrefetch {}

impl PartialOrd for PendingPrefetch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingPrefetch {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earliest tick first, then earliest push.
        other
            .ready_tick
            .cmp(&self.ready_tick)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Time-ordered queue of pending prefetches.
#[derive(Debug, Default)]
pub struct PrefetchQueue {
    heap: BinaryHeap<PendingPrefetch>,
    /// Next tie-break value; only ever decremented.
    next_sequence: i64,
    issued: u64,
}

impl PrefetchQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a request, ready at its issue tick.
    ///
    /// # Arguments
    ///
    /// * `request` - Synthesized request; its `issue_tick` becomes the ready tick.
    pub fn push(&mut self, request: PrefetchRequest) {
        let sequence = self.next_sequence;
        self.next_sequence -= 1;
        self.heap.push(PendingPrefetch {
            ready_tick: request.issue_tick(),
            request,
            sequence,
        });
    }

    /// Earliest ready tick, or `None` when nothing is pending.
    #[inline]
    pub fn peek_ready_tick(&self) -> Option<Tick> {
        self.heap.peek().map(PendingPrefetch::ready_tick)
    }

    /// Removes the earliest entry and counts it as issued.
    ///
    /// # Returns
    ///
    /// The entry with the smallest ready tick (FIFO among equal ticks), or
    /// `None` when empty.
    pub fn dequeue(&mut self) -> Option<PendingPrefetch> {
        let entry = self.heap.pop()?;
        self.issued += 1;
        Some(entry)
    }

    /// Dequeues the earliest entry only if it is ready by `now`.
    pub fn pop_ready(&mut self, now: Tick) -> Option<PendingPrefetch> {
        match self.peek_ready_tick() {
            Some(tick) if tick <= now => self.dequeue(),
            _ => None,
        }
    }

    /// Number of pending entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total entries handed out by `dequeue`.
    #[inline]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Drops every pending entry without issuing it.
    ///
    /// # Returns
    ///
    /// The number of entries released.
    pub fn clear(&mut self) -> usize {
        let released = self.heap.len();
        self.heap.clear();
        released
    }
}
