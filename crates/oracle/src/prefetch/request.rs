//! Prefetch Request Synthesis.
//!
//! Builds the request objects handed to the cache's prefetch-issue path. A
//! request is a single-owner value: the queue owns it until `dequeue` moves it
//! out, and dropping the queue releases whatever was never delivered.

use std::fmt;

use crate::common::{PhysAddr, Tick};
use crate::config::RequestorId;

/// Memory command carried by a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemCmd {
    /// Hardware (non-demand) prefetch read.
    HardPfReq,
}

/// Task marker used by downstream accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskId {
    /// Traffic generated by a prefetcher rather than a running program.
    Prefetcher,
}

/// A synthesized hardware prefetch request.
///
/// Deliberately neither `Clone` nor `Copy`: each request has exactly one
/// owner at a time.
pub struct PrefetchRequest {
    addr: PhysAddr,
    size: usize,
    requestor: RequestorId,
    context_id: u32,
    task: TaskId,
    cmd: MemCmd,
    issue_tick: Tick,
    data: Box<[u8]>,
}

impl PrefetchRequest {
    /// Block-aligned target address.
    #[inline]
    pub const fn addr(&self) -> PhysAddr {
        self.addr
    }

    /// Request size in bytes (one block).
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Identity of the cache that issued the prefetch.
    #[inline]
    pub const fn requestor(&self) -> RequestorId {
        self.requestor
    }

    /// Hardware context the request is attributed to (always 0).
    #[inline]
    pub const fn context_id(&self) -> u32 {
        self.context_id
    }

    /// Accounting task marker.
    #[inline]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Memory command.
    #[inline]
    pub const fn cmd(&self) -> MemCmd {
        self.cmd
    }

    /// Returns `true`; every synthesized request is a hardware prefetch.
    #[inline]
    pub fn is_hw_prefetch(&self) -> bool {
        self.cmd == MemCmd::HardPfReq
    }

    /// Tick at which the engine decided to prefetch.
    #[inline]
    pub const fn issue_tick(&self) -> Tick {
        self.issue_tick
    }

    /// Response payload buffer, sized to one block.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable payload buffer for the responder to fill.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for PrefetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchRequest")
            .field("addr", &self.addr)
            .field("size", &self.size)
            .field("requestor", &self.requestor)
            .field("cmd", &self.cmd)
            .field("issue_tick", &self.issue_tick)
            .finish_non_exhaustive()
    }
}

/// Factory for prefetch requests of one cache.
#[derive(Clone, Copy, Debug)]
pub struct RequestSynthesizer {
    block_size: usize,
    requestor: RequestorId,
}

impl RequestSynthesizer {
    /// Creates a new synthesizer.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Block size in bytes (power of two).
    /// * `requestor` - Identity stamped on every request.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is not a non-zero power of two.
    pub const fn new(block_size: usize, requestor: RequestorId) -> Self {
        assert!(block_size.is_power_of_two(), "block size must be a non-zero power of two");
        Self {
            block_size,
            requestor,
        }
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Builds one fully populated prefetch request.
    ///
    /// # Arguments
    ///
    /// * `addr` - Target address; aligned down to its block.
    /// * `issue_tick` - Current tick; becomes the request's ready tick once queued.
    ///
    /// # Returns
    ///
    /// A hardware prefetch request with a zeroed block-sized payload.
    pub fn synthesize(&self, addr: PhysAddr, issue_tick: Tick) -> PrefetchRequest {
        PrefetchRequest {
            addr: addr.block_align(self.block_size as u64),
            size: self.block_size,
            requestor: self.requestor,
            context_id: 0,
            task: TaskId::Prefetcher,
            cmd: MemCmd::HardPfReq,
            issue_tick,
            data: vec![0; self.block_size].into_boxed_slice(),
        }
    }
}
