//! Physical address type.
//!
//! This module defines a strong type for the physical addresses carried by
//! predictions and prefetch requests. It provides the following:
//! 1. **Type Safety:** Keeps trace addresses distinct from ticks and indices.
//! 2. **Block Arithmetic:** Alignment to cache-line granularity, as used by both matching and synthesis.

use std::fmt;

/// A physical address as recorded in the trace and carried by prefetch requests.
///
/// Block operations assume a power-of-two block size; `OracleConfig::validate`
/// rejects anything else before an engine is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `PhysAddr` instance wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Truncates the address to the start of its block.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Block size in bytes; must be a non-zero power of two.
    ///
    /// # Returns
    ///
    /// The block address containing `self`.
    #[inline(always)]
    pub const fn block_align(&self, block_size: u64) -> Self {
        Self(self.0 & !(block_size - 1))
    }

    /// Returns the byte offset of the address within its block.
    #[inline(always)]
    pub const fn block_offset(&self, block_size: u64) -> u64 {
        self.0 & (block_size - 1)
    }

    /// Returns `true` when both addresses fall in the same block.
    #[inline]
    pub const fn same_block(&self, other: Self, block_size: u64) -> bool {
        self.block_align(block_size).0 == other.block_align(block_size).0
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
