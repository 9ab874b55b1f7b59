//! Byte and Block Address types.
//!
//! Trace events carry byte addresses, while the prefetchers and the Markov
//! table reason about block addresses at L2 block granularity. This module
//! keeps the two apart:
//! 1. **Type Safety:** A `BlockAddr` cannot be passed where a byte address is expected.
//! 2. **Conversion:** Explicit shifts between the two using the L2 block exponent.

use std::fmt;

/// A block address: a byte address shifted right by the L2 block exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockAddr(pub u64);

impl BlockAddr {
    /// Returns the block containing byte address `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - The byte address.
    /// * `block_bits` - Block-size exponent `B` of the keying level.
    #[inline(always)]
    pub const fn from_addr(addr: u64, block_bits: u64) -> Self {
        Self(addr >> block_bits)
    }

    /// Returns the first byte address of this block.
    ///
    /// Bits shifted past the top of the word are discarded.
    #[inline(always)]
    pub const fn to_addr(self, block_bits: u64) -> u64 {
        self.0 << block_bits
    }

    /// Returns the sequentially next block.
    #[inline(always)]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw block number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
