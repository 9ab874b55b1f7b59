//! Cache Geometry.
//!
//! Derives the set/way/index/tag bit layout of one cache level from its
//! `(C, B, S)` exponents and decomposes addresses accordingly:
//!
//! ```text
//!  63                      B+index_bits   B            0
//! +--------------------------+------------+------------+
//! |           tag            |   index    |   offset   |
//! +--------------------------+------------+------------+
//! ```

use crate::config::CacheConfig;

/// Immutable bit layout of a cache level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Block-size exponent `B`.
    pub block_bits: u64,
    /// Number of index bits, `C - B - S`.
    pub index_bits: u64,
    /// Associativity exponent `S`.
    pub assoc_bits: u64,
    /// Ways per set, `2^S`.
    pub associativity: usize,
    /// Number of sets, `2^index_bits`.
    pub set_count: usize,
}

impl Geometry {
    /// Derives the layout from `(C, B, S)`.
    ///
    /// The configuration is expected to have passed validation (`C >= B + S`);
    /// the index width saturates at zero otherwise.
    pub const fn new(c: u64, b: u64, s: u64) -> Self {
        let index_bits = c.saturating_sub(b.saturating_add(s));
        Self {
            block_bits: b,
            index_bits,
            assoc_bits: s,
            associativity: 1 << s,
            set_count: 1 << index_bits,
        }
    }

    /// Derives the layout of a configured level.
    pub const fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.c, config.b, config.s)
    }

    /// Block size in bytes.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        1 << self.block_bits
    }

    /// Byte offset of `addr` within its block.
    #[inline]
    pub const fn offset(&self, addr: u64) -> u64 {
        addr & (self.block_size() - 1)
    }

    /// Set index of `addr`.
    #[inline]
    pub const fn index(&self, addr: u64) -> usize {
        ((addr >> self.block_bits) & (self.set_count as u64 - 1)) as usize
    }

    /// Tag of `addr`.
    #[inline]
    pub const fn tag(&self, addr: u64) -> u64 {
        addr >> (self.block_bits + self.index_bits)
    }

    /// Reconstructs the block-aligned address of a line from its tag and set.
    #[inline]
    pub const fn rebuild(&self, tag: u64, index: usize) -> u64 {
        (tag << (self.block_bits + self.index_bits)) | ((index as u64) << self.block_bits)
    }
}
