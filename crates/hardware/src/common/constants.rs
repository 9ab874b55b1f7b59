//! Global Simulator Constants.
//!
//! This module defines the fixed constants of the cache model. It includes:
//! 1. **Geometry Limits:** Legal range of the block-size and size exponents.
//! 2. **Recency Ranges:** Base of the L2 order-key ranges used by MIP/LIP.
//! 3. **Markov Limits:** Fixed number of successor entries per Markov row.
//! 4. **Timing Constants:** DRAM and hit-time parameters for the AAT model.

/// Smallest legal block-size exponent (32-byte blocks).
pub const MIN_BLOCK_BITS: u64 = 5;

/// Largest legal block-size exponent (128-byte blocks).
pub const MAX_BLOCK_BITS: u64 = 7;

/// Largest legal size exponent. Tags and rebuilt block addresses are shifted
/// by `C - S` bits and must stay inside a 64-bit address.
pub const MAX_SIZE_BITS: u64 = 63;

/// Base of the L2 order-key ranges.
///
/// Touched and MIP-inserted lines get keys above this value, LIP-inserted
/// lines get keys below it, so the two ranges never overlap.
pub const L2_ORDER_BASE: u64 = 1 << 32;

/// Maximum number of successor entries per Markov row.
pub const MARKOV_ROW_ENTRIES: usize = 4;

/// Fixed DRAM access time.
pub const DRAM_AT: f64 = 64.0;

/// DRAM transfer time per word of a block.
pub const DRAM_AT_PER_WORD: f64 = 2.0;

/// Word size in bytes.
pub const WORD_SIZE: f64 = 8.0;

/// L1 hit time: constant term.
pub const L1_HIT_TIME_CONST: f64 = 2.0;

/// L1 hit time: increment per associativity exponent `S`.
pub const L1_HIT_TIME_PER_S: f64 = 0.2;

/// L2 hit time: constant term.
pub const L2_HIT_TIME_CONST: f64 = 8.0;

/// L2 hit time: increment per associativity exponent `S`.
pub const L2_HIT_TIME_PER_S: f64 = 0.8;
