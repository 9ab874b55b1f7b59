//! Least Recently Used (LRU) Timestamps.
//!
//! Every hit and every fill takes the next value of a single counter, so the
//! line with the smallest key is the one that has not been touched for the
//! longest time.
//!
//! # Performance
//!
//! - **Time Complexity:** `touch()`/`insert()` O(1); victim scan O(W)
//! - **Space Complexity:** one `u64` per line plus one counter per level

use super::ReplacementPolicy;

/// LRU timestamp state.
#[derive(Debug, Default)]
pub struct LruPolicy {
    timestamp: u64,
}

impl LruPolicy {
    /// Creates a new LRU policy with the counter at zero.
    pub const fn new() -> Self {
        Self { timestamp: 0 }
    }

    fn next(&mut self) -> u64 {
        self.timestamp += 1;
        self.timestamp
    }
}

impl ReplacementPolicy for LruPolicy {
    fn touch(&mut self) -> u64 {
        self.next()
    }

    /// Inserts at MRU, same as a hit.
    fn insert(&mut self) -> u64 {
        self.next()
    }
}
