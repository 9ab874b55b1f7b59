//! LRU-Insertion Policy (LIP).
//!
//! Fills are placed at the LRU end, hits promote to MRU. Two disjoint key
//! ranges implement this without a per-set recency list:
//!
//! ```text
//!   0 ......... BASE-3  BASE-2  BASE-1 | BASE+1  BASE+2 ...
//!   <-- later fills ------- first fill | first hit -- later hits -->
//! ```
//!
//! A line that was filled and never hit again always sorts below every line
//! that was hit, and the newest fill sorts lowest of all, so it is evicted
//! first. The fill counter saturates at zero instead of wrapping into the
//! promoted range.

use super::ReplacementPolicy;
use crate::common::constants::L2_ORDER_BASE;

/// LIP state.
#[derive(Debug, Default)]
pub struct LipPolicy {
    mru_counter: u64,
    lip_counter: u64,
}

impl LipPolicy {
    /// Creates a new LIP policy.
    pub const fn new() -> Self {
        Self {
            mru_counter: 0,
            lip_counter: 0,
        }
    }
}

impl ReplacementPolicy for LipPolicy {
    fn touch(&mut self) -> u64 {
        self.mru_counter += 1;
        L2_ORDER_BASE + self.mru_counter
    }

    fn insert(&mut self) -> u64 {
        let key = (L2_ORDER_BASE - 1).saturating_sub(self.lip_counter);
        self.lip_counter = self.lip_counter.saturating_add(1);
        key
    }
}
