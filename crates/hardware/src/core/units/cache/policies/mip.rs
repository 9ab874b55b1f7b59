//! Most-Recently-Inserted Policy (MIP).
//!
//! Both hits and fills are placed at MRU. Keys live above
//! [`L2_ORDER_BASE`] so they share a scale with [`LipPolicy`](super::LipPolicy)
//! promotions.

use super::ReplacementPolicy;
use crate::common::constants::L2_ORDER_BASE;

/// MIP state.
#[derive(Debug, Default)]
pub struct MipPolicy {
    mru_counter: u64,
}

impl MipPolicy {
    /// Creates a new MIP policy.
    pub const fn new() -> Self {
        Self { mru_counter: 0 }
    }
}

impl ReplacementPolicy for MipPolicy {
    fn touch(&mut self) -> u64 {
        self.mru_counter += 1;
        L2_ORDER_BASE + self.mru_counter
    }

    fn insert(&mut self) -> u64 {
        self.touch()
    }
}
