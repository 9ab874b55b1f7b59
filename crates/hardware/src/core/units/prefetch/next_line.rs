//! Next-Line (`+1`) Prefetcher.
//!
//! A sequential prefetcher that fetches the block immediately after every
//! L2 demand miss. It keeps no state.

use super::Prefetcher;
use crate::common::BlockAddr;

/// Next-Line prefetcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct NextLinePrefetcher;

impl NextLinePrefetcher {
    /// Creates a new `+1` prefetcher.
    pub const fn new() -> Self {
        Self
    }
}

impl Prefetcher for NextLinePrefetcher {
    fn observe(&mut self, block: BlockAddr) -> Option<BlockAddr> {
        Some(block.next())
    }
}
