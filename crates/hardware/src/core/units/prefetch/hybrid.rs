//! Hybrid Prefetcher.
//!
//! Uses the Markov prediction when the missing block has a row, and falls
//! back to the next sequential block otherwise. The Markov table is trained on
//! every miss either way.

use super::Prefetcher;
use super::markov::MarkovTable;
use crate::common::BlockAddr;

/// Hybrid prefetcher state.
#[derive(Clone, Debug)]
pub struct HybridPrefetcher {
    table: MarkovTable,
}

impl HybridPrefetcher {
    /// Creates a hybrid prefetcher with a `rows`-row Markov table.
    pub fn new(rows: usize) -> Self {
        Self {
            table: MarkovTable::new(rows),
        }
    }
}

impl Prefetcher for HybridPrefetcher {
    fn observe(&mut self, block: BlockAddr) -> Option<BlockAddr> {
        let has_row = self.table.row(block).is_some_and(|row| !row.is_empty());
        let target = if has_row {
            self.table.predict(block).filter(|&t| t != block)
        } else {
            Some(block.next())
        };
        self.table.record(block);
        target
    }

    fn markov_table(&self) -> Option<&MarkovTable> {
        Some(&self.table)
    }
}
