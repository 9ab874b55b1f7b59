//! L2 Prefetcher implementations.
//!
//! This module contains the interface and implementations of the prefetchers
//! that run on L2 demand read misses. A prefetcher only predicts and learns;
//! the access pipeline owns the residency check and the L2 fill.

/// Sequential `+1` prefetcher.
pub mod next_line;

/// Markov table and Markov prefetcher.
pub mod markov;

/// Markov prefetcher with `+1` fallback.
pub mod hybrid;

use std::fmt;

pub use self::hybrid::HybridPrefetcher;
pub use self::markov::{MarkovEntry, MarkovPrefetcher, MarkovRow, MarkovTable};
pub use self::next_line::NextLinePrefetcher;

use crate::common::BlockAddr;
use crate::config::{CacheConfig, PrefetchAlgorithm};

/// Trait for L2 prefetcher implementations.
///
/// Called once per L2 demand read miss, after the missing block has been
/// installed and before L1 is filled.
pub trait Prefetcher: Send + Sync + fmt::Debug {
    /// Observes a missing block and returns the block to prefetch, if any.
    ///
    /// The prediction uses the state from before this call; any learning
    /// happens afterwards, within the same call.
    ///
    /// # Arguments
    ///
    /// * `block` - Block address of the demand miss (L2 block granularity).
    fn observe(&mut self, block: BlockAddr) -> Option<BlockAddr>;

    /// The Markov table backing this prefetcher, for table-driven algorithms.
    fn markov_table(&self) -> Option<&MarkovTable> {
        None
    }
}

/// Builds the prefetcher configured for L2, or `None` when prefetching is off.
pub fn build(config: &CacheConfig) -> Option<Box<dyn Prefetcher>> {
    let rows = usize::try_from(config.markov_rows).unwrap_or(usize::MAX);
    match config.prefetch_algorithm {
        PrefetchAlgorithm::None => None,
        PrefetchAlgorithm::PlusOne => Some(Box::new(NextLinePrefetcher::new())),
        PrefetchAlgorithm::Markov => Some(Box::new(MarkovPrefetcher::new(rows))),
        PrefetchAlgorithm::Hybrid => Some(Box::new(HybridPrefetcher::new(rows))),
    }
}
