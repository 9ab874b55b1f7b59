//! Cache Insertion and Replacement Policies.
//!
//! Every level evicts the valid line with the smallest order key (see
//! [`CacheLevel::pick_victim`](super::CacheLevel::pick_victim)). Policies
//! differ only in the keys they hand out on a hit (`touch`) and on a fill
//! (`insert`).
//!
//! # Policies
//!
//! - `Lru`: One increasing counter for both; used by L1.
//! - `Mip`: MRU insertion in the high key range; L2 option.
//! - `Lip`: LRU insertion in the low key range, MRU promotion on hit; L2 option.

/// Most-recently-inserted policy (L2).
pub mod mip;

/// LRU-insertion policy (L2).
pub mod lip;

/// Plain LRU timestamps (L1).
pub mod lru;

use std::fmt;

pub use lip::LipPolicy;
pub use lru::LruPolicy;
pub use mip::MipPolicy;

use crate::config::InsertionPolicy;

/// Trait for order-key assignment.
///
/// Keys are compared only within one level. A larger key means more recently
/// used; the smallest key in a full set is the victim.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Returns the key for a line that was just hit.
    fn touch(&mut self) -> u64;

    /// Returns the key for a line that was just filled.
    fn insert(&mut self) -> u64;
}

/// Builds the L2 policy selected by `policy`.
pub fn l2_policy(policy: InsertionPolicy) -> Box<dyn ReplacementPolicy> {
    match policy {
        InsertionPolicy::Mip => Box::new(MipPolicy::new()),
        InsertionPolicy::Lip => Box::new(LipPolicy::new()),
    }
}
