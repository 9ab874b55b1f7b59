//! Derived metrics: ratios and average access time (AAT).
//!
//! The timing model charges every reference to a level that level's hit time,
//! and adds the next level's AAT weighted by the miss ratio:
//!
//! ```text
//! HT(level)  = HIT_TIME_CONST(level) + HIT_TIME_PER_S(level) * S
//! DRAM       = DRAM_AT + (block_size / WORD_SIZE) * DRAM_AT_PER_WORD
//! AAT(L2)    = HT(L2) + read_miss_ratio_L2 * DRAM        (DRAM if L2 is disabled)
//! AAT(L1)    = HT(L1) + miss_ratio_L1 * AAT(L2)
//! ```

use crate::common::Level;
use crate::common::constants::{
    DRAM_AT, DRAM_AT_PER_WORD, L1_HIT_TIME_CONST, L1_HIT_TIME_PER_S, L2_HIT_TIME_CONST,
    L2_HIT_TIME_PER_S, WORD_SIZE,
};
use crate::core::Geometry;
use crate::stats::SimStats;

/// Hit time of `level` with associativity exponent `assoc_bits`.
pub fn hit_time(level: Level, assoc_bits: u64) -> f64 {
    let (base, per_s) = match level {
        Level::L1 => (L1_HIT_TIME_CONST, L1_HIT_TIME_PER_S),
        Level::L2 => (L2_HIT_TIME_CONST, L2_HIT_TIME_PER_S),
    };
    base + per_s * assoc_bits as f64
}

/// DRAM access time for one block of `2^block_bits` bytes.
pub fn dram_time(block_bits: u64) -> f64 {
    let block_size = (1u64 << block_bits) as f64;
    DRAM_AT + (block_size / WORD_SIZE) * DRAM_AT_PER_WORD
}

/// Derives ratios and AATs in place.
///
/// # Arguments
///
/// * `stats` - Counters of a finished replay.
/// * `l1` - L1 geometry; its block size also sizes the DRAM transfer.
/// * `l2` - L2 geometry, or `None` when L2 is disabled.
pub fn finalize(stats: &mut SimStats, l1: &Geometry, l2: Option<&Geometry>) {
    if stats.accesses_l1 > 0 {
        let accesses = stats.accesses_l1 as f64;
        stats.hit_ratio_l1 = stats.hits_l1 as f64 / accesses;
        stats.miss_ratio_l1 = stats.misses_l1 as f64 / accesses;
    }

    let dram = dram_time(l1.block_bits);

    match l2 {
        None => {
            stats.avg_access_time_l2 = dram;
            if stats.reads_l2 > 0 {
                stats.read_hit_ratio_l2 = 0.0;
                stats.read_miss_ratio_l2 = 1.0;
            }
        }
        Some(l2) => {
            if stats.reads_l2 > 0 {
                let reads = stats.reads_l2 as f64;
                stats.read_hit_ratio_l2 = stats.read_hits_l2 as f64 / reads;
                stats.read_miss_ratio_l2 = stats.read_misses_l2 as f64 / reads;
            }
            // Every L2 reference pays HT(L2); misses add DRAM on top.
            stats.avg_access_time_l2 =
                hit_time(Level::L2, l2.assoc_bits) + stats.read_miss_ratio_l2 * dram;
        }
    }

    stats.avg_access_time_l1 =
        hit_time(Level::L1, l1.assoc_bits) + stats.miss_ratio_l1 * stats.avg_access_time_l2;
}
