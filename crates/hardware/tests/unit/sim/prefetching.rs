//! Prefetch Install Tests.
//!
//! Verifies how prefetch targets are installed into L2 and how prefetch
//! hits and misses are accounted, using the tiny harness hierarchy with
//! each prefetch algorithm.

use cachesim_core::common::BlockAddr;
use cachesim_core::config::PrefetchAlgorithm;
use pretty_assertions::assert_eq;

use crate::common::harness::{blk, r, replay, tiny_config, w, with_prefetch};

// ══════════════════════════════════════════════════════════
// 1. +1
// ══════════════════════════════════════════════════════════

#[test]
fn l2_miss_installs_next_block_as_prefetched() {
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &[r(blk(5))]);
    assert_eq!(stats.prefetches_issued_l2, 1);
    let l2 = sim.l2().unwrap();
    let (set, way) = l2.find(blk(6)).unwrap();
    assert!(l2.line(set, way).prefetched);
    assert!(!sim.l1().contains(blk(6)), "prefetches only fill L2");
}

#[test]
fn demand_hit_on_prefetched_line_counts_once() {
    let trace = [r(blk(5)), r(blk(6)), r(blk(6) + 8)];
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &trace);
    assert_eq!(stats.read_hits_l2, 1);
    assert_eq!(stats.prefetch_hits_l2, 1);
    assert_eq!(stats.hits_l1, 1);
    let l2 = sim.l2().unwrap();
    let (set, way) = l2.find(blk(6)).unwrap();
    assert!(!l2.line(set, way).prefetched, "flag cleared by the demand hit");
}

#[test]
fn no_prefetch_on_l2_hit() {
    // Block 0 is evicted from L1 but still in L2.
    let trace = [r(blk(0)), r(blk(2)), r(blk(4)), r(blk(0))];
    let (_, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &trace);
    assert_eq!(stats.read_hits_l2, 1);
    assert_eq!(stats.prefetches_issued_l2, 3);
}

/// A target already held by L1 or L2 is neither installed nor counted.
#[test]
fn resident_target_is_not_counted() {
    let trace = [r(blk(1)), r(blk(0))];
    let (_, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &trace);
    // blk(1) prefetches blk(2); blk(0) would prefetch blk(1), which is resident.
    assert_eq!(stats.read_misses_l2, 2);
    assert_eq!(stats.prefetches_issued_l2, 1);
}

/// The L1 victim of the current miss is still resident when the prefetch
/// target is checked, so a target equal to the victim is skipped.
#[test]
fn target_equal_to_l1_victim_is_skipped() {
    // L1: one 2-way set. L2: 2 sets, 2-way, set = block & 1.
    let mut config = with_prefetch(PrefetchAlgorithm::PlusOne, 0);
    config.l1.c = 7;
    config.l1.s = 1;
    config.l2.c = 8;
    config.l2.s = 1;
    // r7 hits L1 only, so L2 evicts blk(7) on r3 while L1 keeps it.
    // r6 then evicts blk(7) from L1 and would prefetch blk(7).
    let trace = [r(blk(7)), r(blk(1)), r(blk(7)), r(blk(3)), r(blk(6))];
    let (sim, stats) = replay(&config, &trace);
    assert_eq!(stats.read_misses_l2, 4);
    assert_eq!(stats.prefetches_issued_l2, 3);
    assert!(!sim.l1().contains(blk(7)));
    assert!(!sim.l2().unwrap().contains(blk(7)));
}

#[test]
fn target_resident_only_in_l2_is_not_counted() {
    // blk(8) pushes blk(4) out of L1; it stays in L2 as a demand-filled line.
    let trace = [r(blk(4)), r(blk(6)), r(blk(8)), r(blk(3))];
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &trace);
    assert!(!sim.l1().contains(blk(4)));
    assert_eq!(stats.prefetches_issued_l2, 3, "blk(3) -> blk(4) is skipped");
    let l2 = sim.l2().unwrap();
    let (set, way) = l2.find(blk(4)).unwrap();
    assert!(!l2.line(set, way).prefetched);
}

/// A prefetched line evicted before any demand access is a prefetch miss.
#[test]
fn evicted_unused_prefetch_is_a_miss() {
    // blk(3) prefetches blk(4) into L2 set 0; four more set-0 blocks push it out.
    let trace = [r(blk(3)), r(blk(8)), r(blk(12)), r(blk(16)), r(blk(20))];
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::PlusOne, 0), &trace);
    assert_eq!(stats.prefetches_issued_l2, 5);
    assert_eq!(stats.prefetch_misses_l2, 1);
    assert_eq!(stats.prefetch_hits_l2, 0);
    assert!(!sim.l2().unwrap().contains(blk(4)));
}

#[test]
fn disabled_l2_never_prefetches() {
    let mut config = with_prefetch(PrefetchAlgorithm::PlusOne, 0);
    config.l2.disabled = true;
    let (sim, stats) = replay(&config, &[r(blk(0)), w(blk(9))]);
    assert_eq!(stats.prefetches_issued_l2, 0);
    assert!(sim.markov_table().is_none());
}

#[test]
fn no_prefetcher_issues_nothing() {
    let trace = [r(blk(0)), r(blk(1)), r(blk(2))];
    let (_, stats) = replay(&tiny_config(), &trace);
    assert_eq!(stats.prefetches_issued_l2, 0);
    assert_eq!(stats.prefetch_hits_l2, 0);
    assert_eq!(stats.prefetch_misses_l2, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Markov and Hybrid
// ══════════════════════════════════════════════════════════

/// The table is keyed by L2 block addresses of demand misses.
#[test]
fn markov_learns_from_l2_misses() {
    let (sim, stats) = replay(
        &with_prefetch(PrefetchAlgorithm::Markov, 8),
        &[r(blk(0) + 4), r(blk(8) + 12)],
    );
    assert_eq!(stats.prefetches_issued_l2, 0, "nothing learned yet");
    let table = sim.markov_table().unwrap();
    assert_eq!(table.predict(BlockAddr(0)), Some(BlockAddr(8)));
    assert_eq!(table.previous(), Some(BlockAddr(8)));
}

#[test]
fn markov_ignores_l2_hits() {
    let trace = [r(blk(0)), r(blk(2)), r(blk(4)), r(blk(0))];
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::Markov, 8), &trace);
    assert_eq!(stats.read_hits_l2, 1);
    let table = sim.markov_table().unwrap();
    assert_eq!(table.previous(), Some(BlockAddr(4)));
    assert!(table.row(BlockAddr(4)).is_none());
}

#[test]
fn markov_prefetches_learned_successor() {
    // Learn 0 -> 9, push both blocks out of L1 and L2, then miss on 0 again.
    let trace = [0, 9, 13, 17, 21, 25, 4, 8, 12, 16, 0].map(|n| r(blk(n)));
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::Markov, 16), &trace);
    assert_eq!(stats.prefetches_issued_l2, 1);
    let l2 = sim.l2().unwrap();
    let (set, way) = l2.find(blk(9)).unwrap();
    assert!(l2.line(set, way).prefetched);
    assert!(!sim.l1().contains(blk(9)));
}

#[test]
fn hybrid_prefetches_next_block_without_row() {
    let (sim, stats) = replay(&with_prefetch(PrefetchAlgorithm::Hybrid, 4), &[r(blk(5))]);
    assert_eq!(stats.prefetches_issued_l2, 1);
    assert!(sim.l2().unwrap().contains(blk(6)));
    assert!(sim.markov_table().is_some_and(|t| t.is_empty()));
}
