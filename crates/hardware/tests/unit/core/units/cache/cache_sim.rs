//! Block Store Unit Tests.
//!
//! Verifies lookup, victim selection, and fills of a single `CacheLevel`,
//! constructed directly from a geometry and a policy. No simulator needed.

use cachesim_core::common::constants::L2_ORDER_BASE;
use cachesim_core::config::{CacheConfig, InsertionPolicy};
use cachesim_core::core::units::cache::policies::{
    LipPolicy, LruPolicy, MipPolicy, ReplacementPolicy,
};
use cachesim_core::core::{CacheLevel, CacheLine, Geometry};

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

/// One set, two ways, 64-byte blocks. Tag = addr >> 6.
fn two_way(policy: Box<dyn ReplacementPolicy>) -> CacheLevel {
    CacheLevel::new(Geometry::new(7, 6, 1), policy)
}

/// Demand-access `addr` the way L1 does: touch on hit, fill the victim on miss.
/// Returns `true` on a hit.
fn access(cache: &mut CacheLevel, addr: u64) -> bool {
    if let Some((set, way)) = cache.find(addr) {
        cache.touch(set, way);
        return true;
    }
    let set = cache.geometry().index(addr);
    let way = cache.pick_victim(set);
    let tag = cache.geometry().tag(addr);
    let _ = cache.fill(set, way, tag, false, false);
    false
}

/// Policy that hands out the same key for everything.
#[derive(Debug)]
struct ConstantPolicy;

impl ReplacementPolicy for ConstantPolicy {
    fn touch(&mut self) -> u64 {
        7
    }

    fn insert(&mut self) -> u64 {
        7
    }
}

const A: u64 = 0x000;
const B: u64 = 0x040;
const C: u64 = 0x080;

// ══════════════════════════════════════════════════════════
// 1. Construction and lookup
// ══════════════════════════════════════════════════════════

#[test]
fn new_level_is_cold() {
    let cache = CacheLevel::l1(&CacheConfig::default_l1());
    assert_eq!(cache.sets().count(), 8);
    assert!(cache.sets().flatten().all(|line| !line.valid));
    assert!(!cache.contains(0x1000));
}

#[test]
fn fill_then_find() {
    let mut cache = two_way(Box::new(LruPolicy::new()));
    assert!(!access(&mut cache, A));
    assert!(cache.contains(A));
    assert!(cache.contains(A + 0x3F), "same block, different offset");
    assert!(!cache.contains(B));
    assert_eq!(cache.find(A), Some((0, 0)));
}

#[test]
fn fill_returns_previous_line() {
    let mut cache = two_way(Box::new(LruPolicy::new()));
    let old = cache.fill(0, 0, 5, true, false);
    assert_eq!(old, CacheLine::default());
    let old = cache.fill(0, 0, 9, false, true);
    assert!(old.valid && old.dirty && !old.prefetched);
    assert_eq!(old.tag, 5);
    let line = cache.line(0, 0);
    assert_eq!(line.tag, 9);
    assert!(line.prefetched && !line.dirty);
}

#[test]
fn mark_dirty_and_take_prefetched() {
    let mut cache = two_way(Box::new(LruPolicy::new()));
    let _ = cache.fill(0, 1, 3, false, true);
    cache.mark_dirty(0, 1);
    assert!(cache.line(0, 1).dirty);
    assert!(cache.take_prefetched(0, 1));
    assert!(!cache.take_prefetched(0, 1), "flag is cleared on first take");
}

// ══════════════════════════════════════════════════════════
// 2. Victim selection
// ══════════════════════════════════════════════════════════

/// Invalid ways are used first, lowest index first.
#[test]
fn victim_prefers_first_invalid_way() {
    let mut cache = CacheLevel::new(Geometry::new(8, 6, 2), Box::new(LruPolicy::new()));
    assert_eq!(cache.pick_victim(0), 0);
    let _ = cache.fill(0, 0, 1, false, false);
    let _ = cache.fill(0, 2, 2, false, false);
    assert_eq!(cache.pick_victim(0), 1);
}

/// Equal keys in a full set: the lowest way wins.
#[test]
fn victim_ties_go_to_lowest_way() {
    let mut cache = CacheLevel::new(Geometry::new(8, 6, 2), Box::new(ConstantPolicy));
    for way in 0..4 {
        let _ = cache.fill(0, way, way as u64, false, false);
    }
    assert_eq!(cache.pick_victim(0), 0);
}

/// 2-way LRU: A, B, A, C evicts B.
#[test]
fn lru_evicts_least_recently_used() {
    let mut cache = two_way(Box::new(LruPolicy::new()));
    assert!(!access(&mut cache, A));
    assert!(!access(&mut cache, B));
    assert!(access(&mut cache, A));
    assert!(!access(&mut cache, C));

    assert!(cache.contains(A));
    assert!(!cache.contains(B));
    assert!(cache.contains(C));
}

/// 2-way MIP: X, Y, then Z evicts the older insertion X.
#[test]
fn mip_evicts_oldest_insertion() {
    let mut cache = two_way(Box::new(MipPolicy::new()));
    let _ = access(&mut cache, A);
    let _ = access(&mut cache, B);
    let _ = access(&mut cache, C);
    assert!(!cache.contains(A));
    assert!(cache.contains(B));
}

/// 2-way LIP: X, Y, then Z evicts Y, the newest never-touched insertion.
#[test]
fn lip_evicts_newest_insertion() {
    let mut cache = two_way(Box::new(LipPolicy::new()));
    let _ = access(&mut cache, A);
    let _ = access(&mut cache, B);
    assert!(cache.line(0, 1).order_key < cache.line(0, 0).order_key);
    let _ = access(&mut cache, C);
    assert!(cache.contains(A));
    assert!(!cache.contains(B));
    assert!(cache.contains(C));
}

/// Under LIP a hit protects a line from every later insertion.
#[test]
fn lip_hit_promotes_to_mru() {
    let mut cache = two_way(Box::new(LipPolicy::new()));
    let _ = access(&mut cache, A);
    let _ = access(&mut cache, B);
    assert!(access(&mut cache, B));
    assert!(cache.line(0, 1).order_key > L2_ORDER_BASE);
    let _ = access(&mut cache, C);
    assert!(!cache.contains(A));
    assert!(cache.contains(B));
}

#[test]
fn l2_constructor_uses_configured_policy() {
    let mut config = CacheConfig::default_l2();
    config.insertion_policy = InsertionPolicy::Lip;
    let mut cache = CacheLevel::l2(&config);
    let _ = cache.fill(0, 0, 1, false, false);
    assert!(cache.line(0, 0).order_key < L2_ORDER_BASE);

    config.insertion_policy = InsertionPolicy::Mip;
    let mut cache = CacheLevel::l2(&config);
    let _ = cache.fill(0, 0, 1, false, false);
    assert!(cache.line(0, 0).order_key > L2_ORDER_BASE);
}
