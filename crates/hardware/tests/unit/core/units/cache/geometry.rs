//! Cache Geometry Tests.
//!
//! Verifies the `(C, B, S)` to sets/ways derivation and the
//! offset/index/tag decomposition of addresses.

use cachesim_core::config::CacheConfig;
use cachesim_core::core::Geometry;
use rstest::rstest;

#[rstest]
#[case(10, 6, 1, 8, 2)]
#[case(15, 6, 3, 64, 8)]
#[case(8, 6, 2, 1, 4)]
#[case(12, 5, 0, 128, 1)]
fn derives_sets_and_ways(
    #[case] c: u64,
    #[case] b: u64,
    #[case] s: u64,
    #[case] sets: usize,
    #[case] ways: usize,
) {
    let g = Geometry::new(c, b, s);
    assert_eq!(g.set_count, sets);
    assert_eq!(g.associativity, ways);
    assert_eq!(g.set_count * g.associativity * g.block_size() as usize, 1 << c);
}

#[test]
fn default_l1_layout() {
    let g = Geometry::from_config(&CacheConfig::default_l1());
    assert_eq!(g.block_bits, 6);
    assert_eq!(g.index_bits, 3);
    assert_eq!(g.assoc_bits, 1);
    assert_eq!(g.block_size(), 64);
}

#[test]
fn decomposes_address() {
    // 8 sets of 64-byte blocks: offset = bits 0..6, index = bits 6..9.
    let g = Geometry::new(10, 6, 1);
    let addr = 0xABCD_u64;
    assert_eq!(g.offset(addr), addr & 0x3F);
    assert_eq!(g.index(addr), ((addr >> 6) & 0x7) as usize);
    assert_eq!(g.tag(addr), addr >> 9);
}

#[test]
fn rebuild_returns_block_base() {
    let g = Geometry::new(10, 6, 1);
    let addr = 0xDEAD_BEEF_u64;
    let rebuilt = g.rebuild(g.tag(addr), g.index(addr));
    assert_eq!(rebuilt, addr & !0x3F);
    assert_eq!(g.offset(rebuilt), 0);
}

#[test]
fn single_set_has_index_zero() {
    let g = Geometry::new(8, 6, 2);
    assert_eq!(g.index_bits, 0);
    for addr in [0, 0x40, 0x1234, u64::MAX] {
        assert_eq!(g.index(addr), 0);
    }
    assert_eq!(g.tag(0x1234), 0x1234 >> 6);
}

#[test]
fn same_block_same_index_and_tag() {
    let g = Geometry::new(15, 6, 3);
    let base = 0x7FFD_3A00_u64;
    for offset in 0..64 {
        assert_eq!(g.index(base + offset), g.index(base));
        assert_eq!(g.tag(base + offset), g.tag(base));
    }
}
