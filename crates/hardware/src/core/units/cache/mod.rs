//! Set-Associative Block Store.
//!
//! This module implements the storage of one cache level: a flat array of
//! `set_count * associativity` lines, the tag lookup, and victim selection.
//! Order keys come from a pluggable [`ReplacementPolicy`]; what a hit or a
//! fill means for the rest of the hierarchy is decided by the access
//! pipeline in [`crate::sim::simulator`].

/// Address decomposition for a level.
pub mod geometry;

/// Order-key policies (LRU for L1, MIP/LIP for L2).
pub mod policies;

pub use self::geometry::Geometry;

use self::policies::{LruPolicy, ReplacementPolicy, l2_policy};
use crate::config::CacheConfig;

/// Cache line entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Address tag.
    pub tag: u64,
    /// Line holds data.
    pub valid: bool,
    /// Line was written since it was filled.
    pub dirty: bool,
    /// Line was brought in by a prefetch and has not been demanded yet.
    pub prefetched: bool,
    /// Recency key; the smallest key in a full set is the victim.
    pub order_key: u64,
}

/// One cache level: geometry, lines, and order-key policy.
#[derive(Debug)]
pub struct CacheLevel {
    geometry: Geometry,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheLevel {
    /// Creates a level with all lines invalid.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Bit layout of the level.
    /// * `policy` - Order-key policy.
    pub fn new(geometry: Geometry, policy: Box<dyn ReplacementPolicy>) -> Self {
        Self {
            lines: vec![CacheLine::default(); geometry.set_count * geometry.associativity],
            geometry,
            policy,
        }
    }

    /// Creates an L1: MRU insertion regardless of the configured policy.
    pub fn l1(config: &CacheConfig) -> Self {
        Self::new(Geometry::from_config(config), Box::new(LruPolicy::new()))
    }

    /// Creates an L2 using the configured insertion policy.
    pub fn l2(config: &CacheConfig) -> Self {
        Self::new(
            Geometry::from_config(config),
            l2_policy(config.insertion_policy),
        )
    }

    /// Bit layout of this level.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Lines of set `index`, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= set_count`.
    pub fn set(&self, index: usize) -> &[CacheLine] {
        let ways = self.geometry.associativity;
        &self.lines[index * ways..(index + 1) * ways]
    }

    /// Iterates over all sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = &[CacheLine]> {
        self.lines.chunks(self.geometry.associativity)
    }

    /// Returns the line at `(set, way)`.
    pub fn line(&self, set: usize, way: usize) -> &CacheLine {
        &self.lines[set * self.geometry.associativity + way]
    }

    fn line_mut(&mut self, set: usize, way: usize) -> &mut CacheLine {
        &mut self.lines[set * self.geometry.associativity + way]
    }

    /// Finds the way holding `tag` in `set`, if any. O(associativity).
    pub fn lookup(&self, set: usize, tag: u64) -> Option<usize> {
        self.set(set)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Finds the `(set, way)` holding `addr`, if any.
    pub fn find(&self, addr: u64) -> Option<(usize, usize)> {
        let set = self.geometry.index(addr);
        self.lookup(set, self.geometry.tag(addr))
            .map(|way| (set, way))
    }

    /// Checks if the level holds the block containing `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        self.find(addr).is_some()
    }

    /// Selects the way to fill in `set`.
    ///
    /// Returns the first invalid way if there is one; otherwise the way with
    /// the smallest order key, ties going to the lowest way index.
    pub fn pick_victim(&self, set: usize) -> usize {
        let lines = self.set(set);
        if let Some(way) = lines.iter().position(|line| !line.valid) {
            return way;
        }
        let mut victim = 0;
        for (way, line) in lines.iter().enumerate().skip(1) {
            if line.order_key < lines[victim].order_key {
                victim = way;
            }
        }
        victim
    }

    /// Marks `(set, way)` as just used (hit or write refresh).
    pub fn touch(&mut self, set: usize, way: usize) {
        let key = self.policy.touch();
        self.line_mut(set, way).order_key = key;
    }

    /// Marks `(set, way)` dirty.
    pub fn mark_dirty(&mut self, set: usize, way: usize) {
        self.line_mut(set, way).dirty = true;
    }

    /// Clears the prefetched flag of `(set, way)` and reports whether it was set.
    pub fn take_prefetched(&mut self, set: usize, way: usize) -> bool {
        std::mem::take(&mut self.line_mut(set, way).prefetched)
    }

    /// Overwrites `(set, way)` with a new valid line and returns the previous contents.
    ///
    /// The new line's order key comes from the policy's insertion rule.
    pub fn fill(
        &mut self,
        set: usize,
        way: usize,
        tag: u64,
        dirty: bool,
        prefetched: bool,
    ) -> CacheLine {
        let order_key = self.policy.insert();
        std::mem::replace(
            self.line_mut(set, way),
            CacheLine {
                tag,
                valid: true,
                dirty,
                prefetched,
                order_key,
            },
        )
    }
}
