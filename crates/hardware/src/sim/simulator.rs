//! Simulator: one replay session over a two-level hierarchy.
//!
//! The session owns both cache levels and the L2 prefetcher. It is built once
//! from a validated [`Config`], driven with one [`step`](Simulator::step) per
//! trace record, and closed with [`finish`](Simulator::finish).
//!
//! Every reference walks the same path:
//!
//! ```text
//! L1 lookup ─hit──────────────────────────────────────────────▶ done
//!     │miss
//!     ▼
//! pick L1 victim ─▶ L2 read ─hit─────────────────┐
//!                       │miss                    │
//!                       ▼                        ▼
//!                   L2 fill ─▶ prefetch ─▶ L1 fill ─▶ write-back check
//! ```

use tracing::{debug, trace};

use super::metrics;
use super::trace::TraceRecord;
use crate::common::{AccessType, BlockAddr, ConfigError};
use crate::config::Config;
use crate::core::CacheLevel;
use crate::core::units::prefetch::{self, MarkovTable, Prefetcher};
use crate::stats::SimStats;

/// Top-level simulator: L1, optional L2, and the L2 prefetcher.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    l1: CacheLevel,
    l2: Option<CacheLevel>,
    prefetcher: Option<Box<dyn Prefetcher>>,
    /// Block exponent used for prefetch keys (the L2 block size).
    key_block_bits: u64,
}

impl Simulator {
    /// Validates `config` and builds a cold hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        config.warn_ignored();

        let l1 = CacheLevel::l1(&config.l1);
        let (l2, prefetcher) = if config.l2.disabled {
            (None, None)
        } else {
            (
                Some(CacheLevel::l2(&config.l2)),
                prefetch::build(&config.l2),
            )
        };

        debug!(
            l1_sets = l1.geometry().set_count,
            l1_ways = l1.geometry().associativity,
            l2_sets = l2.as_ref().map(|c| c.geometry().set_count),
            l2_ways = l2.as_ref().map(|c| c.geometry().associativity),
            prefetcher = ?config.l2.prefetch_algorithm,
            "cache hierarchy initialized"
        );

        Ok(Self {
            config: *config,
            l1,
            l2,
            prefetcher,
            key_block_bits: config.l2.b,
        })
    }

    /// Configuration this session was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// First-level cache.
    pub const fn l1(&self) -> &CacheLevel {
        &self.l1
    }

    /// Second-level cache, or `None` when disabled.
    pub const fn l2(&self) -> Option<&CacheLevel> {
        self.l2.as_ref()
    }

    /// Markov table of the active prefetcher, if it keeps one.
    pub fn markov_table(&self) -> Option<&MarkovTable> {
        self.prefetcher.as_ref().and_then(|p| p.markov_table())
    }

    /// Processes one memory reference.
    ///
    /// # Arguments
    ///
    /// * `op` - Read or write.
    /// * `addr` - Byte address.
    /// * `stats` - Counters updated by this reference.
    pub fn step(&mut self, op: AccessType, addr: u64, stats: &mut SimStats) {
        stats.accesses_l1 += 1;
        match op {
            AccessType::Read => stats.reads += 1,
            AccessType::Write => stats.writes += 1,
        }

        if let Some((set, way)) = self.l1.find(addr) {
            stats.hits_l1 += 1;
            if op.is_write() {
                self.l1.mark_dirty(set, way);
            }
            self.l1.touch(set, way);
            return;
        }

        stats.misses_l1 += 1;
        let set = self.l1.geometry().index(addr);
        let victim_way = self.l1.pick_victim(set);
        let victim = *self.l1.line(set, victim_way);

        let l2_missed = self.l2_read(addr, stats);
        if l2_missed && self.l2.is_some() {
            let block = BlockAddr::from_addr(addr, self.key_block_bits);
            let target = self.prefetcher.as_mut().and_then(|p| p.observe(block));
            if let Some(target) = target {
                self.prefetch_install(target, stats);
            }
        }

        // The victim stays resident until here so the prefetch residency
        // check still sees it; its contents were copied out above.
        let tag = self.l1.geometry().tag(addr);
        let _ = self.l1.fill(set, victim_way, tag, op.is_write(), false);

        if victim.valid && victim.dirty {
            stats.write_backs_l1 += 1;
            stats.writes_l2 += 1;
            let victim_addr = self.l1.geometry().rebuild(victim.tag, set);
            trace!("L1 write-back of {victim_addr:#x}");
            // Write-through/no-write-allocate: refresh a resident copy only.
            if let Some(l2) = self.l2.as_mut() {
                if let Some((l2_set, l2_way)) = l2.find(victim_addr) {
                    l2.touch(l2_set, l2_way);
                }
            }
        }
    }

    /// Demand read of `addr` from L2. Returns `true` on a miss.
    fn l2_read(&mut self, addr: u64, stats: &mut SimStats) -> bool {
        stats.reads_l2 += 1;
        let Some(l2) = self.l2.as_mut() else {
            stats.read_misses_l2 += 1;
            return true;
        };

        if let Some((set, way)) = l2.find(addr) {
            stats.read_hits_l2 += 1;
            if l2.take_prefetched(set, way) {
                stats.prefetch_hits_l2 += 1;
            }
            l2.touch(set, way);
            return false;
        }

        stats.read_misses_l2 += 1;
        let set = l2.geometry().index(addr);
        let way = l2.pick_victim(set);
        let tag = l2.geometry().tag(addr);
        let evicted = l2.fill(set, way, tag, false, false);
        if evicted.valid && evicted.prefetched {
            stats.prefetch_misses_l2 += 1;
        }
        true
    }

    /// Installs a prefetched block into L2 unless either level already holds it.
    fn prefetch_install(&mut self, target: BlockAddr, stats: &mut SimStats) {
        let addr = target.to_addr(self.key_block_bits);
        let Some(l2) = self.l2.as_mut() else {
            return;
        };
        if self.l1.contains(addr) || l2.contains(addr) {
            trace!(block = %target, "prefetch target already resident");
            return;
        }

        let set = l2.geometry().index(addr);
        let way = l2.pick_victim(set);
        let tag = l2.geometry().tag(addr);
        let evicted = l2.fill(set, way, tag, false, true);
        if evicted.valid && evicted.prefetched {
            stats.prefetch_misses_l2 += 1;
        }
        stats.prefetches_issued_l2 += 1;
        trace!(block = %target, "prefetch issued");
    }

    /// Derives ratios and average access times. Call once, after the last step.
    pub fn finish(&self, stats: &mut SimStats) {
        metrics::finalize(
            stats,
            self.l1.geometry(),
            self.l2.as_ref().map(CacheLevel::geometry),
        );
    }

    /// Replays `records` through this session and returns finished statistics.
    pub fn run<I>(&mut self, records: I) -> SimStats
    where
        I: IntoIterator<Item = TraceRecord>,
    {
        let mut stats = SimStats::default();
        for record in records {
            self.step(record.op, record.addr, &mut stats);
        }
        self.finish(&mut stats);
        stats
    }
}
