//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of a trace replay and the values derived
//! from them. It provides:
//! 1. **Overall:** Read and write reference counts.
//! 2. **L1:** Accesses, hits, misses, write-backs, ratios, and AAT.
//! 3. **L2:** Reads, writes, read hits/misses, read ratios, and AAT.
//! 4. **Prefetch:** Issued prefetches, prefetch hits, and prefetch misses.

use std::fmt::Write as _;

use serde::Serialize;

/// Simulation statistics structure.
///
/// Counters are updated by [`Simulator::step`](crate::sim::Simulator::step);
/// the `f64` fields stay zero until
/// [`Simulator::finish`](crate::sim::Simulator::finish) derives them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// Read references.
    pub reads: u64,
    /// Write references.
    pub writes: u64,

    /// L1 accesses (every reference).
    pub accesses_l1: u64,
    /// L1 hits.
    pub hits_l1: u64,
    /// L1 misses.
    pub misses_l1: u64,
    /// `hits_l1 / accesses_l1`.
    pub hit_ratio_l1: f64,
    /// `misses_l1 / accesses_l1`.
    pub miss_ratio_l1: f64,
    /// L1 average access time.
    pub avg_access_time_l1: f64,
    /// Dirty L1 victims written back to L2.
    pub write_backs_l1: u64,

    /// L2 demand reads (one per L1 miss).
    pub reads_l2: u64,
    /// L2 writes (one per L1 write-back).
    pub writes_l2: u64,
    /// L2 demand read hits.
    pub read_hits_l2: u64,
    /// L2 demand read misses.
    pub read_misses_l2: u64,
    /// `read_hits_l2 / reads_l2`.
    pub read_hit_ratio_l2: f64,
    /// `read_misses_l2 / reads_l2`.
    pub read_miss_ratio_l2: f64,
    /// L2 average access time.
    pub avg_access_time_l2: f64,

    /// Prefetches installed into L2.
    pub prefetches_issued_l2: u64,
    /// Demand hits on a not-yet-used prefetched line.
    pub prefetch_hits_l2: u64,
    /// Prefetched lines evicted before any demand access.
    pub prefetch_misses_l2: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"l1"`, `"l2"`, `"prefetch"`.
/// Pass an empty slice to `render_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "l1", "l2", "prefetch"];

impl SimStats {
    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "Cache Statistics");
        let _ = writeln!(out, "----------------");
        if want("summary") {
            let _ = writeln!(out, "Reads: {}", self.reads);
            let _ = writeln!(out, "Writes: {}", self.writes);
            let _ = writeln!(out);
        }
        if want("l1") {
            let _ = writeln!(out, "L1 accesses: {}", self.accesses_l1);
            let _ = writeln!(out, "L1 hits: {}", self.hits_l1);
            let _ = writeln!(out, "L1 misses: {}", self.misses_l1);
            let _ = writeln!(out, "L1 hit ratio: {:.3}", self.hit_ratio_l1);
            let _ = writeln!(out, "L1 miss ratio: {:.3}", self.miss_ratio_l1);
            let _ = writeln!(
                out,
                "L1 average access time (AAT): {:.3}",
                self.avg_access_time_l1
            );
            let _ = writeln!(out, "Write-backs from L1: {}", self.write_backs_l1);
            let _ = writeln!(out);
        }
        if want("l2") {
            let _ = writeln!(out, "L2 reads: {}", self.reads_l2);
            let _ = writeln!(out, "L2 writes: {}", self.writes_l2);
            let _ = writeln!(out, "L2 read hits: {}", self.read_hits_l2);
            let _ = writeln!(out, "L2 read misses: {}", self.read_misses_l2);
            let _ = writeln!(out, "L2 read hit ratio: {:.3}", self.read_hit_ratio_l2);
            let _ = writeln!(out, "L2 read miss ratio: {:.3}", self.read_miss_ratio_l2);
            let _ = writeln!(
                out,
                "L2 average access time (AAT): {:.3}",
                self.avg_access_time_l2
            );
            let _ = writeln!(out);
        }
        if want("prefetch") {
            let _ = writeln!(out, "L2 prefetches issued: {}", self.prefetches_issued_l2);
            let _ = writeln!(out, "L2 prefetch hits: {}", self.prefetch_hits_l2);
            let _ = writeln!(out, "L2 prefetch misses: {}", self.prefetch_misses_l2);
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
