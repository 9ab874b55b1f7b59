//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline geometry of both levels (1 KiB 2-way L1, 32 KiB 8-way L2).
//! 2. **Structures:** Per-level `(C, B, S)` geometry, policy, and prefetch settings.
//! 3. **Enums:** Insertion policy, write strategy, and prefetch algorithm types.
//! 4. **Validation:** The fatal checks performed once at setup.
//!
//! Configuration is built by the CLI from flags, or deserialized from JSON. A JSON
//! document only needs the fields it overrides; everything else keeps its default.

use std::fmt::{self, Write as _};

use serde::Deserialize;
use tracing::warn;

use crate::common::constants::{MAX_BLOCK_BITS, MAX_SIZE_BITS, MIN_BLOCK_BITS};
use crate::common::{ConfigError, Level};

/// Default configuration constants for the simulator.
mod defaults {
    /// L1 size exponent (1 KiB).
    pub const L1_C: u64 = 10;

    /// L1 associativity exponent (2-way).
    pub const L1_S: u64 = 1;

    /// L2 size exponent (32 KiB).
    pub const L2_C: u64 = 15;

    /// L2 associativity exponent (8-way).
    pub const L2_S: u64 = 3;

    /// Block size exponent shared by both levels (64-byte blocks).
    pub const B: u64 = 6;
}

/// Insertion policy: where a newly installed line starts in the recency order.
///
/// Only meaningful for L2; L1 always inserts at MRU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InsertionPolicy {
    /// MRU insertion, LRU eviction.
    #[default]
    #[serde(alias = "Mip", alias = "mip")]
    Mip,
    /// LRU insertion, LRU eviction.
    ///
    /// A line that is inserted and never touched again is the first to go.
    #[serde(alias = "Lip", alias = "lip")]
    Lip,
}

/// Write propagation discipline of a level.
///
/// Fixed by the hierarchy: L1 is always write-back/write-allocate and L2 is
/// always write-through/no-write-allocate. The field exists so a configuration
/// can state it; disagreeing values are reported and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WriteStrategy {
    /// Write-back, write-allocate.
    #[default]
    #[serde(alias = "Wbwa", alias = "wbwa")]
    Wbwa,
    /// Write-through, write-no-allocate.
    #[serde(alias = "Wtwna", alias = "wtwna")]
    Wtwna,
}

/// Prefetch algorithm applied on L2 read misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetchAlgorithm {
    /// No prefetching enabled.
    #[default]
    #[serde(alias = "none")]
    None,
    /// Sequential prefetcher: fetches the block after the missing one.
    #[serde(alias = "plus1", alias = "PLUS1")]
    PlusOne,
    /// Markov prefetcher: fetches the most frequent recorded successor.
    #[serde(alias = "markov")]
    Markov,
    /// Markov prediction when a row exists, `+1` otherwise.
    #[serde(alias = "hybrid")]
    Hybrid,
}

impl fmt::Display for InsertionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mip => "MIP",
            Self::Lip => "LIP",
        })
    }
}

impl fmt::Display for PrefetchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::PlusOne => "+1",
            Self::Markov => "Markov",
            Self::Hybrid => "Hybrid",
        })
    }
}

impl PrefetchAlgorithm {
    /// Returns `true` for the algorithms that consult a Markov table.
    pub const fn uses_markov_table(self) -> bool {
        matches!(self, Self::Markov | Self::Hybrid)
    }
}

/// Configuration of one cache level in `(C, B, S)` form.
///
/// Total size is `2^c` bytes, blocks are `2^b` bytes, and each set holds `2^s` ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Bypass this level entirely (honored for L2 only).
    pub disabled: bool,
    /// Size exponent `C`.
    pub c: u64,
    /// Block-size exponent `B`.
    pub b: u64,
    /// Associativity exponent `S`.
    pub s: u64,
    /// Insertion policy.
    pub insertion_policy: InsertionPolicy,
    /// Write strategy (fixed per level, see [`WriteStrategy`]).
    pub write_strategy: WriteStrategy,
    /// Prefetch algorithm (honored for L2 only).
    pub prefetch_algorithm: PrefetchAlgorithm,
    /// Number of Markov table rows; must be nonzero exactly for Markov/Hybrid.
    pub markov_rows: u64,
}

impl CacheConfig {
    /// Default L1: 1 KiB, 64-byte blocks, 2-way, MIP, WBWA.
    pub const fn default_l1() -> Self {
        Self {
            disabled: false,
            c: defaults::L1_C,
            b: defaults::B,
            s: defaults::L1_S,
            insertion_policy: InsertionPolicy::Mip,
            write_strategy: WriteStrategy::Wbwa,
            prefetch_algorithm: PrefetchAlgorithm::None,
            markov_rows: 0,
        }
    }

    /// Default L2: 32 KiB, 64-byte blocks, 8-way, LIP, WTWNA.
    pub const fn default_l2() -> Self {
        Self {
            disabled: false,
            c: defaults::L2_C,
            b: defaults::B,
            s: defaults::L2_S,
            insertion_policy: InsertionPolicy::Lip,
            write_strategy: WriteStrategy::Wtwna,
            prefetch_algorithm: PrefetchAlgorithm::None,
            markov_rows: 0,
        }
    }

    fn check_block_bits(&self, level: Level) -> Result<(), ConfigError> {
        if (MIN_BLOCK_BITS..=MAX_BLOCK_BITS).contains(&self.b) {
            Ok(())
        } else {
            Err(ConfigError::BlockSizeOutOfRange { level, b: self.b })
        }
    }

    fn check_geometry(&self, level: Level) -> Result<(), ConfigError> {
        if !self.b.checked_add(self.s).is_some_and(|bs| bs <= self.c) {
            return Err(ConfigError::InvalidGeometry {
                level,
                c: self.c,
                b: self.b,
                s: self.s,
            });
        }
        // One line per block: 2^(C-B) entries must be addressable.
        let line_count = u32::try_from(self.c - self.b)
            .ok()
            .and_then(|bits| 1_usize.checked_shl(bits));
        if self.c > MAX_SIZE_BITS || line_count.is_none() {
            return Err(ConfigError::GeometryTooLarge {
                level,
                c: self.c,
                b: self.b,
            });
        }
        Ok(())
    }
}

/// Root configuration structure: one [`CacheConfig`] per level.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::{Config, InsertionPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.l1.c, 10);
/// assert_eq!(config.l2.insertion_policy, InsertionPolicy::Lip);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing a partial JSON document:
///
/// ```
/// use cachesim_core::config::{Config, PrefetchAlgorithm};
///
/// let json = r#"{ "l2": { "c": 16, "prefetch_algorithm": "Markov", "markov_rows": 32 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.l2.c, 16);
/// assert_eq!(config.l2.s, 3);
/// assert_eq!(config.l2.prefetch_algorithm, PrefetchAlgorithm::Markov);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    /// First-level cache.
    pub l1: CacheConfig,
    /// Second-level cache.
    pub l2: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            l1: CacheConfig::default_l1(),
            l2: CacheConfig::default_l2(),
        }
    }
}

impl Config {
    /// Parses a JSON configuration document; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown fields, or
    /// unknown enum values.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Runs the fatal configuration checks.
    ///
    /// Checks are applied in a fixed order and the first violation is returned:
    /// block sizes, L2 size, L2 associativity, Markov row count, then geometry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1.check_block_bits(Level::L1)?;
        self.l2.check_block_bits(Level::L2)?;

        if !self.l2.disabled && self.l2.c <= self.l1.c {
            return Err(ConfigError::L2NotLargerThanL1 {
                c1: self.l1.c,
                c2: self.l2.c,
            });
        }
        if !self.l2.disabled && self.l2.s < self.l1.s {
            return Err(ConfigError::L2AssocSmallerThanL1 {
                s1: self.l1.s,
                s2: self.l2.s,
            });
        }

        if self.l2.prefetch_algorithm.uses_markov_table() {
            if self.l2.markov_rows == 0 {
                return Err(ConfigError::MarkovRowsRequired);
            }
        } else if self.l2.markov_rows != 0 {
            return Err(ConfigError::MarkovRowsUnexpected {
                rows: self.l2.markov_rows,
            });
        }

        self.l1.check_geometry(Level::L1)?;
        if !self.l2.disabled {
            self.l2.check_geometry(Level::L2)?;
        }
        Ok(())
    }

    /// Logs settings that the fixed hierarchy ignores.
    pub(crate) fn warn_ignored(&self) {
        if self.l1.disabled {
            warn!("L1 cannot be disabled; ignoring the L1 disabled flag");
        }
        if self.l1.insertion_policy != InsertionPolicy::Mip {
            warn!(policy = ?self.l1.insertion_policy, "L1 always inserts at MRU; ignoring L1 insertion policy");
        }
        if self.l1.write_strategy != WriteStrategy::Wbwa {
            warn!(strategy = ?self.l1.write_strategy, "L1 is fixed write-back/write-allocate");
        }
        if self.l2.write_strategy != WriteStrategy::Wtwna {
            warn!(strategy = ?self.l2.write_strategy, "L2 is fixed write-through/no-write-allocate");
        }
        if self.l1.prefetch_algorithm != PrefetchAlgorithm::None || self.l1.markov_rows != 0 {
            warn!("prefetching is only modeled at L2; ignoring L1 prefetch settings");
        }
    }

    /// Renders the "Cache Settings" block echoed before a run.
    ///
    /// ```text
    /// Cache Settings
    /// --------------
    /// L1 (C,B,S): (10,6,1). Replace policy: MIP
    /// L2 (C,B,S): (15,6,3). Replace policy: LIP. Prefetch algo: None. Prefetch row count: 0
    /// ```
    pub fn render_settings(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Cache Settings");
        let _ = writeln!(out, "--------------");
        let l1 = &self.l1;
        let _ = writeln!(
            out,
            "L1 (C,B,S): ({},{},{}). Replace policy: {}",
            l1.c, l1.b, l1.s, l1.insertion_policy
        );
        let l2 = &self.l2;
        if l2.disabled {
            let _ = writeln!(out, "L2 disabled");
        } else {
            let _ = writeln!(
                out,
                "L2 (C,B,S): ({},{},{}). Replace policy: {}. Prefetch algo: {}. Prefetch row count: {}",
                l2.c, l2.b, l2.s, l2.insertion_policy, l2.prefetch_algorithm, l2.markov_rows
            );
        }
        out
    }
}

/// On-disk shape of [`Config`]: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    l1: CacheOverrides,
    l2: CacheOverrides,
}

/// Field-by-field overrides applied on top of a level's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CacheOverrides {
    disabled: Option<bool>,
    c: Option<u64>,
    b: Option<u64>,
    s: Option<u64>,
    insertion_policy: Option<InsertionPolicy>,
    write_strategy: Option<WriteStrategy>,
    prefetch_algorithm: Option<PrefetchAlgorithm>,
    markov_rows: Option<u64>,
}

impl CacheOverrides {
    fn apply(self, base: CacheConfig) -> CacheConfig {
        CacheConfig {
            disabled: self.disabled.unwrap_or(base.disabled),
            c: self.c.unwrap_or(base.c),
            b: self.b.unwrap_or(base.b),
            s: self.s.unwrap_or(base.s),
            insertion_policy: self.insertion_policy.unwrap_or(base.insertion_policy),
            write_strategy: self.write_strategy.unwrap_or(base.write_strategy),
            prefetch_algorithm: self.prefetch_algorithm.unwrap_or(base.prefetch_algorithm),
            markov_rows: self.markov_rows.unwrap_or(base.markov_rows),
        }
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            l1: file.l1.apply(CacheConfig::default_l1()),
            l2: file.l2.apply(CacheConfig::default_l2()),
        }
    }
}
