//! Two-level CPU cache hierarchy simulator library.
//!
//! This crate replays a memory reference trace through an L1/L2 hierarchy with the following:
//! 1. **Caches:** Set-associative block stores with LRU (L1) and MIP/LIP insertion (L2).
//! 2. **Prefetch:** `+1`, Markov, and Hybrid prefetchers feeding L2 on demand misses.
//! 3. **Simulation:** The replay session, trace parsing, and AAT derivation.
//! 4. **Configuration:** Validated per-level settings, loadable from JSON.
//!
//! ```
//! use cachesim_core::{Config, Simulator};
//! use cachesim_core::sim::parse_trace;
//!
//! let mut sim = Simulator::new(&Config::default()).unwrap();
//! let stats = sim.run(parse_trace("R 0x1000\nR 0x1000\n"));
//! assert_eq!(stats.hits_l1, 1);
//! assert_eq!(stats.misses_l1, 1);
//! ```

/// Common types and constants (block addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Cache levels and prefetchers.
pub mod core;
/// Replay session, trace parsing, and metrics.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Replay session; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Counters and derived metrics of a replay.
pub use crate::stats::SimStats;
