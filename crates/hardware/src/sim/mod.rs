//! Trace replay.
//!
//! This module provides:
//! 1. **Simulator:** The per-run session that drives every reference through the hierarchy.
//! 2. **Trace:** Parsing of `<R|W> 0x<hex>` trace lines.
//! 3. **Metrics:** Ratios and average access times derived at the end of a run.

/// Ratio and AAT derivation.
pub mod metrics;

/// Replay session.
pub mod simulator;

/// Trace record parsing and reading.
pub mod trace;

pub use self::simulator::Simulator;
pub use self::trace::{TraceReader, TraceRecord, parse_trace};
