//! Configuration and Trace Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Configuration Errors:** Fatal violations detected once, at setup, before any event.
//! 2. **Trace Errors:** Reasons a trace line failed to parse; the reader skips such lines.

use thiserror::Error;

use super::data::Level;

/// Fatal configuration error reported by simulator setup.
///
/// There is no recovery: the driver prints the message and exits with a
/// nonzero status before processing any trace event.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The block-size exponent of a level is outside `[5, 7]`.
    #[error("{level} block size exponent must be in [5,7], got {b}")]
    BlockSizeOutOfRange {
        /// Offending level.
        level: Level,
        /// Configured block-size exponent.
        b: u64,
    },

    /// L2 is enabled but not strictly larger than L1.
    #[error("L1 size must be strictly less than L2 size, got C1={c1} C2={c2}")]
    L2NotLargerThanL1 {
        /// L1 size exponent.
        c1: u64,
        /// L2 size exponent.
        c2: u64,
    },

    /// L2 is enabled but has lower associativity than L1.
    #[error("L1 associativity must be less than or equal to L2 associativity, got S1={s1} S2={s2}")]
    L2AssocSmallerThanL1 {
        /// L1 associativity exponent.
        s1: u64,
        /// L2 associativity exponent.
        s2: u64,
    },

    /// Markov or Hybrid prefetching was selected with an empty table.
    #[error("number of Markov rows must be > 0 for the Markov and Hybrid prefetchers")]
    MarkovRowsRequired,

    /// Markov rows were configured for an algorithm that does not use them.
    #[error(
        "number of Markov rows should be 0 if not using the Markov or Hybrid prefetching algorithms, got {rows}"
    )]
    MarkovRowsUnexpected {
        /// Configured row count.
        rows: u64,
    },

    /// `C < B + S`: the level cannot hold even one set.
    #[error("{level} geometry (C,B,S)=({c},{b},{s}) is invalid: C must be at least B+S")]
    InvalidGeometry {
        /// Offending level.
        level: Level,
        /// Size exponent.
        c: u64,
        /// Block-size exponent.
        b: u64,
        /// Associativity exponent.
        s: u64,
    },

    /// The level is too large to index: `C` exceeds 63 or its line count
    /// does not fit in a host `usize`.
    #[error("{level} size exponent C={c} is too large (B={b})")]
    GeometryTooLarge {
        /// Offending level.
        level: Level,
        /// Size exponent.
        c: u64,
        /// Block-size exponent.
        b: u64,
    },
}

/// Reason a trace line could not be parsed into a record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The line holds no tokens.
    #[error("empty line")]
    Empty,

    /// The op token is not `R` or `W`.
    #[error("unknown op '{0}'")]
    UnknownOp(String),

    /// The address token does not start with `0x`.
    #[error("address '{0}' is missing the 0x prefix")]
    MissingHexPrefix(String),

    /// The address is missing or is not a valid 64-bit hex number.
    #[error("bad address '{0}'")]
    BadAddress(String),

    /// Extra tokens follow the address.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}
