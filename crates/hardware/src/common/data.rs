//! Memory Access Types.
//!
//! This module defines the classification of trace events and cache levels used
//! throughout the simulator. These types are used for the following:
//! 1. **Dirty Tracking:** Writes mark L1 lines dirty; reads leave them clean.
//! 2. **Statistics Tracking:** Categorizing references as reads or writes.
//! 3. **Timing Model:** Selecting per-level hit-time constants.

use std::fmt;

/// Type of memory reference carried by a trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read (trace op `R`).
    Read,

    /// Data write (trace op `W`).
    ///
    /// L1 is write-back/write-allocate, so a write miss still fills the line
    /// and leaves it dirty.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Maps a trace op character to an access type.
    ///
    /// Only the upper-case `R` and `W` used by the trace format are accepted.
    pub const fn from_op(op: char) -> Option<Self> {
        match op {
            'R' => Some(Self::Read),
            'W' => Some(Self::Write),
            _ => None,
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write => write!(f, "W"),
        }
    }
}

/// Identifies one of the two cache levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// First-level cache (write-back/write-allocate, MRU insertion).
    L1,
    /// Second-level cache (write-through/no-write-allocate, MIP or LIP insertion).
    L2,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
        }
    }
}
