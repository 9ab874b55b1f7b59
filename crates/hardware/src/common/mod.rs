//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** A strong type for block addresses used as prefetch keys.
//! 2. **Constants:** Geometry limits, recency ranges, and timing constants.
//! 3. **Access Types:** Read/write classification and level identifiers.
//! 4. **Error Handling:** Configuration and trace-parsing error types.

/// Block address type.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access and cache level definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::BlockAddr;
pub use data::{AccessType, Level};
pub use error::{ConfigError, TraceError};
