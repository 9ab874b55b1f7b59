//! Core cache model.
//!
//! This module contains the storage and prediction units that the access
//! pipeline in [`crate::sim`] drives.

/// Cache and prefetch units.
pub mod units;

pub use self::units::cache::{CacheLevel, CacheLine, Geometry};
