//! Cache hierarchy units.
//!
//! This module contains the building blocks of the simulated hierarchy:
//! the set-associative block store with its insertion policies, and the L2
//! prefetchers.

/// Set-associative block store, geometry, and insertion policies.
pub mod cache;

/// L2 prefetchers (`+1`, Markov, Hybrid).
pub mod prefetch;
