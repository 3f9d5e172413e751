//! Reset synchronization.
//!
//! This module provides:
//! - [`regvec`]: Register vector with asynchronous reset and write enable.
//! - [`sync`]: The catch-and-synchronize block built on it.

/// Asynchronously reset register vector.
pub mod regvec;

/// Asynchronous-assert, synchronous-deassert reset synchronizer.
pub mod sync;

pub use regvec::AsyncResetRegVec;
pub use sync::{PsdTestMode, ResetSynchronizer};
