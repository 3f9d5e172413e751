//! Common utilities and types used throughout the model.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Address Types:** Physical addresses and TileLink address sets.
//! 2. **Constants:** Widths, depths, and byte-lane mask helpers.
//! 3. **Error Handling:** Configuration and protocol error enums.

/// Address type definitions (physical addresses and address sets).
pub mod addr;

/// Widths, defaults, and byte-lane helpers.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::{AddressSet, PhysAddr};
pub use constants::{beat_mask, expand_mask, lane_mask, size_bytes};
pub use error::{ConfigError, ProtocolError};
