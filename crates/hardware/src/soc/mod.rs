//! Core-side slave devices.
//!
//! Blocks a tile instantiates next to the core and connects to the interconnect.
//! Only the scratchpad port lives here; clocks, resets, and the fabric come from the
//! tile that instantiates it.

/// TileLink scratchpad slave port.
pub mod scratchpad;

pub use scratchpad::ScratchpadSlavePort;
