//! TileLink interface of the scratchpad.
//!
//! This module provides:
//! - [`message`]: Channel payloads, opcodes, atomic params, and the B/C/E tie-offs.
//! - [`params`]: The manager parameters the port advertises.
//! - [`monitor`]: A-channel legality checks used by the testbench.

/// Channel payloads and opcode encodings.
pub mod message;

/// A-channel protocol monitor.
pub mod monitor;

/// Manager parameters and transfer sizes.
pub mod params;

pub use message::{AOpcode, ArithParam, ChannelA, ChannelD, DOpcode, LogicParam, TieOffs};
pub use params::{ManagerParams, RegionType, TransferSizes};
