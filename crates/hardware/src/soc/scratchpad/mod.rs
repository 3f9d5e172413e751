//! Scratchpad slave port.
//!
//! Lets other masters on the interconnect reach the core's scratchpad through the
//! data-cache pipeline.
//! - [`lookup`]: A-channel message to pipeline request translation.
//! - [`port`]: The four-state port controller.

/// Opcode and param to memory-command lookup.
pub mod lookup;

/// Port state machine.
pub mod port;

pub use lookup::{DEFAULT_CMD, cmd_for, form_cache_req, lookup_cmd};
pub use port::{Handshakes, PortInputs, PortOutputs, PortRegs, PortState, ScratchpadSlavePort};
