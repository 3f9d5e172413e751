//! Error definitions.
//!
//! The modelled hardware has a single recoverable failure (a pipeline nack), which
//! never leaves the port. The errors here belong to the model around it:
//! 1. **Configuration:** Loading and validating elaboration parameters.
//! 2. **Protocol:** TileLink A-channel messages the monitor rejects.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for [`Config`](crate::config::Config).
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reset synchronizer depth outside `1..=64`.
    #[error("sync depth {0} out of range (1..=64)")]
    SyncDepth(usize),

    /// Register vector width outside `1..=64`.
    #[error("register width {0} out of range (1..=64)")]
    RegWidth(usize),

    /// Data-path width is not a power of two between 1 and 8 bytes.
    #[error("data path of {0} bytes is not a power of two in 1..=8")]
    DataBytes(u64),

    /// Atomics need at least a 32-bit data path.
    #[error("atomics require data_bytes >= 4 (got {0})")]
    AtomicsTooNarrow(u64),

    /// Scratchpad size is not a power of two at least one beat wide.
    #[error("scratchpad size {size:#x} must be a power of two >= {beat} bytes")]
    Size {
        /// Configured size in bytes.
        size: u64,
        /// Configured beat width in bytes.
        beat: u64,
    },

    /// Scratchpad region larger than the model allocates.
    #[error("scratchpad size {size:#x} exceeds the {max:#x}-byte limit")]
    SizeTooLarge {
        /// Configured size in bytes.
        size: u64,
        /// Largest accepted size in bytes.
        max: u64,
    },

    /// A nack on every request leaves no replay able to complete.
    #[error("nack_every = 1 nacks every replay; use 0 or at least 2")]
    NackEvery,

    /// Scratchpad base is not aligned to its size.
    #[error("scratchpad base {base:#x} is not aligned to size {size:#x}")]
    Alignment {
        /// Configured base address.
        base: u64,
        /// Configured size in bytes.
        size: u64,
    },
}

/// TileLink A-channel violations reported by the protocol monitor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Opcode bits that a master may not send to this manager.
    #[error("illegal A opcode {0}")]
    IllegalOpcode(u8),

    /// Atomic param that does not name an arithmetic or logical operation.
    #[error("illegal param {param} for A opcode {opcode}")]
    IllegalParam {
        /// Raw opcode bits.
        opcode: u8,
        /// Raw param bits.
        param: u8,
    },

    /// Address not covered by any of the manager's address sets.
    #[error("address {0:#x} is not claimed by this manager")]
    AddressNotClaimed(u64),

    /// Access size the manager does not support for this opcode.
    #[error("{bytes}-byte transfer unsupported for A opcode {opcode}")]
    UnsupportedSize {
        /// Raw opcode bits.
        opcode: u8,
        /// Transfer size in bytes.
        bytes: u64,
    },

    /// Address not aligned to the access size.
    #[error("address {address:#x} misaligned for a {bytes}-byte access")]
    Misaligned {
        /// Byte address of the access.
        address: u64,
        /// Transfer size in bytes.
        bytes: u64,
    },

    /// Byte mask inconsistent with address and size.
    #[error("mask {mask:#04x} invalid, expected {expected:#04x}")]
    BadMask {
        /// Mask carried by the message.
        mask: u8,
        /// Lane mask implied by address and size.
        expected: u8,
    },
}
