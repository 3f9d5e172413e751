//! Scenario files.
//!
//! A scenario lists the A-channel requests a master issues, in order, together with
//! reset timing, D-channel back-pressure, nack injection, and initial memory contents.
//!
//! ```json
//! {
//!   "reset_cycles": 2,
//!   "requests": [
//!     { "op": "put_full", "address": 2147483648, "size": 3, "data": 305419896 },
//!     { "op": "get", "address": 2147483648, "size": 3 }
//!   ],
//!   "nack_on": [1],
//!   "d_stall_cycles": [12, 13]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SimError;
use crate::tilelink::message::{ArithParam, ChannelA, LogicParam};

/// One A-channel request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Read `2^size` bytes.
    Get {
        /// Byte address.
        address: u64,
        /// log2 of the size in bytes.
        size: u8,
        /// Transaction id.
        #[serde(default)]
        source: u32,
    },
    /// Write `2^size` bytes.
    PutFull {
        /// Byte address.
        address: u64,
        /// log2 of the size in bytes.
        size: u8,
        /// Beat-aligned data.
        data: u64,
        /// Transaction id.
        #[serde(default)]
        source: u32,
    },
    /// Write the masked bytes.
    PutPartial {
        /// Byte address.
        address: u64,
        /// log2 of the size in bytes.
        size: u8,
        /// Beat-aligned data.
        data: u64,
        /// Byte-lane enables.
        mask: u8,
        /// Transaction id.
        #[serde(default)]
        source: u32,
    },
    /// Arithmetic atomic.
    Arithmetic {
        /// Operation.
        param: ArithParam,
        /// Byte address.
        address: u64,
        /// log2 of the size in bytes.
        size: u8,
        /// Beat-aligned operand.
        data: u64,
        /// Transaction id.
        #[serde(default)]
        source: u32,
    },
    /// Logical atomic.
    Logical {
        /// Operation.
        param: LogicParam,
        /// Byte address.
        address: u64,
        /// log2 of the size in bytes.
        size: u8,
        /// Beat-aligned operand.
        data: u64,
        /// Transaction id.
        #[serde(default)]
        source: u32,
    },
    /// Arbitrary A beat, including encodings with no meaning.
    Raw(ChannelA),
}

impl Request {
    /// Builds the A beat for a data path of `beat_bytes`.
    pub const fn to_channel_a(&self, beat_bytes: u64) -> ChannelA {
        match *self {
            Self::Get {
                address,
                size,
                source,
            } => ChannelA::get(source, address, size, beat_bytes),
            Self::PutFull {
                address,
                size,
                data,
                source,
            } => ChannelA::put_full(source, address, size, data, beat_bytes),
            Self::PutPartial {
                address,
                size,
                data,
                mask,
                source,
            } => ChannelA::put_partial(source, address, size, data, mask),
            Self::Arithmetic {
                param,
                address,
                size,
                data,
                source,
            } => ChannelA::arithmetic(source, param, address, size, data, beat_bytes),
            Self::Logical {
                param,
                address,
                size,
                data,
                source,
            } => ChannelA::logical(source, param, address, size, data, beat_bytes),
            Self::Raw(a) => a,
        }
    }
}

/// Bytes placed in the scratchpad before the first cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preload {
    /// First byte address.
    pub address: u64,
    /// Contents.
    pub bytes: Vec<u8>,
}

/// A complete scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Cycles the asynchronous reset is held from cycle 0.
    #[serde(default)]
    pub reset_cycles: u64,
    /// Requests, issued in order.
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Pipeline request sequence numbers to nack (added to the config's list).
    #[serde(default)]
    pub nack_on: Vec<u64>,
    /// Cycles in which the master holds D ready low.
    #[serde(default)]
    pub d_stall_cycles: Vec<u64>,
    /// Initial memory contents.
    #[serde(default)]
    pub preload: Vec<Preload>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// [`SimError::Scenario`] on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] when the file cannot be read, otherwise as [`Scenario::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
