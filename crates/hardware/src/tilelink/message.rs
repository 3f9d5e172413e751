//! TileLink channel payloads.
//!
//! Only the fields the scratchpad port reads or drives are modelled. Channel A
//! keeps its opcode and param as raw bits so that encodings without a meaning still
//! reach the port, which has a defined answer for them.

use serde::{Deserialize, Serialize};

use crate::common::constants::lane_mask;

/// Channel A opcodes (master to slave).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AOpcode {
    /// Write a full, size-aligned region.
    PutFullData = 0,
    /// Write the bytes selected by the mask.
    PutPartialData = 1,
    /// Arithmetic read-modify-write (min, max, minu, maxu, add).
    ArithmeticData = 2,
    /// Logical read-modify-write (xor, or, and, swap).
    LogicalData = 3,
    /// Read.
    Get = 4,
    /// Prefetch hint.
    Hint = 5,
    /// Acquire a cached copy of a block (TL-C only).
    AcquireBlock = 6,
    /// Acquire permissions on a block (TL-C only).
    AcquirePerm = 7,
}

impl AOpcode {
    /// Decodes the 3-bit opcode field.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::PutFullData,
            1 => Self::PutPartialData,
            2 => Self::ArithmeticData,
            3 => Self::LogicalData,
            4 => Self::Get,
            5 => Self::Hint,
            6 => Self::AcquireBlock,
            7 => Self::AcquirePerm,
            _ => return None,
        })
    }

    /// Raw opcode bits.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns whether the message is a write that is answered without data.
    pub const fn is_put(self) -> bool {
        matches!(self, Self::PutFullData | Self::PutPartialData)
    }
}

/// Channel D opcodes (slave to master) used by an uncached manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DOpcode {
    /// Acknowledges a Put; carries no data.
    AccessAck = 0,
    /// Acknowledges a Get or atomic; carries data.
    AccessAckData = 1,
}

/// Param values of `ArithmeticData`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ArithParam {
    /// Signed minimum.
    Min = 0,
    /// Signed maximum.
    Max = 1,
    /// Unsigned minimum.
    MinU = 2,
    /// Unsigned maximum.
    MaxU = 3,
    /// Two's-complement add.
    Add = 4,
}

impl ArithParam {
    /// Decodes the param field of an arithmetic message.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Min,
            1 => Self::Max,
            2 => Self::MinU,
            3 => Self::MaxU,
            4 => Self::Add,
            _ => return None,
        })
    }
}

/// Param values of `LogicalData`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogicParam {
    /// Bitwise exclusive or.
    Xor = 0,
    /// Bitwise or.
    Or = 1,
    /// Bitwise and.
    And = 2,
    /// Swap in the operand.
    Swap = 3,
}

impl LogicParam {
    /// Decodes the param field of a logical message.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Xor,
            1 => Self::Or,
            2 => Self::And,
            3 => Self::Swap,
            _ => return None,
        })
    }
}

/// Channel A beat.
///
/// `data` and `mask` are beat-aligned: byte lane `i` belongs to address
/// `(address & !(beat_bytes - 1)) + i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelA {
    /// Raw opcode bits.
    pub opcode: u8,
    /// Raw param bits (atomic operation for arithmetic/logical messages).
    #[serde(default)]
    pub param: u8,
    /// log2 of the transfer size in bytes.
    pub size: u8,
    /// Master-side transaction id, echoed on D.
    #[serde(default)]
    pub source: u32,
    /// Byte address.
    pub address: u64,
    /// Byte-lane enables.
    #[serde(default)]
    pub mask: u8,
    /// Write or operand data.
    #[serde(default)]
    pub data: u64,
}

impl ChannelA {
    /// Builds a Get of `2^size` bytes.
    pub const fn get(source: u32, address: u64, size: u8, beat_bytes: u64) -> Self {
        Self {
            opcode: AOpcode::Get.bits(),
            param: 0,
            size,
            source,
            address,
            mask: lane_mask(address, size, beat_bytes),
            data: 0,
        }
    }

    /// Builds a PutFullData of `2^size` bytes.
    pub const fn put_full(source: u32, address: u64, size: u8, data: u64, beat_bytes: u64) -> Self {
        Self {
            opcode: AOpcode::PutFullData.bits(),
            param: 0,
            size,
            source,
            address,
            mask: lane_mask(address, size, beat_bytes),
            data,
        }
    }

    /// Builds a PutPartialData with an explicit byte mask.
    pub const fn put_partial(source: u32, address: u64, size: u8, data: u64, mask: u8) -> Self {
        Self {
            opcode: AOpcode::PutPartialData.bits(),
            param: 0,
            size,
            source,
            address,
            mask,
            data,
        }
    }

    /// Builds an ArithmeticData message.
    pub const fn arithmetic(
        source: u32,
        op: ArithParam,
        address: u64,
        size: u8,
        data: u64,
        beat_bytes: u64,
    ) -> Self {
        Self {
            opcode: AOpcode::ArithmeticData.bits(),
            param: op as u8,
            size,
            source,
            address,
            mask: lane_mask(address, size, beat_bytes),
            data,
        }
    }

    /// Builds a LogicalData message.
    pub const fn logical(
        source: u32,
        op: LogicParam,
        address: u64,
        size: u8,
        data: u64,
        beat_bytes: u64,
    ) -> Self {
        Self {
            opcode: AOpcode::LogicalData.bits(),
            param: op as u8,
            size,
            source,
            address,
            mask: lane_mask(address, size, beat_bytes),
            data,
        }
    }

    /// Decoded opcode, if the bits name one.
    pub const fn decoded_opcode(&self) -> Option<AOpcode> {
        AOpcode::from_bits(self.opcode)
    }

    /// Returns whether this message expects an `AccessAck` without data.
    pub const fn is_put(&self) -> bool {
        matches!(
            AOpcode::from_bits(self.opcode),
            Some(AOpcode::PutFullData | AOpcode::PutPartialData)
        )
    }
}

/// Channel D beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelD {
    /// Response opcode.
    pub opcode: DOpcode,
    /// Always 0 for access acknowledgements.
    pub param: u8,
    /// Echo of the request size.
    pub size: u8,
    /// Echo of the request source.
    pub source: u32,
    /// Slave-side id; unused by access acknowledgements.
    pub sink: u32,
    /// The access was refused.
    pub denied: bool,
    /// Read data (meaningful for `AccessAckData`).
    pub data: u64,
    /// The data is corrupt.
    pub corrupt: bool,
}

impl ChannelD {
    /// Acknowledgement of a write, without data.
    pub const fn access_ack(a: &ChannelA) -> Self {
        Self {
            opcode: DOpcode::AccessAck,
            param: 0,
            size: a.size,
            source: a.source,
            sink: 0,
            denied: false,
            data: 0,
            corrupt: false,
        }
    }

    /// Acknowledgement of a read or atomic, carrying `data`.
    pub const fn access_ack_data(a: &ChannelA, data: u64) -> Self {
        Self {
            opcode: DOpcode::AccessAckData,
            param: 0,
            size: a.size,
            source: a.source,
            sink: 0,
            denied: false,
            data,
            corrupt: false,
        }
    }

    /// Returns whether the beat carries data.
    pub const fn has_data(&self) -> bool {
        matches!(self.opcode, DOpcode::AccessAckData)
    }
}

/// Fixed values on the channels an uncached manager does not use.
///
/// B never carries a probe toward the master; C and E always accept, so a master that
/// sends on them is never blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TieOffs {
    /// Channel B valid (slave to master).
    pub b_valid: bool,
    /// Channel C ready (master to slave).
    pub c_ready: bool,
    /// Channel E ready (master to slave).
    pub e_ready: bool,
}

impl TieOffs {
    /// The tie-off values of a manager without coherence support.
    pub const UNUSED: Self = Self {
        b_valid: false,
        c_ready: true,
        e_ready: true,
    };
}
