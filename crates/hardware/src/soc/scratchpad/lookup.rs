//! TileLink request to pipeline request translation.
//!
//! The command comes from a two-level lookup: the A opcode first, then the atomic
//! param for arithmetic and logical messages. Encodings with no entry map to a read.
//! A read has no side effect on the scratchpad, so a stray opcode still completes
//! with an `AccessAckData` and the master is never left waiting.

use crate::common::addr::PhysAddr;
use crate::dcache::{DcacheReq, MemCmd};
use crate::tilelink::message::{AOpcode, ArithParam, ChannelA, LogicParam};

/// Command used for opcodes and params without a mapping.
pub const DEFAULT_CMD: MemCmd = MemCmd::Read;

/// Looks up the pipeline command for an A opcode and param.
///
/// # Returns
///
/// `None` when the opcode (or, for atomics, the param) has no mapping.
pub const fn lookup_cmd(opcode: u8, param: u8) -> Option<MemCmd> {
    let Some(opcode) = AOpcode::from_bits(opcode) else {
        return None;
    };
    match opcode {
        AOpcode::PutFullData => Some(MemCmd::Write),
        AOpcode::PutPartialData => Some(MemCmd::PartialWrite),
        AOpcode::ArithmeticData => match ArithParam::from_bits(param) {
            Some(ArithParam::Min) => Some(MemCmd::AmoMin),
            Some(ArithParam::Max) => Some(MemCmd::AmoMax),
            Some(ArithParam::MinU) => Some(MemCmd::AmoMinU),
            Some(ArithParam::MaxU) => Some(MemCmd::AmoMaxU),
            Some(ArithParam::Add) => Some(MemCmd::AmoAdd),
            None => None,
        },
        AOpcode::LogicalData => match LogicParam::from_bits(param) {
            Some(LogicParam::Xor) => Some(MemCmd::AmoXor),
            Some(LogicParam::Or) => Some(MemCmd::AmoOr),
            Some(LogicParam::And) => Some(MemCmd::AmoAnd),
            Some(LogicParam::Swap) => Some(MemCmd::AmoSwap),
            None => None,
        },
        AOpcode::Get => Some(MemCmd::Read),
        AOpcode::Hint | AOpcode::AcquireBlock | AOpcode::AcquirePerm => None,
    }
}

/// Returns the command for `a`, applying [`DEFAULT_CMD`] when there is no mapping.
#[inline]
pub const fn cmd_for(a: &ChannelA) -> MemCmd {
    match lookup_cmd(a.opcode, a.param) {
        Some(cmd) => cmd,
        None => DEFAULT_CMD,
    }
}

/// Forms the pipeline request for an A-channel message.
///
/// The scratchpad is addressed physically, with exceptions suppressed and a fixed
/// tag, since at most one request is ever outstanding.
pub const fn form_cache_req(a: &ChannelA) -> DcacheReq {
    DcacheReq {
        cmd: cmd_for(a),
        addr: PhysAddr::new(a.address),
        size: a.size,
        signed: false,
        tag: 0,
        phys: true,
        no_xcpt: true,
    }
}
