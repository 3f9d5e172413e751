//! A-channel protocol monitor.
//!
//! Checks that a message a master places on channel A is one this manager may
//! receive. The port itself never rejects anything; the monitor is how a testbench
//! notices a master that breaks the protocol.

use super::message::{AOpcode, ArithParam, ChannelA, LogicParam};
use super::params::ManagerParams;
use crate::common::constants::{lane_mask, size_bytes};
use crate::common::error::ProtocolError;

/// Validates one A-channel beat against the manager parameters.
///
/// # Errors
///
/// The first violation found, checked in this order: opcode, param, address, size,
/// alignment, mask.
pub fn check_a(params: &ManagerParams, a: &ChannelA) -> Result<(), ProtocolError> {
    let opcode = AOpcode::from_bits(a.opcode).ok_or(ProtocolError::IllegalOpcode(a.opcode))?;

    let param_ok = match opcode {
        AOpcode::ArithmeticData => ArithParam::from_bits(a.param).is_some(),
        AOpcode::LogicalData => LogicParam::from_bits(a.param).is_some(),
        AOpcode::PutFullData | AOpcode::PutPartialData | AOpcode::Get => a.param == 0,
        AOpcode::Hint | AOpcode::AcquireBlock | AOpcode::AcquirePerm => {
            return Err(ProtocolError::IllegalOpcode(a.opcode));
        }
    };
    if !param_ok {
        return Err(ProtocolError::IllegalParam {
            opcode: a.opcode,
            param: a.param,
        });
    }

    // Sizes past 2^63 cannot be represented; treat them as unsupported.
    let bytes = if a.size < 64 { size_bytes(a.size) } else { u64::MAX };
    if !params.claims(a.address) {
        return Err(ProtocolError::AddressNotClaimed(a.address));
    }
    if !params.sizes_for(opcode).contains(bytes) {
        return Err(ProtocolError::UnsupportedSize {
            opcode: a.opcode,
            bytes,
        });
    }
    if a.address & (bytes - 1) != 0 {
        return Err(ProtocolError::Misaligned {
            address: a.address,
            bytes,
        });
    }

    let expected = lane_mask(a.address, a.size, params.beat_bytes);
    let mask_ok = if opcode == AOpcode::PutPartialData {
        a.mask & !expected == 0
    } else {
        a.mask == expected
    };
    if !mask_ok {
        return Err(ProtocolError::BadMask {
            mask: a.mask,
            expected,
        });
    }
    Ok(())
}
