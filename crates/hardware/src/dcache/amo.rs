//! Atomic memory operation ALU.
//!
//! Computes the value written back by an atomic command from the current memory value
//! and the operand carried in the request data. Word (32-bit) operations compare and
//! add as 32-bit quantities and sign-extend the result from bit 31; only the low
//! four bytes reach memory.

use super::MemCmd;

/// Width of an atomic access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmoWidth {
    /// 32-bit access.
    Word,
    /// 64-bit access.
    Double,
}

impl AmoWidth {
    /// Width for a TileLink/pipeline `size` field (`2` = word, `3` = double).
    pub const fn from_lg_size(lg_size: u8) -> Option<Self> {
        match lg_size {
            2 => Some(Self::Word),
            3 => Some(Self::Double),
            _ => None,
        }
    }

    /// Access width in bytes.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// Performs the read-modify-write arithmetic of an atomic command.
///
/// # Arguments
///
/// * `cmd` - The memory command.
/// * `mem_val` - The current memory value (low bits for word accesses).
/// * `operand` - The operand from the request data.
/// * `width` - Access width.
///
/// # Returns
///
/// The value to store, or `None` when `cmd` is not atomic.
pub fn amo_alu(cmd: MemCmd, mem_val: u64, operand: u64, width: AmoWidth) -> Option<u64> {
    if !cmd.is_amo() {
        return None;
    }
    let result = if width == AmoWidth::Word {
        let a = mem_val as i32;
        let b = operand as i32;
        let res = match cmd {
            MemCmd::AmoAdd => a.wrapping_add(b),
            MemCmd::AmoXor => a ^ b,
            MemCmd::AmoAnd => a & b,
            MemCmd::AmoOr => a | b,
            MemCmd::AmoMin => a.min(b),
            MemCmd::AmoMax => a.max(b),
            MemCmd::AmoMinU => (mem_val as u32).min(operand as u32) as i32,
            MemCmd::AmoMaxU => (mem_val as u32).max(operand as u32) as i32,
            _ => b,
        };
        res as i64 as u64
    } else {
        let a = mem_val as i64;
        let b = operand as i64;
        let res = match cmd {
            MemCmd::AmoAdd => a.wrapping_add(b),
            MemCmd::AmoXor => a ^ b,
            MemCmd::AmoAnd => a & b,
            MemCmd::AmoOr => a | b,
            MemCmd::AmoMin => a.min(b),
            MemCmd::AmoMax => a.max(b),
            MemCmd::AmoMinU => mem_val.min(operand) as i64,
            MemCmd::AmoMaxU => mem_val.max(operand) as i64,
            _ => b,
        };
        res as u64
    };
    Some(result)
}
