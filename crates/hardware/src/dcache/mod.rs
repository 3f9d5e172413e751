//! Data-cache pipeline interface.
//!
//! The scratchpad port talks to the core's data-cache pipeline through the same
//! request/response handshake the core's load/store unit uses. It provides:
//! 1. **Commands:** The memory-operation encoding (`MemCmd`).
//! 2. **Bundles:** Request, response, and the data staged one cycle after a request.
//! 3. **Seam:** The [`DcachePipeline`] trait the testbench drives each cycle.
//! 4. **Reference model:** [`bank::ScratchpadBank`], a pipeline stand-in with nack injection.
//!
//! Timing: a request accepted in cycle `t` (valid and ready) takes its store data in
//! `t + 1` (s1) and answers in `t + 2` (s2) with either `resp.valid` or `s2_nack`.

/// Read-modify-write ALU for atomic commands.
pub mod amo;

/// Scratchpad storage behind a three-stage pipeline with nack injection.
pub mod bank;

use serde::Serialize;

use crate::common::addr::PhysAddr;

pub use bank::ScratchpadBank;

/// Memory-operation commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MemCmd {
    /// Integer load.
    Read = 0b0_0000,
    /// Integer store (lanes from address and size).
    Write = 0b0_0001,
    /// Atomic swap.
    AmoSwap = 0b0_0100,
    /// Atomic add.
    AmoAdd = 0b0_1000,
    /// Atomic xor.
    AmoXor = 0b0_1001,
    /// Atomic or.
    AmoOr = 0b0_1010,
    /// Atomic and.
    AmoAnd = 0b0_1011,
    /// Atomic signed minimum.
    AmoMin = 0b0_1100,
    /// Atomic signed maximum.
    AmoMax = 0b0_1101,
    /// Atomic unsigned minimum.
    AmoMinU = 0b0_1110,
    /// Atomic unsigned maximum.
    AmoMaxU = 0b0_1111,
    /// Partial store (lanes from the staged mask).
    PartialWrite = 0b1_0001,
}

impl MemCmd {
    /// Raw 5-bit encoding.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns whether the command is a read-modify-write.
    pub const fn is_amo(self) -> bool {
        matches!(
            self,
            Self::AmoSwap
                | Self::AmoAdd
                | Self::AmoXor
                | Self::AmoOr
                | Self::AmoAnd
                | Self::AmoMin
                | Self::AmoMax
                | Self::AmoMinU
                | Self::AmoMaxU
        )
    }

    /// Returns whether the response carries data.
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read) || self.is_amo()
    }

    /// Returns whether the command modifies memory.
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write | Self::PartialWrite) || self.is_amo()
    }
}

/// Request bundle, valid in the cycle it is offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DcacheReq {
    /// Memory operation.
    pub cmd: MemCmd,
    /// Byte address.
    pub addr: PhysAddr,
    /// log2 of the access size in bytes.
    pub size: u8,
    /// Sign-extend load data.
    pub signed: bool,
    /// Requester tag, echoed on the response.
    pub tag: u8,
    /// The address is physical; skip translation.
    pub phys: bool,
    /// Suppress exceptions for this access.
    pub no_xcpt: bool,
}

/// Store data and byte mask, driven the cycle after the request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct S1Data {
    /// Beat-aligned store data or atomic operand.
    pub data: u64,
    /// Byte-lane enables for partial stores.
    pub mask: u8,
}

/// Response bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DcacheResp {
    /// Unshifted beat read from memory (old value for atomics).
    pub data_raw: u64,
    /// The command returns data.
    pub has_data: bool,
    /// Echo of the request tag.
    pub tag: u8,
}

/// Pipeline signals seen by the requester in the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineOutputs {
    /// A request offered this cycle will be accepted.
    pub req_ready: bool,
    /// The request from two cycles ago completed.
    pub resp: Option<DcacheResp>,
    /// The request from two cycles ago was refused and must be reissued.
    pub s2_nack: bool,
}

impl PipelineOutputs {
    /// Pipeline ready, nothing returning.
    pub const IDLE: Self = Self {
        req_ready: true,
        resp: None,
        s2_nack: false,
    };
}

/// A data-cache pipeline driven once per clock.
///
/// `outputs` is the combinational view of the current cycle and must not depend on
/// the request offered in the same cycle. `clock` commits the edge.
pub trait DcachePipeline {
    /// Signals visible to the requester this cycle.
    fn outputs(&self) -> PipelineOutputs;

    /// Applies a rising edge.
    ///
    /// # Arguments
    ///
    /// * `req` - The request offered this cycle, when valid.
    /// * `s1` - Store data for the request accepted in the previous cycle.
    /// * `s1_kill` - Drop the request accepted in the previous cycle.
    fn clock(&mut self, req: Option<DcacheReq>, s1: S1Data, s1_kill: bool);
}
