//! Manager parameters advertised by the scratchpad port.
//!
//! The interconnect uses these to route requests and to restrict which transfer sizes
//! masters may issue. The port answers requests in order, so it advertises a single
//! FIFO domain.

use serde::Serialize;

use super::message::AOpcode;
use crate::common::addr::AddressSet;
use crate::common::constants::MIN_ATOMIC_BYTES;
use crate::config::ScratchpadConfig;

/// Inclusive range of supported transfer sizes in bytes; `0..=0` means unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransferSizes {
    /// Smallest supported transfer.
    pub min: u64,
    /// Largest supported transfer.
    pub max: u64,
}

impl TransferSizes {
    /// Creates a size range.
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// The empty range.
    pub const fn none() -> Self {
        Self { min: 0, max: 0 }
    }

    /// Returns whether no size is supported.
    pub const fn is_none(&self) -> bool {
        self.max == 0
    }

    /// Returns whether a transfer of `bytes` is supported.
    pub const fn contains(&self, bytes: u64) -> bool {
        !self.is_none() && bytes >= self.min && bytes <= self.max
    }
}

/// Memory region type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RegionType {
    /// Reads have no side effects and may be repeated.
    Idempotent,
}

/// Parameters of the scratchpad's TileLink manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManagerParams {
    /// Regions claimed on the interconnect.
    pub address: Vec<AddressSet>,
    /// Device name in the generated device description.
    pub device_name: &'static str,
    /// Compatible strings in the generated device description.
    pub compatible: Vec<&'static str>,
    /// Memory region type.
    pub region_type: RegionType,
    /// Instruction fetch from this region is allowed.
    pub executable: bool,
    /// Sizes for `ArithmeticData`.
    pub supports_arithmetic: TransferSizes,
    /// Sizes for `LogicalData`.
    pub supports_logical: TransferSizes,
    /// Sizes for `PutPartialData`.
    pub supports_put_partial: TransferSizes,
    /// Sizes for `PutFullData`.
    pub supports_put_full: TransferSizes,
    /// Sizes for `Get`.
    pub supports_get: TransferSizes,
    /// FIFO domain: requests are answered in arrival order.
    pub fifo_id: Option<u32>,
    /// Bytes per beat.
    pub beat_bytes: u64,
    /// Minimum cycles from A to D.
    pub min_latency: u32,
}

impl ManagerParams {
    /// Derives the manager parameters of a scratchpad port.
    pub fn scratchpad(config: &ScratchpadConfig) -> Self {
        let beat = config.data_bytes;
        let atomics = if config.using_atomics {
            TransferSizes::new(MIN_ATOMIC_BYTES, beat)
        } else {
            TransferSizes::none()
        };
        Self {
            address: AddressSet::aligned(config.base, config.size).into_iter().collect(),
            device_name: "dtim",
            compatible: vec!["sifive,dtim0"],
            region_type: RegionType::Idempotent,
            executable: true,
            supports_arithmetic: atomics,
            supports_logical: atomics,
            supports_put_partial: TransferSizes::new(1, beat),
            supports_put_full: TransferSizes::new(1, beat),
            supports_get: TransferSizes::new(1, beat),
            fifo_id: Some(0),
            beat_bytes: beat,
            min_latency: 1,
        }
    }

    /// Returns whether any address set claims `addr`.
    pub fn claims(&self, addr: u64) -> bool {
        self.address.iter().any(|set| set.contains(addr))
    }

    /// Returns the supported sizes for a manager-bound A opcode.
    ///
    /// Hints and acquires are not supported by this manager.
    pub const fn sizes_for(&self, opcode: AOpcode) -> TransferSizes {
        match opcode {
            AOpcode::PutFullData => self.supports_put_full,
            AOpcode::PutPartialData => self.supports_put_partial,
            AOpcode::ArithmeticData => self.supports_arithmetic,
            AOpcode::LogicalData => self.supports_logical,
            AOpcode::Get => self.supports_get,
            AOpcode::Hint | AOpcode::AcquireBlock | AOpcode::AcquirePerm => TransferSizes::none(),
        }
    }
}
