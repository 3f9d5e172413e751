//! Physical addresses and address sets.
//!
//! This module defines the address types shared by the port, the monitor, and the
//! pipeline model. It provides:
//! 1. **Type Safety:** A strong type for physical bus addresses.
//! 2. **Beat Arithmetic:** Beat-aligned base and byte-lane offset helpers.
//! 3. **Address Sets:** TileLink-style `(base, mask)` regions used for routing.

use serde::{Deserialize, Serialize};

/// A physical address on the interconnect.
///
/// The scratchpad port always drives physical addresses into the pipeline
/// (`phys = true`), so there is no virtual counterpart in this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the address rounded down to a beat boundary.
    ///
    /// # Arguments
    ///
    /// * `beat_bytes` - Data-path width in bytes; must be a power of two.
    #[inline(always)]
    pub const fn beat_base(self, beat_bytes: u64) -> u64 {
        self.0 & !(beat_bytes - 1)
    }

    /// Returns the byte lane of this address within its beat.
    #[inline(always)]
    pub const fn lane(self, beat_bytes: u64) -> u64 {
        self.0 & (beat_bytes - 1)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A set of addresses described by a base and a don't-care mask.
///
/// An address `a` belongs to the set when `a & !mask == base`. A contiguous,
/// naturally aligned power-of-two region of `size` bytes has `mask = size - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet {
    /// Address bits that must match (with the mask bits cleared).
    pub base: u64,
    /// Address bits that may take any value.
    pub mask: u64,
}

impl AddressSet {
    /// Creates an address set from a naturally aligned power-of-two region.
    ///
    /// # Returns
    ///
    /// `None` when `size` is zero, not a power of two, or `base` is not aligned to `size`.
    pub const fn aligned(base: u64, size: u64) -> Option<Self> {
        if size == 0 || !size.is_power_of_two() || base & (size - 1) != 0 {
            return None;
        }
        Some(Self {
            base,
            mask: size - 1,
        })
    }

    /// Returns whether `addr` falls inside this set.
    #[inline]
    pub const fn contains(&self, addr: u64) -> bool {
        (addr & !self.mask) == self.base
    }

    /// Returns whether the whole access `[addr, addr + bytes)` falls inside this set.
    pub const fn contains_range(&self, addr: u64, bytes: u64) -> bool {
        if bytes == 0 {
            return self.contains(addr);
        }
        match addr.checked_add(bytes - 1) {
            Some(last) => self.contains(addr) && self.contains(last),
            None => false,
        }
    }

    /// Returns the number of addresses covered when the mask is contiguous.
    pub const fn size(&self) -> u64 {
        self.mask.wrapping_add(1)
    }
}
