//! Register vector with asynchronous reset.
//!
//! A row of D flip-flops sharing a clock, a write enable, and an asynchronous reset
//! that forces every bit to its reset value as soon as it is raised, without waiting
//! for a clock edge.

use crate::common::constants::MAX_SYNC_DEPTH;
use crate::common::error::ConfigError;

/// Asynchronously reset register vector of up to 64 bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncResetRegVec {
    width: usize,
    init: u64,
    q: u64,
}

impl AsyncResetRegVec {
    /// Creates a register vector holding its reset value.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of flip-flops (`1..=64`).
    /// * `init` - Reset value; bits above `width` are ignored.
    ///
    /// # Errors
    ///
    /// [`ConfigError::RegWidth`] when `width` is zero or above 64.
    pub fn new(width: usize, init: u64) -> Result<Self, ConfigError> {
        if width == 0 || width > MAX_SYNC_DEPTH {
            return Err(ConfigError::RegWidth(width));
        }
        let init = init & width_mask(width);
        Ok(Self { width, init, q: init })
    }

    /// Number of flip-flops.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Reset value.
    pub const fn init(&self) -> u64 {
        self.init
    }

    /// Current register outputs.
    #[inline]
    pub const fn q(&self) -> u64 {
        self.q
    }

    /// Returns output bit `i`.
    #[inline]
    pub const fn bit(&self, i: usize) -> bool {
        i < self.width && (self.q >> i) & 1 == 1
    }

    /// Forces the reset value immediately (asynchronous assertion).
    pub const fn assert_reset(&mut self) {
        self.q = self.init;
    }

    /// Applies one rising clock edge.
    ///
    /// A held reset wins over the enable; otherwise `d` is captured when `en` is set.
    ///
    /// # Arguments
    ///
    /// * `rst` - Level of the asynchronous reset at the edge.
    /// * `en` - Write enable.
    /// * `d` - Next value; bits above `width` are dropped.
    pub const fn clock(&mut self, rst: bool, en: bool, d: u64) {
        if rst {
            self.q = self.init;
        } else if en {
            self.q = d & width_mask(self.width);
        }
    }
}

const fn width_mask(width: usize) -> u64 {
    if width >= 64 { u64::MAX } else { (1u64 << width) - 1 }
}
