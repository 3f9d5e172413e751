//! Reset catch-and-synchronize.
//!
//! Turns an asynchronous reset into one that is safe to use in a target clock domain.
//! The output asserts the moment the async reset rises and releases only after the
//! async reset has been low for `depth` consecutive rising edges.
//!
//! The flops reset to 0 and shift a constant 1 in from the MSB end on every edge.
//! Output bit 0 therefore turns 1 on the `depth`-th edge after release, and the
//! synchronized reset is its complement. The first flop may go metastable when the
//! release lands near an edge; the remaining `depth - 1` stages give it time to settle.
//!
//! ```text
//!   async rst ‾‾‾‾‾‾|_________________________
//!   clk edges      |  1  |  2  |  3  |
//!   q (depth 3)    000   100   110   111
//!   sync_reset ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|_______
//! ```

use tracing::debug;

use super::regvec::AsyncResetRegVec;
use crate::common::error::ConfigError;

/// Design-for-test controls that bypass the synchronizer.
///
/// While `test_mode` is set the synchronized output follows `test_mode_reset`
/// directly, so scan tests can drive the reset of the whole domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PsdTestMode {
    /// Select the bypass.
    pub test_mode: bool,
    /// Reset level driven while bypassed.
    pub test_mode_reset: bool,
}

/// Asynchronous-assert, synchronous-deassert reset synchronizer.
#[derive(Clone, Debug)]
pub struct ResetSynchronizer {
    catch: AsyncResetRegVec,
    async_reset: bool,
    psd: PsdTestMode,
}

impl ResetSynchronizer {
    /// Creates a synchronizer in its power-on state (output asserted).
    ///
    /// # Arguments
    ///
    /// * `depth` - Number of synchronizing flip-flops (`1..=64`).
    ///
    /// # Errors
    ///
    /// [`ConfigError::SyncDepth`] when `depth` is out of range.
    pub fn new(depth: usize) -> Result<Self, ConfigError> {
        let catch = AsyncResetRegVec::new(depth, 0).map_err(|_| ConfigError::SyncDepth(depth))?;
        Ok(Self {
            catch,
            async_reset: false,
            psd: PsdTestMode::default(),
        })
    }

    /// Number of synchronizing flip-flops.
    pub const fn depth(&self) -> usize {
        self.catch.width()
    }

    /// Current level of the asynchronous reset input.
    pub const fn async_reset(&self) -> bool {
        self.async_reset
    }

    /// Drives the asynchronous reset input.
    ///
    /// Raising it clears the flops at once, so [`Self::sync_reset`] is asserted
    /// before the next clock edge.
    pub fn set_async_reset(&mut self, level: bool) {
        if level && !self.async_reset {
            debug!(depth = self.depth(), "async reset asserted");
        }
        self.async_reset = level;
        if level {
            self.catch.assert_reset();
        }
    }

    /// Drives the test-mode bypass.
    pub const fn set_test_mode(&mut self, psd: PsdTestMode) {
        self.psd = psd;
    }

    /// Applies one rising edge of the target clock.
    pub fn posedge(&mut self) {
        let was_reset = self.sync_reset();
        let d = (1u64 << (self.depth() - 1)) | (self.catch.q() >> 1);
        self.catch.clock(self.async_reset, true, d);
        if was_reset && !self.sync_reset() {
            debug!(depth = self.depth(), "synchronized reset released");
        }
    }

    /// The synchronized reset output.
    #[inline]
    pub const fn sync_reset(&self) -> bool {
        if self.psd.test_mode {
            self.psd.test_mode_reset
        } else {
            !self.catch.bit(0)
        }
    }

    /// Raw flop outputs, bit 0 being the stage nearest the output.
    pub const fn stages(&self) -> u64 {
        self.catch.q()
    }
}
