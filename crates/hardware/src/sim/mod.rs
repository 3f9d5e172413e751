//! Simulation harness.
//!
//! Wires the blocks together the way a tile would and drives them from a scenario:
//! - [`scenario`]: JSON description of requests, reset timing, and back-pressure.
//! - [`testbench`]: Reset synchronizer, port, pipeline model, and a TileLink master.

/// Scenario description.
pub mod scenario;

/// Cycle-by-cycle testbench.
pub mod testbench;

use std::path::PathBuf;

use thiserror::Error;

use crate::common::error::{ConfigError, ProtocolError};
use crate::dcache::{DcacheReq, S1Data};

pub use scenario::{Preload, Request, Scenario};
pub use testbench::{Completion, CycleRecord, Testbench};

/// Errors raised while running the testbench.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scenario file could not be read.
    #[error("cannot read scenario {path}: {source}")]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario text is not valid JSON for [`Scenario`].
    #[error("malformed scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    /// The master put an illegal message on channel A.
    #[error("cycle {cycle}: {source}")]
    Protocol {
        /// Cycle of the offending handshake.
        cycle: u64,
        /// The violation.
        #[source]
        source: ProtocolError,
    },

    /// Channel A was accepted while another request was still outstanding.
    #[error("cycle {cycle}: request accepted with {outstanding} already in flight")]
    Overlap {
        /// Cycle of the second acceptance.
        cycle: u64,
        /// Requests already outstanding.
        outstanding: usize,
    },

    /// A reissued request differs from the one originally accepted.
    #[error("cycle {cycle}: replayed {replayed:?}, captured {captured:?}")]
    ReplayMismatch {
        /// Cycle of the reissue.
        cycle: u64,
        /// Request formed from the accepted A beat.
        captured: Box<DcacheReq>,
        /// Request offered to the pipeline.
        replayed: Box<DcacheReq>,
    },

    /// Store data staged for a request differs from the accepted A beat.
    #[error("cycle {cycle}: staged {staged:?}, expected {expected:?}")]
    StagedDataMismatch {
        /// Cycle the data was staged.
        cycle: u64,
        /// Data and mask of the accepted A beat.
        expected: S1Data,
        /// Data and mask driven to the pipeline.
        staged: S1Data,
    },

    /// A D beat that does not answer the oldest outstanding request.
    #[error("cycle {cycle}: response for source {got:?}, expected {expected:?}")]
    OutOfOrder {
        /// Cycle of the D handshake.
        cycle: u64,
        /// Source of the oldest outstanding request, if any.
        expected: Option<u32>,
        /// Source carried by the D beat.
        got: u32,
    },

    /// The scenario did not finish within the cycle cap.
    #[error("scenario incomplete after {0} cycles")]
    Timeout(u64),
}
