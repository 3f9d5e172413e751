//! Cycle-level model of a core's scratchpad slave port and its reset synchronizer.
//!
//! This crate models two tile-level hardware blocks and the harness around them:
//! 1. **Reset:** Asynchronous-assert, synchronous-deassert reset synchronizer.
//! 2. **TileLink:** Channel payloads, manager parameters, and an A-channel monitor.
//! 3. **Pipeline:** The data-cache request interface and a scratchpad reference model.
//! 4. **Port:** The four-state slave port that bridges TileLink to the pipeline.
//! 5. **Simulation:** Scenario files, a testbench, and statistics collection.

/// Common types and constants (addresses, byte-lane masks, errors).
pub mod common;
/// Model configuration (defaults, validation, hierarchical config structures).
pub mod config;
/// Data-cache pipeline interface and scratchpad reference model.
pub mod dcache;
/// Reset synchronizer and its register vector.
pub mod reset;
/// Scenario files and the cycle-by-cycle testbench.
pub mod sim;
/// Slave devices (scratchpad port).
pub mod soc;
/// Testbench statistics collection and reporting.
pub mod stats;
/// TileLink messages, manager parameters, and monitor.
pub mod tilelink;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Reset synchronizer; construct with `ResetSynchronizer::new`.
pub use crate::reset::ResetSynchronizer;
/// Testbench wiring reset, port, and pipeline together.
pub use crate::sim::Testbench;
/// The scratchpad slave port.
pub use crate::soc::ScratchpadSlavePort;
