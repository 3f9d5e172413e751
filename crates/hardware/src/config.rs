//! Configuration system for the scratchpad model.
//!
//! This module defines the elaboration parameters of the two blocks and the knobs of
//! the surrounding testbench. It provides:
//! 1. **Defaults:** Baseline parameters (sync depth, scratchpad region, beat width).
//! 2. **Structures:** Hierarchical config for general, reset, scratchpad, and pipeline model.
//! 3. **Validation:** Checks that a deserialized config describes buildable hardware.
//!
//! Configuration is supplied as JSON (`Config::from_json` / `Config::from_file`) or
//! built with `Config::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_BEAT_BYTES, MAX_SPAD_BYTES, MAX_SYNC_DEPTH, MIN_ATOMIC_BYTES};
use crate::common::error::ConfigError;

/// Default configuration constants.
///
/// These values describe a DTIM on an RV64 core when nothing is overridden.
mod defaults {
    /// Number of flip-flops in the reset synchronizer.
    pub const SYNC_DEPTH: usize = crate::common::constants::DEFAULT_SYNC_DEPTH;

    /// Base address of the scratchpad region.
    pub const SPAD_BASE: u64 = 0x8000_0000;

    /// Scratchpad size in bytes (16 KiB).
    pub const SPAD_SIZE: u64 = 0x4000;

    /// Core data-path width in bytes (RV64).
    pub const DATA_BYTES: u64 = 8;

    /// Upper bound on simulated cycles for a scenario run.
    pub const MAX_CYCLES: u64 = 10_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvspad_core::config::Config;
///
/// let json = r#"{
///     "reset": { "sync_depth": 5 },
///     "scratchpad": { "base": 268435456, "size": 4096, "data_bytes": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.reset.sync_depth, 5);
/// assert_eq!(config.scratchpad.data_bytes, 4);
/// assert!(config.scratchpad.using_atomics);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Testbench settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Reset synchronizer parameters.
    #[serde(default)]
    pub reset: ResetConfig,
    /// Scratchpad slave port parameters.
    #[serde(default)]
    pub scratchpad: ScratchpadConfig,
    /// Behavior of the reference cache-pipeline model.
    #[serde(default)]
    pub dcache: DcacheConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and the matching variant when
    /// a parameter is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reset.validate()?;
        self.scratchpad.validate()?;
        self.dcache.validate()
    }
}

/// Testbench settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Record a per-cycle trace of every signal bundle.
    #[serde(default)]
    pub trace: bool,

    /// Reject illegal A-channel messages instead of only logging them.
    #[serde(default = "GeneralConfig::default_strict_monitor")]
    pub strict_monitor: bool,

    /// Cycle cap for `Testbench::run`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    const fn default_strict_monitor() -> bool {
        true
    }

    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            strict_monitor: true,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Reset synchronizer parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetConfig {
    /// Flip-flops between the async reset and the synchronized output.
    ///
    /// Larger values give more metastability margin and release reset later.
    #[serde(default = "ResetConfig::default_sync_depth")]
    pub sync_depth: usize,
}

impl ResetConfig {
    const fn default_sync_depth() -> usize {
        defaults::SYNC_DEPTH
    }

    /// Checks that the depth fits the register vector.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SyncDepth`] when the depth is zero or above 64.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_depth == 0 || self.sync_depth > MAX_SYNC_DEPTH {
            return Err(ConfigError::SyncDepth(self.sync_depth));
        }
        Ok(())
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            sync_depth: defaults::SYNC_DEPTH,
        }
    }
}

/// Scratchpad slave port parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScratchpadConfig {
    /// Base address of the region claimed on the interconnect.
    #[serde(default = "ScratchpadConfig::default_base")]
    pub base: u64,

    /// Region size in bytes.
    #[serde(default = "ScratchpadConfig::default_size")]
    pub size: u64,

    /// Core data-path width in bytes (one TileLink beat).
    #[serde(default = "ScratchpadConfig::default_data_bytes")]
    pub data_bytes: u64,

    /// Advertise and accept arithmetic/logical atomics.
    #[serde(default = "ScratchpadConfig::default_using_atomics")]
    pub using_atomics: bool,
}

impl ScratchpadConfig {
    const fn default_base() -> u64 {
        defaults::SPAD_BASE
    }

    const fn default_size() -> u64 {
        defaults::SPAD_SIZE
    }

    const fn default_data_bytes() -> u64 {
        defaults::DATA_BYTES
    }

    const fn default_using_atomics() -> bool {
        true
    }

    /// Checks the region and data-path parameters.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::DataBytes`] - width not a power of two in `1..=8`.
    /// * [`ConfigError::AtomicsTooNarrow`] - atomics on a data path under 4 bytes.
    /// * [`ConfigError::Size`] - size not a power of two of at least one beat.
    /// * [`ConfigError::SizeTooLarge`] - size above [`MAX_SPAD_BYTES`].
    /// * [`ConfigError::Alignment`] - base not aligned to the size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_bytes.is_power_of_two() || self.data_bytes > MAX_BEAT_BYTES {
            return Err(ConfigError::DataBytes(self.data_bytes));
        }
        if self.using_atomics && self.data_bytes < MIN_ATOMIC_BYTES {
            return Err(ConfigError::AtomicsTooNarrow(self.data_bytes));
        }
        if !self.size.is_power_of_two() || self.size < self.data_bytes {
            return Err(ConfigError::Size {
                size: self.size,
                beat: self.data_bytes,
            });
        }
        if self.size > MAX_SPAD_BYTES {
            return Err(ConfigError::SizeTooLarge {
                size: self.size,
                max: MAX_SPAD_BYTES,
            });
        }
        if self.base & (self.size - 1) != 0 {
            return Err(ConfigError::Alignment {
                base: self.base,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl Default for ScratchpadConfig {
    fn default() -> Self {
        Self {
            base: defaults::SPAD_BASE,
            size: defaults::SPAD_SIZE,
            data_bytes: defaults::DATA_BYTES,
            using_atomics: true,
        }
    }
}

/// Nack injection for the reference cache-pipeline model.
///
/// Sequence numbers count requests accepted by the pipeline, starting at 0, and
/// include replays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcacheConfig {
    /// Nack every k-th accepted request (`0` disables).
    #[serde(default)]
    pub nack_every: u64,

    /// Nack exactly these request sequence numbers.
    #[serde(default)]
    pub nack_on: Vec<u64>,
}

impl DcacheConfig {
    /// Checks that injected nacks still let replays complete.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NackEvery`] when `nack_every` is 1.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.nack_every == 1 {
            return Err(ConfigError::NackEvery);
        }
        Ok(())
    }
}
