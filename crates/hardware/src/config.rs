//! Configuration system for the pipeline model.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline values used for every field a document omits.
//! 2. **Structures:** Hierarchical config for general run control and the memory model.
//! 3. **Loading:** JSON parsing with validation via [`Config::from_json`].
//!
//! The core itself has no tunables: forwarding, stall and squash behavior are
//! fixed properties of the pipeline. Configuration only shapes the environment
//! the core runs in.

use serde::Deserialize;

use crate::common::error::{SimError, SimResult};

/// Default configuration constants.
mod defaults {
    /// Size of the flat memory (1 MiB).
    pub const MEMORY_SIZE: usize = 1024 * 1024;

    /// Instruction-port wait states. Zero means a fetch completes in the tick it is issued.
    pub const FETCH_LATENCY: u32 = 0;

    /// Data-port wait states for loads.
    pub const READ_LATENCY: u32 = 0;

    /// Data-port wait states for stores.
    pub const WRITE_LATENCY: u32 = 0;

    /// Cycle budget of a run before it is reported as non-terminating.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Root configuration structure.
///
/// Every section and field has a default, so any subset of the document is
/// accepted.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "memory": { "size_bytes": 65536, "read_latency": 3 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.memory.size_bytes, 65536);
/// assert_eq!(config.memory.read_latency, 3);
/// assert_eq!(config.memory.fetch_latency, 0);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory size and port timing
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for malformed JSON or unknown fields, and
    /// [`SimError::InvalidConfig`] for values that fail [`Config::validate`].
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that the type system cannot express.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] when the memory is empty or not a whole
    /// number of words, or when the cycle budget is zero.
    pub fn validate(&self) -> SimResult<()> {
        let size = self.memory.size_bytes;
        if size == 0 || size % 4 != 0 {
            return Err(SimError::InvalidConfig(format!(
                "memory.size_bytes must be a non-zero multiple of 4, got {size}"
            )));
        }
        if u32::try_from(size - 1).is_err() {
            return Err(SimError::InvalidConfig(format!(
                "memory.size_bytes exceeds the 32-bit address space, got {size}"
            )));
        }
        if self.general.max_cycles == 0 {
            return Err(SimError::InvalidConfig(
                "general.max_cycles must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit per-tick pipeline occupancy and retirement traces
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycle budget of [`crate::sim::Simulator::run`]
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Memory size and port wait states.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Memory size in bytes, mapped from address 0
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,

    /// Not-ready ticks before an instruction fetch completes
    #[serde(default = "MemoryConfig::default_fetch_latency")]
    pub fetch_latency: u32,

    /// Not-ready ticks before a data read completes
    #[serde(default = "MemoryConfig::default_read_latency")]
    pub read_latency: u32,

    /// Not-ready ticks before a data write completes
    #[serde(default = "MemoryConfig::default_write_latency")]
    pub write_latency: u32,
}

impl MemoryConfig {
    /// Returns the default memory size.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default fetch wait states.
    const fn default_fetch_latency() -> u32 {
        defaults::FETCH_LATENCY
    }

    /// Returns the default read wait states.
    const fn default_read_latency() -> u32 {
        defaults::READ_LATENCY
    }

    /// Returns the default write wait states.
    const fn default_write_latency() -> u32 {
        defaults::WRITE_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
            fetch_latency: defaults::FETCH_LATENCY,
            read_latency: defaults::READ_LATENCY,
            write_latency: defaults::WRITE_LATENCY,
        }
    }
}
