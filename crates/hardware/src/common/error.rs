//! Host-level error definitions.
//!
//! The pipeline itself never fails: illegal encodings, misaligned accesses and a
//! starving memory all have defined, non-trapping behavior. Errors only arise at
//! the edges of the model, while loading a program image, parsing a configuration,
//! or driving a run that never reaches its halt condition.

use thiserror::Error;

/// Errors raised by the loader, configuration layer and simulation driver.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image could not be read from disk.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The image carried an ELF header but could not be parsed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// The ELF image parsed but does not describe an RV32 executable.
    #[error("unsupported ELF image: {0}")]
    UnsupportedElf(String),

    /// A segment or raw image does not fit in the simulated memory.
    #[error("{len} bytes at {addr:#010x} do not fit in a {size}-byte memory")]
    ImageOutOfBounds {
        /// Load address of the offending region.
        addr: u32,
        /// Length of the region in bytes.
        len: usize,
        /// Size of the simulated memory in bytes.
        size: usize,
    },

    /// The ELF entry point cannot be reached from the reset vector.
    #[error("entry point {0:#010x} is not reachable from the reset vector")]
    EntryUnreachable(u32),

    /// The configuration document is not valid JSON for [`crate::Config`].
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The configuration parsed but holds inconsistent values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The run exhausted its cycle budget before the program halted.
    #[error("program did not halt within {0} cycles")]
    CycleLimit(u64),
}

/// Result alias for fallible host-level operations.
pub type SimResult<T> = Result<T, SimError>;
