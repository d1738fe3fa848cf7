//! Simulation driver and program loading.
//!
//! Provides the loader that places raw or ELF images in memory and the
//! [`Simulator`] that steps the pipeline until the program halts.

/// Raw binary and ELF32 image loading.
pub mod loader;

/// CPU plus memory, stepped as one system.
pub mod simulator;

pub use simulator::{RunSummary, Simulator};
