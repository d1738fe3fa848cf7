//! System-on-Chip (SoC) Components.
//!
//! Everything outside the core that the core reaches through its memory ports:
//! the port contracts themselves and a flat, latency-programmable memory that
//! implements both.

/// Flat system memory with wait-state modeling.
pub mod memory;

/// Instruction and data port contracts.
pub mod traits;

pub use memory::Memory;
pub use traits::{DataPort, DataRequest, FetchRequest, InstructionPort, PortResponse};
