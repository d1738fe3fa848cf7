//! Common utilities and types used throughout the core model.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Constants:** Reset vector, instruction size, and well-known encodings.
//! 2. **Memory Access:** Classification of port transactions (Fetch/Read/Write).
//! 3. **Error Handling:** The host-level error type for loading, configuration and runs.
//! 4. **Register Management:** The architectural integer register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Host-level error type.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{INSTRUCTION_SIZE, RESET_PC};
pub use data::AccessType;
pub use error::{SimError, SimResult};
pub use reg::RegisterFile;
