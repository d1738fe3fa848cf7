//! Cycle-level model of a five-stage pipelined RV32I core.
//!
//! This crate implements the classic in-order pipeline with the following:
//! 1. **Core:** Fetch, decode, execute, memory and write-back stages with a
//!    valid-bit pipeline register at each boundary and a synchronous reset.
//! 2. **Hazards:** EX/MEM and MEM/WB operand forwarding, load-use stalls, data-port
//!    wait stalls and the taken-branch squash.
//! 3. **ISA:** RV32I decoding, control-signal generation and disassembly.
//! 4. **SoC:** Request/ready instruction and data port contracts and a flat,
//!    latency-programmable memory implementing both.
//! 5. **Simulation:** Raw/ELF loader, JSON configuration and statistics.
//!
//! ```
//! use rvpipe_core::{Config, Simulator};
//!
//! // addi a0, zero, 42 ; jal x0, 0
//! let program: Vec<u8> = [0x02A0_0513_u32, 0x0000_006F]
//!     .iter()
//!     .flat_map(|w| w.to_le_bytes())
//!     .collect();
//!
//! let mut sim = Simulator::new(&Config::default());
//! sim.load(&program).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(sim.cpu.regs.read(10), 42);
//! assert_eq!(summary.retired, 2);
//! ```

/// Common types and constants (registers, access types, errors).
pub mod common;
/// Simulator configuration (defaults and JSON-deserialized structures).
pub mod config;
/// CPU core (pipeline controller, stages, latches, hazards, units).
pub mod core;
/// Instruction set (field decoding, ABI names, RV32I encodings, disassembly).
pub mod isa;
/// Program loader and simulation driver.
pub mod sim;
/// System-on-chip (port contracts, memory).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline controller; holds the register file, PC, pipeline registers and stats.
pub use crate::core::Cpu;
/// CPU plus memory driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
