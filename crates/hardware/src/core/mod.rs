//! Core processor implementation.
//!
//! This module contains the pipeline controller, the instruction pipeline it
//! drives and the execution units used by the stages.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch unit, LSU).
pub mod units;

pub use self::cpu::Cpu;
