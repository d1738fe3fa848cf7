//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the pipeline controller
//! that owns the processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register file and program counter.
//! 2. **Pipeline Control:** Owns the four pipeline registers and advances them once per tick.
//! 3. **Reset:** A synchronous reset input sampled at every tick.
//! 4. **Observability:** Retirement tracking and performance statistics.
//!
//! The memories are not part of the core; [`Cpu::tick`] borrows them through the
//! [`InstructionPort`](crate::soc::traits::InstructionPort) and
//! [`DataPort`](crate::soc::traits::DataPort) traits.

/// Per-tick pipeline advancement.
pub mod execution;

use crate::common::RegisterFile;
use crate::common::constants::RESET_PC;
use crate::core::pipeline::latches::PipelineState;
use crate::stats::SimStats;

/// An instruction that left the MEM/WB latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw encoding.
    pub inst: u32,
}

/// Main CPU structure: the five-stage pipeline controller.
///
/// The register file contents are not touched by reset; a fresh `Cpu` starts
/// with every register at zero.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Program Counter.
    pub pc: u32,
    /// The four pipeline registers.
    pub pipeline: PipelineState,
    /// Performance statistics.
    pub stats: SimStats,
    /// Level of the reset input.
    reset: bool,
    /// Instruction retired by the most recent tick.
    last_retired: Option<Retired>,
}

impl Cpu {
    /// Creates a CPU in the reset state: PC at the reset vector, every
    /// pipeline slot a bubble and every register zero.
    pub fn new() -> Self {
        Self {
            pc: RESET_PC,
            ..Self::default()
        }
    }

    /// Drives the reset input. While asserted, every tick forces the PC to the
    /// reset vector and all pipeline slots to bubbles.
    pub const fn set_reset(&mut self, asserted: bool) {
        self.reset = asserted;
    }

    /// Level of the reset input.
    pub const fn reset_asserted(&self) -> bool {
        self.reset
    }

    /// The instruction retired by the most recent tick, if any.
    pub const fn last_retired(&self) -> Option<Retired> {
        self.last_retired
    }
}
