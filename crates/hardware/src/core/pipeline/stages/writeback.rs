//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! selects the value committed to the register file for the instruction in
//! the MEM/WB latch. The controller applies the write at commit time.

use crate::core::pipeline::latches::{MemWb, MemWbEntry};
use crate::core::pipeline::signals::WbSrc;

/// A register-file write produced by the writeback stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register index.
    pub rd: usize,
    /// Value to write.
    pub value: u32,
}

/// Selects the write-back value of an instruction by its write-back source.
pub const fn writeback_value(entry: &MemWbEntry) -> u32 {
    match entry.ctrl.wb_src {
        WbSrc::Alu => entry.alu,
        WbSrc::Mem => entry.load_data,
        WbSrc::PcPlus4 => entry.pc.wrapping_add(4),
    }
}

/// Executes the writeback stage of the pipeline.
///
/// # Returns
///
/// The register write to apply this tick, or `None` for a bubble, an
/// instruction that does not write a register, or a write targeting `x0`.
pub fn wb_stage(mem_wb: &MemWb) -> Option<RegWrite> {
    let entry = mem_wb.instruction()?;
    if !entry.ctrl.reg_write || entry.rd == 0 {
        return None;
    }
    Some(RegWrite {
        rd: entry.rd,
        value: writeback_value(entry),
    })
}
