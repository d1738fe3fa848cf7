//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Load-use hazards and data-port wait states, both of which
//!    require stalls.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the
//!    register file from the EX/MEM and MEM/WB latches.
//! 3. **Stall Propagation:** A stall in one stage freezes every stage upstream of it.
//!
//! Everything here is a pure function of the pre-tick [`PipelineState`].

use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdEx, IfId, MemWb, PipelineState};
use crate::core::pipeline::signals::{ForwardSel, WbSrc};
use crate::core::pipeline::stages::decode::control;
use crate::core::pipeline::stages::writeback::writeback_value;
use crate::isa::decode::decode;

/// Per-stage stall (hold) signals for one tick.
///
/// A stalled stage keeps the contents of the pipeline register it writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallSignals {
    /// Hold PC and IF/ID.
    pub fetch: bool,
    /// Hold the IF/ID instruction in decode.
    pub decode: bool,
    /// Hold ID/EX.
    pub execute: bool,
    /// Hold EX/MEM and MEM/WB.
    pub memory: bool,
}

/// Forwarding selectors for the two execute-stage operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardSignals {
    /// Source of the rs1 operand.
    pub a: ForwardSel,
    /// Source of the rs2 operand.
    pub b: ForwardSel,
}

/// Everything the hazard unit produces in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardSignals {
    /// Stage hold signals.
    pub stall: StallSignals,
    /// Operand forwarding selectors.
    pub forward: ForwardSignals,
    /// A load-use hazard was detected.
    pub load_use: bool,
    /// The data port is holding the memory stage.
    pub memory_wait: bool,
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in the Decode (ID) stage reads
/// a register that the load currently in the Execute (EX) stage will write.
/// Only source registers the decoded instruction actually reads are compared,
/// so e.g. the `rs2` field of an `addi` never causes a stall.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX pipeline latch holding the instruction in execute.
/// * `if_id` - The IF/ID pipeline latch holding the instruction in decode.
///
/// # Returns
///
/// `true` if a one-cycle stall is required.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    let (Some(ex), Some(id)) = (id_ex.instruction(), if_id.instruction()) else {
        return false;
    };
    if !ex.ctrl.mem_read || ex.rd == 0 {
        return false;
    }

    let next = decode(id.inst);
    let ctrl = control(&next);
    (ctrl.uses_rs1 && next.rs1 == ex.rd) || (ctrl.uses_rs2 && next.rs2 == ex.rd)
}

/// Value the instruction in EX/MEM will eventually write back, as far as it is
/// known at this point.
///
/// Jumps link `pc + 4`; everything else forwards its ALU result.
pub const fn ex_mem_result(entry: &ExMemEntry) -> u32 {
    match entry.ctrl.wb_src {
        WbSrc::PcPlus4 => entry.pc.wrapping_add(4),
        WbSrc::Alu | WbSrc::Mem => entry.alu,
    }
}

/// Chooses the forwarding source for one execute-stage operand.
///
/// EX/MEM is checked first because it holds the most recently produced
/// value; MEM/WB only wins when EX/MEM does not match.
///
/// # Arguments
///
/// * `src` - Source register index of the operand.
/// * `ex_mem` - The EX/MEM latch.
/// * `mem_wb` - The MEM/WB latch.
pub fn forward_select(src: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardSel {
    if src == 0 {
        return ForwardSel::RegFile;
    }
    if ex_mem
        .instruction()
        .is_some_and(|e| e.ctrl.reg_write && e.rd == src)
    {
        ForwardSel::ExMem
    } else if mem_wb
        .instruction()
        .is_some_and(|w| w.ctrl.reg_write && w.rd == src)
    {
        ForwardSel::MemWb
    } else {
        ForwardSel::RegFile
    }
}

/// Resolves a forwarding selector to the operand value.
///
/// # Arguments
///
/// * `sel` - Selector from [`forward_select`].
/// * `reg_value` - Value read from the register file in decode.
/// * `ex_mem` - The EX/MEM latch.
/// * `mem_wb` - The MEM/WB latch.
pub fn forward_value(sel: ForwardSel, reg_value: u32, ex_mem: &ExMem, mem_wb: &MemWb) -> u32 {
    match sel {
        ForwardSel::RegFile => reg_value,
        ForwardSel::ExMem => ex_mem_result(&ex_mem.entry),
        ForwardSel::MemWb => writeback_value(&mem_wb.entry),
    }
}

/// Computes the stall and forwarding signals for one tick.
///
/// # Arguments
///
/// * `state` - The pre-tick pipeline registers.
/// * `data_ready` - Whether the data port answered ready this tick. Ignored
///   when EX/MEM does not access memory.
pub fn detect(state: &PipelineState, data_ready: bool) -> HazardSignals {
    let memory_wait = state
        .ex_mem
        .instruction()
        .is_some_and(|e| e.ctrl.accesses_memory() && !data_ready);
    let load_use = need_stall_load_use(&state.id_ex, &state.if_id);

    let stall = StallSignals {
        memory: memory_wait,
        execute: memory_wait,
        decode: memory_wait || load_use,
        fetch: memory_wait || load_use,
    };

    let forward = state
        .id_ex
        .instruction()
        .map_or_else(ForwardSignals::default, |ex| ForwardSignals {
            a: if ex.ctrl.uses_rs1 {
                forward_select(ex.rs1, &state.ex_mem, &state.mem_wb)
            } else {
                ForwardSel::RegFile
            },
            b: if ex.ctrl.uses_rs2 {
                forward_select(ex.rs2, &state.ex_mem, &state.mem_wb)
            } else {
                ForwardSel::RegFile
            },
        });

    HazardSignals {
        stall,
        forward,
        load_use,
        memory_wait,
    }
}
