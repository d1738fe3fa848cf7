//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs the following:
//! 1. **Operand Resolution:** Applies the hazard unit's forwarding selectors.
//! 2. **Arithmetic Execution:** Runs the ALU on the selected operands.
//! 3. **Branch Resolution:** Decides taken/not-taken and computes the redirect target.

use crate::core::pipeline::hazards::{ForwardSignals, forward_value};
use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdEx, MemWb};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchUnit;

/// Result of the execute stage for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Next value of the EX/MEM latch.
    pub ex_mem: ExMem,
    /// Target of a taken branch or jump.
    pub redirect: Option<u32>,
    /// ALU zero flag.
    pub zero: bool,
    /// Source operands after forwarding, `(rs1, rs2)`.
    pub operands: (u32, u32),
}

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch holding the instruction to execute.
/// * `ex_mem` - The current EX/MEM latch, a forwarding source.
/// * `mem_wb` - The current MEM/WB latch, a forwarding source.
/// * `forward` - Forwarding selectors from the hazard unit.
pub fn execute_stage(
    id_ex: &IdEx,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
    forward: ForwardSignals,
) -> ExecuteOutput {
    let Some(id) = id_ex.instruction() else {
        return ExecuteOutput {
            ex_mem: ExMem::bubble(),
            ..Default::default()
        };
    };

    let rs1 = forward_value(forward.a, id.rv1, ex_mem, mem_wb);
    let rs2 = forward_value(forward.b, id.rv2, ex_mem, mem_wb);

    let a = match id.ctrl.a_src {
        OpASrc::Reg1 => rs1,
        OpASrc::Pc => id.pc,
        OpASrc::Zero => 0,
    };
    let b = match id.ctrl.b_src {
        OpBSrc::Reg2 => rs2,
        OpBSrc::Imm => id.imm as u32,
    };

    let result = Alu::execute(id.ctrl.alu, a, b);
    let resolution = BranchUnit::resolve(&id.ctrl, id.pc, id.imm, rs1, rs2, result.value);

    ExecuteOutput {
        ex_mem: ExMem::occupied(ExMemEntry {
            pc: id.pc,
            inst: id.inst,
            rd: id.rd,
            alu: result.value,
            store_data: rs2,
            ctrl: id.ctrl,
        }),
        redirect: resolution.taken.then_some(resolution.target),
        zero: result.zero,
        operands: (rs1, rs2),
    }
}
