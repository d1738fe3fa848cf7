//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It
//! drives the data port for loads and stores held in EX/MEM and formats the
//! returned word for the writeback stage.
//!
//! Misaligned halfword and word accesses do not trap: the naturally aligned
//! container is accessed instead and a warning is logged.

use tracing::warn;

use crate::core::pipeline::latches::{ExMem, MemWb, MemWbEntry};
use crate::core::units::lsu::{Lsu, unaligned};
use crate::soc::traits::{DataRequest, PortResponse};

/// Builds the data-port request for the instruction in EX/MEM.
///
/// # Returns
///
/// `None` for a bubble or an instruction that does not access memory. The
/// request is a pure function of the latch, so a held latch re-presents an
/// identical request every tick.
pub fn data_request(ex_mem: &ExMem) -> Option<DataRequest> {
    let ex = ex_mem.instruction()?;
    if !ex.ctrl.accesses_memory() {
        return None;
    }

    let width = ex.ctrl.width;
    Some(DataRequest {
        addr: unaligned::word_address(ex.alu),
        wdata: if ex.ctrl.mem_write {
            Lsu::store_data(width, ex.store_data)
        } else {
            0
        },
        byte_enable: Lsu::byte_enable(width, ex.alu),
        read: ex.ctrl.mem_read,
        write: ex.ctrl.mem_write,
    })
}

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `ex_mem` - The EX/MEM latch.
/// * `response` - The data port's answer, `None` when no request was issued.
///
/// # Returns
///
/// The MEM/WB value for the next tick. While the port is not ready the result
/// is a bubble; the controller holds MEM/WB in that case anyway.
pub fn mem_stage(ex_mem: &ExMem, response: Option<PortResponse>) -> MemWb {
    let Some(ex) = ex_mem.instruction() else {
        return MemWb::bubble();
    };

    let mut load_data = 0;
    if ex.ctrl.accesses_memory() {
        let Some(resp) = response.filter(|r| r.ready) else {
            return MemWb::bubble();
        };
        if !unaligned::is_aligned(ex.ctrl.width, ex.alu) {
            warn!(
                "misaligned {}-byte access at {:#010x} (pc {:#010x}) uses the aligned container",
                ex.ctrl.width.bytes(),
                ex.alu,
                ex.pc
            );
        }
        if ex.ctrl.mem_read {
            load_data = Lsu::extract_load(ex.ctrl.width, ex.alu, resp.data);
        }
    }

    MemWb::occupied(MemWbEntry {
        pc: ex.pc,
        inst: ex.inst,
        rd: ex.rd,
        alu: ex.alu,
        load_data,
        ctrl: ex.ctrl,
    })
}
