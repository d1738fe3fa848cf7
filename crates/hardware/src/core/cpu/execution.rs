//! Main Execution Loop.
//!
//! This module implements the per-tick advancement of the pipeline. Every tick
//! follows the same three steps:
//! 1. **Snapshot:** Copy the four pipeline registers; every stage reads only this copy.
//! 2. **Evaluate:** Run the hazard unit and the five stages on the snapshot, then
//!    apply the stall and squash rules to get the next value of each slot.
//! 3. **Commit:** Swap in the new PC and pipeline registers and apply the single
//!    register-file write, all at once.

use tracing::{debug, trace};

use super::{Cpu, Retired};
use crate::common::constants::{INSTRUCTION_SIZE, RESET_PC};
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{IdEx, IfId, PipelineState};
use crate::core::pipeline::signals::ForwardSel;
use crate::core::pipeline::stages::fetch::fetch_request;
use crate::core::pipeline::stages::memory::data_request;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::isa::disasm::disassemble;
use crate::soc::traits::{DataPort, InstructionPort};

impl Cpu {
    /// Advances the pipeline by one clock tick.
    ///
    /// # Arguments
    ///
    /// * `ports` - The instruction and data memories. Each port sees at most
    ///   one request per tick.
    pub fn tick<P: InstructionPort + DataPort>(&mut self, ports: &mut P) {
        self.stats.cycles += 1;
        self.last_retired = None;

        if self.reset {
            self.stats.reset_cycles += 1;
            self.pc = RESET_PC;
            self.pipeline.flush_all();
            trace!(cycle = self.stats.cycles, "reset");
            return;
        }

        let state = self.pipeline;
        trace!(cycle = self.stats.cycles, "PC:{:08x} {}", self.pc, state);

        let data_req = data_request(&state.ex_mem);
        let data_resp = data_req.map(|req| ports.access(req));
        let data_ready = data_resp.is_none_or(|r| r.ready);

        let hz = hazards::detect(&state, data_ready);

        let wb = wb_stage(&state.mem_wb);
        let mem_out = mem_stage(&state.ex_mem, data_resp);
        let ex = execute_stage(&state.id_ex, &state.ex_mem, &state.mem_wb, hz.forward);
        let redirect = if hz.stall.execute { None } else { ex.redirect };
        let decoded = decode_stage(&state.if_id, &self.regs, wb);
        let fetched = if hz.stall.fetch || redirect.is_some() {
            None
        } else {
            Some(fetch_stage(self.pc, ports.fetch(fetch_request(self.pc))))
        };

        let mut next = state;
        if !hz.stall.memory {
            next.mem_wb = mem_out;
            next.ex_mem = ex.ex_mem;
        }
        if !hz.stall.execute {
            next.id_ex = if redirect.is_some() || hz.stall.decode {
                IdEx::bubble()
            } else {
                decoded
            };
        }
        if redirect.is_some() {
            next.if_id = IfId::bubble();
        } else if !hz.stall.fetch {
            next.if_id = fetched.unwrap_or_else(IfId::bubble);
        }

        let next_pc = match (redirect, fetched) {
            (Some(target), _) => target,
            (None, Some(f)) if f.valid => self.pc.wrapping_add(INSTRUCTION_SIZE),
            _ => self.pc,
        };

        self.account(&hz, redirect, fetched.as_ref(), &state);

        if let Some(done) = state.mem_wb.instruction().filter(|_| !hz.stall.memory) {
            self.stats.record_retire(&done.ctrl);
            self.last_retired = Some(Retired {
                pc: done.pc,
                inst: done.inst,
            });
            trace!("retire {:08x}: {}", done.pc, disassemble(done.inst));
        }

        self.pc = next_pc;
        self.pipeline = next;
        if let Some(w) = wb {
            self.regs.write(w.rd, w.value);
        }
    }

    /// Updates the stall, squash and forwarding counters for one tick.
    fn account(
        &mut self,
        hz: &hazards::HazardSignals,
        redirect: Option<u32>,
        fetched: Option<&IfId>,
        state: &PipelineState,
    ) {
        if hz.memory_wait {
            self.stats.stalls_mem += 1;
            debug!("data port not ready, pipeline held");
        } else if hz.load_use {
            self.stats.stalls_data += 1;
            debug!("load-use hazard, bubble into ID/EX");
        }

        if fetched.is_some_and(|f| !f.valid) {
            self.stats.stalls_fetch += 1;
            debug!("instruction port not ready at {:#010x}", self.pc);
        }

        if let Some(target) = redirect {
            self.stats.branches_taken += 1;
            if state.if_id.valid {
                self.stats.squashed += 1;
            }
            debug!("control transfer to {target:#010x}, IF/ID squashed");
        }

        if hz.stall.execute {
            return;
        }
        let Some(id) = state.id_ex.instruction() else {
            return;
        };
        let operands = [
            ("rs1", hz.forward.a, id.rs1, id.rv1),
            ("rs2", hz.forward.b, id.rs2, id.rv2),
        ];
        for (operand, sel, reg, rv) in operands {
            let value = hazards::forward_value(sel, rv, &state.ex_mem, &state.mem_wb);
            match sel {
                ForwardSel::RegFile => {}
                ForwardSel::ExMem => {
                    self.stats.forwards_ex_mem += 1;
                    debug!("forward x{reg}={value:#x} to {operand} of {:08x} from EX/MEM", id.pc);
                }
                ForwardSel::MemWb => {
                    self.stats.forwards_mem_wb += 1;
                    debug!("forward x{reg}={value:#x} to {operand} of {:08x} from MEM/WB", id.pc);
                }
            }
        }
    }
}
