//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch, jump).
//! 3. **Control flow:** Taken branches/jumps and the wrong-path slots they squashed.
//! 4. **Stalls:** Load-use, data-port and instruction-port stall cycles.
//! 5. **Forwarding:** Operands bypassed from EX/MEM and from MEM/WB.

use std::fmt::{self, Write as _};
use std::time::Instant;

use crate::core::pipeline::signals::ControlSignals;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks, reset ticks included.
    pub cycles: u64,
    /// Ticks spent with reset asserted.
    pub reset_cycles: u64,
    /// Number of instructions that left the MEM/WB latch.
    pub instructions_retired: u64,

    /// Count of register-writing arithmetic instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of jumps retired.
    pub inst_jump: u64,
    /// Count of instructions with no architectural effect retired.
    pub inst_nop: u64,

    /// Branches and jumps resolved taken in execute.
    pub branches_taken: u64,
    /// Valid wrong-path instructions discarded by squashes.
    pub squashed: u64,

    /// Stall cycles caused by load-use hazards.
    pub stalls_data: u64,
    /// Stall cycles spent waiting on the data port.
    pub stalls_mem: u64,
    /// Cycles the instruction port was not ready.
    pub stalls_fetch: u64,

    /// Execute-stage operands taken from the EX/MEM latch.
    pub forwards_ex_mem: u64,
    /// Execute-stage operands taken from the MEM/WB latch.
    pub forwards_mem_wb: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            reset_cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_nop: 0,
            branches_taken: 0,
            squashed: 0,
            stalls_data: 0,
            stalls_mem: 0,
            stalls_fetch: 0,
            forwards_ex_mem: 0,
            forwards_mem_wb: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to [`SimStats::render_sections`] to render all of them.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix"];

impl SimStats {
    /// Counts one retired instruction in the total and the instruction mix.
    pub fn record_retire(&mut self, ctrl: &ControlSignals) {
        self.instructions_retired += 1;
        if ctrl.mem_read {
            self.inst_load += 1;
        } else if ctrl.mem_write {
            self.inst_store += 1;
        } else if ctrl.branch {
            self.inst_branch += 1;
        } else if ctrl.jump {
            self.inst_jump += 1;
        } else if ctrl.reg_write {
            self.inst_alu += 1;
        } else {
            self.inst_nop += 1;
        }
    }

    /// Instructions per cycle, or 0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.instructions_retired as f64 / self.cycles as f64
    }

    /// Cycles per instruction, or 0 before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            return 0.0;
        }
        self.cycles as f64 / self.instructions_retired as f64
    }

    /// Renders the requested sections as a report.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an
    /// empty slice renders everything.
    pub fn render_sections(&self, sections: &[&str]) -> String {
        let want = |s: &str| sections.is_empty() || sections.contains(&s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "RV32I PIPELINE STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {:.4}", self.cpi());
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("hazards") {
            let rows = [
                ("stalls.load_use", self.stalls_data),
                ("stalls.data_port", self.stalls_mem),
                ("stalls.fetch_port", self.stalls_fetch),
                ("branches.taken", self.branches_taken),
                ("squashed.slots", self.squashed),
            ];
            let _ = writeln!(out, "HAZARDS");
            for (name, count) in rows {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, cyc));
            }
            let _ = writeln!(out, "  {:<22} {}", "forward.ex_mem", self.forwards_ex_mem);
            let _ = writeln!(out, "  {:<22} {}", "forward.mem_wb", self.forwards_mem_wb);
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let rows = [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
                ("op.nop", self.inst_nop),
            ];
            let _ = writeln!(out, "INSTRUCTION MIX");
            for (name, count) in rows {
                let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
        }
        let _ = write!(out, "==========================================================");
        out
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sections(&[]))
    }
}
