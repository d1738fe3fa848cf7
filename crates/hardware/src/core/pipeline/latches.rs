//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the four pipeline registers of the five-stage pipeline
//! (Fetch → Decode → Execute → Memory → Writeback):
//!
//! 1. **Valid bit:** Every register pairs its payload with a `valid` flag. A clear
//!    flag marks a bubble inserted by reset, a stall or a branch squash.
//! 2. **Stage payloads:** One entry type per boundary, carrying exactly the state
//!    the downstream stage consumes.
//! 3. **Snapshot:** [`PipelineState`] groups the four registers so the controller
//!    can read the pre-tick state as one immutable value and commit the next one
//!    in a single assignment.

use std::fmt;

use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::traits::{LatchEntry, PipelineLatch};

/// A single pipeline register: a payload plus its valid bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineRegister<T> {
    /// Whether the register holds a real instruction.
    pub valid: bool,
    /// Stage payload. Meaningless when `valid` is clear.
    pub entry: T,
}

impl<T: LatchEntry> PipelineRegister<T> {
    /// An empty slot.
    pub fn bubble() -> Self {
        Self {
            valid: false,
            entry: T::default(),
        }
    }

    /// A slot holding a real instruction.
    pub const fn occupied(entry: T) -> Self {
        Self { valid: true, entry }
    }

    /// A slot whose validity is computed by the producing stage.
    pub const fn with_valid(entry: T, valid: bool) -> Self {
        Self { valid, entry }
    }

    /// Returns the payload when the slot is valid.
    pub const fn instruction(&self) -> Option<&T> {
        if self.valid { Some(&self.entry) } else { None }
    }
}

impl<T: LatchEntry> PipelineLatch for PipelineRegister<T> {
    fn flush(&mut self) {
        *self = Self::bubble();
    }

    fn is_bubble(&self) -> bool {
        !self.valid
    }

    fn occupant_pc(&self) -> Option<u32> {
        self.instruction().map(LatchEntry::pc)
    }
}

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding returned by the instruction port.
    pub inst: u32,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Contains decoded instruction information, including register indices,
/// immediate value, the register-file read values and control signals.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// First source register index (rs1).
    pub rs1: usize,
    /// Second source register index (rs2).
    pub rs2: usize,
    /// Destination register index (rd).
    pub rd: usize,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Value read from rs1 in decode.
    pub rv1: u32,
    /// Value read from rs2 in decode.
    pub rv2: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result (effective address for loads and stores).
    pub alu: u32,
    /// Forwarded rs2 value, the payload of a store.
    pub store_data: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result.
    pub alu: u32,
    /// Load data after lane extraction and extension.
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
}

macro_rules! impl_latch_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LatchEntry for $ty {
                #[inline]
                fn pc(&self) -> u32 {
                    self.pc
                }

                #[inline]
                fn inst(&self) -> u32 {
                    self.inst
                }
            }
        )*
    };
}

impl_latch_entry!(IfIdEntry, IdExEntry, ExMemEntry, MemWbEntry);

/// IF/ID pipeline register.
pub type IfId = PipelineRegister<IfIdEntry>;
/// ID/EX pipeline register.
pub type IdEx = PipelineRegister<IdExEntry>;
/// EX/MEM pipeline register.
pub type ExMem = PipelineRegister<ExMemEntry>;
/// MEM/WB pipeline register.
pub type MemWb = PipelineRegister<MemWbEntry>;

/// The four pipeline registers, read as one snapshot and committed as one value.
///
/// The default state is the reset state: all four slots hold bubbles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Fetch to Decode.
    pub if_id: IfId,
    /// Decode to Execute.
    pub id_ex: IdEx,
    /// Execute to Memory.
    pub ex_mem: ExMem,
    /// Memory to Writeback.
    pub mem_wb: MemWb,
}

impl PipelineState {
    /// Replaces every slot with a bubble.
    pub fn flush_all(&mut self) {
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
    }

    /// Whether every slot holds a bubble.
    pub fn is_drained(&self) -> bool {
        self.if_id.is_bubble()
            && self.id_ex.is_bubble()
            && self.ex_mem.is_bubble()
            && self.mem_wb.is_bubble()
    }

    /// PC held by each slot, youngest first (IF/ID, ID/EX, EX/MEM, MEM/WB).
    pub fn occupancy(&self) -> [Option<u32>; 4] {
        [
            self.if_id.occupant_pc(),
            self.id_ex.occupant_pc(),
            self.ex_mem.occupant_pc(),
            self.mem_wb.occupant_pc(),
        ]
    }
}

impl fmt::Display for PipelineState {
    /// One-line occupancy diagram, e.g. `ID:00000010 EX:-------- ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABELS: [&str; 4] = ["ID", "EX", "MEM", "WB"];
        for (i, (label, pc)) in LABELS.iter().zip(self.occupancy()).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match pc {
                Some(pc) => write!(f, "{label}:{pc:08x}")?,
                None => write!(f, "{label}:--------")?,
            }
        }
        Ok(())
    }
}
