//! Pipeline control signals and operation types.
//!
//! This module defines the signals that steer an instruction through the pipeline:
//! 1. **Operation Classification:** The ALU operation and branch condition.
//! 2. **Operand Selection:** Sources for the ALU inputs (registers, PC, zero or immediate).
//! 3. **Memory Control:** Access width and sign-extension of loads.
//! 4. **Result Routing:** Which value reaches the register file, and where forwarded
//!    operands come from.
//!
//! Every multi-way selector is a closed enum so that encodings with no meaning in
//! hardware cannot be constructed.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation and pass-through).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Value of source register 1 (possibly forwarded).
    #[default]
    Reg1,
    /// Program counter of the instruction (AUIPC, JAL).
    Pc,
    /// Constant zero (LUI).
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Value of source register 2 (possibly forwarded).
    #[default]
    Reg2,
    /// Sign-extended immediate.
    Imm,
}

/// Conditional branch comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchType {
    /// Taken when the operands are equal.
    #[default]
    Eq,
    /// Taken when the operands differ.
    Ne,
    /// Taken when rs1 < rs2 (signed).
    Lt,
    /// Taken when rs1 >= rs2 (signed).
    Ge,
    /// Taken when rs1 < rs2 (unsigned).
    Ltu,
    /// Taken when rs1 >= rs2 (unsigned).
    Geu,
}

/// Where a taken control transfer goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetSrc {
    /// `pc + imm` (conditional branches and JAL).
    #[default]
    PcRelative,
    /// The ALU result, `rs1 + imm` with bit 0 cleared (JALR).
    Alu,
}

/// Memory access width.
///
/// Stores only ever use `Byte`, `Half` and `Word`; the unsigned variants select
/// zero extension for loads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit access, sign-extended on load.
    Byte,
    /// 8-bit access, zero-extended on load.
    ByteUnsigned,
    /// 16-bit access, sign-extended on load.
    Half,
    /// 16-bit access, zero-extended on load.
    HalfUnsigned,
    /// 32-bit access.
    #[default]
    Word,
}

impl MemWidth {
    /// Access size in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte | Self::ByteUnsigned => 1,
            Self::Half | Self::HalfUnsigned => 2,
            Self::Word => 4,
        }
    }
}

/// Value committed to the register file at write-back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WbSrc {
    /// ALU result.
    #[default]
    Alu,
    /// Formatted load data.
    Mem,
    /// Link address (`pc + 4`) of a jump.
    PcPlus4,
}

/// Source of an execute-stage operand after forwarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSel {
    /// Value read from the register file in decode.
    #[default]
    RegFile,
    /// Result of the instruction in the EX/MEM latch.
    ExMem,
    /// Write-back value of the instruction in the MEM/WB latch.
    MemWb,
}

/// Control signals produced by the decoder, one bundle per instruction.
///
/// The default bundle describes an instruction with no architectural effect:
/// nothing is written, nothing is accessed and control falls through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Comparison used when `branch` is set.
    pub branch_type: BranchType,
    /// Instruction is an unconditional jump (`JAL`/`JALR`).
    pub jump: bool,
    /// Target computation for a taken branch or jump.
    pub target: TargetSrc,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Value written back to the destination register.
    pub wb_src: WbSrc,
    /// Instruction reads `rs1`.
    pub uses_rs1: bool,
    /// Instruction reads `rs2`.
    pub uses_rs2: bool,
}

impl ControlSignals {
    /// Whether the instruction touches the data port.
    pub const fn accesses_memory(&self) -> bool {
        self.mem_read || self.mem_write
    }
}
