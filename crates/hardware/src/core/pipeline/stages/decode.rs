//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It
//! performs the following:
//! 1. **Control Generation:** Maps the opcode and function fields to a
//!    [`ControlSignals`] bundle.
//! 2. **Operand Read:** Reads `rs1` and `rs2` from the register file, seeing a
//!    write-back that lands in the same tick.
//! 3. **Latch Fill:** Packs everything the execute stage needs into ID/EX.
//!
//! Encodings outside RV32I (unknown opcodes, reserved function codes, `FENCE`,
//! `SYSTEM` and M-extension instructions) decode to the default control bundle,
//! which has no architectural effect.

use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::{IdEx, IdExEntry, IfId};
use crate::core::pipeline::signals::{
    AluOp, BranchType, ControlSignals, MemWidth, OpASrc, OpBSrc, TargetSrc, WbSrc,
};
use crate::core::pipeline::stages::writeback::RegWrite;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Produces the control signals of a decoded instruction.
///
/// Illegal or unmodeled encodings yield [`ControlSignals::default`].
pub fn control(d: &Decoded) -> ControlSignals {
    classify(d).unwrap_or_default()
}

fn classify(d: &Decoded) -> Option<ControlSignals> {
    let imm_op = ControlSignals {
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Imm,
        alu: AluOp::Add,
        ..Default::default()
    };

    let c = match d.opcode {
        opcodes::OP_LUI => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Zero,
            ..imm_op
        },
        opcodes::OP_AUIPC => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Pc,
            ..imm_op
        },
        opcodes::OP_JAL => ControlSignals {
            reg_write: true,
            jump: true,
            target: TargetSrc::PcRelative,
            wb_src: WbSrc::PcPlus4,
            a_src: OpASrc::Pc,
            ..imm_op
        },
        opcodes::OP_JALR if d.funct3 == funct3::JALR => ControlSignals {
            reg_write: true,
            jump: true,
            target: TargetSrc::Alu,
            wb_src: WbSrc::PcPlus4,
            uses_rs1: true,
            ..imm_op
        },
        opcodes::OP_BRANCH => ControlSignals {
            branch: true,
            branch_type: branch_type(d.funct3)?,
            target: TargetSrc::PcRelative,
            alu: AluOp::Sub,
            b_src: OpBSrc::Reg2,
            uses_rs1: true,
            uses_rs2: true,
            ..Default::default()
        },
        opcodes::OP_LOAD => ControlSignals {
            reg_write: true,
            mem_read: true,
            wb_src: WbSrc::Mem,
            width: match d.funct3 {
                funct3::LB => MemWidth::Byte,
                funct3::LH => MemWidth::Half,
                funct3::LW => MemWidth::Word,
                funct3::LBU => MemWidth::ByteUnsigned,
                funct3::LHU => MemWidth::HalfUnsigned,
                _ => return None,
            },
            uses_rs1: true,
            ..imm_op
        },
        opcodes::OP_STORE => ControlSignals {
            mem_write: true,
            width: match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return None,
            },
            uses_rs1: true,
            uses_rs2: true,
            ..imm_op
        },
        opcodes::OP_IMM => ControlSignals {
            reg_write: true,
            alu: match (d.funct3, d.funct7) {
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::ALT) => AluOp::Sra,
                (funct3::SLL | funct3::SRL_SRA, _) => return None,
                (f3, _) => arith_op(f3, funct7::DEFAULT)?,
            },
            uses_rs1: true,
            ..imm_op
        },
        opcodes::OP_REG => ControlSignals {
            reg_write: true,
            alu: arith_op(d.funct3, d.funct7)?,
            b_src: OpBSrc::Reg2,
            uses_rs1: true,
            uses_rs2: true,
            ..imm_op
        },
        _ => return None,
    };
    Some(c)
}

/// Maps a register-register `(funct3, funct7)` pair to its ALU operation.
const fn arith_op(f3: u32, f7: u32) -> Option<AluOp> {
    let op = match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
        (funct3::ADD_SUB, funct7::ALT) => AluOp::Sub,
        (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
        (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
        (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
        (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
        (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
        (funct3::SRL_SRA, funct7::ALT) => AluOp::Sra,
        (funct3::OR, funct7::DEFAULT) => AluOp::Or,
        (funct3::AND, funct7::DEFAULT) => AluOp::And,
        _ => return None,
    };
    Some(op)
}

const fn branch_type(f3: u32) -> Option<BranchType> {
    let kind = match f3 {
        funct3::BEQ => BranchType::Eq,
        funct3::BNE => BranchType::Ne,
        funct3::BLT => BranchType::Lt,
        funct3::BGE => BranchType::Ge,
        funct3::BLTU => BranchType::Ltu,
        funct3::BGEU => BranchType::Geu,
        _ => return None,
    };
    Some(kind)
}

/// Reads a register, letting a same-tick write-back win over the stored value.
fn read_operand(regs: &RegisterFile, idx: usize, wb: Option<RegWrite>) -> u32 {
    match wb {
        Some(w) if w.rd == idx && idx != 0 => w.value,
        _ => regs.read(idx),
    }
}

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `if_id` - The IF/ID latch holding the instruction to decode.
/// * `regs` - The architectural register file, before this tick's write.
/// * `wb` - The write-back committed in the same tick, if any.
///
/// # Returns
///
/// The ID/EX value for the next tick; a bubble when IF/ID is empty.
pub fn decode_stage(if_id: &IfId, regs: &RegisterFile, wb: Option<RegWrite>) -> IdEx {
    let Some(fetched) = if_id.instruction() else {
        return IdEx::bubble();
    };

    let d = decode(fetched.inst);
    let ctrl = control(&d);
    IdEx::occupied(IdExEntry {
        pc: fetched.pc,
        inst: fetched.inst,
        rs1: d.rs1,
        rs2: d.rs2,
        rd: d.rd,
        imm: d.imm,
        rv1: read_operand(regs, d.rs1, wb),
        rv2: read_operand(regs, d.rs2, wb),
        ctrl,
    })
}
