//! Instruction field and immediate decoding.
//!
//! Splits a 32-bit encoding into its register, function-code and immediate
//! fields. Immediates are reassembled per format and sign-extended from their
//! top bit:
//!
//! | Format | Layout                                                | Width |
//! |--------|-------------------------------------------------------|-------|
//! | I      | `imm[11:0] rs1 funct3 rd opcode`                      | 12    |
//! | S      | `imm[11:5] rs2 rs1 funct3 imm[4:0] opcode`            | 12    |
//! | B      | `imm[12|10:5] rs2 rs1 funct3 imm[4:1|11] opcode`      | 13    |
//! | U      | `imm[31:12] rd opcode`                                | 32    |
//! | J      | `imm[20|10:1|11|19:12] rd opcode`                     | 21    |

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of an instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Immediate encoding formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmFormat {
    /// Register-register (no immediate).
    R,
    /// Loads, JALR and immediate arithmetic.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// LUI and AUIPC.
    U,
    /// JAL.
    J,
}

impl ImmFormat {
    /// Returns the immediate format implied by a major opcode.
    pub const fn of(opcode: u32) -> Self {
        match opcode {
            opcodes::OP_LOAD | opcodes::OP_IMM | opcodes::OP_JALR | opcodes::OP_SYSTEM => Self::I,
            opcodes::OP_STORE => Self::S,
            opcodes::OP_BRANCH => Self::B,
            opcodes::OP_LUI | opcodes::OP_AUIPC => Self::U,
            opcodes::OP_JAL => Self::J,
            _ => Self::R,
        }
    }
}

/// Decodes an instruction into its component fields.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
///
/// # Returns
///
/// A [`Decoded`] record with the immediate already sign-extended.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm: immediate(inst, ImmFormat::of(opcode)),
    }
}

/// Extracts and sign-extends the immediate of `inst` for the given format.
pub fn immediate(inst: u32, format: ImmFormat) -> i32 {
    match format {
        ImmFormat::R => 0,
        ImmFormat::I => (inst as i32) >> 20,
        ImmFormat::S => {
            let imm = (field(inst, 25, 7) << 5) | field(inst, 7, 5);
            sign_extend(imm, 12)
        }
        ImmFormat::B => {
            let imm = (field(inst, 31, 1) << 12)
                | (field(inst, 7, 1) << 11)
                | (field(inst, 25, 6) << 5)
                | (field(inst, 8, 4) << 1);
            sign_extend(imm, 13)
        }
        ImmFormat::U => (inst & 0xFFFF_F000) as i32,
        ImmFormat::J => {
            let imm = (field(inst, 31, 1) << 20)
                | (field(inst, 12, 8) << 12)
                | (field(inst, 20, 1) << 11)
                | (field(inst, 21, 10) << 1);
            sign_extend(imm, 21)
        }
    }
}

/// Extracts `width` bits of `inst` starting at bit `lsb`.
#[inline(always)]
const fn field(inst: u32, lsb: u32, width: u32) -> u32 {
    (inst >> lsb) & ((1 << width) - 1)
}

/// Sign-extends the low `bits` bits of `val`.
#[inline(always)]
const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val << shift) as i32) >> shift
}
