//! RV32I Base Integer Instruction Set.
//!
//! - `opcodes`: Major opcodes (bits 6-0).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Additional opcode bits for register-register and shift instructions.

/// Function code 3 definitions.
pub mod funct3;

/// Function code 7 definitions.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
