//! Instruction Set Architecture (ISA) Definitions.
//!
//! Opcodes, function codes, field extraction and decoding for the RV32I base
//! integer instruction set, plus the disassembler used by traces.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Field and immediate decoding for all instruction formats.
pub mod decode;

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Instruction field extraction and the decoded-instruction record.
pub mod instruction;

/// Base integer instruction set (RV32I) encodings.
pub mod rv32i;
