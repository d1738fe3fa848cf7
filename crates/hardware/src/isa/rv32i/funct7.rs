//! RV32I Function Codes (funct7, bits 31-25).

/// Default operation (ADD, SRL, SLLI, ...).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation: SUB instead of ADD, SRA/SRAI instead of SRL/SRLI.
pub const ALT: u32 = 0b0100000;
