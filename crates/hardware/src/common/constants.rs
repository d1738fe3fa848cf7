//! Global Constants.
//!
//! This module defines the fixed architectural parameters of the modeled core. It includes:
//! 1. **Reset State:** The program counter value forced by reset.
//! 2. **Instruction Constants:** Instruction width and well-known encodings.
//! 3. **Data Path Constants:** Register count and data-bus lane geometry.

/// Program counter value after reset.
pub const RESET_PC: u32 = 0;

/// Size of every instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical no-operation encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// `jal x0, 0`: an unconditional jump to itself, used as the halt idiom.
pub const JAL_SELF: u32 = 0x0000_006F;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Number of byte lanes on the 32-bit data bus.
pub const BYTE_LANES: u32 = 4;

/// Mask selecting the byte offset of an address within its word.
pub const WORD_OFFSET_MASK: u32 = BYTE_LANES - 1;

/// Byte-enable mask with every lane active.
pub const BYTE_ENABLE_ALL: u8 = 0b1111;
