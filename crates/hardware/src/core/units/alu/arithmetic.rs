//! ALU arithmetic operations.
//!
//! Two's-complement addition and subtraction with wrap-around; overflow is
//! not detected.

use crate::core::pipeline::signals::AluOp;

/// Executes an arithmetic operation. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => 0,
    }
}
