//! Arithmetic Logic Unit (ALU).
//!
//! The 32-bit integer ALU used in the Execute stage. Operations are organized
//! into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//!
//! Division-class operations are outside the modeled operation set; the
//! decoder never produces them.

/// Integer addition and subtraction.
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Output of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluResult {
    /// 32-bit result.
    pub value: u32,
    /// Set when `value` is zero.
    pub zero: bool,
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount, low five bits used)
    ///
    /// # Returns
    ///
    /// The result together with its zero flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::Alu;
    /// use rvpipe_core::core::pipeline::signals::AluOp;
    ///
    /// let r = Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1);
    /// assert_eq!(r.value, 0);
    /// assert!(r.zero);
    ///
    /// let r = Alu::execute(AluOp::Slt, -5_i32 as u32, 10);
    /// assert_eq!(r.value, 1);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> AluResult {
        let value = match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        };
        AluResult {
            value,
            zero: value == 0,
        }
    }
}
