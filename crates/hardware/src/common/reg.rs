//! Architectural Register File.
//!
//! Thirty-two 32-bit integer registers with `x0` hardwired to zero. Reads of
//! index 0 always return zero and writes to it are discarded, so the invariant
//! holds no matter what the pipeline attempts to write.
//!
//! Reset does not touch this structure. Registers are zero only when a new file
//! is constructed; after a reset they keep whatever the program left in them.

use std::fmt;

use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// The integer register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    ///
    /// # Returns
    ///
    /// The 32-bit register value, or 0 for `x0` and out-of-range indices.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == abi::REG_ZERO {
            return 0;
        }
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == abi::REG_ZERO {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        let mut regs = self.regs;
        regs[abi::REG_ZERO] = 0;
        regs
    }
}

impl fmt::Display for RegisterFile {
    /// Dumps the register file as four columns of `name: value` pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_REGS / 4 {
            for col in 0..4 {
                let idx = row + col * (NUM_REGS / 4);
                write!(
                    f,
                    "{:>4} (x{:<2}): {:#010x}   ",
                    abi::name(idx),
                    idx,
                    self.read(idx)
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
