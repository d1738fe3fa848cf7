//! Branch Resolution Unit (BRU).
//!
//! Decides, in the Execute stage, whether a control-transfer instruction is
//! taken and where it goes. The pipeline fetches sequentially, so every taken
//! decision is a redirect that squashes the wrong-path instructions behind it.

use crate::core::pipeline::signals::{BranchType, ControlSignals, TargetSrc};

/// Bit cleared from indirect jump targets.
const JALR_TARGET_MASK: u32 = !1;

/// Outcome of resolving one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The instruction transfers control.
    pub taken: bool,
    /// Destination when `taken`.
    pub target: u32,
}

/// Branch Resolution Unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchUnit;

impl BranchUnit {
    /// Evaluates a conditional branch comparison.
    ///
    /// # Arguments
    ///
    /// * `kind` - The comparison to perform.
    /// * `a`    - Value of rs1 (possibly forwarded).
    /// * `b`    - Value of rs2 (possibly forwarded).
    pub const fn condition(kind: BranchType, a: u32, b: u32) -> bool {
        match kind {
            BranchType::Eq => a == b,
            BranchType::Ne => a != b,
            BranchType::Lt => (a as i32) < (b as i32),
            BranchType::Ge => (a as i32) >= (b as i32),
            BranchType::Ltu => a < b,
            BranchType::Geu => a >= b,
        }
    }

    /// Resolves the control-transfer behavior of an instruction.
    ///
    /// Jumps are always taken. Conditional branches compare the two source
    /// operands. Anything else falls through.
    ///
    /// # Arguments
    ///
    /// * `ctrl` - Control signals of the instruction.
    /// * `pc`   - Program counter of the instruction.
    /// * `imm`  - Sign-extended immediate.
    /// * `rs1`  - Value of rs1 (possibly forwarded).
    /// * `rs2`  - Value of rs2 (possibly forwarded).
    /// * `alu`  - ALU result, used as the target of indirect jumps.
    pub const fn resolve(
        ctrl: &ControlSignals,
        pc: u32,
        imm: i32,
        rs1: u32,
        rs2: u32,
        alu: u32,
    ) -> Resolution {
        let taken = ctrl.jump || (ctrl.branch && Self::condition(ctrl.branch_type, rs1, rs2));
        if !taken {
            return Resolution {
                taken: false,
                target: 0,
            };
        }
        let target = match ctrl.target {
            TargetSrc::PcRelative => pc.wrapping_add(imm as u32),
            TargetSrc::Alu => alu & JALR_TARGET_MASK,
        };
        Resolution {
            taken: true,
            target,
        }
    }
}
