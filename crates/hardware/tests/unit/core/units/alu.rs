//! ALU Operation Tests.
//!
//! Boundary values for every operation the decoder can select.

use proptest::prelude::*;
use rstest::rstest;
use rvpipe_core::core::pipeline::signals::AluOp;
use rvpipe_core::core::units::alu::Alu;

// ─── Constants ───────────────────────────────────────────────────────────────

const NEG1: u32 = u32::MAX;
const I32_MAX: u32 = i32::MAX as u32;
const I32_MIN: u32 = i32::MIN as u32;

fn alu(op: AluOp, a: u32, b: u32) -> u32 {
    Alu::execute(op, a, b).value
}

// ═════════════════════════════════════════════════════════════════════════════
//  Arithmetic
// ═════════════════════════════════════════════════════════════════════════════

#[rstest]
#[case(0, 0, 0)]
#[case(1, NEG1, 0)]
#[case(I32_MAX, 1, I32_MIN)]
#[case(NEG1, NEG1, 0xFFFF_FFFE)]
fn add_wraps(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(alu(AluOp::Add, a, b), expected);
}

#[rstest]
#[case(0, 1, NEG1)]
#[case(I32_MIN, 1, I32_MAX)]
#[case(5, 5, 0)]
fn sub_wraps(#[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(alu(AluOp::Sub, a, b), expected);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Logic and comparison
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn bitwise() {
    assert_eq!(alu(AluOp::And, 0xAAAA_AAAA, 0x5555_5555), 0);
    assert_eq!(alu(AluOp::Or, 0xAAAA_AAAA, 0x5555_5555), NEG1);
    assert_eq!(alu(AluOp::Xor, NEG1, 0x0F0F_0F0F), 0xF0F0_F0F0);
}

#[rstest]
#[case(I32_MIN, I32_MAX, 1, 0)]
#[case(NEG1, 0, 1, 0)]
#[case(0, NEG1, 0, 1)]
#[case(3, 3, 0, 0)]
fn set_less_than(#[case] a: u32, #[case] b: u32, #[case] signed: u32, #[case] unsigned: u32) {
    assert_eq!(alu(AluOp::Slt, a, b), signed);
    assert_eq!(alu(AluOp::Sltu, a, b), unsigned);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Shifts
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn shift_amount_uses_low_five_bits() {
    assert_eq!(alu(AluOp::Sll, 1, 32), 1);
    assert_eq!(alu(AluOp::Sll, 1, 0xFFFF_FFE1), 2);
    assert_eq!(alu(AluOp::Srl, I32_MIN, 63), 1);
}

#[test]
fn arithmetic_shift_replicates_sign() {
    assert_eq!(alu(AluOp::Sra, I32_MIN, 31), NEG1);
    assert_eq!(alu(AluOp::Sra, I32_MAX, 30), 1);
    assert_eq!(alu(AluOp::Srl, I32_MIN, 31), 1);
}

#[test]
fn zero_flag_tracks_result() {
    assert!(Alu::execute(AluOp::Sub, 7, 7).zero);
    assert!(!Alu::execute(AluOp::Sub, 7, 6).zero);
}

proptest! {
    #[test]
    fn add_sub_inverse(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Sub, alu(AluOp::Add, a, b), b), a);
    }

    #[test]
    fn shifts_match_native(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(alu(AluOp::Sll, a, b), a << (b & 31));
        prop_assert_eq!(alu(AluOp::Srl, a, b), a >> (b & 31));
        prop_assert_eq!(alu(AluOp::Sra, a, b), ((a as i32) >> (b & 31)) as u32);
    }
}
