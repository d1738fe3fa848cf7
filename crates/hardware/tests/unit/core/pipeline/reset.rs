//! Synchronous Reset Tests.
//!
//! Reset is sampled at every tick. While asserted it forces the PC to the
//! reset vector and every slot to a bubble, touches neither port, and leaves
//! the register file alone.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::common::RESET_PC;
use rvpipe_core::core::Cpu;

use crate::common::TestContext;
use crate::common::builder::instruction::inst;
use crate::common::mocks::MockPorts;

fn sum_loop() -> TestContext {
    TestContext::new().load_program(&[
        inst().addi(1, 0, 10).build(),
        inst().addi(2, 0, 0).build(),
        inst().add(2, 2, 1).build(),
        inst().addi(1, 1, -1).build(),
        inst().bne(1, 0, -8).build(),
        inst().halt().build(),
    ])
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(7)]
#[case(20)]
fn reset_returns_to_vector_with_empty_pipeline(#[case] cycles: u64) {
    let mut ctx = sum_loop();
    ctx.run(cycles);
    let regs = ctx.cpu().regs.snapshot();

    ctx.sim.reset();

    assert_eq!(ctx.cpu().pc, RESET_PC);
    assert!(ctx.cpu().pipeline.is_drained());
    assert_eq!(ctx.cpu().regs.snapshot(), regs, "register file untouched");
    assert_eq!(ctx.cpu().last_retired(), None);
    assert_eq!(ctx.stats().reset_cycles, 1);
    assert!(!ctx.cpu().reset_asserted(), "released after one tick");
}

#[test]
fn holding_reset_is_idempotent() {
    let mut ctx = sum_loop();
    ctx.run(6);

    ctx.cpu_mut().set_reset(true);
    ctx.run(1);
    let once = (ctx.cpu().pc, ctx.cpu().pipeline, ctx.cpu().regs.snapshot());
    ctx.run(4);
    let held = (ctx.cpu().pc, ctx.cpu().pipeline, ctx.cpu().regs.snapshot());

    assert_eq!(once, held);
    assert_eq!(ctx.stats().reset_cycles, 5);
}

#[test]
fn program_restarts_after_reset() {
    let mut ctx = sum_loop();
    ctx.run(15);

    ctx.sim.reset();
    let pcs = ctx.retired_pcs();

    assert_eq!(pcs[0], 0, "the first retirement after reset is the reset-vector instruction");
    assert_eq!(ctx.get_reg(2), 55);
}

#[test]
fn reset_cycles_count_toward_total() {
    let mut ctx = TestContext::new().load_program(&[inst().halt().build()]);
    ctx.sim.reset();
    ctx.sim.reset();

    let (summary, _) = ctx.run_to_halt();

    assert_eq!(summary.cycles, 2 + 5);
    assert_eq!(ctx.stats().reset_cycles, 2);
}

#[test]
fn ports_are_idle_during_reset() {
    let mut ports = MockPorts::new();
    let _ = ports.expect_fetch().never();
    let _ = ports.expect_access().never();

    let mut cpu = Cpu::new();
    cpu.set_reset(true);
    for _ in 0..5 {
        cpu.tick(&mut ports);
    }

    assert_eq!(cpu.pc, RESET_PC);
    assert_eq!(cpu.stats.cycles, 5);
}
