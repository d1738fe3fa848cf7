//! SimStats unit tests.
//!
//! Derived metrics, retirement classification and report rendering, plus the
//! counters a small mixed program leaves behind.

use pretty_assertions::assert_eq;
use rvpipe_core::core::pipeline::signals::ControlSignals;
use rvpipe_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::TestContext;
use crate::common::builder::instruction::inst;

#[test]
fn ratios_are_zero_before_any_work() {
    let stats = SimStats::default();
    assert!(stats.ipc().abs() < f64::EPSILON);
    assert!(stats.cpi().abs() < f64::EPSILON);
}

#[test]
fn ipc_and_cpi() {
    let mut stats = SimStats::default();
    stats.cycles = 200;
    stats.instructions_retired = 100;
    assert!((stats.ipc() - 0.5).abs() < f64::EPSILON);
    assert!((stats.cpi() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn retire_classification_prefers_memory_then_control() {
    let mut stats = SimStats::default();
    stats.record_retire(&ControlSignals {
        mem_read: true,
        reg_write: true,
        ..Default::default()
    });
    stats.record_retire(&ControlSignals {
        jump: true,
        reg_write: true,
        ..Default::default()
    });
    stats.record_retire(&ControlSignals::default());

    assert_eq!(stats.instructions_retired, 3);
    assert_eq!((stats.inst_load, stats.inst_jump, stats.inst_nop), (1, 1, 1));
    assert_eq!(stats.inst_alu, 0);
}

#[test]
fn mixed_program_counters() {
    let mut ctx = TestContext::new().load_program(&[
        inst().addi(1, 0, 5).build(),
        inst().sw(0, 1, 0x100).build(),
        inst().lw(2, 0, 0x100).build(),
        inst().beq(0, 0, 8).build(),
        inst().addi(3, 0, 1).build(),
        0x0FF0_000F,
        inst().halt().build(),
    ]);

    let (summary, _) = ctx.run_to_halt();
    let s = ctx.stats();

    assert_eq!(summary.retired, 6);
    assert_eq!(summary.cycles, 12);
    assert_eq!(
        (s.inst_alu, s.inst_store, s.inst_load, s.inst_branch, s.inst_nop, s.inst_jump),
        (1, 1, 1, 1, 1, 1)
    );
    assert_eq!(s.branches_taken, 2);
    assert_eq!(s.squashed, 2);
    assert_eq!(s.stalls_data, 0);
    assert_eq!(s.forwards_ex_mem, 1, "sw takes x1 from the addi ahead of it");
    assert_eq!(ctx.get_reg(2), 5);
}

#[test]
fn full_report_has_every_section() {
    let report = SimStats::default().to_string();

    for needle in ["sim_cycles", "HAZARDS", "stalls.load_use", "INSTRUCTION MIX", "op.alu"] {
        assert!(report.contains(needle), "missing {needle}");
    }
}

#[test]
fn report_sections_can_be_selected() {
    let stats = SimStats::default();

    let hazards = stats.render_sections(&["hazards"]);
    assert!(hazards.contains("forward.ex_mem"));
    assert!(!hazards.contains("sim_ipc"));
    assert!(!hazards.contains("INSTRUCTION MIX"));

    assert_eq!(
        stats.render_sections(&[]).lines().count(),
        stats.render_sections(STATS_SECTIONS).lines().count()
    );
}
