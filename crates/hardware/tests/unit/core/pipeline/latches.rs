//! Pipeline Register Tests.

use pretty_assertions::assert_eq;
use rvpipe_core::core::pipeline::latches::{ExMem, IdEx, IfId, IfIdEntry, MemWb, PipelineState};
use rvpipe_core::core::pipeline::traits::PipelineLatch;

use crate::common::builder::pipeline_state::{ExMemBuilder, IdExBuilder, IfIdBuilder, MemWbBuilder};

#[test]
fn default_is_a_bubble() {
    assert_eq!(IfId::default(), IfId::bubble());
    assert!(IdEx::default().is_bubble());
    assert!(PipelineState::default().is_drained());
}

#[test]
fn instruction_hidden_behind_valid_bit() {
    let entry = IfIdEntry { pc: 0x40, inst: 0x13 };

    assert_eq!(IfId::occupied(entry).instruction(), Some(&entry));
    assert_eq!(IfId::with_valid(entry, false).instruction(), None);
    assert_eq!(IfId::with_valid(entry, false).occupant_pc(), None);
    assert_eq!(IfId::occupied(entry).occupant_pc(), Some(0x40));
}

#[test]
fn flush_clears_payload_and_valid_bit() {
    let mut slot = ExMemBuilder::new().pc(8).rd(3).alu(99).build();
    slot.flush();

    assert_eq!(slot, ExMem::bubble());
}

fn full_pipeline() -> PipelineState {
    PipelineState {
        if_id: IfIdBuilder::new().pc(0x10).build(),
        id_ex: IdExBuilder::new().pc(0x0C).build(),
        ex_mem: ExMem::bubble(),
        mem_wb: MemWbBuilder::new().pc(0x04).build(),
    }
}

#[test]
fn occupancy_lists_youngest_first() {
    assert_eq!(full_pipeline().occupancy(), [Some(0x10), Some(0x0C), None, Some(0x04)]);
}

#[test]
fn flush_all_drains() {
    let mut state = full_pipeline();
    assert!(!state.is_drained());

    state.flush_all();

    assert!(state.is_drained());
    assert_eq!(state.mem_wb, MemWb::bubble());
}

#[test]
fn display_shows_one_column_per_slot() {
    assert_eq!(
        full_pipeline().to_string(),
        "ID:00000010 EX:0000000c MEM:-------- WB:00000004"
    );
}
