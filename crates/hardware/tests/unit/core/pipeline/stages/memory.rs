//! Memory stage: request formation and load formatting.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::core::pipeline::latches::ExMem;
use rvpipe_core::core::pipeline::signals::{ControlSignals, MemWidth, WbSrc};
use rvpipe_core::core::pipeline::stages::memory::{data_request, mem_stage};
use rvpipe_core::soc::traits::{DataRequest, PortResponse};

use crate::common::builder::pipeline_state::{ExMemBuilder, alu_ctrl};

fn load(width: MemWidth, addr: u32) -> ExMem {
    ExMemBuilder::new()
        .pc(0x10)
        .rd(5)
        .alu(addr)
        .control(ControlSignals {
            mem_read: true,
            reg_write: true,
            wb_src: WbSrc::Mem,
            width,
            ..Default::default()
        })
        .build()
}

fn store(width: MemWidth, addr: u32, data: u32) -> ExMem {
    ExMemBuilder::new()
        .alu(addr)
        .store_data(data)
        .control(ControlSignals {
            mem_write: true,
            width,
            ..Default::default()
        })
        .build()
}

// ══════════════════════════════════════════════════════════
// 1. Requests
// ══════════════════════════════════════════════════════════

#[test]
fn no_request_without_memory_access() {
    assert_eq!(data_request(&ExMem::bubble()), None);
    let alu = ExMemBuilder::new().alu(0x100).control(alu_ctrl()).build();
    assert_eq!(data_request(&alu), None);
}

#[test]
fn word_load_request() {
    let req = data_request(&load(MemWidth::Word, 0x204));

    assert_eq!(
        req,
        Some(DataRequest {
            addr: 0x204,
            wdata: 0,
            byte_enable: 0b1111,
            read: true,
            write: false,
        })
    );
}

#[rstest]
#[case::byte_lane_0(MemWidth::Byte, 0x200, 0x0000_00AB, 0x200, 0b0001, 0xABAB_ABAB)]
#[case::byte_lane_3(MemWidth::Byte, 0x203, 0x1234_56AB, 0x200, 0b1000, 0xABAB_ABAB)]
#[case::half_upper(MemWidth::Half, 0x202, 0xFFFF_BEEF, 0x200, 0b1100, 0xBEEF_BEEF)]
#[case::half_misaligned(MemWidth::Half, 0x203, 0x0000_BEEF, 0x200, 0b1100, 0xBEEF_BEEF)]
#[case::word_misaligned(MemWidth::Word, 0x206, 0x0102_0304, 0x204, 0b1111, 0x0102_0304)]
fn store_requests(
    #[case] width: MemWidth,
    #[case] addr: u32,
    #[case] data: u32,
    #[case] bus_addr: u32,
    #[case] byte_enable: u8,
    #[case] wdata: u32,
) {
    let Some(req) = data_request(&store(width, addr, data)) else {
        panic!("store issued no request");
    };

    assert_eq!(req.addr, bus_addr);
    assert_eq!(req.byte_enable, byte_enable);
    assert_eq!(req.wdata, wdata);
    assert!(req.write && !req.read);
}

// ══════════════════════════════════════════════════════════
// 2. Responses
// ══════════════════════════════════════════════════════════

#[test]
fn not_ready_yields_bubble() {
    let out = mem_stage(&load(MemWidth::Word, 0x200), Some(PortResponse::not_ready()));
    assert!(!out.valid);
}

#[rstest]
#[case::lb(MemWidth::Byte, 0x201, 0x0000_8000, 0xFFFF_FF80)]
#[case::lbu(MemWidth::ByteUnsigned, 0x201, 0x0000_8000, 0x0000_0080)]
#[case::lh(MemWidth::Half, 0x202, 0x8001_0000, 0xFFFF_8001)]
#[case::lhu(MemWidth::HalfUnsigned, 0x202, 0x8001_0000, 0x0000_8001)]
#[case::lw(MemWidth::Word, 0x200, 0xCAFE_BABE, 0xCAFE_BABE)]
fn ready_load_is_extracted(
    #[case] width: MemWidth,
    #[case] addr: u32,
    #[case] bus: u32,
    #[case] expected: u32,
) {
    let out = mem_stage(&load(width, addr), Some(PortResponse::ready(bus)));

    assert!(out.valid);
    assert_eq!(out.entry.load_data, expected);
    assert_eq!(out.entry.rd, 5);
    assert_eq!(out.entry.pc, 0x10);
}

#[test]
fn alu_result_passes_through() {
    let slot = ExMemBuilder::new().rd(3).alu(77).control(alu_ctrl()).build();

    let out = mem_stage(&slot, None);

    assert!(out.valid);
    assert_eq!(out.entry.alu, 77);
    assert_eq!(out.entry.load_data, 0);
}
