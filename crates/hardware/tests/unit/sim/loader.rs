//! Program Loader Tests.
//!
//! ELF images are assembled by hand: a 52-byte ELF32 header, program headers
//! starting at offset 52, then the segment contents.

use std::io::Write;

use pretty_assertions::assert_eq;
use rvpipe_core::common::SimError;
use rvpipe_core::sim::loader::{encode_jal, is_elf, load_file, load_image};
use rvpipe_core::soc::memory::Memory;
use rvpipe_core::soc::memory::controller::FixedLatency;
use rvpipe_core::{Config, Simulator};

use crate::common::builder::instruction::inst;

const EHDR_SIZE: usize = 52;
const PHDR_SIZE: usize = 32;
const EM_RISCV: u16 = 243;
const PT_LOAD: u32 = 1;
const PT_NOTE: u32 = 4;

struct Segment {
    kind: u32,
    paddr: u32,
    data: Vec<u8>,
    mem_size: u32,
}

fn segment(paddr: u32, words: &[u32]) -> Segment {
    let data: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    Segment {
        kind: PT_LOAD,
        paddr,
        mem_size: data.len() as u32,
        data,
    }
}

struct ElfImage {
    big_endian: bool,
    machine: u16,
    entry: u32,
    segments: Vec<Segment>,
}

impl ElfImage {
    fn new(entry: u32, segments: Vec<Segment>) -> Self {
        Self {
            big_endian: false,
            machine: EM_RISCV,
            entry,
            segments,
        }
    }

    fn half(&self, out: &mut Vec<u8>, v: u16) {
        if self.big_endian {
            out.extend_from_slice(&v.to_be_bytes());
        } else {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn word(&self, out: &mut Vec<u8>, v: u32) {
        if self.big_endian {
            out.extend_from_slice(&v.to_be_bytes());
        } else {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let ei_data = if self.big_endian { 2 } else { 1 };
        out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, ei_data, 1]);
        out.resize(16, 0);
        self.half(&mut out, 2);
        self.half(&mut out, self.machine);
        self.word(&mut out, 1);
        self.word(&mut out, self.entry);
        self.word(&mut out, EHDR_SIZE as u32);
        self.word(&mut out, 0);
        self.word(&mut out, 0);
        self.half(&mut out, EHDR_SIZE as u16);
        self.half(&mut out, PHDR_SIZE as u16);
        self.half(&mut out, self.segments.len() as u16);
        self.half(&mut out, 0);
        self.half(&mut out, 0);
        self.half(&mut out, 0);
        assert_eq!(out.len(), EHDR_SIZE);

        let mut offset = EHDR_SIZE + PHDR_SIZE * self.segments.len();
        for seg in &self.segments {
            self.word(&mut out, seg.kind);
            self.word(&mut out, offset as u32);
            self.word(&mut out, seg.paddr);
            self.word(&mut out, seg.paddr);
            self.word(&mut out, seg.data.len() as u32);
            self.word(&mut out, seg.mem_size);
            self.word(&mut out, 0b101);
            self.word(&mut out, 4);
            offset += seg.data.len();
        }
        for seg in &self.segments {
            out.extend_from_slice(&seg.data);
        }
        out
    }
}

fn answer_program() -> Vec<u32> {
    vec![inst().addi(10, 0, 42).build(), inst().halt().build()]
}

fn memory() -> Memory {
    Memory::new(0x4000, FixedLatency::default())
}

// ══════════════════════════════════════════════════════════
// 1. Raw images
// ══════════════════════════════════════════════════════════

#[test]
fn raw_image_loads_at_reset_vector() {
    let mut mem = memory();
    let bytes = [0x13, 0x05, 0xA0, 0x02];

    let entry = load_image(&mut mem, &bytes);

    assert!(matches!(entry, Ok(0)));
    assert_eq!(mem.read_u32(0), 0x02A0_0513);
}

#[test]
fn oversized_raw_image_is_rejected() {
    let mut mem = Memory::new(8, FixedLatency::default());
    let result = load_image(&mut mem, &[0; 12]);
    assert!(matches!(result, Err(SimError::ImageOutOfBounds { len: 12, size: 8, .. })));
}

#[test]
fn magic_detection() {
    assert!(is_elf(&ElfImage::new(0, vec![]).build()));
    assert!(!is_elf(&[0x13, 0, 0, 0]));
    assert!(!is_elf(&[]));
}

// ══════════════════════════════════════════════════════════
// 2. ELF images
// ══════════════════════════════════════════════════════════

#[test]
fn elf_at_reset_vector_runs() {
    let image = ElfImage::new(0, vec![segment(0, &answer_program())]).build();
    let mut sim = Simulator::new(&Config::default());

    let entry = sim.load(&image);
    let summary = sim.run();

    assert!(matches!(entry, Ok(0)));
    assert!(matches!(summary, Ok(s) if s.retired == 2));
    assert_eq!(sim.cpu.regs.read(10), 42);
}

#[test]
fn distant_entry_gets_a_trampoline() {
    let image = ElfImage::new(0x1000, vec![segment(0x1000, &answer_program())]).build();
    let mut sim = Simulator::new(&Config::default());

    let entry = sim.load(&image);

    assert!(matches!(entry, Ok(0x1000)));
    assert_eq!(sim.memory.read_u32(0), encode_jal(0, 0x1000));
    assert!(sim.run().is_ok());
    assert_eq!(sim.cpu.regs.read(10), 42);
}

#[test]
fn segment_is_zero_filled_to_memory_size() {
    let mut mem = memory();
    mem.write_u32(0x208, 0xFFFF_FFFF);
    let mut seg = segment(0x200, &[0x1111_1111]);
    seg.mem_size = 16;
    let image = ElfImage::new(0x200, vec![seg]).build();

    assert!(load_image(&mut mem, &image).is_ok());

    assert_eq!(mem.read_u32(0x200), 0x1111_1111);
    assert_eq!(mem.read_u32(0x208), 0);
}

#[test]
fn non_load_segments_are_skipped() {
    let mut mem = memory();
    let mut note = segment(0x300, &[0xAAAA_AAAA]);
    note.kind = PT_NOTE;
    let image = ElfImage::new(0, vec![note, segment(0, &answer_program())]).build();

    assert!(load_image(&mut mem, &image).is_ok());

    assert_eq!(mem.read_u32(0x300), 0);
    assert_eq!(mem.read_u32(4), inst().halt().build());
}

#[test]
fn foreign_machine_is_rejected() {
    let mut image = ElfImage::new(0, vec![segment(0, &answer_program())]);
    image.machine = 62;

    let result = load_image(&mut memory(), &image.build());

    assert!(matches!(result, Err(SimError::UnsupportedElf(_))));
}

#[test]
fn big_endian_is_rejected() {
    let mut image = ElfImage::new(0, vec![segment(0, &answer_program())]);
    image.big_endian = true;

    let result = load_image(&mut memory(), &image.build());

    assert!(matches!(result, Err(SimError::UnsupportedElf(_))));
}

#[test]
fn truncated_header_is_malformed() {
    let image = ElfImage::new(0, vec![]).build();
    let result = load_image(&mut memory(), &image[..20]);
    assert!(matches!(result, Err(SimError::Elf(_))));
}

#[test]
fn segment_past_end_of_memory_is_rejected() {
    let image = ElfImage::new(0, vec![segment(0x3FFC, &answer_program())]).build();
    let result = load_image(&mut memory(), &image);
    assert!(matches!(result, Err(SimError::ImageOutOfBounds { addr: 0x3FFC, .. })));
}

#[test]
fn entry_blocked_by_segment_at_reset_vector() {
    let image = ElfImage::new(4, vec![segment(0, &answer_program())]).build();
    let result = load_image(&mut memory(), &image);
    assert!(matches!(result, Err(SimError::EntryUnreachable(4))));
}

#[test]
fn entry_blocked_by_segment_inside_reset_word() {
    let mut mem = memory();
    let image = ElfImage::new(0x100, vec![segment(0x2, &[0xAABB_CCDD])]).build();
    let result = load_image(&mut mem, &image);
    assert!(matches!(result, Err(SimError::EntryUnreachable(0x100))));
    assert_eq!(mem.read_u8(2), 0xDD);
    assert_eq!(mem.read_u8(3), 0xCC);
}

#[test]
fn segment_just_past_reset_word_allows_trampoline() {
    let mut mem = memory();
    let image = ElfImage::new(0x100, vec![segment(0x4, &[0xAABB_CCDD])]).build();
    let result = load_image(&mut mem, &image);
    assert!(matches!(result, Ok(0x100)));
    assert_eq!(mem.read_u32(0), encode_jal(0, 0x100));
    assert_eq!(mem.read_u32(4), 0xAABB_CCDD);
}

#[test]
fn odd_entry_is_unreachable() {
    let image = ElfImage::new(0x1001, vec![segment(0x1000, &answer_program())]).build();
    let result = load_image(&mut memory(), &image);
    assert!(matches!(result, Err(SimError::EntryUnreachable(0x1001))));
}

#[test]
fn entry_beyond_jal_range_is_unreachable() {
    let mut mem = Memory::new(0x20_0000, FixedLatency::default());
    let image = ElfImage::new(0x10_0000, vec![segment(0x10_0000, &answer_program())]).build();
    let result = load_image(&mut mem, &image);
    assert!(matches!(result, Err(SimError::EntryUnreachable(0x10_0000))));
}

// ══════════════════════════════════════════════════════════
// 3. Files
// ══════════════════════════════════════════════════════════

#[test]
fn reads_image_from_disk() {
    let mut file = match tempfile::NamedTempFile::new() {
        Ok(f) => f,
        Err(e) => panic!("temp file: {e}"),
    };
    assert!(file.write_all(&[1, 2, 3, 4]).is_ok());

    let bytes = load_file(file.path());

    assert!(matches!(bytes.as_deref(), Ok([1, 2, 3, 4])));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => panic!("temp dir: {e}"),
    };
    let result = load_file(&dir.path().join("absent.bin"));

    assert!(matches!(result, Err(SimError::Io { .. })));
    if let Err(e) = result {
        assert!(e.to_string().contains("absent.bin"));
    }
}
