//! Program Loader.
//!
//! This module places a program image in simulated memory so that execution
//! can start at the reset vector. It performs:
//! 1. **File reading:** Reads the image from disk into a byte buffer.
//! 2. **Raw images:** Flat binaries are copied to address 0 unchanged.
//! 3. **ELF images:** Every `PT_LOAD` segment of an RV32 little-endian
//!    executable is copied to its physical address and zero-filled up to its
//!    memory size. An entry point other than the reset vector is reached
//!    through a `jal x0, entry` written at address 0.

use std::fs;
use std::path::Path;

use object::Endian;
use object::elf::{ELFMAG, EM_RISCV, FileHeader32, PT_LOAD};
use object::read::elf::{FileHeader, ProgramHeader};
use tracing::{info, warn};

use crate::common::constants::{INSTRUCTION_SIZE, RESET_PC};
use crate::common::error::{SimError, SimResult};
use crate::isa::rv32i::opcodes;
use crate::soc::memory::Memory;

/// Largest forward distance a `jal` can cover.
const JAL_MAX_OFFSET: u32 = (1 << 20) - 2;

/// Reads a program image from disk.
///
/// # Arguments
///
/// * `path` - Path to the raw binary or ELF file.
pub fn load_file(path: &Path) -> SimResult<Vec<u8>> {
    fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Whether `bytes` start with the ELF magic number.
pub fn is_elf(bytes: &[u8]) -> bool {
    bytes.starts_with(&ELFMAG)
}

/// Loads an image into memory, detecting the format from its first bytes.
///
/// # Returns
///
/// The entry point of the program. Raw images always start at the reset vector.
pub fn load_image(memory: &mut Memory, bytes: &[u8]) -> SimResult<u32> {
    if is_elf(bytes) {
        load_elf(memory, bytes)
    } else {
        memory.load(RESET_PC, bytes)?;
        info!(bytes = bytes.len(), "loaded raw image at {RESET_PC:#010x}");
        Ok(RESET_PC)
    }
}

/// Loads an ELF32 RISC-V executable.
///
/// # Errors
///
/// * [`SimError::Elf`] when the headers cannot be parsed.
/// * [`SimError::UnsupportedElf`] for big-endian or non-RISC-V files.
/// * [`SimError::ImageOutOfBounds`] when a segment does not fit in memory.
/// * [`SimError::EntryUnreachable`] when the entry point is not 0 and no
///   trampoline can be placed at the reset vector.
pub fn load_elf(memory: &mut Memory, bytes: &[u8]) -> SimResult<u32> {
    let header = FileHeader32::<object::Endianness>::parse(bytes)?;
    let endian = header.endian()?;
    if !endian.is_little_endian() {
        return Err(SimError::UnsupportedElf("big-endian image".into()));
    }
    let machine = header.e_machine(endian);
    if machine != EM_RISCV {
        return Err(SimError::UnsupportedElf(format!("machine type {machine}")));
    }

    let mut reset_vector_used = false;
    for segment in header.program_headers(endian, bytes)? {
        if segment.p_type(endian) != PT_LOAD {
            continue;
        }
        let addr = segment.p_paddr(endian);
        let mem_size = segment.p_memsz(endian) as usize;
        let data = segment.data(endian, bytes).map_err(|()| {
            SimError::UnsupportedElf(format!("segment at {addr:#010x} lies outside the file"))
        })?;
        if data.len() > mem_size {
            return Err(SimError::UnsupportedElf(format!(
                "segment at {addr:#010x} has more file bytes than memory bytes"
            )));
        }

        memory.load(addr, data)?;
        let fill = mem_size - data.len();
        if fill > 0 {
            memory.load(addr.wrapping_add(data.len() as u32), &vec![0; fill])?;
        }
        let end = u64::from(addr) + mem_size as u64;
        if u64::from(addr) < u64::from(RESET_PC + INSTRUCTION_SIZE) && end > u64::from(RESET_PC) {
            reset_vector_used = true;
        }
        info!(
            file_bytes = data.len(),
            mem_bytes = mem_size,
            "loaded segment at {addr:#010x}"
        );
    }

    let entry = header.e_entry(endian);
    if entry != RESET_PC {
        let offset = entry.wrapping_sub(RESET_PC);
        if reset_vector_used || offset & 1 != 0 || offset > JAL_MAX_OFFSET {
            return Err(SimError::EntryUnreachable(entry));
        }
        let jump = encode_jal(0, offset as i32);
        memory.load(RESET_PC, &jump.to_le_bytes())?;
        warn!("entry point {entry:#010x} reached through a jal at the reset vector");
    }
    Ok(entry)
}

/// Encodes `jal rd, offset`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::sim::loader::encode_jal;
///
/// assert_eq!(encode_jal(0, 0), 0x0000_006F);
/// assert_eq!(encode_jal(1, 8), 0x0080_00EF);
/// ```
pub const fn encode_jal(rd: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    let bit20 = (imm >> 20) & 0x1;
    let bits10_1 = (imm >> 1) & 0x3FF;
    let bit11 = (imm >> 11) & 0x1;
    let bits19_12 = (imm >> 12) & 0xFF;
    (bit20 << 31)
        | (bits10_1 << 21)
        | (bit11 << 20)
        | (bits19_12 << 12)
        | ((rd & 0x1F) << 7)
        | opcodes::OP_JAL
}
