//! Flat System Memory.
//!
//! This module implements the memory behind both core ports. It provides:
//! 1. **Storage:** A little-endian byte array starting at address 0.
//! 2. **Ports:** [`InstructionPort`] and [`DataPort`] implementations honoring byte enables.
//! 3. **Timing:** Per-port wait states from [`controller::FixedLatency`].
//!
//! Ports always operate on the naturally aligned word containing the requested
//! address. Accesses beyond the end of memory read as zero and drop writes.

/// Wait-state modeling for the two ports.
pub mod controller;

use tracing::warn;

use self::controller::{FixedLatency, Handshake};
use crate::common::constants::{BYTE_LANES, WORD_OFFSET_MASK};
use crate::common::data::AccessType;
use crate::common::error::{SimError, SimResult};
use crate::config::MemoryConfig;
use crate::soc::traits::{DataPort, DataRequest, FetchRequest, InstructionPort, PortResponse};

/// System memory implementing both core ports.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: Vec<u8>,
    latency: FixedLatency,
    fetch_port: Handshake<FetchRequest>,
    data_port: Handshake<DataRequest>,
}

impl Memory {
    /// Creates a zero-filled memory.
    ///
    /// # Arguments
    ///
    /// * `size`    - Size in bytes.
    /// * `latency` - Wait states per access type.
    pub fn new(size: usize, latency: FixedLatency) -> Self {
        Self {
            bytes: vec![0; size],
            latency,
            fetch_port: Handshake::default(),
            data_port: Handshake::default(),
        }
    }

    /// Creates a memory sized and timed from configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.size_bytes, FixedLatency::from(config))
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Current wait-state configuration.
    pub const fn latency(&self) -> FixedLatency {
        self.latency
    }

    /// Replaces the wait-state configuration, abandoning outstanding requests.
    pub fn set_latency(&mut self, latency: FixedLatency) {
        self.latency = latency;
        self.fetch_port.clear();
        self.data_port.clear();
    }

    /// Copies `data` into memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::ImageOutOfBounds`] when the region does not fit.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> SimResult<()> {
        let start = addr as usize;
        let size = self.bytes.len();
        let region = start
            .checked_add(data.len())
            .and_then(|end| self.bytes.get_mut(start..end))
            .ok_or(SimError::ImageOutOfBounds {
                addr,
                len: data.len(),
                size,
            })?;
        region.copy_from_slice(data);
        Ok(())
    }

    /// Reads one byte; out-of-range addresses read as zero.
    pub fn read_u8(&self, addr: u32) -> u8 {
        self.bytes.get(addr as usize).copied().unwrap_or(0)
    }

    /// Writes one byte; out-of-range writes are dropped.
    pub fn write_u8(&mut self, addr: u32, val: u8) {
        if let Some(byte) = self.bytes.get_mut(addr as usize) {
            *byte = val;
        }
    }

    /// Reads the little-endian word at `addr` (no alignment requirement).
    pub fn read_u32(&self, addr: u32) -> u32 {
        let mut word = [0u8; 4];
        for (i, byte) in word.iter_mut().enumerate() {
            *byte = self.read_u8(addr.wrapping_add(i as u32));
        }
        u32::from_le_bytes(word)
    }

    /// Writes the little-endian word at `addr` (no alignment requirement).
    pub fn write_u32(&mut self, addr: u32, val: u32) {
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u32), byte);
        }
    }

    /// Whether the word containing `addr` lies inside memory.
    fn word_in_range(&self, addr: u32) -> bool {
        (addr & !WORD_OFFSET_MASK) as usize + BYTE_LANES as usize <= self.bytes.len()
    }

    /// Reads the aligned word containing `addr` on behalf of a port.
    fn port_read(&self, addr: u32, kind: AccessType) -> u32 {
        if !self.word_in_range(addr) {
            warn!("{} beyond end of memory at {addr:#010x} reads as zero", kind.label());
            return 0;
        }
        self.read_u32(addr & !WORD_OFFSET_MASK)
    }

    /// Writes the enabled lanes of `wdata` into the aligned word containing `addr`.
    fn port_write(&mut self, addr: u32, wdata: u32, byte_enable: u8) {
        if !self.word_in_range(addr) {
            warn!("write beyond end of memory at {addr:#010x} dropped");
            return;
        }
        let base = addr & !WORD_OFFSET_MASK;
        for (lane, byte) in wdata.to_le_bytes().into_iter().enumerate() {
            if byte_enable & (1 << lane) != 0 {
                self.write_u8(base + lane as u32, byte);
            }
        }
    }
}

impl InstructionPort for Memory {
    fn fetch(&mut self, req: FetchRequest) -> PortResponse {
        let latency = self.latency.access_latency(AccessType::Fetch);
        if !self.fetch_port.poll(req, latency) {
            return PortResponse::not_ready();
        }
        PortResponse::ready(self.port_read(req.addr, AccessType::Fetch))
    }
}

impl DataPort for Memory {
    fn access(&mut self, req: DataRequest) -> PortResponse {
        let kind = req.access_type();
        if !self.data_port.poll(req, self.latency.access_latency(kind)) {
            return PortResponse::not_ready();
        }
        if req.write {
            self.port_write(req.addr, req.wdata, req.byte_enable);
        }
        PortResponse::ready(self.port_read(req.addr, kind))
    }
}
