//! Memory port contracts.
//!
//! The core talks to the outside world through two synchronous request/ready
//! ports. Each tick the core presents at most one request per port and the
//! port answers with a [`PortResponse`]. Both ports are level-sensitive: while
//! a response is not ready the core presents the identical request again on
//! every following tick until it is.
//!
//! The instruction port has two exceptions, and a memory model must tolerate
//! a pending fetch disappearing in both:
//! - A taken branch or jump redirects fetch. The pending request is abandoned
//!   and the next one carries the target address.
//! - While the pipeline is frozen by a data-port wait or a load-use stall, no
//!   fetch is presented at all. Once the stall clears, the same address is
//!   presented again. [`crate::soc::memory::Memory`] resumes its countdown
//!   where the request left off.
//!
//! 1. **Instruction port:** a read-only fetch of the word at an address.
//! 2. **Data port:** a read or a byte-enabled write of one 32-bit word.

use crate::common::data::AccessType;

/// A request on the instruction port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    /// Byte address of the instruction.
    pub addr: u32,
}

/// A request on the data port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataRequest {
    /// Word-aligned byte address.
    pub addr: u32,
    /// Write payload, already positioned on its byte lanes.
    pub wdata: u32,
    /// Lanes written by a store (bit `i` enables bits `8i..8i+8`).
    pub byte_enable: u8,
    /// Read strobe.
    pub read: bool,
    /// Write strobe.
    pub write: bool,
}

impl DataRequest {
    /// Classifies the request for latency selection and statistics.
    pub const fn access_type(&self) -> AccessType {
        if self.write {
            AccessType::Write
        } else {
            AccessType::Read
        }
    }
}

/// The answer a port gives to a request in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortResponse {
    /// The transaction completed this tick.
    pub ready: bool,
    /// Read data (instruction bits or the addressed word). Only meaningful when `ready`.
    pub data: u32,
}

impl PortResponse {
    /// A completed transaction returning `data`.
    pub const fn ready(data: u32) -> Self {
        Self { ready: true, data }
    }

    /// A transaction that is still outstanding.
    pub const fn not_ready() -> Self {
        Self {
            ready: false,
            data: 0,
        }
    }
}

/// The instruction side of external memory.
pub trait InstructionPort {
    /// Presents a fetch request for one tick and returns the port's answer.
    fn fetch(&mut self, req: FetchRequest) -> PortResponse;
}

/// The data side of external memory.
pub trait DataPort {
    /// Presents a data request for one tick and returns the port's answer.
    ///
    /// A write takes effect in the tick the port reports ready.
    fn access(&mut self, req: DataRequest) -> PortResponse;
}
