//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It
//! presents the current Program Counter (PC) to the instruction port and
//! turns the port's answer into the next IF/ID latch value.

use crate::core::pipeline::latches::{IfId, IfIdEntry};
use crate::soc::traits::{FetchRequest, PortResponse};

/// Builds the instruction-port request for `pc`.
pub const fn fetch_request(pc: u32) -> FetchRequest {
    FetchRequest { addr: pc }
}

/// Executes the instruction fetch stage of the pipeline.
///
/// The produced IF/ID slot is valid only when the port answered ready; a
/// not-ready answer yields a bubble and the PC is not advanced.
///
/// # Arguments
///
/// * `pc` - Address the request was issued at.
/// * `response` - The instruction port's answer.
pub const fn fetch_stage(pc: u32, response: PortResponse) -> IfId {
    IfId::with_valid(
        IfIdEntry {
            pc,
            inst: response.data,
        },
        response.ready,
    )
}
