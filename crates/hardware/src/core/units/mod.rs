//! Execution units and functional components.
//!
//! Pure combinational units used by the Execute and Memory stages: the integer
//! ALU, the branch resolution unit and the load/store data-path helpers.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: taken/not-taken decision and target.
pub mod bru;

/// Load/Store Unit: byte enables, store placement and load formatting.
pub mod lsu;
