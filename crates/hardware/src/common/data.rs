//! Memory Access Types.
//!
//! Classifies the transactions the core issues on its two memory ports. The
//! memory model uses it to pick the per-access latency and statistics use it to
//! attribute wait cycles.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Instruction fetch on the instruction port.
    Fetch,

    /// Data read on the data port, issued by a load in the memory stage.
    Read,

    /// Data write on the data port, issued by a store in the memory stage.
    Write,
}

impl AccessType {
    /// Short lowercase label used in log output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}
