//! Wait-state modeling for the memory ports.
//!
//! This module provides:
//! 1. **FixedLatency:** A per-access-type number of not-ready ticks.
//! 2. **Handshake:** The per-port tracker that turns a latency into a sequence
//!    of not-ready answers for a held request, followed by one ready answer.

use crate::common::data::AccessType;
use crate::config::MemoryConfig;

/// Fixed wait states per access type, in ticks.
///
/// A latency of zero answers ready in the same tick the request is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedLatency {
    /// Wait states of an instruction fetch.
    pub fetch: u32,
    /// Wait states of a data read.
    pub read: u32,
    /// Wait states of a data write.
    pub write: u32,
}

impl FixedLatency {
    /// Returns the number of wait states for an access.
    pub const fn access_latency(&self, kind: AccessType) -> u32 {
        match kind {
            AccessType::Fetch => self.fetch,
            AccessType::Read => self.read,
            AccessType::Write => self.write,
        }
    }
}

impl From<&MemoryConfig> for FixedLatency {
    fn from(config: &MemoryConfig) -> Self {
        Self {
            fetch: config.fetch_latency,
            read: config.read_latency,
            write: config.write_latency,
        }
    }
}

/// Outstanding-request tracker for one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handshake<R> {
    pending: Option<(R, u32)>,
}

impl<R> Default for Handshake<R> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<R: Copy + PartialEq> Handshake<R> {
    /// Observes `req` for one tick and reports whether it completes.
    ///
    /// The countdown continues while the same request is presented; any other
    /// request abandons it and starts a fresh one.
    ///
    /// # Arguments
    ///
    /// * `req`     - The request presented this tick.
    /// * `latency` - Wait states for a newly started request.
    pub fn poll(&mut self, req: R, latency: u32) -> bool {
        let remaining = match self.pending {
            Some((held, remaining)) if held == req => remaining,
            _ => latency,
        };
        if remaining == 0 {
            self.pending = None;
            true
        } else {
            self.pending = Some((req, remaining - 1));
            false
        }
    }

    /// Whether a request is partway through its wait states.
    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Forgets any outstanding request.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
