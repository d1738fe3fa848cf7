//! Pipeline Latch Interface.
//!
//! Common accessors over the payloads carried between stages, so the
//! controller can report slot occupancy without knowing each entry type.

/// A payload that can sit in a pipeline register.
pub trait LatchEntry: Clone + Default {
    /// Program counter of the instruction carried by the entry.
    fn pc(&self) -> u32;

    /// Raw encoding of the instruction carried by the entry.
    fn inst(&self) -> u32;
}

/// Represents a pipeline latch (inter-stage register).
pub trait PipelineLatch {
    /// Replaces the contents with a bubble.
    fn flush(&mut self);

    /// Checks whether the latch holds a bubble.
    fn is_bubble(&self) -> bool;

    /// Program counter of the held instruction, or `None` for a bubble.
    fn occupant_pc(&self) -> Option<u32>;
}
