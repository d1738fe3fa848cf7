//! Alignment handling.
//!
//! The modeled data bus has no way to express an access that straddles two
//! words, and the core raises no misalignment exception. A misaligned halfword
//! or word access therefore targets its naturally aligned container: the low
//! address bits that break alignment are ignored.

use crate::common::constants::WORD_OFFSET_MASK;
use crate::core::pipeline::signals::MemWidth;

/// Checks whether an access of `width` at `addr` is naturally aligned.
pub const fn is_aligned(width: MemWidth, addr: u32) -> bool {
    addr & (width.bytes() - 1) == 0
}

/// Byte offset, within the aligned word, of the first lane an access uses.
///
/// Bytes may sit in any lane, halfwords in lane 0 or 2, and words always
/// start in lane 0.
pub const fn lane_offset(width: MemWidth, addr: u32) -> u32 {
    addr & WORD_OFFSET_MASK & !(width.bytes() - 1)
}

/// Word-aligned bus address for a byte address.
pub const fn word_address(addr: u32) -> u32 {
    addr & !WORD_OFFSET_MASK
}
