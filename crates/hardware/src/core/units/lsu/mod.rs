//! Load/Store Unit (LSU).
//!
//! Translates between the register view of a load or store and the 32-bit,
//! byte-enabled data bus. Byte lane `i` of the bus carries bits `8i..8i+8`
//! of the word at the aligned address, so a little-endian access of width `w`
//! at address `a` occupies lanes `a[1:0] .. a[1:0] + w - 1`.
//!
//! - Stores: [`Lsu::byte_enable`] selects the lanes and [`Lsu::store_data`]
//!   replicates the payload so that it appears on every candidate lane.
//! - Loads: [`Lsu::extract_load`] picks the lane out of the bus word and
//!   sign- or zero-extends it.
//!
//! Misaligned halfword and word accesses are resolved by [`unaligned`]: the
//! offending low address bits are ignored and the naturally aligned container
//! is accessed instead.

/// Alignment checks and lane placement for misaligned accesses.
pub mod unaligned;

use crate::common::constants::BYTE_ENABLE_ALL;
use crate::core::pipeline::signals::MemWidth;

/// Load/Store Unit data-path helpers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lsu;

impl Lsu {
    /// Computes the 4-bit byte-enable mask of an access.
    ///
    /// # Arguments
    ///
    /// * `width` - The access width.
    /// * `addr`  - The byte address of the access.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::lsu::Lsu;
    /// use rvpipe_core::core::pipeline::signals::MemWidth;
    ///
    /// assert_eq!(Lsu::byte_enable(MemWidth::Byte, 0x1002), 0b0100);
    /// assert_eq!(Lsu::byte_enable(MemWidth::Half, 0x1002), 0b1100);
    /// assert_eq!(Lsu::byte_enable(MemWidth::Word, 0x1000), 0b1111);
    /// ```
    pub const fn byte_enable(width: MemWidth, addr: u32) -> u8 {
        let lanes: u8 = match width {
            MemWidth::Byte | MemWidth::ByteUnsigned => 0b0001,
            MemWidth::Half | MemWidth::HalfUnsigned => 0b0011,
            MemWidth::Word => BYTE_ENABLE_ALL,
        };
        lanes << unaligned::lane_offset(width, addr)
    }

    /// Positions store data on the bus by replicating it across all lanes.
    ///
    /// A byte is copied into all four lanes and a halfword into both halves,
    /// so the enabled lanes always carry the payload regardless of address.
    pub const fn store_data(width: MemWidth, data: u32) -> u32 {
        match width {
            MemWidth::Byte | MemWidth::ByteUnsigned => (data & 0xFF).wrapping_mul(0x0101_0101),
            MemWidth::Half | MemWidth::HalfUnsigned => (data & 0xFFFF).wrapping_mul(0x0001_0001),
            MemWidth::Word => data,
        }
    }

    /// Extracts and extends a load result from the 32-bit bus word.
    ///
    /// # Arguments
    ///
    /// * `width` - The access width and signedness.
    /// * `addr`  - The byte address of the access.
    /// * `raw`   - The word returned by the data port.
    pub const fn extract_load(width: MemWidth, addr: u32, raw: u32) -> u32 {
        let shifted = raw >> (unaligned::lane_offset(width, addr) * 8);
        match width {
            MemWidth::Byte => shifted as u8 as i8 as i32 as u32,
            MemWidth::ByteUnsigned => shifted as u8 as u32,
            MemWidth::Half => shifted as u16 as i16 as i32 as u32,
            MemWidth::HalfUnsigned => shifted as u16 as u32,
            MemWidth::Word => raw,
        }
    }
}
