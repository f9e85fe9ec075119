//! # Compact Identifier Codec
//!
//! Bandwidth-saving encoding for 64-bit identifiers: only non-zero bytes
//! travel on the wire.
//!
//! ## Wire Format
//!
//! ```text
//! ┌────────────────────────────┬──────────────────────────────────────┐
//! │ Presence mask (8 bits)     │ Present bytes (0..=8 bytes)          │
//! │ one bit per identifier     │ non-zero identifier bytes only,      │
//! │ byte, in `mask_order`      │ in `byte_order`                      │
//! └────────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! Each call site in the protocol declares its own pair of orders. They are
//! wire constants: both peers must use the same layout for the same message.

use howdah_shared::Identifier;

use crate::serialization::{PacketReader, PacketWriter};

/// Returns true if `order` names every byte index 0..8 exactly once.
const fn is_permutation(order: &[u8; 8]) -> bool {
    let mut seen = 0u8;
    let mut i = 0;
    while i < 8 {
        if order[i] >= 8 {
            return false;
        }
        seen |= 1 << order[i];
        i += 1;
    }
    seen == 0xFF
}

/// Declared permutation pair for one call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactIdLayout {
    /// Identifier byte whose presence bit is written at each wire position.
    mask_order: [u8; 8],
    /// Identifier byte written at each payload position (if present).
    byte_order: [u8; 8],
}

impl CompactIdLayout {
    /// Declares a layout.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if either order is not
    /// a permutation of `0..8`.
    #[must_use]
    pub const fn new(mask_order: [u8; 8], byte_order: [u8; 8]) -> Self {
        assert!(
            is_permutation(&mask_order),
            "mask order must be a permutation of 0..8"
        );
        assert!(
            is_permutation(&byte_order),
            "byte order must be a permutation of 0..8"
        );
        Self {
            mask_order,
            byte_order,
        }
    }

    /// Order in which presence bits are written.
    #[inline]
    #[must_use]
    pub const fn mask_order(&self) -> [u8; 8] {
        self.mask_order
    }

    /// Order in which present bytes are written.
    #[inline]
    #[must_use]
    pub const fn byte_order(&self) -> [u8; 8] {
        self.byte_order
    }

    /// Logical presence mask: bit `k` set iff byte `k` is non-zero.
    #[must_use]
    pub fn presence_mask(id: Identifier) -> u8 {
        id.to_bytes()
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte != 0)
            .fold(0u8, |mask, (k, _)| mask | (1 << k))
    }

    /// Number of wire bytes `id` occupies under any layout.
    #[must_use]
    pub fn encoded_len(id: Identifier) -> usize {
        1 + Self::presence_mask(id).count_ones() as usize
    }

    /// Writes the 8 presence bits only.
    pub fn write_mask(&self, writer: &mut PacketWriter, id: Identifier) -> bool {
        let bytes = id.to_bytes();
        self.mask_order
            .iter()
            .all(|&k| writer.write_bit(bytes[k as usize] != 0))
    }

    /// Writes the present bytes only.
    pub fn write_bytes(&self, writer: &mut PacketWriter, id: Identifier) -> bool {
        let bytes = id.to_bytes();
        self.byte_order
            .iter()
            .map(|&k| bytes[k as usize])
            .filter(|&byte| byte != 0)
            .all(|byte| writer.write_u8(byte))
    }

    /// Encodes `id`: presence mask then present bytes.
    pub fn encode(&self, writer: &mut PacketWriter, id: Identifier) -> bool {
        self.write_mask(writer, id) && writer.flush_bits() && self.write_bytes(writer, id)
    }

    /// Reads the 8 presence bits, returning the logical presence mask.
    pub fn read_mask(&self, reader: &mut PacketReader<'_>) -> Option<u8> {
        let mut mask = 0u8;
        for &k in &self.mask_order {
            if reader.read_bit()? {
                mask |= 1 << k;
            }
        }
        Some(mask)
    }

    /// Reads the bytes flagged in `mask`; absent bytes stay zero.
    pub fn read_bytes(&self, reader: &mut PacketReader<'_>, mask: u8) -> Option<Identifier> {
        let mut bytes = [0u8; 8];
        for &k in &self.byte_order {
            if mask & (1 << k) != 0 {
                bytes[k as usize] = reader.read_u8()?;
            }
        }
        Some(Identifier::from_bytes(bytes))
    }

    /// Decodes an identifier written by [`Self::encode`] with the same layout.
    pub fn decode(&self, reader: &mut PacketReader<'_>) -> Option<Identifier> {
        let mask = self.read_mask(reader)?;
        self.read_bytes(reader, mask)
    }
}

/// Client -> Server: boarding another player's vehicle.
pub const ENTER_VEHICLE: CompactIdLayout =
    CompactIdLayout::new([3, 7, 2, 1, 0, 5, 6, 4], [6, 5, 0, 7, 4, 2, 1, 3]);

/// Client -> Server: explicit seat switch naming the destination vehicle.
pub const SWITCH_SEAT: CompactIdLayout =
    CompactIdLayout::new([7, 0, 1, 6, 2, 4, 5, 3], [6, 1, 3, 7, 2, 4, 5, 0]);

/// Server -> Client: vehicle record id broadcast.
pub const SET_RECORD_ID: CompactIdLayout =
    CompactIdLayout::new([5, 3, 6, 2, 1, 4, 0, 7], [6, 0, 1, 3, 5, 7, 2, 4]);

/// Every layout the protocol declares.
pub const ALL_LAYOUTS: [CompactIdLayout; 3] = [ENTER_VEHICLE, SWITCH_SEAT, SET_RECORD_ID];
