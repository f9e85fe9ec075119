//! # Packet Serialization
//!
//! Zero-allocation reading and writing of vehicle packets.
//!
//! ## Design
//!
//! - Writers use a pre-allocated buffer (no heap allocations in hot path)
//! - All multi-byte fields are fixed-width little-endian
//! - Bit fields are packed most-significant-bit first and share the byte
//!   stream with ordinary fields; pending bits are flushed before any byte
//!   field is written and the bit reader is reset before any byte field is
//!   read

use bytemuck::{bytes_of, Pod};
use howdah_shared::{Identifier, Position};

/// Maximum packet buffer size.
pub const MAX_BUFFER_SIZE: usize = 1200;

/// Packet writer - writes fields to a pre-allocated buffer.
///
/// Designed to be reused across multiple packets to avoid allocations.
pub struct PacketWriter {
    buffer: [u8; MAX_BUFFER_SIZE],
    position: usize,
    /// Bits accumulated but not yet flushed (MSB first).
    bit_value: u8,
    /// Number of bits accumulated in `bit_value`.
    bit_count: u8,
}

impl PacketWriter {
    /// Creates a new writer with a fresh buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; MAX_BUFFER_SIZE],
            position: 0,
            bit_value: 0,
            bit_count: 0,
        }
    }

    /// Resets the writer for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
        self.bit_value = 0;
        self.bit_count = 0;
    }

    /// Returns the number of bytes written (pending bits excluded).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.position
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.position == 0 && self.bit_count == 0
    }

    /// Returns a slice of the written data.
    ///
    /// Call [`Self::flush_bits`] first if a partial bit byte is pending.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    /// Writes one bit. Every eighth bit completes a byte.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> bool {
        if bit {
            self.bit_value |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            return self.flush_bits();
        }
        true
    }

    /// Writes any pending bits as one byte, zero-padded on the right.
    #[inline]
    pub fn flush_bits(&mut self) -> bool {
        if self.bit_count == 0 {
            return true;
        }
        if self.position >= MAX_BUFFER_SIZE {
            return false;
        }
        self.buffer[self.position] = self.bit_value;
        self.position += 1;
        self.bit_value = 0;
        self.bit_count = 0;
        true
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> bool {
        if !self.flush_bits() || self.position + bytes.len() > MAX_BUFFER_SIZE {
            return false;
        }
        self.buffer[self.position..self.position + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
        true
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> bool {
        self.write_bytes(&[value])
    }

    /// Writes a signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) -> bool {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a u16 in little-endian format.
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> bool {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a u32 in little-endian format.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> bool {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a u64 in little-endian format.
    #[inline]
    pub fn write_u64(&mut self, value: u64) -> bool {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a f32 in little-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> bool {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a full 64-bit identifier (no compaction).
    #[inline]
    pub fn write_identifier(&mut self, id: Identifier) -> bool {
        self.write_u64(id.raw())
    }

    /// Writes a Pod type directly.
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, value: &T) -> bool {
        self.write_bytes(bytes_of(value))
    }
}

impl Default for PacketWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Packet reader - reads fields from a received payload.
pub struct PacketReader<'a> {
    buffer: &'a [u8],
    position: usize,
    /// Byte currently being consumed bit by bit.
    bit_value: u8,
    /// Bits of `bit_value` already consumed; 8 means none pending.
    bit_pos: u8,
}

impl<'a> PacketReader<'a> {
    /// Creates a new reader over a payload.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            bit_value: 0,
            bit_pos: 8,
        }
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Returns true once every byte of the payload has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Discards everything left in the payload.
    ///
    /// Every handler ends with this so trailing bytes never leak into the
    /// next packet on the same connection.
    #[inline]
    pub fn skip_remaining(&mut self) {
        self.position = self.buffer.len();
        self.bit_pos = 8;
    }

    /// Drops any partially consumed bit byte.
    #[inline]
    pub fn reset_bits(&mut self) {
        self.bit_pos = 8;
    }

    /// Reads one bit (MSB first).
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_pos == 8 {
            self.bit_value = self.next_byte()?;
            self.bit_pos = 0;
        }
        let bit = (self.bit_value >> (7 - self.bit_pos)) & 1 == 1;
        self.bit_pos += 1;
        Some(bit)
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let value = *self.buffer.get(self.position)?;
        self.position += 1;
        Some(value)
    }

    /// Reads `N` raw bytes.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.reset_bits();
        if self.position + N > self.buffer.len() {
            return None;
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.position..self.position + N]);
        self.position += N;
        Some(out)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Option<i8> {
        self.read_array::<1>().map(i8::from_le_bytes)
    }

    /// Reads a u16 in little-endian format.
    #[inline]
    pub fn read_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a u32 in little-endian format.
    #[inline]
    pub fn read_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a u64 in little-endian format.
    #[inline]
    pub fn read_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a f32 in little-endian format.
    #[inline]
    pub fn read_f32(&mut self) -> Option<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reads a full 64-bit identifier (no compaction).
    #[inline]
    pub fn read_identifier(&mut self) -> Option<Identifier> {
        self.read_u64().map(Identifier)
    }

    /// Reads a position transmitted in `Y, Z, X` order.
    #[inline]
    pub fn read_position_yzx(&mut self) -> Option<Position> {
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        let x = self.read_f32()?;
        Some(Position::new(x, y, z))
    }

    /// Reads a Pod type directly.
    #[inline]
    pub fn read_pod<T: Pod + Copy>(&mut self) -> Option<T> {
        self.reset_bits();
        let size = std::mem::size_of::<T>();
        if self.position + size > self.buffer.len() {
            return None;
        }
        let slice = &self.buffer[self.position..self.position + size];
        self.position += size;
        bytemuck::try_pod_read_unaligned(slice).ok()
    }
}
