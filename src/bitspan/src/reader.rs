use bitspan_utils::{checks, hints};

use crate::OutOfBits;

/// A cursor for bit-granular reads over a borrowed byte buffer.
///
/// Bit position 0 is the most significant bit of the first byte.
/// Multi-bit reads assemble their value big-endian, with the first
/// bit in the buffer becoming the most significant bit of the
/// resulting value.
///
/// Peeking never moves the cursor and reading advances it by
/// exactly the requested bit count, so a peek always sees what the
/// next read would return.
#[derive(Debug)]
pub struct BitReader<'a> {
    // The underlying byte view bits are extracted from.
    buf: &'a [u8],

    // Cursor position in bits from the buffer start.
    //
    // Never exceeds `buf.len() << 3`.
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new [`BitReader`] over a given byte slice.
    ///
    /// The cursor starts at the first bit of the buffer.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Creates a new [`BitReader`] with its cursor placed at bit
    /// position `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` exceeds the bit length of `buf`.
    pub fn with_offset(buf: &'a [u8], pos: usize) -> Self {
        checks::position_in_range(pos, buf.len() << 3);
        Self { buf, pos }
    }

    /// Gets the total capacity of the underlying buffer in bits.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.buf.len() << 3
    }

    /// Gets the cursor position in bits from the buffer start.
    #[inline]
    pub fn bit_position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to bit position `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` exceeds [`Self::bit_len`].
    #[inline]
    pub fn set_bit_position(&mut self, pos: usize) {
        checks::position_in_range(pos, self.bit_len());
        self.pos = pos;
    }

    /// Gets the index of the byte the cursor currently points into.
    #[inline]
    pub fn byte_position(&self) -> usize {
        self.pos >> 3
    }

    /// Moves the cursor to the first bit of byte `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` exceeds the length of the buffer in bytes.
    #[inline]
    pub fn set_byte_position(&mut self, pos: usize) {
        self.set_bit_position(pos << 3);
    }

    /// Gets the cursor position within its current byte.
    ///
    /// 0 addresses the most significant bit of the byte, 7 its
    /// least significant one.
    #[inline]
    pub fn bit_offset(&self) -> u32 {
        (self.pos & 7) as u32
    }

    /// Gets the total number of remaining bits in the reader.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.bit_len() - self.pos
    }

    /// Consumes the [`BitReader`] and returns the underlying byte
    /// slice.
    #[inline]
    pub fn into_inner(self) -> &'a [u8] {
        self.buf
    }

    /// Returns the bit at the cursor without moving it, if one is
    /// left.
    #[inline]
    pub fn try_peek_bit(&self) -> Option<bool> {
        if self.remaining_bits() == 0 {
            hints::cold_path();
            return None;
        }

        Some(self.extract_u8(self.pos, 1) != 0)
    }

    /// Returns the bit at the cursor without moving it.
    pub fn peek_bit(&self) -> Result<bool, OutOfBits> {
        self.try_peek_bit().ok_or_else(|| self.exhausted(1))
    }

    /// Reads the bit at the cursor and advances past it, if one is
    /// left.
    #[inline]
    pub fn try_read_bit(&mut self) -> Option<bool> {
        let value = self.try_peek_bit()?;
        self.pos += 1;

        Some(value)
    }

    /// Reads the bit at the cursor and advances past it.
    pub fn read_bit(&mut self) -> Result<bool, OutOfBits> {
        self.try_read_bit().ok_or_else(|| self.exhausted(1))
    }

    /// Returns the next `count` bits as a [`u8`] without moving the
    /// cursor, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    #[inline]
    pub fn try_peek_u8(&self, count: u32) -> Option<u8> {
        checks::bit_count_in_range(count, u8::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return None;
        }

        Some(self.extract_u8(self.pos, count))
    }

    /// Returns the next `count` bits as a [`u8`] without moving the
    /// cursor.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    pub fn peek_u8(&self, count: u32) -> Result<u8, OutOfBits> {
        self.try_peek_u8(count).ok_or_else(|| self.exhausted(count))
    }

    /// Reads the next `count` bits as a [`u8`] and advances the
    /// cursor past them, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    #[inline]
    pub fn try_read_u8(&mut self, count: u32) -> Option<u8> {
        let value = self.try_peek_u8(count)?;
        self.pos += count as usize;

        Some(value)
    }

    /// Reads the next `count` bits as a [`u8`] and advances the
    /// cursor past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    pub fn read_u8(&mut self, count: u32) -> Result<u8, OutOfBits> {
        self.try_read_u8(count).ok_or_else(|| self.exhausted(count))
    }

    /// Returns the next `count` bits as a [`u16`] without moving the
    /// cursor, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    #[inline]
    pub fn try_peek_u16(&self, count: u32) -> Option<u16> {
        checks::bit_count_in_range(count, u16::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return None;
        }

        Some(self.extract_u16(self.pos, count))
    }

    /// Returns the next `count` bits as a [`u16`] without moving the
    /// cursor.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    pub fn peek_u16(&self, count: u32) -> Result<u16, OutOfBits> {
        self.try_peek_u16(count).ok_or_else(|| self.exhausted(count))
    }

    /// Reads the next `count` bits as a [`u16`] and advances the
    /// cursor past them, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    #[inline]
    pub fn try_read_u16(&mut self, count: u32) -> Option<u16> {
        let value = self.try_peek_u16(count)?;
        self.pos += count as usize;

        Some(value)
    }

    /// Reads the next `count` bits as a [`u16`] and advances the
    /// cursor past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    pub fn read_u16(&mut self, count: u32) -> Result<u16, OutOfBits> {
        self.try_read_u16(count).ok_or_else(|| self.exhausted(count))
    }

    /// Returns the next `count` bits as a [`u32`] without moving the
    /// cursor, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    #[inline]
    pub fn try_peek_u32(&self, count: u32) -> Option<u32> {
        checks::bit_count_in_range(count, u32::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return None;
        }

        Some(self.extract_u32(self.pos, count))
    }

    /// Returns the next `count` bits as a [`u32`] without moving the
    /// cursor.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    pub fn peek_u32(&self, count: u32) -> Result<u32, OutOfBits> {
        self.try_peek_u32(count).ok_or_else(|| self.exhausted(count))
    }

    /// Reads the next `count` bits as a [`u32`] and advances the
    /// cursor past them, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    #[inline]
    pub fn try_read_u32(&mut self, count: u32) -> Option<u32> {
        let value = self.try_peek_u32(count)?;
        self.pos += count as usize;

        Some(value)
    }

    /// Reads the next `count` bits as a [`u32`] and advances the
    /// cursor past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    pub fn read_u32(&mut self, count: u32) -> Result<u32, OutOfBits> {
        self.try_read_u32(count).ok_or_else(|| self.exhausted(count))
    }

    /// Returns the next `count` bits as a [`u64`] without moving the
    /// cursor, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    #[inline]
    pub fn try_peek_u64(&self, count: u32) -> Option<u64> {
        checks::bit_count_in_range(count, u64::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return None;
        }

        Some(self.extract_u64(self.pos, count))
    }

    /// Returns the next `count` bits as a [`u64`] without moving the
    /// cursor.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    pub fn peek_u64(&self, count: u32) -> Result<u64, OutOfBits> {
        self.try_peek_u64(count).ok_or_else(|| self.exhausted(count))
    }

    /// Reads the next `count` bits as a [`u64`] and advances the
    /// cursor past them, if enough bits are left.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    #[inline]
    pub fn try_read_u64(&mut self, count: u32) -> Option<u64> {
        let value = self.try_peek_u64(count)?;
        self.pos += count as usize;

        Some(value)
    }

    /// Reads the next `count` bits as a [`u64`] and advances the
    /// cursor past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    pub fn read_u64(&mut self, count: u32) -> Result<u64, OutOfBits> {
        self.try_read_u64(count).ok_or_else(|| self.exhausted(count))
    }

    // Extracts `count` bits starting at absolute bit position `pos`.
    //
    // Callers guarantee `count` is in `1..=8` and the whole field
    // lies within the buffer.
    #[inline]
    fn extract_u8(&self, pos: usize, count: u32) -> u8 {
        let idx = pos >> 3;
        let bit = (pos & 7) as u32;
        let span = bit + count;

        if span <= u8::BITS {
            // The whole field lives in a single byte.
            (self.buf[idx] >> (u8::BITS - span)) & (0xFF >> (u8::BITS - count))
        } else {
            // The field straddles a byte boundary. Stitch together the
            // low bits of the first byte and the high bits of the second.
            let head = self.buf[idx] & (0xFF >> bit);
            let tail = self.buf[idx + 1] >> (2 * u8::BITS - span);

            (head << (span - u8::BITS)) | tail
        }
    }

    // Extracts `count` bits (`1..=16`) starting at bit `pos`.
    #[inline]
    fn extract_u16(&self, pos: usize, count: u32) -> u16 {
        if count <= u8::BITS {
            return self.extract_u8(pos, count) as u16;
        }

        let split = count - u8::BITS;
        let high = self.extract_u8(pos, split) as u16;
        let low = self.extract_u8(pos + split as usize, u8::BITS) as u16;

        (high << u8::BITS) | low
    }

    // Extracts `count` bits (`1..=32`) starting at bit `pos`.
    #[inline]
    fn extract_u32(&self, pos: usize, count: u32) -> u32 {
        if count <= u16::BITS {
            return self.extract_u16(pos, count) as u32;
        }

        let split = count - u16::BITS;
        let high = self.extract_u16(pos, split) as u32;
        let low = self.extract_u16(pos + split as usize, u16::BITS) as u32;

        (high << u16::BITS) | low
    }

    // Extracts `count` bits (`1..=64`) starting at bit `pos`.
    #[inline]
    fn extract_u64(&self, pos: usize, count: u32) -> u64 {
        if count <= u32::BITS {
            return self.extract_u32(pos, count) as u64;
        }

        let split = count - u32::BITS;
        let high = self.extract_u32(pos, split) as u64;
        let low = self.extract_u32(pos + split as usize, u32::BITS) as u64;

        (high << u32::BITS) | low
    }

    // Escalates a failed access into an `OutOfBits` error.
    fn exhausted(&self, requested: u32) -> OutOfBits {
        OutOfBits {
            requested,
            remaining: self.remaining_bits(),
        }
    }
}
