use bitspan_utils::{checks, hints};

use crate::OutOfBits;

/// A cursor for bit-granular writes into a borrowed byte buffer.
///
/// Bit position 0 is the most significant bit of the first byte.
/// Multi-bit writes scatter their value big-endian, with the most
/// significant bit of the written field landing first in the
/// buffer.
///
/// Writes only replace the bits of the addressed field and leave
/// everything around it untouched, which makes it cheap to patch
/// individual fields in an already populated buffer.
///
/// Poking never moves the cursor and writing advances it by
/// exactly the stored bit count.
#[derive(Debug)]
pub struct BitWriter<'a> {
    // The underlying byte view bits are deposited into.
    buf: &'a mut [u8],

    // Cursor position in bits from the buffer start.
    //
    // Never exceeds `buf.len() << 3`.
    pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Creates a new [`BitWriter`] over a given byte slice.
    ///
    /// The cursor starts at the first bit of the buffer.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Creates a new [`BitWriter`] with its cursor placed at bit
    /// position `pos`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` exceeds the bit length of `buf`.
    pub fn with_offset(buf: &'a mut [u8], pos: usize) -> Self {
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

    /// Gets the total number of remaining bits in the writer.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.bit_len() - self.pos
    }

    /// Gets a view of the buffer's storage as a byte slice.
    #[inline]
    pub fn view(&self) -> &[u8] {
        self.buf
    }

    /// Consumes the [`BitWriter`] and returns the underlying byte
    /// slice.
    #[inline]
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buf
    }

    /// Stores a bit at the cursor without moving it, if one is left.
    ///
    /// Returns whether the bit was stored.
    #[inline]
    pub fn try_poke_bit(&mut self, value: bool) -> bool {
        if self.remaining_bits() == 0 {
            hints::cold_path();
            return false;
        }

        self.deposit_u8(self.pos, value as u8, 1);
        true
    }

    /// Stores a bit at the cursor without moving it.
    pub fn poke_bit(&mut self, value: bool) -> Result<(), OutOfBits> {
        if self.try_poke_bit(value) {
            Ok(())
        } else {
            Err(self.exhausted(1))
        }
    }

    /// Stores a bit at the cursor and advances past it, if one is
    /// left.
    ///
    /// Returns whether the bit was stored.
    #[inline]
    pub fn try_write_bit(&mut self, value: bool) -> bool {
        if !self.try_poke_bit(value) {
            return false;
        }

        self.pos += 1;
        true
    }

    /// Stores a bit at the cursor and advances past it.
    pub fn write_bit(&mut self, value: bool) -> Result<(), OutOfBits> {
        if self.try_write_bit(value) {
            Ok(())
        } else {
            Err(self.exhausted(1))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    #[inline]
    pub fn try_poke_u8(&mut self, value: u8, count: u32) -> bool {
        checks::bit_count_in_range(count, u8::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return false;
        }

        self.deposit_u8(self.pos, value, count);
        true
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    pub fn poke_u8(&mut self, value: u8, count: u32) -> Result<(), OutOfBits> {
        if self.try_poke_u8(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    #[inline]
    pub fn try_write_u8(&mut self, value: u8, count: u32) -> bool {
        if !self.try_poke_u8(value, count) {
            return false;
        }

        self.pos += count as usize;
        true
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=8`.
    pub fn write_u8(&mut self, value: u8, count: u32) -> Result<(), OutOfBits> {
        if self.try_write_u8(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    #[inline]
    pub fn try_poke_u16(&mut self, value: u16, count: u32) -> bool {
        checks::bit_count_in_range(count, u16::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return false;
        }

        self.deposit_u16(self.pos, value, count);
        true
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    pub fn poke_u16(&mut self, value: u16, count: u32) -> Result<(), OutOfBits> {
        if self.try_poke_u16(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    #[inline]
    pub fn try_write_u16(&mut self, value: u16, count: u32) -> bool {
        if !self.try_poke_u16(value, count) {
            return false;
        }

        self.pos += count as usize;
        true
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=16`.
    pub fn write_u16(&mut self, value: u16, count: u32) -> Result<(), OutOfBits> {
        if self.try_write_u16(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    #[inline]
    pub fn try_poke_u32(&mut self, value: u32, count: u32) -> bool {
        checks::bit_count_in_range(count, u32::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return false;
        }

        self.deposit_u32(self.pos, value, count);
        true
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    pub fn poke_u32(&mut self, value: u32, count: u32) -> Result<(), OutOfBits> {
        if self.try_poke_u32(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    #[inline]
    pub fn try_write_u32(&mut self, value: u32, count: u32) -> bool {
        if !self.try_poke_u32(value, count) {
            return false;
        }

        self.pos += count as usize;
        true
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=32`.
    pub fn write_u32(&mut self, value: u32, count: u32) -> Result<(), OutOfBits> {
        if self.try_write_u32(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    #[inline]
    pub fn try_poke_u64(&mut self, value: u64, count: u32) -> bool {
        checks::bit_count_in_range(count, u64::BITS);
        if count as usize > self.remaining_bits() {
            hints::cold_path();
            return false;
        }

        self.deposit_u64(self.pos, value, count);
        true
    }

    /// Stores the low `count` bits of `value` at the cursor without
    /// moving it.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    pub fn poke_u64(&mut self, value: u64, count: u32) -> Result<(), OutOfBits> {
        if self.try_poke_u64(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them, if enough bits are left.
    ///
    /// Returns whether the bits were stored.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    #[inline]
    pub fn try_write_u64(&mut self, value: u64, count: u32) -> bool {
        if !self.try_poke_u64(value, count) {
            return false;
        }

        self.pos += count as usize;
        true
    }

    /// Stores the low `count` bits of `value` at the cursor and
    /// advances past them.
    ///
    /// # Panics
    ///
    /// Panics when `count` is outside of `1..=64`.
    pub fn write_u64(&mut self, value: u64, count: u32) -> Result<(), OutOfBits> {
        if self.try_write_u64(value, count) {
            Ok(())
        } else {
            Err(self.exhausted(count))
        }
    }

    // Deposits the low `count` bits of `value` at absolute bit
    // position `pos`, leaving every surrounding bit untouched.
    //
    // Callers guarantee `count` is in `1..=8` and the whole field
    // lies within the buffer.
    #[inline]
    fn deposit_u8(&mut self, pos: usize, value: u8, count: u32) {
        let idx = pos >> 3;
        let bit = (pos & 7) as u32;
        let span = bit + count;

        if span <= u8::BITS {
            // The whole field lives in a single byte.
            let mask = 0xFF >> (u8::BITS - count);
            let shift = u8::BITS - span;

            self.buf[idx] = (self.buf[idx] & !(mask << shift)) | ((value & mask) << shift);
        } else {
            // The field straddles a byte boundary. The first byte takes
            // the high bits of the field, the second one the remaining
            // low bits.
            let spill = span - u8::BITS;

            let kept_head = self.buf[idx] & (0xFF << (u8::BITS - bit));
            self.buf[idx] = kept_head | ((value >> spill) & (0xFF >> bit));

            let spill_mask = 0xFF << (u8::BITS - spill);
            let kept_tail = self.buf[idx + 1] & !spill_mask;
            self.buf[idx + 1] = kept_tail | ((value << (u8::BITS - spill)) & spill_mask);
        }
    }

    // Deposits `count` bits (`1..=16`) of `value` at bit `pos`.
    #[inline]
    fn deposit_u16(&mut self, pos: usize, value: u16, count: u32) {
        if count <= u8::BITS {
            return self.deposit_u8(pos, value as u8, count);
        }

        let split = count - u8::BITS;
        self.deposit_u8(pos, (value >> u8::BITS) as u8, split);
        self.deposit_u8(pos + split as usize, value as u8, u8::BITS);
    }

    // Deposits `count` bits (`1..=32`) of `value` at bit `pos`.
    #[inline]
    fn deposit_u32(&mut self, pos: usize, value: u32, count: u32) {
        if count <= u16::BITS {
            return self.deposit_u16(pos, value as u16, count);
        }

        let split = count - u16::BITS;
        self.deposit_u16(pos, (value >> u16::BITS) as u16, split);
        self.deposit_u16(pos + split as usize, value as u16, u16::BITS);
    }

    // Deposits `count` bits (`1..=64`) of `value` at bit `pos`.
    #[inline]
    fn deposit_u64(&mut self, pos: usize, value: u64, count: u32) {
        if count <= u32::BITS {
            return self.deposit_u32(pos, value as u32, count);
        }

        let split = count - u32::BITS;
        self.deposit_u32(pos, (value >> u32::BITS) as u32, split);
        self.deposit_u32(pos + split as usize, value as u32, u32::BITS);
    }

    // Escalates a failed access into an `OutOfBits` error.
    fn exhausted(&self, requested: u32) -> OutOfBits {
        OutOfBits {
            requested,
            remaining: self.remaining_bits(),
        }
    }
}
