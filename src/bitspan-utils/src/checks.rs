//! Contract checks for bit-level addressing arithmetic.
//!
//! Violations of these checks are caller bugs rather than data
//! conditions, so they panic instead of returning errors. All
//! functions are `#[track_caller]` to attribute the panic to the
//! misusing call site.

/// Asserts that `count` is a valid field width for an accessor capped
/// at `max` bits.
///
/// # Panics
///
/// Panics when `count` is zero or exceeds `max`.
#[track_caller]
#[inline]
pub fn bit_count_in_range(count: u32, max: u32) {
    assert!(
        0 < count && count <= max,
        "bit count must be in 1..={max}, got {count}"
    );
}

/// Asserts that an absolute bit position lies within a buffer of
/// `bit_len` bits.
///
/// A position equal to `bit_len` is in range; it is the exhausted
/// cursor state with no bits remaining.
///
/// # Panics
///
/// Panics when `pos` exceeds `bit_len`.
#[track_caller]
#[inline]
pub fn position_in_range(pos: usize, bit_len: usize) {
    assert!(
        pos <= bit_len,
        "bit position must be in 0..={bit_len}, got {pos}"
    );
}
