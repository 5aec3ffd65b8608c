//! Hints for the compiler that affect code optimization.

/// Marks the enclosing code path as unlikely to be taken.
///
/// Calling this in a branch nudges the optimizer into keeping that
/// branch out of the hot instruction stream. This serves as a
/// substitute for [`std::hint::cold_path`] until that is stabilized.
#[cold]
#[inline(always)]
pub fn cold_path() {}
