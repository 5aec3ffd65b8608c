use thiserror::Error;

/// Error type produced when an operation requests more bits than
/// a buffer has left.
///
/// Cursor state is never modified by a failing operation, so the
/// same cursor may be retried with a smaller request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("requested {requested} bits with only {remaining} remaining")]
pub struct OutOfBits {
    /// The number of bits the operation asked for.
    pub requested: u32,
    /// The number of bits between cursor position and buffer end.
    pub remaining: usize,
}
