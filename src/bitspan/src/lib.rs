//! Provides bit-granular cursors over fixed-size byte buffers.
//!
//! Network protocols and compact file formats frequently pack
//! values at bit rather than byte boundaries. The cursors in
//! this crate address individual bits in externally owned
//! buffers, with no allocation or internal staging of their own.
//!
//! # Bit addressing
//!
//! Bits are ordered MSB-first: position 0 is the most significant
//! bit of the first byte, position 7 its least significant one,
//! position 8 the most significant bit of the second byte.
//!
//! Multi-bit values are read and written big-endian, so the first
//! bit in the buffer becomes the most significant bit of the value.
//!
//! # Failure handling
//!
//! Every access comes in two flavors which only differ in how they
//! report insufficient remaining buffer space:
//!
//! - `try_*` operations signal failure through their return value
//!   and are meant for callers that expect and handle exhaustion
//!   locally.
//!
//! - The remaining operations return [`Result`]s with [`OutOfBits`]
//!   errors for propagation with the `?` operator.
//!
//! Malformed arguments are a different matter entirely. Bit counts
//! and cursor positions outside their documented ranges are bugs in
//! the calling code and cause panics in every operation.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
pub use error::OutOfBits;

mod reader;
pub use reader::BitReader;

mod writer;
pub use writer::BitWriter;
