//! Shared utility code throughout the bitspan workspace.

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod checks;

pub mod hints;
