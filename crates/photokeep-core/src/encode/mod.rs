//! Image encoding pipeline for Photokeep.
//!
//! Re-compresses decoded pixel data to baseline JPEG. The encoder output
//! carries no metadata; preserving the source EXIF block is the job of
//! [`crate::output`].

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
