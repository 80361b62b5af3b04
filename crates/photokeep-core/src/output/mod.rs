//! Final output assembly for Photokeep.
//!
//! Writes the destination JPEG from a freshly encoded image and the
//! optional EXIF segment extracted from the source.

mod jpeg;

pub use jpeg::{write_jpeg_with_exif, OutputError, WriteStage};
