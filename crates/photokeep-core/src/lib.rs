//! Photokeep Core - Metadata-preserving JPEG shrinking
//!
//! This crate re-compresses photos without losing their EXIF metadata.
//! Re-encoding a JPEG discards the APP1 segment that carries the capture
//! timestamp, camera identification, and orientation; Photokeep lifts that
//! segment out of the source bytes and splices it, untouched, into the
//! re-encoded output.
//!
//! The pieces compose in one direction:
//!
//! 1. [`metadata::find_exif_segment`] - locate the APP1 block in the source
//! 2. [`metadata::read_metadata`] - decode the capture timestamp from it
//! 3. [`decode::decode_jpeg`] / [`decode::resize_to_fit`] /
//!    [`encode::encode_jpeg`] - produce the re-compressed image
//! 4. [`output::write_jpeg_with_exif`] - assemble the destination file
//!
//! [`pipeline::shrink_photo`] runs the whole pass over one file.

pub mod decode;
pub mod encode;
pub mod metadata;
pub mod output;
pub mod pipeline;

pub use decode::{decode_jpeg, resize_to_fit, DecodeError, DecodedImage, FilterType};
pub use encode::{encode_jpeg, EncodeError};
pub use metadata::{find_exif_segment, read_metadata, ExifError, ExifSegment, PhotoMetadata};
pub use output::{write_jpeg_with_exif, OutputError, WriteStage};
pub use pipeline::{shrink_photo, PipelineError, ShrinkOptions, ShrinkReport};
