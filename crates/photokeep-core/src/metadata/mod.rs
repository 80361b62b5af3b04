//! EXIF metadata handling for Photokeep.
//!
//! Two views of the same APP1 segment, used at different points in the
//! pipeline:
//!
//! - [`find_exif_segment`] treats it as an opaque byte block, lifted out
//!   of the source JPEG so it can be relocated verbatim into re-encoded
//!   output.
//! - [`read_metadata`] decodes it (via `kamadak-exif`) into the few
//!   structured fields Photokeep needs: capture timestamp and camera
//!   identification.
//!
//! Absence of metadata is normal for both: screenshots and stripped web
//! images carry no APP1 segment.

mod fields;
mod segment;

pub use fields::{read_metadata, ExifError, PhotoMetadata};
pub use segment::{find_exif_segment, ExifSegment};
