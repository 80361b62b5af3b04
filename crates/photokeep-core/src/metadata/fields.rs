//! Decoded EXIF metadata: capture timestamp and camera identification.
//!
//! Tag-level parsing is delegated to the `kamadak-exif` crate; this module
//! only pulls out the handful of fields Photokeep sorts and reports on.
//! The raw APP1 block relocated into re-encoded output is handled
//! separately, as opaque bytes, by [`super::find_exif_segment`].

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from decoding EXIF metadata out of an image byte stream.
#[derive(Debug, Error)]
pub enum ExifError {
    /// The stream carries no EXIF metadata at all.
    #[error("no EXIF metadata found")]
    NotFound,

    /// The stream claims to carry EXIF metadata but it cannot be parsed.
    #[error("failed to parse EXIF metadata: {0}")]
    Parse(String),
}

/// The metadata fields Photokeep cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    /// Capture timestamp in ISO 8601 format (`YYYY-MM-DDTHH:MM:SS`).
    pub date_taken: Option<String>,
    /// Camera make (e.g., "SONY").
    pub camera_make: Option<String>,
    /// Camera model (e.g., "ILCE-6600").
    pub camera_model: Option<String>,
}

/// Decode EXIF metadata from raw image bytes.
///
/// # Errors
///
/// Returns [`ExifError::NotFound`] when the stream has no EXIF data and
/// [`ExifError::Parse`] when the data is present but malformed. Individual
/// missing fields are not errors; they come back as `None`.
pub fn read_metadata(bytes: &[u8]) -> Result<PhotoMetadata, ExifError> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new()
        .read_from_container(&mut cursor)
        .map_err(|e| match e {
            exif::Error::NotFound(_) => ExifError::NotFound,
            other => ExifError::Parse(other.to_string()),
        })?;

    Ok(PhotoMetadata {
        date_taken: capture_datetime(&exif),
        camera_make: ascii_field(&exif, Tag::Make),
        camera_model: ascii_field(&exif, Tag::Model),
    })
}

/// Resolve the capture timestamp, preferring the original-capture tag over
/// digitization and file-modification times.
fn capture_datetime(exif: &exif::Exif) -> Option<String> {
    for tag in [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime] {
        let Some(field) = exif.get_field(tag, In::PRIMARY) else {
            continue;
        };
        if let Value::Ascii(ref values) = field.value {
            if let Some(ascii) = values.first() {
                if let Ok(dt) = exif::DateTime::from_ascii(ascii) {
                    return Some(format!(
                        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                        dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
                    ));
                }
            }
        }
    }
    None
}

/// Read an ASCII tag as a trimmed string, dropping empty values.
fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = field
        .display_value()
        .to_string()
        .trim_matches('"')
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
