//! APP1 segment extraction from JPEG byte streams.
//!
//! A JPEG file carries its EXIF metadata in a single APP1 segment: the
//! two-byte marker `FF E1`, a two-byte big-endian length, and the payload.
//! Recompressing a photo discards that segment, so Photokeep lifts it out
//! of the source bytes before re-encoding and splices it back into the
//! output (see [`crate::output::write_jpeg_with_exif`]).
//!
//! The segment is treated as an opaque block: no tag decoding happens here.

/// APP1 segment marker (EXIF container).
const APP1_MARKER: [u8; 2] = [0xFF, 0xE1];

/// An EXIF APP1 segment lifted out of a JPEG byte stream.
///
/// Owns an independent copy of the bytes, so it outlives the buffer it was
/// extracted from. The block always starts with the `FF E1` marker followed
/// by a big-endian length field counting itself plus the payload (the two
/// marker bytes are excluded from the count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifSegment {
    bytes: Vec<u8>,
}

impl ExifSegment {
    /// Build a segment from raw bytes, validating the APP1 invariant.
    ///
    /// Returns `None` unless the bytes start with `FF E1` and the length
    /// field matches the actual byte count.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.len() < 4 || bytes[..2] != APP1_MARKER {
            return None;
        }
        let declared = u16::from_be_bytes([bytes[2], bytes[3]]) as usize;
        if bytes.len() != declared + 2 {
            return None;
        }
        Some(Self { bytes })
    }

    /// The full segment: marker, length field, and payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total segment size in bytes (marker included).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A valid segment is never empty; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The big-endian length field: payload size plus the two length bytes.
    pub fn declared_len(&self) -> u16 {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]])
    }
}

/// Find the EXIF APP1 segment in a JPEG byte stream.
///
/// Scans for the first `FF E1` byte pair, reads the big-endian length field
/// that follows it, and returns an owned copy of the whole segment. Returns
/// `None` when no marker is found, or when the buffer is too short to hold
/// the length field or the declared payload (truncated input is "no
/// metadata", not an error).
///
/// The scan is a flat pattern search: an `FF E1` pair inside the payload of
/// an unrelated segment would be matched too. Camera-produced JPEGs place
/// the APP1 segment directly after SOI, ahead of any entropy-coded data, so
/// the first match is the real one in practice.
///
/// # Example
///
/// ```
/// use photokeep_core::metadata::find_exif_segment;
///
/// let jpeg = std::fs::read("photo.jpg").unwrap();
/// if let Some(segment) = find_exif_segment(&jpeg) {
///     println!("EXIF block: {} bytes", segment.len());
/// }
/// ```
pub fn find_exif_segment(data: &[u8]) -> Option<ExifSegment> {
    let mut i = 0;
    while i + 1 < data.len() {
        if data[i] == APP1_MARKER[0] && data[i + 1] == APP1_MARKER[1] {
            // Need the two length bytes after the marker
            if i + 4 > data.len() {
                return None;
            }
            let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;

            // The declared length counts the length field itself but not
            // the marker, so the segment spans [i, i + 2 + seg_len)
            if i + 2 + seg_len > data.len() {
                return None;
            }
            return Some(ExifSegment {
                bytes: data[i..i + 2 + seg_len].to_vec(),
            });
        }
        i += 1;
    }
    None
}
