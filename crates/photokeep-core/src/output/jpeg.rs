//! Assembly of the final JPEG file: SOI, preserved EXIF block, image body.
//!
//! The freshly encoded image starts with its own SOI marker and carries no
//! metadata. The assembler writes a new stream to the destination: the SOI
//! marker, then the relocated APP1 segment when one was extracted from the
//! source, then the encoded image with its redundant leading SOI stripped.
//! JPEG segments are self-delimited, so the block can be dropped into a
//! structurally different stream unchanged.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metadata::ExifSegment;

/// JPEG start-of-image marker.
const SOI_MARKER: [u8; 2] = [0xFF, 0xD8];

/// The write stage an assembly failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    /// The leading start-of-image marker.
    SoiHeader,
    /// The relocated EXIF APP1 segment.
    ExifBlock,
    /// The encoded image body (source SOI stripped).
    EncodedImage,
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriteStage::SoiHeader => "SOI header",
            WriteStage::ExifBlock => "EXIF block",
            WriteStage::EncodedImage => "encoded image",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while assembling the output file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The encoded image is too short to carry its own SOI marker.
    #[error("Encoded image too short: {len} bytes (need at least 2)")]
    InvalidImage { len: usize },

    /// The destination could not be created.
    #[error("Failed to create {}: {source}", dest.display())]
    Create {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A write failed partway through; the partial destination is removed.
    #[error("Failed to write {stage}: {source}")]
    Write {
        stage: WriteStage,
        #[source]
        source: io::Error,
    },
}

/// Write an assembled JPEG to `dest`: SOI marker, then the EXIF segment if
/// present, then `encoded` with its own leading SOI skipped.
///
/// `encoded` must be a complete JPEG stream of at least 2 bytes, as
/// produced by [`crate::encode::encode_jpeg`]. A missing segment is not an
/// error; the output is then simply the re-framed encoded image.
///
/// The destination handle is released on every exit path. If a write fails
/// partway, the truncated destination file is removed (best effort) before
/// the error is returned, so callers never observe a half-written JPEG at
/// `dest`. No retries; retry policy belongs to the caller.
///
/// # Errors
///
/// - [`OutputError::InvalidImage`] when `encoded` is shorter than 2 bytes,
///   checked before any file is touched.
/// - [`OutputError::Create`] when the destination cannot be opened.
/// - [`OutputError::Write`] when one of the three write stages fails.
pub fn write_jpeg_with_exif(
    dest: &Path,
    exif: Option<&ExifSegment>,
    encoded: &[u8],
) -> Result<(), OutputError> {
    if encoded.len() < SOI_MARKER.len() {
        return Err(OutputError::InvalidImage {
            len: encoded.len(),
        });
    }

    let mut out = File::create(dest).map_err(|source| OutputError::Create {
        dest: dest.to_path_buf(),
        source,
    })?;

    let result = write_stages(&mut out, exif, encoded);
    drop(out);

    if result.is_err() {
        // Don't leave a truncated JPEG behind
        if let Err(cleanup) = fs::remove_file(dest) {
            log::warn!(
                "Failed to remove partial output {}: {cleanup}",
                dest.display()
            );
        }
    }

    result
}

fn write_stages(
    out: &mut File,
    exif: Option<&ExifSegment>,
    encoded: &[u8],
) -> Result<(), OutputError> {
    out.write_all(&SOI_MARKER)
        .map_err(|source| OutputError::Write {
            stage: WriteStage::SoiHeader,
            source,
        })?;

    if let Some(segment) = exif {
        out.write_all(segment.as_bytes())
            .map_err(|source| OutputError::Write {
                stage: WriteStage::ExifBlock,
                source,
            })?;
    }

    out.write_all(&encoded[SOI_MARKER.len()..])
        .map_err(|source| OutputError::Write {
            stage: WriteStage::EncodedImage,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn segment(bytes: &[u8]) -> ExifSegment {
        ExifSegment::from_bytes(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_assemble_with_segment() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");

        let seg = segment(&[0xFF, 0xE1, 0x00, 0x04, 0xAB, 0xCD]);
        let encoded = [0xFF, 0xD8, 0x11, 0x22];

        write_jpeg_with_exif(&dest, Some(&seg), &encoded).unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(
            written,
            [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x04, 0xAB, 0xCD, 0x11, 0x22]
        );
    }

    #[test]
    fn test_assemble_without_segment() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");

        let encoded = [0xFF, 0xD8, 0x11, 0x22, 0x33];
        write_jpeg_with_exif(&dest, None, &encoded).unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert_eq!(written, [0xFF, 0xD8, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_assemble_minimal_encoded_image() {
        // Exactly 2 bytes: nothing remains after the stripped SOI
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");

        write_jpeg_with_exif(&dest, None, &[0xFF, 0xD8]).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), [0xFF, 0xD8]);
    }

    #[test]
    fn test_encoded_image_too_short() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");

        for encoded in [&[][..], &[0xFF][..]] {
            let result = write_jpeg_with_exif(&dest, None, encoded);
            assert!(matches!(
                result,
                Err(OutputError::InvalidImage { .. })
            ));
        }
        // The precondition check runs before any file is created
        assert!(!dest.exists());
    }

    #[test]
    fn test_create_error_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("no-such-dir").join("out.jpg");

        let result = write_jpeg_with_exif(&dest, None, &[0xFF, 0xD8, 0x00]);

        match result {
            Err(OutputError::Create { dest: reported, .. }) => {
                assert_eq!(reported, dest);
            }
            other => panic!("Expected Create error, got {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn test_overwrites_existing_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.jpg");
        std::fs::write(&dest, b"stale contents that are longer").unwrap();

        write_jpeg_with_exif(&dest, None, &[0xFF, 0xD8, 0x7F]).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), [0xFF, 0xD8, 0x7F]);
    }

    #[test]
    fn test_error_messages_name_the_stage() {
        let io_err = || io::Error::other("disk full");

        let err = OutputError::Write {
            stage: WriteStage::SoiHeader,
            source: io_err(),
        };
        assert_eq!(err.to_string(), "Failed to write SOI header: disk full");

        let err = OutputError::Write {
            stage: WriteStage::ExifBlock,
            source: io_err(),
        };
        assert_eq!(err.to_string(), "Failed to write EXIF block: disk full");

        let err = OutputError::Write {
            stage: WriteStage::EncodedImage,
            source: io_err(),
        };
        assert_eq!(err.to_string(), "Failed to write encoded image: disk full");
    }

    #[test]
    fn test_create_error_names_destination() {
        let err = OutputError::Create {
            dest: PathBuf::from("/tmp/photos/out.jpg"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create /tmp/photos/out.jpg: permission denied"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    proptest! {
        /// Property: for any segment payload and any encoded body, the
        /// destination holds SOI + segment + body-after-SOI, byte for byte.
        #[test]
        fn prop_output_layout(
            payload in prop::collection::vec(any::<u8>(), 0..128),
            body in prop::collection::vec(any::<u8>(), 0..128),
        ) {
            let declared = (payload.len() + 2) as u16;
            let mut seg_bytes = vec![0xFF, 0xE1];
            seg_bytes.extend_from_slice(&declared.to_be_bytes());
            seg_bytes.extend_from_slice(&payload);
            let seg = ExifSegment::from_bytes(seg_bytes.clone()).unwrap();

            let mut encoded = vec![0xFF, 0xD8];
            encoded.extend_from_slice(&body);

            let dir = TempDir::new().unwrap();
            let dest = dir.path().join("out.jpg");
            write_jpeg_with_exif(&dest, Some(&seg), &encoded).unwrap();

            let written = std::fs::read(&dest).unwrap();
            prop_assert_eq!(&written[..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&written[2..2 + seg_bytes.len()], &seg_bytes[..]);
            prop_assert_eq!(&written[2 + seg_bytes.len()..], &encoded[2..]);
        }

        /// Property: without a segment the output is SOI + body-after-SOI.
        #[test]
        fn prop_output_layout_no_segment(body in prop::collection::vec(any::<u8>(), 0..128)) {
            let mut encoded = vec![0xFF, 0xD8];
            encoded.extend_from_slice(&body);

            let dir = TempDir::new().unwrap();
            let dest = dir.path().join("out.jpg");
            write_jpeg_with_exif(&dest, None, &encoded).unwrap();

            let written = std::fs::read(&dest).unwrap();
            prop_assert_eq!(written, encoded);
        }
    }
}
