//! The shrink pipeline: re-compress a photo on disk without losing its
//! metadata.
//!
//! One pass over a single file: read the source bytes, lift out the EXIF
//! APP1 segment, decode, downscale, re-encode, and assemble the
//! destination file with the segment spliced back in. Each call is
//! self-contained and owns its destination exclusively, so concurrent
//! calls with distinct destinations need no coordination.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_jpeg, resize_to_fit, DecodeError, FilterType};
use crate::encode::{encode_jpeg, EncodeError};
use crate::metadata::{find_exif_segment, read_metadata};
use crate::output::{write_jpeg_with_exif, OutputError};

/// Errors from the shrink pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Re-encoding the resized image failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing the assembled destination failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Settings for a shrink pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkOptions {
    /// Maximum length of the longest edge, in pixels.
    pub max_edge: u32,
    /// JPEG quality for the re-encoded output (1-100).
    pub quality: u8,
    /// Interpolation filter used when downscaling.
    pub filter: FilterType,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        Self {
            max_edge: 2560,
            quality: 85,
            filter: FilterType::Lanczos3,
        }
    }
}

/// What a shrink pass did to one photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrinkReport {
    /// Source file path.
    pub source: PathBuf,
    /// Destination file path.
    pub dest: PathBuf,
    /// Capture timestamp from the source EXIF, if decodable.
    pub date_taken: Option<String>,
    /// True when an EXIF segment was found and relocated into the output.
    pub exif_preserved: bool,
    /// Source dimensions as stored (before any downscale).
    pub source_dimensions: (u32, u32),
    /// Output dimensions after the downscale.
    pub output_dimensions: (u32, u32),
}

/// Shrink one photo from `source` into `dest`, preserving its EXIF block.
///
/// Control flow: read source bytes, decode the capture timestamp, extract
/// the APP1 segment, decode the pixels, downscale to
/// [`ShrinkOptions::max_edge`], re-encode at [`ShrinkOptions::quality`],
/// and write the assembled file. A source without EXIF shrinks normally;
/// the report's `exif_preserved` flag records which case occurred.
/// Unreadable metadata is logged and skipped, never fatal.
///
/// # Errors
///
/// Fails when the source cannot be read or decoded, when re-encoding
/// fails, or when the destination cannot be written. Failures are
/// immediate and final; nothing is retried.
///
/// # Example
///
/// ```
/// use photokeep_core::pipeline::{shrink_photo, ShrinkOptions};
/// use std::path::Path;
///
/// let report = shrink_photo(
///     Path::new("DSC00042.jpg"),
///     Path::new("shrunk/DSC00042.jpg"),
///     &ShrinkOptions::default(),
/// ).unwrap();
/// println!("taken {:?}", report.date_taken);
/// ```
pub fn shrink_photo(
    source: &Path,
    dest: &Path,
    options: &ShrinkOptions,
) -> Result<ShrinkReport, PipelineError> {
    let raw = std::fs::read(source).map_err(|source_err| PipelineError::Read {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let date_taken = match read_metadata(&raw) {
        Ok(meta) => meta.date_taken,
        Err(e) => {
            log::warn!("No usable EXIF metadata in {}: {e}", source.display());
            None
        }
    };

    let exif_segment = find_exif_segment(&raw);

    let image = decode_jpeg(&raw)?;
    let resized = resize_to_fit(&image, options.max_edge, options.filter)?;
    let encoded = encode_jpeg(&resized, options.quality)?;

    log::debug!(
        "{}: {}x{} -> {}x{}, {} -> {} bytes",
        source.display(),
        image.width,
        image.height,
        resized.width,
        resized.height,
        raw.len(),
        encoded.len()
    );

    write_jpeg_with_exif(dest, exif_segment.as_ref(), &encoded)?;

    Ok(ShrinkReport {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        date_taken,
        exif_preserved: exif_segment.is_some(),
        source_dimensions: image.dimensions(),
        output_dimensions: resized.dimensions(),
    })
}
