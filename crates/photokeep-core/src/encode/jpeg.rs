//! JPEG encoding for re-compressed output.
//!
//! Uses the `image` crate's baseline JPEG encoder with configurable
//! quality. The encoder writes no metadata segments of its own; the
//! original EXIF block is spliced in afterwards by
//! [`crate::output::write_jpeg_with_exif`].

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match the image dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The underlying encoder failed.
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image to baseline JPEG bytes.
///
/// Quality is clamped to 1-100; around 85 is a good trade-off for archived
/// photos. The returned stream always opens with the SOI marker `FF D8`,
/// which [`crate::output::write_jpeg_with_exif`] relies on.
///
/// # Errors
///
/// Returns a typed error when the image has a zero dimension, when its
/// pixel buffer disagrees with its dimensions, or when the encoder itself
/// fails.
///
/// # Example
///
/// ```
/// use photokeep_core::decode::DecodedImage;
/// use photokeep_core::encode::encode_jpeg;
///
/// let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
/// let jpeg = encode_jpeg(&image, 85).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = (image.width as usize) * (image.height as usize) * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
