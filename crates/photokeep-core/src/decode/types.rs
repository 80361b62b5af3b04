//! Core types for JPEG decoding and resizing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a JPEG stream (missing SOI marker) or a resize
    /// parameter is out of range.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The stream starts like a JPEG but cannot be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Interpolation filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// A decoded image held as RGB8 pixel data.
///
/// Pixels are row-major, 3 bytes per pixel; the buffer length is always
/// `width * height * 3`.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new image from dimensions and a matching pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an `image::RgbImage`, taking ownership of its buffer.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert back into an `image::RgbImage` for further processing.
    ///
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Dimensions as a `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when either dimension is zero or the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
