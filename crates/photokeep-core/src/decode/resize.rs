//! Downscaling for re-encoded photos.
//!
//! Photokeep shrinks oversized photos to a maximum edge length before
//! re-encoding. Aspect ratio is always preserved and images are never
//! upscaled.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image so its longest edge is at most `max_edge` pixels.
///
/// Aspect ratio is preserved. Images already within the bound are returned
/// unchanged (cloned), never upscaled.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_edge` is zero, and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image dimensions.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_edge);

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized =
        image::imageops::resize(&rgb_image, new_width, new_height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Scale dimensions so the longest edge equals `max_edge`, preserving
/// aspect ratio. Neither result dimension drops below 1.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
