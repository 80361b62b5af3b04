//! JPEG image decoding.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// JPEG start-of-image marker.
const SOI_MARKER: [u8; 2] = [0xFF, 0xD8];

/// Decode a JPEG byte stream into RGB pixel data.
///
/// EXIF orientation is deliberately NOT applied: Photokeep relocates the
/// original APP1 block (orientation tag included) into its output, so the
/// tag stays authoritative. Baking the rotation into the pixels as well
/// would make EXIF-aware viewers rotate the image twice.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes do not start with the
/// SOI marker, and `DecodeError::CorruptedFile` if the stream cannot be
/// decoded past the header.
pub fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.len() < 2 || bytes[..2] != SOI_MARKER {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;

    fn encoded_gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(64);
            }
        }
        encode_jpeg(&DecodedImage::new(width, height, pixels), 90).unwrap()
    }

    #[test]
    fn test_decode_encoder_output() {
        let jpeg = encoded_gradient(16, 9);
        let img = decode_jpeg(&jpeg).unwrap();

        assert_eq!(img.dimensions(), (16, 9));
        assert_eq!(img.pixels.len(), 16 * 9 * 3);
    }

    #[test]
    fn test_decode_rejects_non_jpeg() {
        let result = decode_jpeg(&[0x89, 0x50, 0x4E, 0x47]); // PNG magic
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(
            decode_jpeg(&[]),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = encoded_gradient(16, 16);
        let result = decode_jpeg(&jpeg[..jpeg.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_soi_only() {
        // Valid marker, nothing behind it
        let result = decode_jpeg(&[0xFF, 0xD8]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }
}
