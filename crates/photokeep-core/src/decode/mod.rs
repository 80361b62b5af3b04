//! Image decoding pipeline for Photokeep.
//!
//! This module provides functionality for:
//! - Decoding JPEG images into RGB pixel data
//! - Downscaling photos to a maximum edge length for re-encoding
//!
//! Decoding does not apply EXIF orientation: the original APP1 segment is
//! carried verbatim into the output file, so the orientation tag remains
//! the single source of truth (see [`crate::metadata`]).
//!
//! # Examples
//!
//! ```ignore
//! use photokeep_core::decode::{decode_jpeg, resize_to_fit, FilterType};
//!
//! let jpeg_bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_jpeg(&jpeg_bytes).unwrap();
//! let small = resize_to_fit(&image, 2560, FilterType::Lanczos3).unwrap();
//! ```

mod jpeg;
mod resize;
mod types;

pub use jpeg::decode_jpeg;
pub use resize::resize_to_fit;
pub use types::{DecodeError, DecodedImage, FilterType};
