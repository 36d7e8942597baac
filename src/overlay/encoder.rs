//! PNG encoding for composited slides.
//!
//! Output is always 8-bit RGB. The encoded stream is passed through oxipng
//! for lossless size optimization with color type reductions disabled, so a
//! gray or flat slide is still written as RGB.

use image::codecs::png::PngEncoder;
use image::{ImageEncoder as _, RgbImage};
use std::io::Cursor;
use std::path::Path;

use super::error::OverlayError;
use crate::constants::PNG_OPTIMIZATION_LEVEL;

/// Encode an RGB image to an optimized PNG byte stream.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, OverlayError> {
    let mut output = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut output);

    encoder
        .write_image(img.as_raw(), img.width(), img.height(), image::ColorType::Rgb8)
        .map_err(|e| OverlayError::encode_failed(e.to_string()))?;

    let options = oxipng::Options {
        bit_depth_reduction: false,
        color_type_reduction: false,
        palette_reduction: false,
        grayscale_reduction: false,
        ..oxipng::Options::from_preset(PNG_OPTIMIZATION_LEVEL)
    };
    oxipng::optimize_from_memory(output.get_ref(), &options)
        .map_err(|e| OverlayError::encode_failed(format!("PNG optimization failed: {}", e)))
}

/// Encode and write an RGB image to `path`.
pub fn write_png(img: &RgbImage, path: &Path) -> Result<(), OverlayError> {
    let data = encode_png(img)?;
    std::fs::write(path, data).map_err(|e| OverlayError::io(path, e))
}
