//! Overlay resampling and alpha attenuation.

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;

use super::error::OverlayError;
use super::position::Dimensions;

/// Resize an RGBA image using fast-image-resize with a Lanczos3 filter.
///
/// Alpha is premultiplied around the convolution so fully transparent
/// pixels do not bleed their color into the visible edge.
///
/// Returns `ResizeFailed` when either the source or the target has a zero
/// dimension.
pub fn resize_overlay(img: &RgbaImage, target: Dimensions) -> Result<RgbaImage, OverlayError> {
    let src_width = NonZeroU32::new(img.width())
        .ok_or_else(|| OverlayError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(img.height())
        .ok_or_else(|| OverlayError::resize_failed("Source height is 0"))?;
    let dst_width = NonZeroU32::new(target.width)
        .ok_or_else(|| OverlayError::resize_failed("Target width is 0"))?;
    let dst_height = NonZeroU32::new(target.height)
        .ok_or_else(|| OverlayError::resize_failed("Target height is 0"))?;

    if src_width == dst_width && src_height == dst_height {
        return Ok(img.clone());
    }

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        img.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| OverlayError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| OverlayError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));

    let mut dst_view = dst_image.view_mut();
    resizer
        .resize(&src_image.view(), &mut dst_view)
        .map_err(|e| OverlayError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_view)
        .map_err(|e| OverlayError::resize_failed(format!("Alpha unpremultiply failed: {:?}", e)))?;

    RgbaImage::from_raw(target.width, target.height, dst_image.into_vec())
        .ok_or_else(|| OverlayError::resize_failed("Failed to create output image buffer"))
}

/// Scale one alpha value by `factor`, rounded and clamped to 0..=255.
pub fn attenuate(alpha: u8, factor: f32) -> u8 {
    (alpha as f32 * factor).round().clamp(0.0, 255.0) as u8
}

/// Multiply every alpha value of the image by `factor` in place.
///
/// Color channels are untouched; this is a uniform fade, not a mask.
pub fn attenuate_alpha(img: &mut RgbaImage, factor: f32) {
    for pixel in img.pixels_mut() {
        pixel[3] = attenuate(pixel[3], factor);
    }
}
