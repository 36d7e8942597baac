//! Compositor for pasting the mascot onto a slide.
//!
//! The overlay's own alpha channel is used as the blend mask: where the mask
//! is 255 the overlay pixel replaces the slide pixel, where it is 0 the slide
//! is kept, and values in between interpolate linearly. The slide's alpha is
//! blended the same way and is then discarded when flattening.
//!
//! # Example
//!
//! ```ignore
//! use owl_overlay::overlay::{compose_image, PresetTable};
//!
//! let presets = PresetTable::builtin();
//! let placement = presets.resolve("mid-right").preset().placement;
//! let rgb = compose_image(&slide, &mascot, &placement)?;
//! ```

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use super::config::PlacementConfig;
use super::error::OverlayError;
use super::position::{
    calculate_padding, calculate_position, clamp_to_bounds, scaled_overlay_size, Dimensions,
    PlacementPosition,
};
use super::resize::{attenuate_alpha, resize_overlay};

/// Run the in-memory pipeline: resize, fade, position, paste, flatten.
pub fn compose_image(
    base: &DynamicImage,
    overlay: &DynamicImage,
    placement: &PlacementConfig,
) -> Result<RgbImage, OverlayError> {
    let mut canvas = base.to_rgba8();
    let mascot = prepare_overlay(&overlay.to_rgba8(), canvas.width(), placement)?;

    let position = overlay_position(&canvas, &mascot, placement);
    tracing::debug!(
        base_width = canvas.width(),
        base_height = canvas.height(),
        overlay_width = mascot.width(),
        overlay_height = mascot.height(),
        x = position.x,
        y = position.y,
        "Compositing overlay"
    );

    paste_with_mask(&mut canvas, &mascot, position);
    Ok(flatten(&canvas))
}

/// Resize the overlay to the preset width and apply the opacity factor.
pub fn prepare_overlay(
    overlay: &RgbaImage,
    base_width: u32,
    placement: &PlacementConfig,
) -> Result<RgbaImage, OverlayError> {
    let source = Dimensions::new(overlay.width(), overlay.height());
    let target = scaled_overlay_size(base_width, &source, placement.size_percent);

    let mut resized = resize_overlay(overlay, target)?;
    attenuate_alpha(&mut resized, placement.opacity);
    Ok(resized)
}

/// Clamped paste position of a prepared overlay on the canvas.
pub fn overlay_position(
    canvas: &RgbaImage,
    overlay: &RgbaImage,
    placement: &PlacementConfig,
) -> PlacementPosition {
    let base = Dimensions::new(canvas.width(), canvas.height());
    let mascot = Dimensions::new(overlay.width(), overlay.height());
    let padding = calculate_padding(base.width);

    let pos = calculate_position(placement.position, &base, &mascot, padding);
    clamp_to_bounds(pos, &base, &mascot)
}

/// Paste `overlay` at `position`, using its alpha as the mask.
///
/// Parts of the overlay outside the canvas are clipped.
pub fn paste_with_mask(canvas: &mut RgbaImage, overlay: &RgbaImage, position: PlacementPosition) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    // Visible region in canvas coordinates
    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x + overlay.width() as i64).min(canvas_width);
    let y_end = (position.y + overlay.height() as i64).min(canvas_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let ox = (tx - position.x) as u32;
            let oy = (ty - position.y) as u32;

            let fg = *overlay.get_pixel(ox, oy);
            let bg = canvas.get_pixel_mut(tx as u32, ty as u32);
            *bg = blend_masked(*bg, fg);
        }
    }
}

/// Linear interpolation between `bg` and `fg` weighted by `fg`'s alpha.
fn blend_masked(bg: Rgba<u8>, fg: Rgba<u8>) -> Rgba<u8> {
    let mask = fg[3] as u32;
    match mask {
        0 => bg,
        255 => fg,
        _ => {
            let mix = |f: u8, b: u8| -> u8 {
                ((f as u32 * mask + b as u32 * (255 - mask) + 127) / 255) as u8
            };
            Rgba([
                mix(fg[0], bg[0]),
                mix(fg[1], bg[1]),
                mix(fg[2], bg[2]),
                mix(fg[3], bg[3]),
            ])
        }
    }
}

/// Drop the alpha channel without matting against a background.
pub fn flatten(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let px = canvas.get_pixel(x, y);
        Rgb([px[0], px[1], px[2]])
    })
}
