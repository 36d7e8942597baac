//! Geometry for overlay placement.
//!
//! Computes the overlay size from the slide width, the edge padding, and the
//! top-left paste coordinate for each anchor.
//!
//! # Example
//!
//! ```
//! use owl_overlay::overlay::position::{calculate_position, Dimensions};
//! use owl_overlay::overlay::AnchorPosition;
//!
//! let slide = Dimensions::new(1000, 1000);
//! let overlay = Dimensions::new(100, 80);
//! let padding = 50;
//!
//! let pos = calculate_position(AnchorPosition::BottomRight, &slide, &overlay, padding);
//! assert_eq!((pos.x, pos.y), (850, 870)); // 1000 - 100 - 50, 1000 - 80 - 50
//! ```

use super::AnchorPosition;
use crate::constants::PADDING_PERCENT;

/// Width and height of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Top-left pixel where the overlay is pasted. May be negative before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i64,
    pub y: i64,
}

impl PlacementPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Target overlay size for a slide of `base_width` pixels.
///
/// Width is `floor(base_width * size_percent / 100)`; height follows the
/// source aspect ratio and is truncated. Either value may be zero for tiny
/// slides, which the resizer rejects.
pub fn scaled_overlay_size(base_width: u32, overlay: &Dimensions, size_percent: u32) -> Dimensions {
    let width = (base_width as u64 * size_percent as u64 / 100) as u32;
    let height = if overlay.width == 0 {
        0
    } else {
        (overlay.height as u64 * width as u64 / overlay.width as u64) as u32
    };
    Dimensions::new(width, height)
}

/// Margin between overlay and slide edge: `floor(5% of base width)`.
pub fn calculate_padding(base_width: u32) -> u32 {
    (base_width as u64 * PADDING_PERCENT as u64 / 100) as u32
}

/// Calculate the unclamped paste position for an anchor.
pub fn calculate_position(
    anchor: AnchorPosition,
    base: &Dimensions,
    overlay: &Dimensions,
    padding: u32,
) -> PlacementPosition {
    let bw = base.width as i64;
    let bh = base.height as i64;
    let ow = overlay.width as i64;
    let oh = overlay.height as i64;
    let p = padding as i64;

    match anchor {
        AnchorPosition::BottomRight => PlacementPosition::new(bw - ow - p, bh - oh - p),
        AnchorPosition::BottomLeft => PlacementPosition::new(p, bh - oh - p),
        AnchorPosition::TopRight => PlacementPosition::new(bw - ow - p, p),
        AnchorPosition::MidRight => PlacementPosition::new(bw - ow - p, (bh - oh).div_euclid(2)),
    }
}

/// Clamp a position so the overlay stays within the slide where it fits.
///
/// When the overlay is larger than the slide on an axis, that axis is pinned
/// to 0 and the excess is clipped during compositing.
pub fn clamp_to_bounds(
    pos: PlacementPosition,
    base: &Dimensions,
    overlay: &Dimensions,
) -> PlacementPosition {
    let max_x = (base.width as i64 - overlay.width as i64).max(0);
    let max_y = (base.height as i64 - overlay.height as i64).max(0);

    PlacementPosition::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
}
