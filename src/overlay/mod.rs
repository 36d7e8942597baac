//! Overlay module for stamping the mascot onto slide images.
//!
//! # Pipeline
//!
//! 1. Decode the slide and the overlay asset, both normalized to RGBA
//! 2. Resize the overlay to a percentage of the slide width (Lanczos3)
//! 3. Fade the overlay by multiplying its alpha with the preset opacity
//! 4. Anchor it with a padding of 5% of the slide width
//! 5. Paste it using its own alpha as mask
//! 6. Drop alpha and write an optimized RGB PNG
//!
//! # Presets
//!
//! | name         | size | opacity |
//! |--------------|------|---------|
//! | bottom-right | 10%  | 0.18    |
//! | bottom-left  | 10%  | 0.18    |
//! | top-right    | 8%   | 0.15    |
//! | mid-right    | 12%  | 0.20    |

pub mod compositor;
pub mod config;
pub mod encoder;
pub mod error;
pub mod position;
pub mod processor;
pub mod resize;

// Re-export main types for convenience
pub use compositor::{compose_image, flatten, paste_with_mask, prepare_overlay};
pub use config::{AnchorPosition, PlacementConfig, Preset, PresetTable, Resolution};
pub use encoder::{encode_png, write_png};
pub use error::OverlayError;
pub use position::{
    calculate_padding, calculate_position, clamp_to_bounds, scaled_overlay_size, Dimensions,
    PlacementPosition,
};
pub use processor::{compose, decode_image, OverlayCompositor, PresetLookup};
pub use resize::{attenuate_alpha, resize_overlay};
