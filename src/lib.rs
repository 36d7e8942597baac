// Owl Overlay Library
// Stamps a translucent mascot onto batches of slide images

pub mod batch;
pub mod constants;
pub mod logging;
pub mod overlay;
