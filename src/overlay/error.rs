//! Overlay error types.
//!
//! Defines errors that can occur while compositing the mascot onto slides
//! and while running a batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during overlay processing.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Failed to read or decode an input image
    #[error("Failed to decode image {}: {message}", .path.display())]
    DecodeFailed { path: PathBuf, message: String },

    /// The overlay asset does not exist
    #[error("Overlay asset not found: {}", .path.display())]
    AssetNotFound { path: PathBuf },

    /// Resampling the overlay failed
    #[error("Resize failed: {message}")]
    ResizeFailed { message: String },

    /// Encoding the composite to PNG failed
    #[error("Failed to encode PNG: {message}")]
    EncodeFailed { message: String },

    /// Requested preset is not in the table (strict mode only)
    #[error("Unknown preset '{name}' (available: {available})")]
    UnknownPreset { name: String, available: String },

    /// A preset failed validation
    #[error("Invalid preset '{name}': {message}")]
    InvalidPreset { name: String, message: String },

    /// Filesystem error on a specific path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OverlayError {
    pub fn decode_failed(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        Self::ResizeFailed {
            message: message.into(),
        }
    }

    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::EncodeFailed {
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
