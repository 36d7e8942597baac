//! File-level compositing: decode → compose → encode.
//!
//! [`compose`] works on explicit paths and a resolved placement.
//! [`OverlayCompositor`] holds the injected overlay asset path and preset
//! table, and resolves presets by name.

use image::DynamicImage;
use std::path::{Path, PathBuf};

use super::compositor::compose_image;
use super::config::{PlacementConfig, Preset, PresetTable, Resolution};
use super::encoder::write_png;
use super::error::OverlayError;

/// Decode an image file, converting any I/O or format failure to `DecodeFailed`.
pub fn decode_image(path: &Path) -> Result<DynamicImage, OverlayError> {
    image::io::Reader::open(path)
        .map_err(|e| OverlayError::decode_failed(path, e.to_string()))?
        .with_guessed_format()
        .map_err(|e| OverlayError::decode_failed(path, e.to_string()))?
        .decode()
        .map_err(|e| OverlayError::decode_failed(path, e.to_string()))
}

/// Composite the overlay onto one slide and write the result as PNG.
///
/// The overlay is decoded fresh on every call. Returns `output_path`.
pub fn compose(
    base_path: &Path,
    overlay_path: &Path,
    output_path: &Path,
    placement: &PlacementConfig,
) -> Result<PathBuf, OverlayError> {
    let base = decode_image(base_path)?;
    let overlay = decode_image(overlay_path)?;

    let composite = compose_image(&base, &overlay, placement)?;
    write_png(&composite, output_path)?;

    Ok(output_path.to_path_buf())
}

/// How unknown preset names are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetLookup {
    /// Log a warning and use the table's default preset
    #[default]
    Fallback,
    /// Reject the name with `UnknownPreset`
    Strict,
}

/// Compositor bound to one overlay asset and one preset table.
#[derive(Debug, Clone)]
pub struct OverlayCompositor {
    overlay_path: PathBuf,
    presets: PresetTable,
    lookup: PresetLookup,
}

impl OverlayCompositor {
    pub fn new(overlay_path: impl Into<PathBuf>, presets: PresetTable) -> Self {
        Self {
            overlay_path: overlay_path.into(),
            presets,
            lookup: PresetLookup::default(),
        }
    }

    pub fn with_lookup(mut self, lookup: PresetLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn overlay_path(&self) -> &Path {
        &self.overlay_path
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    /// Check that the overlay asset exists before any slide is touched.
    pub fn ensure_asset(&self) -> Result<(), OverlayError> {
        if self.overlay_path.is_file() {
            Ok(())
        } else {
            Err(OverlayError::AssetNotFound {
                path: self.overlay_path.clone(),
            })
        }
    }

    /// Resolve a preset name according to the lookup policy.
    pub fn resolve_preset(&self, name: &str) -> Result<&Preset, OverlayError> {
        match self.lookup {
            PresetLookup::Strict => self.presets.resolve_strict(name),
            PresetLookup::Fallback => {
                let resolution = self.presets.resolve(name);
                if let Resolution::Fallback(preset) = resolution {
                    tracing::warn!(
                        requested = %name,
                        using = %preset.name,
                        "Unknown preset, falling back to default"
                    );
                }
                Ok(resolution.preset())
            }
        }
    }

    /// Composite one slide using the named preset.
    pub fn compose(
        &self,
        base_path: &Path,
        output_path: &Path,
        preset_name: &str,
    ) -> Result<PathBuf, OverlayError> {
        let preset = self.resolve_preset(preset_name)?;
        compose(base_path, &self.overlay_path, output_path, &preset.placement)
    }
}
