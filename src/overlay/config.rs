//! Placement presets for the mascot overlay.
//!
//! A preset bundles an anchor position, the overlay width relative to the
//! slide, and an opacity factor. Presets are kept in a read-only
//! [`PresetTable`] that is built once and handed to the compositor.
//!
//! # Configuration Example
//!
//! ```yaml
//! presets:
//!   - name: bottom-right
//!     position: bottom-right
//!     size_percent: 10
//!     opacity: 0.18
//!   - name: corner-badge
//!     position: top-right
//!     size_percent: 6
//!     opacity: 0.3
//! default: bottom-right
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::error::OverlayError;
use crate::constants::DEFAULT_PRESET;

fn default_preset_name() -> String {
    DEFAULT_PRESET.to_string()
}

/// Anchor point of the overlay on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPosition {
    BottomRight,
    BottomLeft,
    TopRight,
    /// Right edge, vertically centered
    MidRight,
}

impl AnchorPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::MidRight => "mid-right",
        }
    }
}

impl std::fmt::Display for AnchorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of the overlay on a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Anchor point on the slide
    pub position: AnchorPosition,

    /// Overlay width as a percentage of the slide width
    pub size_percent: u32,

    /// Multiplier applied to the overlay alpha channel (0.0 to 1.0)
    pub opacity: f32,
}

impl PlacementConfig {
    pub const fn new(position: AnchorPosition, size_percent: u32, opacity: f32) -> Self {
        Self {
            position,
            size_percent,
            opacity,
        }
    }

    /// Validate the placement values.
    pub fn validate(&self) -> Result<(), String> {
        if self.size_percent == 0 || self.size_percent > 100 {
            return Err(format!(
                "size_percent must be between 1 and 100, got {}",
                self.size_percent
            ));
        }

        // Check for NaN/Infinity and valid range
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!(
                "opacity must be a finite value between 0.0 and 1.0, got {}",
                self.opacity
            ));
        }

        Ok(())
    }
}

/// A named placement preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub placement: PlacementConfig,
}

/// Outcome of looking up a preset by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The requested name was found
    Exact(&'a Preset),
    /// The requested name was unknown; the default preset was used
    Fallback(&'a Preset),
}

impl<'a> Resolution<'a> {
    pub fn preset(&self) -> &'a Preset {
        match self {
            Self::Exact(preset) | Self::Fallback(preset) => preset,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// On-disk layout of a preset table.
#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,

    /// Name of the preset used for unknown lookups
    #[serde(default = "default_preset_name")]
    default: String,
}

/// Ordered, read-only mapping from preset name to placement.
///
/// Order is preserved so that listings (e.g. CLI usage) are stable. A table
/// is always non-empty and its default name always refers to one of its
/// presets.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    presets: Vec<Preset>,
    default: String,
}

impl PresetTable {
    /// The four built-in presets.
    pub fn builtin() -> Self {
        let presets = [
            ("bottom-right", AnchorPosition::BottomRight, 10, 0.18),
            ("bottom-left", AnchorPosition::BottomLeft, 10, 0.18),
            ("top-right", AnchorPosition::TopRight, 8, 0.15),
            ("mid-right", AnchorPosition::MidRight, 12, 0.20),
        ]
        .into_iter()
        .map(|(name, position, size_percent, opacity)| Preset {
            name: name.to_string(),
            placement: PlacementConfig::new(position, size_percent, opacity),
        })
        .collect();

        Self {
            presets,
            default: default_preset_name(),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, OverlayError> {
        let file: PresetFile =
            serde_yaml::from_str(yaml).map_err(|e| OverlayError::InvalidPreset {
                name: "<table>".to_string(),
                message: e.to_string(),
            })?;
        let table = Self {
            presets: file.presets,
            default: file.default,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OverlayError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| OverlayError::io(path, e))?;
        Self::from_yaml(&yaml)
    }

    /// Validate every preset, name uniqueness, and the default reference.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.presets.is_empty() {
            return Err(OverlayError::InvalidPreset {
                name: "<table>".to_string(),
                message: "preset table is empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for preset in &self.presets {
            if preset.name.is_empty() {
                return Err(OverlayError::InvalidPreset {
                    name: preset.name.clone(),
                    message: "name cannot be empty".to_string(),
                });
            }
            if !seen.insert(preset.name.as_str()) {
                return Err(OverlayError::InvalidPreset {
                    name: preset.name.clone(),
                    message: "duplicate preset name".to_string(),
                });
            }
            preset
                .placement
                .validate()
                .map_err(|message| OverlayError::InvalidPreset {
                    name: preset.name.clone(),
                    message,
                })?;
        }

        if !seen.contains(self.default.as_str()) {
            return Err(OverlayError::InvalidPreset {
                name: self.default.clone(),
                message: "default preset is not defined in the table".to_string(),
            });
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn default_preset(&self) -> &Preset {
        self.get(&self.default).unwrap_or(&self.presets[0])
    }

    /// Look up a preset, falling back to the default for unknown names.
    pub fn resolve(&self, name: &str) -> Resolution<'_> {
        match self.get(name) {
            Some(preset) => Resolution::Exact(preset),
            None => Resolution::Fallback(self.default_preset()),
        }
    }

    /// Look up a preset, rejecting unknown names.
    pub fn resolve_strict(&self, name: &str) -> Result<&Preset, OverlayError> {
        self.get(name).ok_or_else(|| OverlayError::UnknownPreset {
            name: name.to_string(),
            available: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}
