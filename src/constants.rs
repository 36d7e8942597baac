// Constants module - centralized default values for the overlay pipeline
//
// Defaults used by the CLI, the batch runner and the compositor live here
// so that the magic numbers of the pipeline are visible in one place.

// =============================================================================
// Preset defaults
// =============================================================================

/// Preset used when none is requested or the requested one is unknown
pub const DEFAULT_PRESET: &str = "bottom-right";

// =============================================================================
// Geometry defaults
// =============================================================================

/// Margin between overlay and image edge, as a percentage of base width
pub const PADDING_PERCENT: u32 = 5;

// =============================================================================
// Filesystem defaults
// =============================================================================

/// File name of the bundled mascot asset, looked up next to the executable
pub const OVERLAY_ASSET_FILE: &str = "owl_image_nobg.png";

/// Suffix appended to the input directory name to derive the output directory
pub const OUTPUT_DIR_SUFFIX: &str = "-with-owl";

/// Pattern matched against input file names
pub const SLIDE_FILE_PATTERN: &str = r"^slide_.*\.png$";

// =============================================================================
// Encoding defaults
// =============================================================================

/// oxipng optimization preset (0-6, higher is slower and smaller)
pub const PNG_OPTIMIZATION_LEVEL: u8 = 2;
