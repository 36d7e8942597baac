//! Batch runner for a directory of slides.
//!
//! Discovers `slide_*.png` files in an input directory, composites each one
//! in lexicographic order, and writes the results under the same file name
//! into an output directory.
//!
//! # Failure Policy
//!
//! - [`FailurePolicy::Abort`]: the first failing slide stops the batch and
//!   its error is returned. Slides already written stay on disk.
//! - [`FailurePolicy::Continue`]: failures are logged and collected in
//!   [`BatchReport::failed`]; the remaining slides are still processed.
//!
//! # Cancellation
//!
//! A shared flag is checked before each slide. Setting it (e.g. from a
//! SIGINT handler) stops the batch after the slide in progress.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::{OUTPUT_DIR_SUFFIX, SLIDE_FILE_PATTERN};
use crate::overlay::{compose, OverlayCompositor, OverlayError};

/// What to do when a single slide fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure
    #[default]
    Abort,
    /// Record the failure and move on
    Continue,
}

/// How a batch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every discovered slide was attempted
    Completed,
    /// No slide matched the naming pattern
    NoInputs,
    /// The cancel flag was raised before all slides were attempted
    Cancelled,
}

/// A slide that could not be processed under `FailurePolicy::Continue`.
#[derive(Debug)]
pub struct FailedSlide {
    pub input: PathBuf,
    pub error: OverlayError,
}

/// Summary of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    pub status: BatchStatus,
    pub output_dir: PathBuf,
    /// Output files written, in processing order
    pub processed: Vec<PathBuf>,
    pub failed: Vec<FailedSlide>,
}

impl BatchReport {
    fn new(status: BatchStatus, output_dir: PathBuf) -> Self {
        Self {
            status,
            output_dir,
            processed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status != BatchStatus::Cancelled && self.failed.is_empty()
    }
}

/// Sibling directory `<input_dir_name>-with-owl` of the input directory.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    let name = input_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = input_dir.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{}{}", name, OUTPUT_DIR_SUFFIX))
}

/// List `slide_*.png` files directly inside `input_dir`, sorted by file name.
pub fn discover_slides(input_dir: &Path) -> Result<Vec<PathBuf>, OverlayError> {
    let pattern = Regex::new(SLIDE_FILE_PATTERN).map_err(|e| OverlayError::Io {
        path: input_dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
    })?;

    let entries = std::fs::read_dir(input_dir).map_err(|e| OverlayError::io(input_dir, e))?;

    let mut slides = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OverlayError::io(input_dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| pattern.is_match(n))
            .unwrap_or(false);

        if matches && path.is_file() {
            slides.push(path);
        }
    }

    slides.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(slides)
}

/// Runs the compositor over every slide of a directory.
#[derive(Debug)]
pub struct BatchRunner {
    compositor: OverlayCompositor,
    policy: FailurePolicy,
    cancel: Arc<AtomicBool>,
}

impl BatchRunner {
    pub fn new(compositor: OverlayCompositor) -> Self {
        Self {
            compositor,
            policy: FailurePolicy::default(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use an externally owned cancel flag (e.g. one registered with signal-hook).
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn compositor(&self) -> &OverlayCompositor {
        &self.compositor
    }

    /// Process every slide in `input_dir`.
    ///
    /// The output directory defaults to [`default_output_dir`] and is created
    /// (with parents) before discovery, so it exists even for an empty batch.
    pub fn run(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        preset_name: &str,
    ) -> Result<BatchReport, OverlayError> {
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_dir(input_dir));

        // Resolve once so an unknown name is reported a single time
        let preset = self.compositor.resolve_preset(preset_name)?;

        std::fs::create_dir_all(&output_dir).map_err(|e| OverlayError::io(&output_dir, e))?;

        let slides = discover_slides(input_dir)?;
        if slides.is_empty() {
            tracing::warn!(
                input = %input_dir.display(),
                "No slide_*.png files found"
            );
            return Ok(BatchReport::new(BatchStatus::NoInputs, output_dir));
        }

        self.compositor.ensure_asset()?;

        tracing::info!(
            count = slides.len(),
            preset = %preset.name,
            input = %input_dir.display(),
            output = %output_dir.display(),
            "Adding overlay to slides"
        );

        let mut report = BatchReport::new(BatchStatus::Completed, output_dir.clone());

        for slide in &slides {
            if self.cancel.load(Ordering::Relaxed) {
                tracing::warn!(
                    processed = report.processed.len(),
                    remaining = slides.len() - report.processed.len() - report.failed.len(),
                    "Batch cancelled"
                );
                report.status = BatchStatus::Cancelled;
                return Ok(report);
            }

            // Discovered paths always carry a file name
            let file_name = slide.file_name().unwrap_or_default();
            let target = output_dir.join(file_name);

            match compose(
                slide,
                self.compositor.overlay_path(),
                &target,
                &preset.placement,
            ) {
                Ok(written) => {
                    tracing::info!(file = %file_name.to_string_lossy(), "Slide processed");
                    report.processed.push(written);
                }
                Err(error) => match self.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Continue => {
                        tracing::warn!(
                            file = %file_name.to_string_lossy(),
                            error = %error,
                            "Slide failed, continuing"
                        );
                        report.failed.push(FailedSlide {
                            input: slide.clone(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            output = %output_dir.display(),
            "Batch complete"
        );

        Ok(report)
    }
}
