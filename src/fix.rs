//! Single-image correction: detect, decide, crop, move, publish.
//!
//! This is the effectful half of the pipeline. [`crate::detect`] owns the
//! pixel math; this module owns every file that gets touched on the way
//! from a suspect source to its corrected copy:
//!
//! ```text
//! source ── sample ──> CropBounds ── decision ──> crop to temp file
//!                                                 └─> atomic move to *_corrected
//!                                                     └─> best-effort library copy
//! ```
//!
//! Correction is best-effort per image. `fix_image` never fails at the
//! signature level: decode, crop, and move problems are folded into a typed
//! [`Outcome`], and the source path remains the caller's valid fallback
//! result. A batch over many images therefore cannot be aborted by one bad
//! file.

use crate::config::FixConfig;
use crate::detect::{self, CropBounds};
use crate::imaging::{CropParams, ImageBackend, Quality};
use crate::library::PhotoLibrary;
use crate::naming;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Failure kinds of a single-image correction.
///
/// Payloads are rendered messages rather than source errors so outcomes
/// stay cloneable for progress events and reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("crop failed: {0}")]
    Crop(String),
    #[error("file move failed: {0}")]
    FileMove(String),
}

/// Why an image was left untouched. Not errors — valid "nothing to do".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The detected window is within slack of the full width.
    NoBorder,
    /// The detected window has zero width.
    DegenerateBounds,
}

/// Result of the library-copy side effect on a corrected image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySave {
    /// No library configured for this run.
    Disabled,
    Saved { reference: String },
    /// Insertion failed; the corrected file itself is unaffected.
    Failed { detail: String },
}

/// Tagged outcome of one correction. Never an exception to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Corrected {
        output: PathBuf,
        bounds: CropBounds,
        library: LibrarySave,
    },
    Skipped {
        reason: SkipReason,
        bounds: CropBounds,
    },
    Failed {
        error: FixError,
    },
}

/// One image's source path and what happened to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FixReport {
    pub source: PathBuf,
    pub outcome: Outcome,
}

impl FixReport {
    /// The path the caller should use from here on: the corrected copy when
    /// one was produced, the untouched source otherwise.
    pub fn effective_path(&self) -> &Path {
        match &self.outcome {
            Outcome::Corrected { output, .. } => output,
            _ => &self.source,
        }
    }
}

/// Decode and detect without writing anything. Used by the dry-run command
/// and as the first step of [`fix_image`].
pub fn inspect(
    backend: &impl ImageBackend,
    path: &Path,
    config: &FixConfig,
) -> Result<CropBounds, FixError> {
    let sample = backend
        .sample(path)
        .map_err(|e| FixError::Decode(e.to_string()))?;
    Ok(detect::detect_bounds(
        &sample,
        config.detection.black_threshold,
    ))
}

/// The geometry sanity check: `None` means the crop is worth doing.
///
/// Degenerate (zero-width) windows and trims within the slack are both
/// no-ops; the slack absorbs off-by-one scan noise so a ≤1px bar per side
/// never triggers a rewrite.
pub fn crop_decision(bounds: &CropBounds, slack: u32) -> Option<SkipReason> {
    if bounds.is_degenerate() {
        Some(SkipReason::DegenerateBounds)
    } else if bounds.trim_is_negligible(slack) {
        Some(SkipReason::NoBorder)
    } else {
        None
    }
}

/// Correct a single image, absorbing every failure into the outcome.
pub fn fix_image(
    backend: &impl ImageBackend,
    library: Option<&dyn PhotoLibrary>,
    path: &Path,
    config: &FixConfig,
) -> FixReport {
    FixReport {
        source: path.to_path_buf(),
        outcome: run_fix(backend, library, path, config),
    }
}

fn run_fix(
    backend: &impl ImageBackend,
    library: Option<&dyn PhotoLibrary>,
    path: &Path,
    config: &FixConfig,
) -> Outcome {
    let bounds = match inspect(backend, path, config) {
        Ok(bounds) => bounds,
        Err(error) => return Outcome::Failed { error },
    };

    if let Some(reason) = crop_decision(&bounds, config.crop.edge_slack) {
        return Outcome::Skipped { reason, bounds };
    }

    match crop_to_output(backend, path, &bounds, config) {
        Ok(output) => {
            let library = save_to_library(library, &output, config);
            Outcome::Corrected {
                output,
                bounds,
                library,
            }
        }
        Err(error) => Outcome::Failed { error },
    }
}

/// Crop into a temp file beside the source, then move it to the derived
/// output path. The temp file lives in the destination directory so the
/// move is a same-volume rename.
fn crop_to_output(
    backend: &impl ImageBackend,
    source: &Path,
    bounds: &CropBounds,
    config: &FixConfig,
) -> Result<PathBuf, FixError> {
    let output = naming::corrected_path(
        source,
        &config.output.suffix,
        &config.output.fallback_extension,
    );
    // The extension drives the encoder, so the temp file must share it.
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.output.fallback_extension.clone());

    let dir = match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(".unpillar-")
        .suffix(&format!(".{ext}"))
        .tempfile_in(&dir)
        .map_err(|e| FixError::Crop(e.to_string()))?;

    backend
        .crop(&CropParams {
            source: source.to_path_buf(),
            output: temp.path().to_path_buf(),
            left: bounds.left,
            top: 0,
            width: bounds.width,
            height: bounds.original_height,
            quality: Quality::new(config.crop.jpeg_quality),
        })
        .map_err(|e| FixError::Crop(e.to_string()))?;

    move_into_place(temp, &output)?;
    Ok(output)
}

/// Atomic rename, degrading to copy+delete when rename is not possible
/// (e.g. a destination on another volume).
fn move_into_place(temp: NamedTempFile, dest: &Path) -> Result<(), FixError> {
    match temp.persist(dest) {
        Ok(_) => Ok(()),
        Err(err) => {
            let temp = err.file; // deleted on drop
            std::fs::copy(temp.path(), dest)
                .map(|_| ())
                .map_err(|e| FixError::FileMove(e.to_string()))
        }
    }
}

fn save_to_library(
    library: Option<&dyn PhotoLibrary>,
    output: &Path,
    config: &FixConfig,
) -> LibrarySave {
    let Some(library) = library else {
        return LibrarySave::Disabled;
    };
    match library.save_image(output, config.library.album.as_deref()) {
        Ok(reference) => LibrarySave::Saved { reference },
        Err(e) => LibrarySave::Failed {
            detail: e.to_string(),
        },
    }
}
