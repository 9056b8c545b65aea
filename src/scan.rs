//! Input discovery: turn CLI path arguments into an ordered image list.
//!
//! Arguments may be individual image files or directories. Files are kept
//! in argument order; directories are walked recursively with entries
//! sorted by file name, so a batch over the same tree is deterministic.
//! Inside a directory, non-image files are silently ignored; a file named
//! explicitly must be a supported image, because silently dropping an
//! argument the user typed would hide a mistake.

use crate::imaging::supported_input_extensions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("input path not found: {0}")]
    NotFound(PathBuf),
    #[error("not a supported image type: {0}")]
    Unsupported(PathBuf),
}

/// True when the path's extension has a compiled-in decoder.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| supported_input_extensions().contains(&e.as_str()))
}

/// Resolve `inputs` into the ordered list of images to process.
pub fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(ScanError::NotFound(input.clone()));
        }

        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && has_supported_extension(entry.path()) {
                    images.push(entry.into_path());
                }
            }
        } else if has_supported_extension(input) {
            images.push(input.clone());
        } else {
            return Err(ScanError::Unsupported(input.clone()));
        }
    }

    Ok(images)
}
