//! Photo library collaborator.
//!
//! The original home of a corrected image is its source directory; the
//! library is an additional, user-visible collection the corrected copy is
//! published into (the desktop rendering of a phone's photo gallery). The
//! [`PhotoLibrary`] trait keeps the fix stage agnostic of where that
//! collection lives, mirroring the backend seam in [`crate::imaging`].
//!
//! Library insertion is best-effort by contract: callers record a failure
//! and keep the corrected file as their result.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("library destination has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Destination for corrected images.
///
/// `save_image` persists a copy of `source` and returns an opaque reference
/// to the stored asset (for [`DirectoryLibrary`], the destination path).
pub trait PhotoLibrary: Sync {
    fn save_image(&self, source: &Path, album: Option<&str>) -> Result<String, LibraryError>;
}

/// Library rooted at a directory tree; albums are subdirectories.
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Pick a destination that does not collide with an existing file by
/// appending `-1`, `-2`, … to the stem.
fn unique_destination(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let base = Path::new(file_name);
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let ext = base.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1.. {
        let name = match &ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!()
}

impl PhotoLibrary for DirectoryLibrary {
    fn save_image(&self, source: &Path, album: Option<&str>) -> Result<String, LibraryError> {
        let dir = match album {
            Some(album) => self.root.join(album),
            None => self.root.clone(),
        };
        std::fs::create_dir_all(&dir)?;

        let file_name = source
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .ok_or_else(|| LibraryError::NoFileName(source.to_path_buf()))?;
        let dest = unique_destination(&dir, &file_name);
        std::fs::copy(source, &dest)?;

        Ok(dest.display().to_string())
    }
}
