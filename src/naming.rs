//! Centralized filename derivation for corrected outputs.
//!
//! A corrected image lands next to its source, with a fixed suffix inserted
//! before the extension:
//!
//! - `IMG_0042.jpg` → `IMG_0042_corrected.jpg`
//! - `holiday.photo.png` → `holiday.photo_corrected.png`
//! - `scan` (no extension) → `scan_corrected.jpg` (fallback extension)
//!
//! All path derivation goes through this module so the fix stage, the
//! display layer, and the tests agree on one convention.

use std::path::{Path, PathBuf};

/// Derive the output path for a corrected copy of `source`.
///
/// The suffix is inserted before the final extension; sources without an
/// extension get `fallback_ext`. The directory component is preserved.
pub fn corrected_path(source: &Path, suffix: &str, fallback_ext: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback_ext.to_string());

    let file_name = format!("{stem}{suffix}.{ext}");
    match source.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrected(source: &str) -> PathBuf {
        corrected_path(Path::new(source), "_corrected", "jpg")
    }

    #[test]
    fn inserts_suffix_before_extension() {
        assert_eq!(
            corrected("/photos/IMG_0042.jpg"),
            PathBuf::from("/photos/IMG_0042_corrected.jpg")
        );
    }

    #[test]
    fn preserves_source_directory() {
        assert_eq!(
            corrected("/a/b/c/photo.png"),
            PathBuf::from("/a/b/c/photo_corrected.png")
        );
    }

    #[test]
    fn relative_path_stays_relative() {
        assert_eq!(corrected("photo.webp"), PathBuf::from("photo_corrected.webp"));
    }

    #[test]
    fn no_extension_gets_fallback() {
        assert_eq!(corrected("/photos/scan"), PathBuf::from("/photos/scan_corrected.jpg"));
    }

    #[test]
    fn multi_dot_name_keeps_inner_dots() {
        assert_eq!(
            corrected("/photos/holiday.photo.png"),
            PathBuf::from("/photos/holiday.photo_corrected.png")
        );
    }

    #[test]
    fn custom_suffix_and_fallback() {
        let path = corrected_path(Path::new("/p/scan"), "-fixed", "png");
        assert_eq!(path, PathBuf::from("/p/scan-fixed.png"));
    }

    #[test]
    fn uppercase_extension_is_preserved() {
        assert_eq!(
            corrected("/photos/IMG.JPG"),
            PathBuf::from("/photos/IMG_corrected.JPG")
        );
    }
}
