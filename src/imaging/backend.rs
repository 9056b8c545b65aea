//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend
//! must support: identify, sample, and crop.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Everything is statically linked into the binary.

use super::params::CropParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded raster: dimensions plus an RGBA8 pixel buffer.
///
/// Pixels are 4 bytes each (R, G, B, A), row-major, top-to-bottom. The
/// sample is created for one detection pass and dropped immediately after,
/// so at most one decoded image is held in memory at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSample {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageSample {
    /// Wrap a raw RGBA8 buffer. The buffer length must be exactly
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BackendError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BackendError::ProcessingFailed(format!(
                "pixel buffer length {} does not match {}x{} RGBA ({} bytes)",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// The R, G, B channels of the pixel at `(x, y)`. Alpha is not used by
    /// border detection. Panics if the coordinates are out of range.
    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        assert!(x < self.width && y < self.height, "pixel out of range");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations — identify, sample,
/// and crop — so the rest of the codebase is backend-agnostic.
pub trait ImageBackend: Sync {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode an image into an RGBA sample for border detection.
    fn sample(&self, path: &Path) -> Result<ImageSample, BackendError>;

    /// Execute a crop operation, writing the retained rectangle to
    /// `params.output` in the format implied by its extension.
    fn crop(&self, params: &CropParams) -> Result<(), BackendError>;
}
