//! Image decoding and cropping — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Sample (decode → RGBA)** | `image` crate decoders + `to_rgba8` |
//! | **Crop** | `DynamicImage::crop_imm` + format-matched encoder |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//!
//! Border detection itself lives in [`crate::detect`] and only ever sees an
//! [`ImageSample`], never a file or a codec.

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, ImageSample};
pub use params::{CropParams, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
