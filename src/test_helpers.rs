//! Shared test utilities for building synthetic pixel samples.
//!
//! Detection only ever sees an [`ImageSample`], so tests can fabricate
//! borders directly in memory without touching a codec or the filesystem.

use crate::imaging::ImageSample;

/// A `width`x`height` sample where every pixel is `(value, value, value)`.
pub fn flat_sample(width: u32, height: u32, value: u8) -> ImageSample {
    sample_from_fn(width, height, |_, _| (value, value, value))
}

/// A sample with pure-black vertical bars: `left_bar` columns on the left,
/// `right_bar` columns on the right, and `(value, value, value)` between.
pub fn bar_sample(
    width: u32,
    height: u32,
    left_bar: u32,
    right_bar: u32,
    value: u8,
) -> ImageSample {
    sample_from_fn(width, height, |x, _| {
        if x < left_bar || x >= width - right_bar {
            (0, 0, 0)
        } else {
            (value, value, value)
        }
    })
}

/// Build an RGBA sample pixel-by-pixel; alpha is always opaque.
pub fn sample_from_fn(
    width: u32,
    height: u32,
    f: impl Fn(u32, u32) -> (u8, u8, u8),
) -> ImageSample {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = f(x, y);
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    ImageSample::new(width, height, pixels).expect("buffer length matches by construction")
}
