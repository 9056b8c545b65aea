//! # unpillar
//!
//! Detects and crops near-black pillarbox borders from photos. Given images
//! suspected of carrying solid dark padding on their left/right edges (the
//! vertical bars screenshots and re-exported video frames pick up),
//! unpillar finds the tightest horizontal window that excludes the padding,
//! writes a `*_corrected` copy next to the source, and optionally publishes
//! it into a photo-library directory.
//!
//! # Architecture: Detect, Decide, Execute
//!
//! The pipeline keeps pure computation and side effects in separate,
//! independently testable units:
//!
//! ```text
//! 1. Sample   file       →  ImageSample     (decode, imaging backend)
//! 2. Detect   sample     →  CropBounds      (pure pixel math)
//! 3. Fix      bounds     →  *_corrected     (crop, move, library copy)
//! 4. Batch    path list  →  reports + progress events
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: border detection is a pure function over an in-memory
//!   buffer, so its edge cases are unit-tested with synthetic pixels — no
//!   image files, no codecs.
//! - **Resilience**: correction is best-effort per image. Every failure is
//!   folded into a typed outcome and the source path remains a valid
//!   result, so one unreadable file never aborts a batch.
//! - **Predictable memory**: the batch is strictly sequential; at most one
//!   decoded image is alive at a time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`detect`] | Pure border detection: scanline over an RGBA sample → [`detect::CropBounds`] |
//! | [`fix`] | Single-image execution — crop decision, temp-file crop, atomic move, library copy |
//! | [`batch`] | Sequential driver with per-item progress events and the JSON run report |
//! | [`imaging`] | `ImageBackend` trait + pure-Rust backend on the `image` crate |
//! | [`library`] | Photo-library collaborator: directory-backed album storage |
//! | [`scan`] | CLI input discovery: files and walked directories → ordered image list |
//! | [`naming`] | The `*_corrected` output filename convention |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`output`] | CLI output formatting — pure `format_*` functions per stage |
//!
//! # Design Decisions
//!
//! ## Single Scan Row
//!
//! Detection samples one row at the image's vertical midpoint. The target
//! defect is a full-height uniform bar, so one row suffices; the midpoint
//! dodges rounded corners and watermarks near the edges, and the scan is
//! O(width). Borders that do not span the full height are out of scope.
//!
//! ## Crop Slack
//!
//! A detected trim of ≤2px total is ignored. Such a crop has no visible
//! benefit, and near the threshold it is as likely to be compression noise
//! as border. The slack is configurable (`[crop] edge_slack`).
//!
//! ## Sequential Batches
//!
//! Throughput is deliberately traded for a flat memory profile: images are
//! processed one at a time, so peak memory is one decoded buffer regardless
//! of batch size, and progress moves in exact `1/N` steps.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and encoding go through the `image` crate — no ImageMagick, no
//! system dependencies. The binary is fully self-contained.

pub mod batch;
pub mod config;
pub mod detect;
pub mod fix;
pub mod imaging;
pub mod library;
pub mod naming;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
