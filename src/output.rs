//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every item is what happened to it — corrected, unchanged, failed —
//! with filesystem detail shown as secondary context on indented lines.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Detect
//!
//! ```text
//! IMG_0042.jpg
//!     Bars: 50px left, 50px right → keep 900x600 of 1000x600
//! IMG_0043.jpg
//!     No border (1920x1080)
//! ```
//!
//! ## Fix
//!
//! ```text
//! [1/3] IMG_0042.jpg
//!     Corrected → IMG_0042_corrected.jpg (trimmed 50+50px)
//!     Library: /photos/library/Borders/IMG_0042_corrected.jpg
//! [2/3] IMG_0043.jpg
//!     No border — kept original
//! [3/3] IMG_0044.jpg
//!     Failed (decode failed: bad magic) — kept original
//!
//! Corrected 1 of 3 images (1 unchanged, 1 failed)
//! ```

use crate::batch::BatchEvent;
use crate::detect::CropBounds;
use crate::fix::{FixError, FixReport, LibrarySave, Outcome, SkipReason};
use std::path::Path;

/// File name for display; falls back to the full path for odd inputs.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn describe_bounds(bounds: &CropBounds, slack: u32) -> String {
    if bounds.trimmed_left() == 0 && bounds.trimmed_right() == 0 {
        format!(
            "No border ({}x{})",
            bounds.original_width, bounds.original_height
        )
    } else if bounds.is_degenerate() || bounds.trim_is_negligible(slack) {
        format!(
            "Bars: {}px left, {}px right — too small to trim",
            bounds.trimmed_left(),
            bounds.trimmed_right()
        )
    } else {
        format!(
            "Bars: {}px left, {}px right \u{2192} keep {}x{} of {}x{}",
            bounds.trimmed_left(),
            bounds.trimmed_right(),
            bounds.width,
            bounds.original_height,
            bounds.original_width,
            bounds.original_height
        )
    }
}

// ============================================================================
// Detect output
// ============================================================================

/// Format one dry-run detection result as display lines.
pub fn format_detect_report(
    path: &Path,
    result: &Result<CropBounds, FixError>,
    slack: u32,
) -> Vec<String> {
    let mut lines = vec![display_name(path)];
    match result {
        Ok(bounds) => lines.push(format!("    {}", describe_bounds(bounds, slack))),
        Err(error) => lines.push(format!("    {}", error)),
    }
    lines
}

pub fn print_detect_report(path: &Path, result: &Result<CropBounds, FixError>, slack: u32) {
    for line in format_detect_report(path, result, slack) {
        println!("{}", line);
    }
}

// ============================================================================
// Fix output
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}/{}] {}",
        event.completed,
        event.total,
        display_name(&event.report.source)
    )];

    match &event.report.outcome {
        Outcome::Corrected {
            output,
            bounds,
            library,
        } => {
            lines.push(format!(
                "    Corrected \u{2192} {} (trimmed {}+{}px)",
                display_name(output),
                bounds.trimmed_left(),
                bounds.trimmed_right()
            ));
            match library {
                LibrarySave::Saved { reference } => {
                    lines.push(format!("    Library: {}", reference));
                }
                LibrarySave::Failed { detail } => {
                    lines.push(format!("    Library save failed: {}", detail));
                }
                LibrarySave::Disabled => {}
            }
        }
        Outcome::Skipped { reason, .. } => {
            let text = match reason {
                SkipReason::NoBorder => "No border",
                SkipReason::DegenerateBounds => "Nothing to keep",
            };
            lines.push(format!("    {} \u{2014} kept original", text));
        }
        Outcome::Failed { error } => {
            lines.push(format!("    Failed ({}) \u{2014} kept original", error));
        }
    }

    lines
}

/// Format the one-line run summary.
pub fn format_batch_summary(reports: &[FixReport]) -> Vec<String> {
    let corrected = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Corrected { .. }))
        .count();
    let skipped = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Skipped { .. }))
        .count();
    let failed = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
        .count();

    vec![
        String::new(),
        format!(
            "Corrected {} of {} images ({} unchanged, {} failed)",
            corrected,
            reports.len(),
            skipped,
            failed
        ),
    ]
}

pub fn print_batch_summary(reports: &[FixReport]) {
    for line in format_batch_summary(reports) {
        println!("{}", line);
    }
}
