//! Sequential batch driver.
//!
//! Applies the single-image correction over an ordered list of paths,
//! strictly one at a time. Sequencing is a deliberate backpressure choice:
//! decoding one full-resolution image at a time bounds peak memory to a
//! single pixel buffer, trading throughput for predictable resource usage.
//! It also makes progress reporting exact — after each item the driver
//! emits one [`BatchEvent`] whose `progress` is `completed / total`, so a
//! batch of N items produces the sequence `1/N, 2/N, …, N/N`.
//!
//! Because [`fix_image`](crate::fix::fix_image) absorbs every per-item
//! failure into its outcome, one bad file never aborts the rest of the
//! batch, and the result list always corresponds index-for-index to the
//! input list.

use crate::config::FixConfig;
use crate::fix::{self, FixReport, LibrarySave, Outcome, SkipReason};
use crate::imaging::ImageBackend;
use crate::library::PhotoLibrary;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Progress notification sent once per completed item.
#[derive(Debug, Clone)]
pub struct BatchEvent {
    /// Items finished so far (1-based; equals `total` on the last event).
    pub completed: usize,
    pub total: usize,
    /// `completed / total`, in (0, 1]. Non-decreasing across one run.
    pub progress: f64,
    pub report: FixReport,
}

/// Correct every image in `paths`, in order.
///
/// The output is index-for-index: `result[i]` describes `paths[i]`. An
/// empty input yields an empty output and no events.
pub fn process_all(
    backend: &impl ImageBackend,
    library: Option<&dyn PhotoLibrary>,
    paths: &[PathBuf],
    config: &FixConfig,
    events: Option<Sender<BatchEvent>>,
) -> Vec<FixReport> {
    let total = paths.len();
    let mut reports = Vec::with_capacity(total);

    for (index, path) in paths.iter().enumerate() {
        let report = fix::fix_image(backend, library, path, config);

        if let Some(events) = &events {
            let completed = index + 1;
            // A hung-up receiver should not stop the remaining items.
            let _ = events.send(BatchEvent {
                completed,
                total,
                progress: completed as f64 / total as f64,
                report: report.clone(),
            });
        }

        reports.push(report);
    }

    reports
}

/// Aggregate run report, serialized to JSON by the `--report` flag.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub corrected: usize,
    pub skipped: usize,
    pub failed: usize,
    pub items: Vec<ReportItem>,
}

#[derive(Debug, Serialize)]
pub struct ReportItem {
    pub source: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Pixels trimmed from the left and right edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trimmed: Option<[u32; 2]>,
    /// Library reference when the corrected copy was saved to a library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Skip reason, failure message, or library-save failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl BatchReport {
    pub fn from_reports(reports: &[FixReport]) -> Self {
        let items: Vec<ReportItem> = reports.iter().map(report_item).collect();
        Self {
            total: reports.len(),
            corrected: items.iter().filter(|i| i.status == "corrected").count(),
            skipped: items.iter().filter(|i| i.status == "skipped").count(),
            failed: items.iter().filter(|i| i.status == "failed").count(),
            items,
        }
    }
}

fn report_item(report: &FixReport) -> ReportItem {
    let source = report.source.display().to_string();
    match &report.outcome {
        Outcome::Corrected {
            output,
            bounds,
            library,
        } => {
            let (library_ref, detail) = match library {
                LibrarySave::Saved { reference } => (Some(reference.clone()), None),
                LibrarySave::Failed { detail } => {
                    (None, Some(format!("library save failed: {detail}")))
                }
                LibrarySave::Disabled => (None, None),
            };
            ReportItem {
                source,
                status: "corrected",
                output: Some(output.display().to_string()),
                trimmed: Some([bounds.trimmed_left(), bounds.trimmed_right()]),
                library: library_ref,
                detail,
            }
        }
        Outcome::Skipped { reason, .. } => ReportItem {
            source,
            status: "skipped",
            output: None,
            trimmed: None,
            library: None,
            detail: Some(
                match reason {
                    SkipReason::NoBorder => "no border detected",
                    SkipReason::DegenerateBounds => "degenerate detection window",
                }
                .to_string(),
            ),
        },
        Outcome::Failed { error } => ReportItem {
            source,
            status: "failed",
            output: None,
            trimmed: None,
            library: None,
            detail: Some(error.to_string()),
        },
    }
}
