//! End-to-end pipeline tests against the real imaging backend.
//!
//! Fixtures are synthesized with the `image` crate. PNG is used for the
//! exact-geometry cases because it is lossless: pure-black border columns
//! survive encoding byte-for-byte, so detection comes out pixel-exact.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use unpillar::batch::{self, BatchReport};
use unpillar::config::FixConfig;
use unpillar::fix::{self, LibrarySave, Outcome, SkipReason};
use unpillar::imaging::RustBackend;
use unpillar::library::{DirectoryLibrary, PhotoLibrary};

/// Write a PNG with `left_bar`/`right_bar` columns of pure black and a
/// uniform `(value, value, value)` interior.
fn write_bar_png(path: &Path, width: u32, height: u32, left_bar: u32, right_bar: u32, value: u8) {
    let img = image::RgbImage::from_fn(width, height, |x, _| {
        if x < left_bar || x >= width - right_bar {
            image::Rgb([0, 0, 0])
        } else {
            image::Rgb([value, value, value])
        }
    });
    img.save(path).unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}

#[test]
fn detect_finds_pillar_bars_in_encoded_file() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("barred.png");
    write_bar_png(&source, 1000, 600, 50, 50, 128);

    let backend = RustBackend::new();
    let bounds = fix::inspect(&backend, &source, &FixConfig::default()).unwrap();

    assert_eq!(bounds.left, 50);
    assert_eq!(bounds.width, 900);
    assert_eq!(bounds.original_width, 1000);
    assert_eq!(bounds.original_height, 600);
}

#[test]
fn fix_crops_to_the_detected_window() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("barred.png");
    write_bar_png(&source, 1000, 600, 50, 50, 128);

    let backend = RustBackend::new();
    let report = fix::fix_image(&backend, None, &source, &FixConfig::default());

    let Outcome::Corrected { output, .. } = &report.outcome else {
        panic!("expected Corrected, got {:?}", report.outcome);
    };
    assert_eq!(output, &tmp.path().join("barred_corrected.png"));
    assert_eq!(dimensions(output), (900, 600));
    // Source is untouched
    assert_eq!(dimensions(&source), (1000, 600));
}

#[test]
fn uniform_gray_image_is_left_alone() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("gray.png");
    write_bar_png(&source, 500, 500, 0, 0, 100);

    let backend = RustBackend::new();
    let report = fix::fix_image(&backend, None, &source, &FixConfig::default());

    assert!(matches!(
        report.outcome,
        Outcome::Skipped {
            reason: SkipReason::NoBorder,
            ..
        }
    ));
    assert_eq!(report.effective_path(), source.as_path());
    assert!(!tmp.path().join("gray_corrected.png").exists());
}

#[test]
fn correcting_a_corrected_image_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("barred.png");
    write_bar_png(&source, 400, 200, 20, 30, 150);

    let backend = RustBackend::new();
    let config = FixConfig::default();

    let first = fix::fix_image(&backend, None, &source, &config);
    let corrected = first.effective_path().to_path_buf();
    assert_eq!(dimensions(&corrected), (350, 200));

    // The corrected copy has no bars left, so a second pass keeps it as-is.
    let second = fix::fix_image(&backend, None, &corrected, &config);
    assert!(matches!(second.outcome, Outcome::Skipped { .. }));
    assert_eq!(second.effective_path(), corrected.as_path());
}

#[test]
fn jpeg_source_roundtrips_through_jpeg_encoder() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("barred.jpg");
    let img = image::RgbImage::from_fn(640, 480, |x, _| {
        if x < 60 || x >= 580 {
            image::Rgb([0, 0, 0])
        } else {
            image::Rgb([200, 200, 200])
        }
    });
    img.save(&source).unwrap();

    let backend = RustBackend::new();
    let config = FixConfig::default();
    // JPEG is lossy, so hold the geometry to the detected bounds rather
    // than to exact constants.
    let bounds = fix::inspect(&backend, &source, &config).unwrap();
    assert!(bounds.left.abs_diff(60) <= 2, "left bar off: {}", bounds.left);

    let report = fix::fix_image(&backend, None, &source, &config);
    let Outcome::Corrected { output, .. } = &report.outcome else {
        panic!("expected Corrected, got {:?}", report.outcome);
    };
    assert_eq!(dimensions(output), (bounds.width, 480));
}

#[test]
fn batch_preserves_order_and_survives_a_bad_file() {
    let tmp = TempDir::new().unwrap();

    let barred = tmp.path().join("a-barred.png");
    write_bar_png(&barred, 1000, 600, 50, 50, 128);

    let broken = tmp.path().join("b-broken.png");
    std::fs::write(&broken, b"definitely not a png").unwrap();

    let clean = tmp.path().join("c-clean.png");
    write_bar_png(&clean, 300, 300, 0, 0, 90);

    let inputs = vec![barred.clone(), broken.clone(), clean.clone()];

    let backend = RustBackend::new();
    let (tx, rx) = std::sync::mpsc::channel();
    let reports = batch::process_all(&backend, None, &inputs, &FixConfig::default(), Some(tx));

    // Index-for-index correspondence, middle failure included
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].source, barred);
    assert_eq!(reports[1].source, broken);
    assert_eq!(reports[2].source, clean);
    assert!(matches!(reports[0].outcome, Outcome::Corrected { .. }));
    assert!(matches!(reports[1].outcome, Outcome::Failed { .. }));
    assert!(matches!(reports[2].outcome, Outcome::Skipped { .. }));
    assert_eq!(reports[1].effective_path(), broken.as_path());

    // Progress is exactly 1/3, 2/3, 3/3
    let progress: Vec<f64> = rx.iter().map(|e| e.progress).collect();
    assert_eq!(progress, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);

    let summary = BatchReport::from_reports(&reports);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.corrected, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn corrected_copies_land_in_the_library_album() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("barred.png");
    write_bar_png(&source, 200, 100, 10, 10, 180);

    let library_root = tmp.path().join("library");
    let library = DirectoryLibrary::new(&library_root);

    let mut config = FixConfig::default();
    config.library.album = Some("Corrected".to_string());

    let backend = RustBackend::new();
    let report = fix::fix_image(
        &backend,
        Some(&library as &dyn PhotoLibrary),
        &source,
        &config,
    );

    let Outcome::Corrected { library: save, .. } = &report.outcome else {
        panic!("expected Corrected");
    };
    let LibrarySave::Saved { reference } = save else {
        panic!("expected library save, got {:?}", save);
    };

    let published = library_root.join("Corrected/barred_corrected.png");
    assert!(published.exists());
    assert_eq!(PathBuf::from(reference), published);
    assert_eq!(dimensions(&published), (180, 100));
}
