//! Integration tests for the pipeline module.
//!
//! These tests verify end-to-end behavior including:
//! - Scanning, deduplication and copying in one pass
//! - Abort-on-error semantics for unreadable frames
//! - Output directory creation

use assert_fs::prelude::*;
use frame_dedup::core::dedup::DedupConfig;
use frame_dedup::core::pipeline::Pipeline;
use frame_dedup::FrameDedupError;
use image::{GrayImage, Luma};
use predicates::prelude::*;
use std::path::Path;

/// Write a flat 64x64 grayscale PNG
fn write_flat_frame(dir: &Path, name: &str, value: u8) {
    let img = GrayImage::from_pixel(64, 64, Luma([value]));
    img.save(dir.join(name)).unwrap();
}

/// Config sized for the synthetic 64x64 frames; no smoothing so flat
/// frames keep their exact pixel values
fn test_config(threshold: f64) -> DedupConfig {
    DedupConfig {
        target_resolution: (64, 64),
        smoothing_radii: vec![],
        similarity_threshold: threshold,
        min_region_area: 1,
        ..Default::default()
    }
}

#[test]
fn end_to_end_filters_duplicates_and_copies() {
    let source = assert_fs::TempDir::new().unwrap();
    let workspace = assert_fs::TempDir::new().unwrap();
    let out = workspace.child("filtered");

    write_flat_frame(source.path(), "a.png", 0);
    write_flat_frame(source.path(), "b.png", 0); // duplicate of a
    write_flat_frame(source.path(), "c.png", 200); // distinct scene

    let pipeline = Pipeline::builder(source.path())
        .dedup_config(test_config(100.0))
        .output_dir(out.path())
        .build()
        .unwrap();

    let result = pipeline.run().unwrap();

    assert_eq!(result.total_frames, 3);
    assert_eq!(result.retained.len(), 2);
    assert_eq!(result.discarded, 1);

    // The distinct frame survives regardless of listing order
    out.assert(predicate::path::is_dir());
    out.child("c.png").assert(predicate::path::exists());

    let copied = std::fs::read_dir(out.path()).unwrap().count();
    assert_eq!(copied, 2);
}

#[test]
fn empty_source_yields_empty_result() {
    let source = assert_fs::TempDir::new().unwrap();
    let workspace = assert_fs::TempDir::new().unwrap();
    let out = workspace.child("filtered");

    let pipeline = Pipeline::builder(source.path())
        .dedup_config(test_config(100.0))
        .output_dir(out.path())
        .build()
        .unwrap();

    let result = pipeline.run().unwrap();

    assert_eq!(result.total_frames, 0);
    assert!(result.retained.is_empty());

    // The output directory is still created, just empty
    out.assert(predicate::path::is_dir());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn unreadable_frame_aborts_before_any_copy() {
    let source = assert_fs::TempDir::new().unwrap();
    let workspace = assert_fs::TempDir::new().unwrap();
    let out = workspace.child("filtered");

    write_flat_frame(source.path(), "good.png", 0);
    source.child("broken.png").write_str("not a png").unwrap();

    let pipeline = Pipeline::builder(source.path())
        .dedup_config(test_config(100.0))
        .output_dir(out.path())
        .build()
        .unwrap();

    let error = pipeline.run().unwrap_err();

    // The failing frame is named, and nothing was copied
    assert!(error.to_string().contains("broken.png"));
    assert!(matches!(error, FrameDedupError::Load(_)));
    out.assert(predicate::path::missing());
}

#[test]
fn nonexistent_source_is_a_scan_error() {
    let pipeline = Pipeline::builder("/nonexistent/frame/dump")
        .dedup_config(test_config(100.0))
        .build()
        .unwrap();

    let error = pipeline.run().unwrap_err();
    assert!(matches!(error, FrameDedupError::Scan(_)));
    assert!(error.to_string().contains("/nonexistent/frame/dump"));
}

#[test]
fn zero_threshold_retains_everything() {
    let source = assert_fs::TempDir::new().unwrap();

    write_flat_frame(source.path(), "a.png", 0);
    write_flat_frame(source.path(), "b.png", 0);
    write_flat_frame(source.path(), "c.png", 0);

    // Duplicate requires score strictly below the threshold; no
    // non-negative score is strictly below zero
    let pipeline = Pipeline::builder(source.path())
        .dedup_config(test_config(0.0))
        .build()
        .unwrap();

    let result = pipeline.run().unwrap();
    assert_eq!(result.retained.len(), 3);
}

#[test]
fn mixed_resolutions_are_normalized_before_comparison() {
    let source = assert_fs::TempDir::new().unwrap();

    // Same flat content at different resolutions: once resized to the
    // common resolution they are indistinguishable
    let small = GrayImage::from_pixel(32, 32, Luma([128]));
    small.save(source.path().join("small.png")).unwrap();
    let large = GrayImage::from_pixel(128, 96, Luma([128]));
    large.save(source.path().join("large.png")).unwrap();

    let pipeline = Pipeline::builder(source.path())
        .dedup_config(test_config(100.0))
        .build()
        .unwrap();

    let result = pipeline.run().unwrap();
    assert_eq!(result.total_frames, 2);
    assert_eq!(result.retained.len(), 1);
}
