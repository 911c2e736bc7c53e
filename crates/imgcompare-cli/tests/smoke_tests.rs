//! Smoke tests for the imgcompare CLI
//!
//! These tests run the real binary against small PNG fixtures.

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a command for the imgcompare binary
fn imgcompare() -> Command {
    let mut cmd = Command::cargo_bin("imgcompare").expect("imgcompare binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("IMGCOMPARE_CONFIG");
    cmd
}

fn fixture(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save(&path)
        .unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help_flag() {
    imgcompare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("similarity"))
        .stdout(predicate::str::contains("composite"));
}

#[test]
fn test_no_args_fails() {
    imgcompare().assert().failure();
}

// ============================================================================
// Similarity
// ============================================================================

#[test]
fn test_similarity_identical() {
    let dir = TempDir::new().unwrap();
    let a = fixture(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);

    imgcompare()
        .arg("similarity")
        .arg(&a)
        .arg(&a)
        .assert()
        .success()
        .stdout(predicate::str::contains("Image similarity: 100.00%"))
        .stdout(predicate::str::contains("Images are identical"));
}

#[test]
fn test_similarity_below_threshold_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let a = fixture(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);
    let b = fixture(dir.path(), "b.png", 2, 2, [0, 0, 255, 255]);

    imgcompare()
        .arg("similarity")
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stdout(predicate::str::contains("33.33%"))
        .stderr(predicate::str::contains("Images differ"));
}

#[test]
fn test_similarity_json() {
    let dir = TempDir::new().unwrap();
    let a = fixture(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);
    let b = fixture(dir.path(), "b.png", 2, 2, [0, 0, 255, 255]);

    let output = imgcompare()
        .args(["similarity", "--format", "json", "--threshold", "0.3"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["similar"], serde_json::Value::Bool(true));
    assert_eq!(json["compared_pixels"], 4);
    assert!((json["score"].as_f64().unwrap() - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_similarity_missing_file() {
    imgcompare()
        .args(["similarity", "/nonexistent/a.png", "/nonexistent/b.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Composite
// ============================================================================

#[test]
fn test_composite_prints_absolute_path() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    let a = fixture(dir.path(), "a.png", 3, 2, [255, 0, 0, 255]);
    let b = fixture(dir.path(), "b.png", 2, 2, [0, 0, 255, 255]);

    let output = imgcompare()
        .arg("composite")
        .arg(&a)
        .arg(&b)
        .arg("--vertical-cut")
        .arg("--output-dir")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let path = PathBuf::from(printed.trim());
    assert!(path.is_absolute());
    assert!(path.exists());

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
}

#[test]
fn test_composite_invalid_alpha() {
    let dir = TempDir::new().unwrap();
    let a = fixture(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);

    imgcompare()
        .arg("composite")
        .arg(&a)
        .arg(&a)
        .args(["--alpha", "1.5", "--output-dir"])
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid alpha"));
}

#[test]
fn test_composite_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("from-config");
    let config = dir.path().join("engine.yaml");
    fs::write(
        &config,
        format!("output_dir: {}\nfile_prefix: cfg\n", out_dir.display()),
    )
    .unwrap();
    let a = fixture(dir.path(), "a.png", 2, 2, [255, 0, 0, 255]);

    imgcompare()
        .arg("--config")
        .arg(&config)
        .arg("composite")
        .arg(&a)
        .arg(&a)
        .assert()
        .success()
        .stdout(predicate::str::contains("cfg-"));

    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
}
