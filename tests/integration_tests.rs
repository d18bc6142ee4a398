mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use common::{create_dataset, create_temp_directory, write_image};
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn squeeze(input: &Path, output: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dataset-squeeze").unwrap();
    cmd.arg("--input")
        .arg(input)
        .arg("--output")
        .arg(output)
        .arg("--no-input");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dataset-squeeze").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--crop-height"));
}

#[test]
fn test_unknown_mode_fails_before_io() {
    let temp_dir = create_temp_directory();
    let output = temp_dir.path().join("out");

    squeeze(Path::new("nonexistent"), &output)
        .args(["--mode", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown compression mode"));
    assert!(!output.exists());
}

#[test]
fn test_missing_mode_without_prompt() {
    let temp_dir = create_temp_directory();
    squeeze(temp_dir.path(), &temp_dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No compression mode given"));
}

#[test]
fn test_missing_parameter_without_prompt() {
    let temp_dir = create_temp_directory();
    squeeze(temp_dir.path(), &temp_dir.path().join("out"))
        .args(["--mode", "pyramid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("layers"));
}

#[test]
fn test_zero_resize_width_rejected() {
    let temp_dir = create_temp_directory();
    squeeze(temp_dir.path(), &temp_dir.path().join("out"))
        .args(["--mode", "resize", "--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive"));
}

#[test]
fn test_nonexistent_input_without_prompt() {
    let temp_dir = create_temp_directory();
    squeeze(&temp_dir.path().join("missing"), &temp_dir.path().join("out"))
        .args(["--mode", "3", "--quality", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_empty_directory_is_not_an_error() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    fs::write(input.path().join("notes.txt"), "text").unwrap();

    squeeze(input.path(), output.path())
        .args(["--mode", "quality", "--quality", "50"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No images found"));
}

#[test]
fn test_resize_run_writes_images_and_log() {
    let input = assert_fs::TempDir::new().unwrap();
    let output = assert_fs::TempDir::new().unwrap();
    create_dataset(input.path());

    squeeze(input.path(), output.path())
        .args(["--mode", "resize", "--width", "100"])
        .assert()
        .success();

    let run = output.child("output_folder_1");
    run.assert(predicate::path::is_dir());
    run.child("landscape.jpg").assert(predicate::path::exists());
    run.child("square.png").assert(predicate::path::exists());
    run.child("tall.jpeg").assert(predicate::path::exists());
    run.child("notes.txt").assert(predicate::path::missing());

    let landscape = image::open(run.child("landscape.jpg").path()).unwrap();
    assert_eq!((landscape.width(), landscape.height()), (100, 50));

    run.child("datalog.txt")
        .assert(predicate::str::starts_with("1. Total size of the original dataset:"))
        .assert(predicate::str::contains(
            "2 files were not saved because they are not in jpg, jpeg, png format.",
        ))
        .assert(predicate::str::contains("3 images compressed."))
        .assert(predicate::str::contains("Image Name"));
}

#[test]
fn test_each_run_gets_a_new_folder() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_image(input.path(), "a.png", 64, 64);

    for _ in 0..2 {
        squeeze(input.path(), output.path())
            .args(["--mode", "1", "--layers", "1", "--quiet"])
            .assert()
            .success();
    }

    assert!(output.path().join("output_folder_1").join("a.png").exists());
    assert!(output.path().join("output_folder_2").join("a.png").exists());
}

#[test]
fn test_failed_crop_is_logged_not_saved() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_image(input.path(), "a.png", 100, 100);

    squeeze(input.path(), output.path())
        .args(["--mode", "crop", "--crop-height", "-10", "--crop-width", "-10"])
        .assert()
        .success();

    let run = output.path().join("output_folder_1");
    assert!(!run.join("a.png").exists());

    let log = fs::read_to_string(run.join("datalog.txt")).unwrap();
    assert!(log.contains("1 images were not saved because their compression failed."));
    assert!(log.contains("Failure"));
    assert!(log.contains("Reduced dataset size by 100.00%."));
}

#[test]
fn test_out_of_range_quality_is_saved_with_warning() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_image(input.path(), "a.jpg", 80, 60);

    squeeze(input.path(), output.path())
        .args(["--mode", "quality", "--quality", "100"])
        .assert()
        .success()
        .stderr(predicate::str::contains("saved with warning"));

    let run = output.path().join("output_folder_1");
    let saved = image::open(run.join("a.jpg")).unwrap();
    assert_eq!((saved.width(), saved.height()), (80, 60));

    let log = fs::read_to_string(run.join("datalog.txt")).unwrap();
    assert!(log.contains("Success with warning"));
}

#[test]
fn test_optimized_png_run() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_image(input.path(), "a.png", 96, 96);

    squeeze(input.path(), output.path())
        .args(["--mode", "crop", "--crop-height", "40", "--crop-width", "40", "--optimize-png"])
        .assert()
        .success();

    let saved = image::open(output.path().join("output_folder_1").join("a.png")).unwrap();
    assert_eq!((saved.width(), saved.height()), (40, 40));
}
