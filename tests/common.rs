#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A gradient so JPEG re-encoding has something to work with.
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient_image(width, height).save(&path).unwrap();
    path
}

/// Two real images, one jpeg-named image and two files that are not picked up.
pub fn create_dataset(dir: &Path) -> Vec<PathBuf> {
    let files = vec![
        write_image(dir, "landscape.jpg", 200, 100),
        write_image(dir, "square.png", 128, 128),
        write_image(dir, "tall.jpeg", 90, 180),
    ];

    File::create(dir.join("notes.txt"))
        .unwrap()
        .write_all(b"not an image")
        .unwrap();
    File::create(dir.join("upper.JPG"))
        .unwrap()
        .write_all(b"extension is case-sensitive")
        .unwrap();

    files
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
