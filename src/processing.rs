use crate::constants::PNG_OPTIMIZATION_PRESET;
use crate::error::{CompressionError, Result};
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use oxipng::Options;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Loads an image file and returns it along with its size on disk.
///
/// # Arguments
/// * `input_path` - Path to the image file to load
///
/// # Returns
/// * `Ok((image, file_size))` - The decoded image and its file size in bytes
/// * `Err(CompressionError)` - If the file is missing, unreadable or undecodable
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = fs::metadata(input_path)?.len();
    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;
    Ok((img, file_size))
}

/// Output format is taken from the file extension; only JPEG and PNG are written.
pub fn determine_output_format(output: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(output) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => Ok(format),
        _ => Err(CompressionError::UnsupportedFormat(output.to_path_buf())),
    }
}

/// Encodes the image next to its siblings in the output folder and returns the
/// written size in bytes.
///
/// The JPEG encoder only takes 8-bit gray or RGB, so anything else is
/// flattened to RGB first. With `optimize_png` the PNG bytes go through oxipng before they are
/// written.
pub fn save_image(img: &DynamicImage, output: &Path, optimize_png: bool) -> Result<u64> {
    let format = determine_output_format(output)?;

    let mut encoded = Vec::new();
    match (format, img.color()) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) | (ImageFormat::Png, _) => {
            img.write_to(&mut Cursor::new(&mut encoded), format)?;
        }
        _ => {
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_to(&mut Cursor::new(&mut encoded), format)?;
        }
    }

    if format == ImageFormat::Png && optimize_png {
        let options = Options::from_preset(PNG_OPTIMIZATION_PRESET);
        encoded = oxipng::optimize_from_memory(&encoded, &options)
            .map_err(|e| CompressionError::PngOptimization(e.to_string()))?;
    }

    fs::write(output, &encoded)?;
    Ok(encoded.len() as u64)
}
