//! The four compression transforms.
//!
//! Each function consumes the decoded image and returns a [`StrategyResult`].
//! None of them return `Err`: geometry problems become [`Outcome::Failure`]
//! and soft floor violations become [`Outcome::SuccessWithWarning`].
//!
//! [`Outcome::Failure`]: crate::outcome::Outcome::Failure
//! [`Outcome::SuccessWithWarning`]: crate::outcome::Outcome::SuccessWithWarning

use crate::constants::{
    CODEC_MAX_QUALITY, CODEC_MIN_QUALITY, MAX_QUALITY, MIN_QUALITY, PYRAMID_HARD_FLOOR,
    PYRAMID_MIN_HEIGHT, PYRAMID_MIN_WIDTH, RESIZE_MIN_HEIGHT, RESIZE_MIN_WIDTH,
};
use crate::outcome::StrategyResult;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat, ImageResult};

/// Size and quality floors the strategies classify against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub pyramid_min_width: u32,
    pub pyramid_min_height: u32,
    pub resize_min_width: u32,
    pub resize_min_height: u32,
    pub pyramid_hard_floor: u32,
    pub min_quality: i32,
    pub max_quality: i32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            pyramid_min_width: PYRAMID_MIN_WIDTH,
            pyramid_min_height: PYRAMID_MIN_HEIGHT,
            resize_min_width: RESIZE_MIN_WIDTH,
            resize_min_height: RESIZE_MIN_HEIGHT,
            pyramid_hard_floor: PYRAMID_HARD_FLOOR,
            min_quality: MIN_QUALITY,
            max_quality: MAX_QUALITY,
        }
    }
}

impl Limits {
    /// Uses `size` as the soft floor for both pyramid and resize output.
    pub fn with_min_size(mut self, size: u32) -> Self {
        self.pyramid_min_width = size;
        self.pyramid_min_height = size;
        self.resize_min_width = size;
        self.resize_min_height = size;
        self
    }

    pub fn with_hard_floor(mut self, floor: u32) -> Self {
        self.pyramid_hard_floor = floor;
        self
    }

    pub fn quality_in_range(&self, quality: i32) -> bool {
        (self.min_quality..=self.max_quality).contains(&quality)
    }
}

fn describe(img: &DynamicImage) -> String {
    let (width, height) = img.dimensions();
    format!("{}x{}x{}", width, height, img.color().channel_count())
}

/// One Gaussian-weighted 2:1 reduction, rounding odd sizes up.
fn pyr_down(img: &DynamicImage) -> DynamicImage {
    let width = img.width().div_ceil(2);
    let height = img.height().div_ceil(2);
    img.resize_exact(width, height, FilterType::Gaussian)
}

/// Halves the image `layers` times, stopping at the first layer that drops
/// below the pyramid floor.
pub fn pyramid(img: DynamicImage, layers: u32, limits: &Limits) -> StrategyResult {
    let (width, height) = img.dimensions();
    if width / 2 < limits.pyramid_hard_floor || height / 2 < limits.pyramid_hard_floor {
        return StrategyResult::failure(format!(
            "Image {}x{} is too small to downsample (hard floor {})",
            width, height, limits.pyramid_hard_floor
        ));
    }

    if layers == 0 {
        let detail = format!("Pyramid with 0 layers kept the image at {}", describe(&img));
        return StrategyResult::success(img, detail);
    }

    let mut current = img;
    for layer in 1..=layers {
        current = pyr_down(&current);
        let (w, h) = current.dimensions();
        if w < limits.pyramid_min_width || h < limits.pyramid_min_height {
            let detail = format!(
                "Pyramid stopped at layer {} of {}: {} is below the {}x{} minimum",
                layer,
                layers,
                describe(&current),
                limits.pyramid_min_width,
                limits.pyramid_min_height
            );
            return StrategyResult::warning(current, detail);
        }
    }

    let detail = format!("Pyramid layer {} reached: {}", layers, describe(&current));
    StrategyResult::success(current, detail)
}

fn resize_to(img: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.dimensions() == (width, height) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    }
}

/// Resizes to `target_width`, either as a square or keeping the aspect ratio.
pub fn resize(img: DynamicImage, target_width: u32, square: bool, limits: &Limits) -> StrategyResult {
    if target_width == 0 {
        return StrategyResult::failure("Resize target width must be positive");
    }

    let target_height = if square {
        target_width
    } else {
        let (width, height) = img.dimensions();
        let scaled = f64::from(height) * f64::from(target_width) / f64::from(width);
        scaled.round().max(1.0) as u32
    };

    let too_small = if square {
        target_width < limits.resize_min_width
    } else {
        target_width < limits.resize_min_width || target_height < limits.resize_min_height
    };

    let resized = resize_to(img, target_width, target_height);
    let detail = if too_small {
        format!(
            "Resized to {} but below the {}x{} minimum",
            describe(&resized),
            limits.resize_min_width,
            limits.resize_min_height
        )
    } else {
        format!("Resized to {}", describe(&resized))
    };
    StrategyResult::checked(resized, too_small, detail)
}

fn jpeg_round_trip(img: &DynamicImage, quality: u8) -> ImageResult<DynamicImage> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    image::load_from_memory_with_format(&buf, ImageFormat::Jpeg)
}

/// Pushes the image through the JPEG codec at `quality` and decodes it back,
/// so the result carries real codec artifacts.
pub fn quality(img: DynamicImage, quality: i32, limits: &Limits) -> StrategyResult {
    let codec_quality =
        quality.clamp(i32::from(CODEC_MIN_QUALITY), i32::from(CODEC_MAX_QUALITY)) as u8;

    let decoded = match jpeg_round_trip(&img, codec_quality) {
        Ok(decoded) => decoded,
        Err(e) => {
            return StrategyResult::failure(format!(
                "JPEG round trip at quality {} failed: {}",
                quality, e
            ))
        }
    };

    if limits.quality_in_range(quality) {
        StrategyResult::success(decoded, format!("Re-encoded with JPEG quality {}", quality))
    } else {
        StrategyResult::warning(
            decoded,
            format!(
                "Quality {} is outside the valid range {}-{}; encoded with {}",
                quality, limits.min_quality, limits.max_quality, codec_quality
            ),
        )
    }
}

/// A crop window centered on the image, in `(row, column)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub start_row: i64,
    pub start_col: i64,
    pub end_row: i64,
    pub end_col: i64,
}

impl CropWindow {
    pub fn centered(width: u32, height: u32, target_height: i64, target_width: i64) -> Self {
        let center_row = i64::from(height) / 2;
        let center_col = i64::from(width) / 2;
        let start_row = center_row - target_height.div_euclid(2);
        let start_col = center_col - target_width.div_euclid(2);
        Self {
            start_row,
            start_col,
            end_row: start_row + target_height,
            end_col: start_col + target_width,
        }
    }

    pub fn height(&self) -> i64 {
        self.end_row - self.start_row
    }

    pub fn width(&self) -> i64 {
        self.end_col - self.start_col
    }

    pub fn has_positive_extent(&self) -> bool {
        self.height() > 0 && self.width() > 0 && self.end_row > 0 && self.end_col > 0
    }

    /// Intersection with a `width` x `height` image.
    pub fn clip(&self, width: u32, height: u32) -> Self {
        let (w, h) = (i64::from(width), i64::from(height));
        Self {
            start_row: self.start_row.clamp(0, h),
            start_col: self.start_col.clamp(0, w),
            end_row: self.end_row.clamp(0, h),
            end_col: self.end_col.clamp(0, w),
        }
    }
}

impl std::fmt::Display for CropWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{}) to ({},{})",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

/// Cuts a `target_height` x `target_width` window out of the image center.
///
/// Windows reaching past the image edge are clipped and reported as a warning.
pub fn crop(img: DynamicImage, target_height: i64, target_width: i64) -> StrategyResult {
    let (width, height) = img.dimensions();
    let window = CropWindow::centered(width, height, target_height, target_width);

    if !window.has_positive_extent() {
        return StrategyResult::failure(format!(
            "Invalid crop {}x{}: window {} has a non-positive extent",
            target_height, target_width, window
        ));
    }

    let clipped = window.clip(width, height);
    if !clipped.has_positive_extent() {
        return StrategyResult::failure(format!(
            "Crop window {} lies outside the {}x{} image",
            window, width, height
        ));
    }

    let cropped = img.crop_imm(
        clipped.start_col as u32,
        clipped.start_row as u32,
        clipped.width() as u32,
        clipped.height() as u32,
    );

    if clipped != window {
        let detail = format!(
            "Crop window {} exceeds the {}x{} image; clipped to {}",
            window, width, height, clipped
        );
        StrategyResult::warning(cropped, detail)
    } else {
        StrategyResult::success(
            cropped,
            format!("Image cropped from center {}", window),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;

    fn dims(result: &StrategyResult) -> Option<(u32, u32)> {
        result.image().map(|img| img.dimensions())
    }

    #[test]
    fn test_pyramid_zero_layers_is_noop() {
        let result = pyramid(DynamicImage::new_rgb8(64, 48), 0, &Limits::default());
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((64, 48)));
    }

    #[test]
    fn test_pyramid_halves_each_layer() {
        let result = pyramid(DynamicImage::new_rgb8(256, 256), 2, &Limits::default());
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((64, 64)));
        assert!(result.detail().contains("64x64"));
    }

    #[test]
    fn test_pyramid_stops_below_floor() {
        // 256 -> 128 -> 64 -> 32 -> 16: the fourth layer breaches 30.
        let result = pyramid(DynamicImage::new_rgb8(256, 256), 6, &Limits::default());
        assert_eq!(result.outcome(), Outcome::SuccessWithWarning);
        assert_eq!(dims(&result), Some((16, 16)));
        assert!(result.detail().contains("layer 4 of 6"));
    }

    #[test]
    fn test_pyramid_odd_dimensions_round_up() {
        let result = pyramid(DynamicImage::new_rgb8(101, 75), 1, &Limits::default());
        assert_eq!(dims(&result), Some((51, 38)));
    }

    #[test]
    fn test_pyramid_hard_floor_when_configured() {
        let limits = Limits::default().with_hard_floor(100);
        let result = pyramid(DynamicImage::new_rgb8(150, 150), 1, &limits);
        assert_eq!(result.outcome(), Outcome::Failure);
        assert!(result.image().is_none());
    }

    #[test]
    fn test_resize_keeps_aspect_ratio() {
        let result = resize(DynamicImage::new_rgb8(200, 100), 100, false, &Limits::default());
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((100, 50)));
    }

    #[test]
    fn test_resize_aspect_rounds_height() {
        // 75 * 40 / 100 = 30.0, 33 * 40 / 100 = 13.2
        let result = resize(DynamicImage::new_rgb8(100, 75), 40, false, &Limits::default());
        assert_eq!(dims(&result), Some((40, 30)));
        assert_eq!(result.outcome(), Outcome::Success);

        let result = resize(DynamicImage::new_rgb8(100, 33), 40, false, &Limits::default());
        assert_eq!(dims(&result), Some((40, 13)));
        assert_eq!(result.outcome(), Outcome::SuccessWithWarning);
    }

    #[test]
    fn test_resize_square_below_floor_warns() {
        let result = resize(DynamicImage::new_rgb8(200, 100), 10, true, &Limits::default());
        assert_eq!(result.outcome(), Outcome::SuccessWithWarning);
        assert_eq!(dims(&result), Some((10, 10)));
        assert!(result.detail().contains("10x10"));
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let first = resize(DynamicImage::new_rgb8(200, 100), 100, false, &Limits::default());
        let (img, _, _) = first.into_parts();
        let second = resize(img.unwrap(), 100, false, &Limits::default());
        assert_eq!(dims(&second), Some((100, 50)));
    }

    #[test]
    fn test_resize_zero_width_fails() {
        let result = resize(DynamicImage::new_rgb8(200, 100), 0, true, &Limits::default());
        assert_eq!(result.outcome(), Outcome::Failure);
    }

    #[test]
    fn test_quality_in_range() {
        let result = quality(DynamicImage::new_rgb8(40, 20), 50, &Limits::default());
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((40, 20)));
    }

    #[test]
    fn test_quality_out_of_range_warns() {
        for q in [0, 100, -5, 250] {
            let result = quality(DynamicImage::new_rgba8(40, 20), q, &Limits::default());
            assert_eq!(result.outcome(), Outcome::SuccessWithWarning, "quality {}", q);
            assert_eq!(dims(&result), Some((40, 20)));
            assert!(result.detail().contains("outside the valid range"));
        }
    }

    #[test]
    fn test_crop_window_math() {
        let window = CropWindow::centered(100, 100, 40, 40);
        assert_eq!((window.start_row, window.start_col), (30, 30));
        assert_eq!((window.end_row, window.end_col), (70, 70));
    }

    #[test]
    fn test_crop_window_odd_negative_target_floors() {
        let window = CropWindow::centered(100, 100, -11, 10);
        assert_eq!(window.start_row, 56);
        assert_eq!(window.end_row, 45);
        assert!(!window.has_positive_extent());
    }

    #[test]
    fn test_crop_centered() {
        let result = crop(DynamicImage::new_rgb8(100, 100), 40, 40);
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((40, 40)));
        assert!(result.detail().contains("(30,30) to (70,70)"));
    }

    #[test]
    fn test_crop_rows_and_columns() {
        // 20 rows by 60 columns out of a 200 wide, 100 tall image
        let result = crop(DynamicImage::new_rgb8(200, 100), 20, 60);
        assert_eq!(dims(&result), Some((60, 20)));
        assert!(result.detail().contains("(40,70) to (60,130)"));
    }

    #[test]
    fn test_crop_negative_target_fails() {
        let result = crop(DynamicImage::new_rgb8(100, 100), -10, -10);
        assert_eq!(result.outcome(), Outcome::Failure);
        assert!(result.image().is_none());
        assert!(!result.detail().is_empty());
    }

    #[test]
    fn test_crop_larger_than_image_clips() {
        let result = crop(DynamicImage::new_rgb8(50, 50), 80, 80);
        assert_eq!(result.outcome(), Outcome::SuccessWithWarning);
        assert_eq!(dims(&result), Some((50, 50)));
        assert!(result.detail().contains("clipped to (0,0) to (50,50)"));
    }

    #[test]
    fn test_crop_same_size_is_noop() {
        let result = crop(DynamicImage::new_rgb8(40, 40), 40, 40);
        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(dims(&result), Some((40, 40)));
    }

    #[test]
    fn test_limits_with_min_size() {
        let limits = Limits::default().with_min_size(8);
        let result = resize(DynamicImage::new_rgb8(200, 100), 10, true, &limits);
        assert_eq!(result.outcome(), Outcome::Success);
        assert!(limits.quality_in_range(1));
        assert!(limits.quality_in_range(99));
        assert!(!limits.quality_in_range(100));
    }
}
