pub const PYRAMID_MIN_WIDTH: u32 = 30;
pub const PYRAMID_MIN_HEIGHT: u32 = 30;
pub const RESIZE_MIN_WIDTH: u32 = 30;
pub const RESIZE_MIN_HEIGHT: u32 = 30;

// Reserved: a non-zero value makes the pyramid strategy refuse images whose
// half-size falls below it.
pub const PYRAMID_HARD_FLOOR: u32 = 0;

pub const MIN_QUALITY: i32 = 1;
pub const MAX_QUALITY: i32 = 99;

// Range the JPEG encoder accepts; out-of-range requests are clamped to it.
pub const CODEC_MIN_QUALITY: u8 = 1;
pub const CODEC_MAX_QUALITY: u8 = 100;

pub const PNG_OPTIMIZATION_PRESET: u8 = 4;

/// Extensions treated as images by the directory scanner. Matched case-sensitively.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const DEFAULT_INPUT_PATH: &str = "./input_path";
pub const DEFAULT_OUTPUT_PATH: &str = "output_path";
pub const OUTPUT_FOLDER_PREFIX: &str = "output_folder_";
pub const LOG_FILE_NAME: &str = "datalog.txt";

pub const BYTES_PER_KILOBYTE: f64 = 1000.0;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";
pub const PROGRESS_BAR_CHARS: &str = "#>-";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Size reduction:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
