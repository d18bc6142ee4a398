use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Unknown compression mode: {0:?}. Expected one of 1-4 or pyramid, resize, quality, crop")]
    UnknownMode(String),

    #[error("Missing parameter `{parameter}` for {mode} mode")]
    MissingParameter {
        mode: &'static str,
        parameter: &'static str,
    },

    #[error("No compression mode given. Pass --mode or run without --no-input")]
    MissingMode,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Input path is not a directory: {0}")]
    InputNotDirectory(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("No jpg, jpeg or png images found in: {0}")]
    NoImageFilesFound(PathBuf),

    #[error("Unsupported output format for file: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CompressionError {
    /// Configuration problems detected before any image is touched.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            CompressionError::UnknownMode(_)
                | CompressionError::MissingMode
                | CompressionError::MissingParameter { .. }
                | CompressionError::InvalidParameter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
