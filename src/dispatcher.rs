use crate::error::{CompressionError, Result};
use crate::outcome::StrategyResult;
use crate::strategies::{self, Limits};
use image::DynamicImage;
use std::fmt;
use std::str::FromStr;

/// Compression mode identifier. Accepts the numeric menu ids (`1`-`4`) as
/// well as the names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Pyramid,
    Resize,
    Quality,
    Crop,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Pyramid, Mode::Resize, Mode::Quality, Mode::Crop];

    pub fn id(&self) -> u8 {
        match self {
            Mode::Pyramid => 1,
            Mode::Resize => 2,
            Mode::Quality => 3,
            Mode::Crop => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Pyramid => "pyramid",
            Mode::Resize => "resize",
            Mode::Quality => "quality",
            Mode::Crop => "crop",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Pyramid => "compression with pyramid",
            Mode::Resize => "compression with resize",
            Mode::Quality => "compression with quality",
            Mode::Crop => "center crop",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "pyramid" => Ok(Mode::Pyramid),
            "2" | "resize" => Ok(Mode::Resize),
            "3" | "quality" => Ok(Mode::Quality),
            "4" | "crop" => Ok(Mode::Crop),
            _ => Err(CompressionError::UnknownMode(s.to_string())),
        }
    }
}

/// Parameters as collected from the command line or prompts, before they are
/// bound to a mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameters {
    pub layers: Option<u32>,
    pub width: Option<u32>,
    pub square: Option<bool>,
    pub quality: Option<i32>,
    pub crop_height: Option<i64>,
    pub crop_width: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyParameters {
    Pyramid { layers: u32 },
    Resize { target_width: u32, square: bool },
    Quality { quality: i32 },
    /// Height counts rows and width counts columns.
    Crop { target_height: i64, target_width: i64 },
}

fn require<T>(value: Option<T>, mode: Mode, parameter: &'static str) -> Result<T> {
    value.ok_or(CompressionError::MissingParameter {
        mode: mode.name(),
        parameter,
    })
}

impl StrategyParameters {
    /// Binds the raw values the mode needs. Values for other modes are ignored.
    pub fn from_raw(mode: Mode, raw: &RawParameters) -> Result<Self> {
        let parameters = match mode {
            Mode::Pyramid => StrategyParameters::Pyramid {
                layers: require(raw.layers, mode, "layers")?,
            },
            Mode::Resize => StrategyParameters::Resize {
                target_width: require(raw.width, mode, "width")?,
                square: raw.square.unwrap_or(false),
            },
            Mode::Quality => StrategyParameters::Quality {
                quality: require(raw.quality, mode, "quality")?,
            },
            Mode::Crop => StrategyParameters::Crop {
                target_height: require(raw.crop_height, mode, "crop-height")?,
                target_width: require(raw.crop_width, mode, "crop-width")?,
            },
        };
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn mode(&self) -> Mode {
        match self {
            StrategyParameters::Pyramid { .. } => Mode::Pyramid,
            StrategyParameters::Resize { .. } => Mode::Resize,
            StrategyParameters::Quality { .. } => Mode::Quality,
            StrategyParameters::Crop { .. } => Mode::Crop,
        }
    }

    /// Only a zero resize width is rejected up front. Out-of-range quality and
    /// bad crop extents are per-image outcomes, not configuration errors.
    pub fn validate(&self) -> Result<()> {
        if let StrategyParameters::Resize { target_width: 0, .. } = self {
            return Err(CompressionError::InvalidParameter(
                "resize width must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for StrategyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyParameters::Pyramid { layers } => write!(f, "pyramid (layers={})", layers),
            StrategyParameters::Resize {
                target_width,
                square,
            } => write!(f, "resize (width={}, square={})", target_width, square),
            StrategyParameters::Quality { quality } => write!(f, "quality (quality={})", quality),
            StrategyParameters::Crop {
                target_height,
                target_width,
            } => write!(f, "crop (height={}, width={})", target_height, target_width),
        }
    }
}

/// Runs the strategy selected for this run on each image.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    parameters: StrategyParameters,
    limits: Limits,
}

impl Dispatcher {
    pub fn new(parameters: StrategyParameters, limits: Limits) -> Result<Self> {
        parameters.validate()?;
        Ok(Self { parameters, limits })
    }

    pub fn mode(&self) -> Mode {
        self.parameters.mode()
    }

    pub fn parameters(&self) -> &StrategyParameters {
        &self.parameters
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn apply(&self, img: DynamicImage) -> StrategyResult {
        match self.parameters {
            StrategyParameters::Pyramid { layers } => strategies::pyramid(img, layers, &self.limits),
            StrategyParameters::Resize {
                target_width,
                square,
            } => strategies::resize(img, target_width, square, &self.limits),
            StrategyParameters::Quality { quality } => {
                strategies::quality(img, quality, &self.limits)
            }
            StrategyParameters::Crop {
                target_height,
                target_width,
            } => strategies::crop(img, target_height, target_width),
        }
    }
}
