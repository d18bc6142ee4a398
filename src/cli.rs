use crate::constants::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, PYRAMID_HARD_FLOOR, RESIZE_MIN_WIDTH};
use crate::dispatcher::RawParameters;
use crate::strategies::Limits;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dataset-squeeze",
    about = "Batch-compress a folder of JPEG/PNG images with one of four strategies",
    long_about = "dataset-squeeze compresses every jpg, jpeg and png image of a folder with a single strategy: \
                  pyramid downsampling, resize (aspect-preserving or square), JPEG quality re-encoding, \
                  or center crop. Each run writes to a new numbered output folder together with a \
                  datalog.txt describing every image and the overall size reduction. \
                  Values missing from the command line are asked for interactively.",
    version,
    after_help = "EXAMPLES:\n  \
    dataset-squeeze -i ./images -o ./compressed --mode pyramid --layers 2\n  \
    dataset-squeeze -i ./images --mode resize --width 224 --square\n  \
    dataset-squeeze -i ./images --mode 3 --quality 60 --no-input\n  \
    dataset-squeeze -i ./images --mode crop --crop-height 256 --crop-width 256"
)]
pub struct Args {
    #[arg(
        short = 'i',
        long,
        default_value = DEFAULT_INPUT_PATH,
        help = "Folder with the source images"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_PATH,
        help = "Base folder for numbered run output",
        long_help = "Each run creates the next free output_folder_N under this path \
                     and writes the compressed images and datalog.txt there."
    )]
    pub output: PathBuf,

    #[arg(
        short = 'm',
        long,
        help = "Compression mode: 1/pyramid, 2/resize, 3/quality, 4/crop"
    )]
    pub mode: Option<String>,

    #[arg(long, help = "Pyramid: number of halving steps")]
    pub layers: Option<u32>,

    #[arg(short = 'w', long, help = "Resize: target width in pixels")]
    pub width: Option<u32>,

    #[arg(
        long,
        help = "Resize: output a width x width square",
        long_help = "Discard the aspect ratio and resize to width x width, \
                     as used for fixed-size model input."
    )]
    pub square: bool,

    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Quality: JPEG quality (valid 1-99)",
        long_help = "JPEG quality for the re-encode round trip. Values outside 1-99 are \
                     still encoded (clamped by the codec) but reported as a warning."
    )]
    pub quality: Option<i32>,

    #[arg(long, allow_negative_numbers = true, help = "Crop: window height in rows")]
    pub crop_height: Option<i64>,

    #[arg(long, allow_negative_numbers = true, help = "Crop: window width in columns")]
    pub crop_width: Option<i64>,

    #[arg(
        long,
        default_value_t = RESIZE_MIN_WIDTH,
        help = "Soft minimum output size for pyramid and resize",
        long_help = "Outputs with a side below this are still saved but reported as a warning."
    )]
    pub min_size: u32,

    #[arg(
        long,
        default_value_t = PYRAMID_HARD_FLOOR,
        help = "Pyramid: refuse images whose half-size is below this (0 disables)"
    )]
    pub hard_floor: u32,

    #[arg(long, help = "Run oxipng over PNG output")]
    pub optimize_png: bool,

    #[arg(long, help = "Never prompt; missing values are errors")]
    pub no_input: bool,

    #[arg(short = 'q', long, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print the detail of every image")]
    pub verbose: bool,
}

impl Args {
    pub fn raw_parameters(&self) -> RawParameters {
        RawParameters {
            layers: self.layers,
            width: self.width,
            square: self.square.then_some(true),
            quality: self.quality,
            crop_height: self.crop_height,
            crop_width: self.crop_width,
        }
    }

    pub fn limits(&self) -> Limits {
        Limits::default()
            .with_min_size(self.min_size)
            .with_hard_floor(self.hard_floor)
    }
}
