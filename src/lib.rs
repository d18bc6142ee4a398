pub mod batch;
pub mod cli;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod logfile;
pub mod logger;
pub mod outcome;
pub mod processing;
pub mod prompt;
pub mod report;
pub mod strategies;
pub mod utils;

pub use batch::{
    allocate_output_dir, collect_image_files, compress_dataset, generate_output_path,
    is_image_file, print_summary, RunConfig, RunReport, ScanResult,
};
pub use dispatcher::{Dispatcher, Mode, RawParameters, StrategyParameters};
pub use error::{CompressionError, Result};
pub use logfile::LogWriter;
pub use outcome::{Outcome, StrategyResult};
pub use processing::{load_image_with_metadata, save_image};
pub use report::{render_table, ImageRecord, RunAccumulator, RunSummary};
pub use strategies::{crop, pyramid, quality, resize, CropWindow, Limits};
