use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, LOG_FILE_NAME, ORIGINAL_SIZE_PREFIX,
    OUTPUT_FOLDER_PREFIX, PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE, SUCCESS_PREFIX,
    SUPPORTED_IMAGE_EXTENSIONS,
};
use crate::dispatcher::{Dispatcher, StrategyParameters};
use crate::error::{CompressionError, Result};
use crate::logfile::LogWriter;
use crate::outcome::Outcome;
use crate::processing::{load_image_with_metadata, save_image};
use crate::report::{render_table, ImageRecord, RunAccumulator, RunSummary};
use crate::strategies::Limits;
use crate::utils::{format_file_size, to_kilobytes};
use crate::{info, verbose, warn};
use chrono::Local;
use image::GenericImageView;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Everything one run needs, fixed before the first image is read.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_base: PathBuf,
    pub parameters: StrategyParameters,
    pub limits: Limits,
    pub optimize_png: bool,
}

#[derive(Debug)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub log_path: PathBuf,
    pub records: Vec<ImageRecord>,
    pub summary: RunSummary,
}

/// Images found in the input directory, in file name order, plus the number
/// of entries that were not recognized as images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub images: Vec<PathBuf>,
    pub skipped: usize,
}

/// Compresses every image of `config.input_dir` into a fresh numbered folder
/// under `config.output_base` and writes the run log there.
///
/// Parameters are validated before the input directory is touched. Per-image
/// failures are recorded and the run continues; I/O errors abort it.
pub fn compress_dataset(config: &RunConfig) -> Result<RunReport> {
    let dispatcher = Dispatcher::new(config.parameters, config.limits)?;

    let scan = collect_image_files(&config.input_dir)?;
    if scan.images.is_empty() {
        return Err(CompressionError::NoImageFilesFound(config.input_dir.clone()));
    }

    info!("🚀 Starting dataset compression: {}", dispatcher.parameters());
    info!("📁 Input: {:?}", config.input_dir);
    info!("📊 Found {} image files to process", scan.images.len());

    let output_dir = allocate_output_dir(&config.output_base)?;
    let folder_name = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!("📁 Saving processed images to folder: {}", folder_name);

    let mut log = LogWriter::new(output_dir.join(LOG_FILE_NAME));
    let total_original = scan
        .images
        .iter()
        .map(|path| fs::metadata(path).map(|m| m.len()))
        .sum::<std::io::Result<u64>>()?;
    log.line(&format!(
        "Total size of the original dataset: {} kbytes",
        to_kilobytes(total_original)
    ))?;

    let start_time = Instant::now();
    let progress = create_progress_bar(scan.images.len() as u64);
    let mut accumulator = RunAccumulator::new(scan.skipped);

    for input_path in &scan.images {
        let record = process_single_image(input_path, &output_dir, &dispatcher, config.optimize_png)?;
        match record.outcome {
            Outcome::Failure => progress.suspend(|| {
                warn!("{} was not saved: {}", record.source_name, record.detail);
            }),
            Outcome::SuccessWithWarning => progress.suspend(|| {
                warn!("{} saved with warning: {}", record.source_name, record.detail);
            }),
            Outcome::Success => progress.suspend(|| {
                verbose!("{}: {}", record.source_name, record.detail);
            }),
        }
        accumulator.push(record);
        progress.inc(1);
    }
    progress.finish_with_message(format!("{} Processing complete", SUCCESS_PREFIX));

    let summary = accumulator.summary();
    write_summary(&mut log, &summary, &folder_name)?;
    log.append_block(&render_table(accumulator.records()))?;
    verbose!("Finished in {:?}", start_time.elapsed());

    Ok(RunReport {
        log_path: log.path().to_path_buf(),
        output_dir,
        records: accumulator.into_records(),
        summary,
    })
}

fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        progress.set_style(style.progress_chars(PROGRESS_BAR_CHARS));
    }
    progress.set_message("Processing images");
    progress
}

fn process_single_image(
    input_path: &Path,
    output_dir: &Path,
    dispatcher: &Dispatcher,
    optimize_png: bool,
) -> Result<ImageRecord> {
    let (img, original_bytes) = load_image_with_metadata(input_path)?;
    let original_dimensions = img.dimensions();

    let (image, outcome, detail) = dispatcher.apply(img).into_parts();
    let output_bytes = match image {
        Some(compressed) => {
            let output_path = generate_output_path(input_path, output_dir)?;
            Some(save_image(&compressed, &output_path, optimize_png)?)
        }
        None => None,
    };

    Ok(ImageRecord {
        timestamp: Local::now(),
        source_name: source_name(input_path),
        original_dimensions,
        original_bytes,
        output_bytes,
        mode: dispatcher.mode(),
        outcome,
        detail,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_summary(log: &mut LogWriter, summary: &RunSummary, folder_name: &str) -> Result<()> {
    log.line(&format!(
        "Total size of the compressed dataset: {} kbytes",
        to_kilobytes(summary.total_compressed_bytes)
    ))?;
    log.line(&format!(
        "Reduced dataset size by {:.2}%.",
        summary.percent_reduction
    ))?;
    log.line(&format!(
        "All images processed and saved in ({}) under the output path",
        folder_name
    ))?;
    log.line(&format!(
        "{} files were not saved because they are not in jpg, jpeg, png format.",
        summary.skipped_non_image
    ))?;
    log.line(&format!(
        "{} images were not saved because their compression failed.",
        summary.images_not_saved
    ))?;
    log.line(&format!("{} images compressed.", summary.images_processed))?;
    Ok(())
}

/// Prints the end-of-run totals to the console.
pub fn print_summary(report: &RunReport) {
    let summary = &report.summary;
    info!("\n📊 Dataset Compression Summary:");
    info!("  📁 Images processed: {}", summary.images_processed);
    info!(
        "  {} {} ({})",
        ORIGINAL_SIZE_PREFIX,
        summary.total_original_bytes,
        format_file_size(summary.total_original_bytes)
    );
    info!(
        "  {} {} ({})",
        COMPRESSED_SIZE_PREFIX,
        summary.total_compressed_bytes,
        format_file_size(summary.total_compressed_bytes)
    );
    info!("  {} {:.2}%", COMPRESSION_RATIO_PREFIX, summary.percent_reduction);
    if summary.images_not_saved > 0 {
        warn!("Images not saved: {}", summary.images_not_saved);
    }
    info!(
        "  🗂️  Non-image files skipped: {}",
        summary.skipped_non_image
    );
    info!("  📝 Log written to {:?}", report.log_path);
}

/// Lists the input directory without descending into subdirectories.
pub fn collect_image_files(input_dir: &Path) -> Result<ScanResult> {
    if !input_dir.is_dir() {
        return Err(CompressionError::InputNotDirectory(input_dir.to_path_buf()));
    }

    let mut scan = ScanResult::default();
    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            scan.images.push(path.to_path_buf());
        } else {
            scan.skipped += 1;
        }
    }

    Ok(scan)
}

/// Case-sensitive: `photo.JPG` is not picked up.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Creates the first `output_folder_N` that does not exist yet under `base`.
pub fn allocate_output_dir(base: &Path) -> Result<PathBuf> {
    let mut number = 1usize;
    loop {
        let candidate = base.join(format!("{}{}", OUTPUT_FOLDER_PREFIX, number));
        if !candidate.exists() {
            fs::create_dir_all(&candidate)
                .map_err(|_| CompressionError::DirectoryCreationFailed(candidate.clone()))?;
            return Ok(candidate);
        }
        number += 1;
    }
}

/// Output keeps the source file name.
pub fn generate_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .ok_or_else(|| CompressionError::UnsupportedFormat(input_path.to_path_buf()))?;
    Ok(output_dir.join(file_name))
}
