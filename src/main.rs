use anyhow::{Context, Result};
use clap::Parser;
use dataset_squeeze::cli::Args;
use dataset_squeeze::{
    compress_dataset, info, logger, print_summary, prompt, warn, CompressionError, RunConfig,
};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::set_quiet_mode(args.quiet);
    logger::set_verbose_mode(args.verbose);

    let interactive = !args.no_input;

    // Parameters are settled before the input folder is read.
    let parameters =
        prompt::resolve_parameters(args.mode.as_deref(), args.raw_parameters(), interactive)
            .context("Invalid compression parameters")?;
    let input_dir = prompt::resolve_input_dir(&args.input, interactive)
        .with_context(|| format!("Cannot use input folder {:?}", args.input))?;

    let config = RunConfig {
        input_dir,
        output_base: args.output.clone(),
        parameters,
        limits: args.limits(),
        optimize_png: args.optimize_png,
    };

    match compress_dataset(&config) {
        Ok(report) => {
            print_summary(&report);
            info!("Process was done.");
            Ok(())
        }
        Err(CompressionError::NoImageFilesFound(path)) => {
            warn!("No images found with format jpg, jpeg, png in {:?}", path);
            Ok(())
        }
        Err(e) => Err(e).context("Dataset compression failed"),
    }
}
