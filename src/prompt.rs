//! Interactive fallback for values missing from the command line.
//!
//! With `interactive == false` nothing is prompted: a missing mode or
//! parameter is a configuration error and an invalid input directory is fatal.

use crate::dispatcher::{Mode, RawParameters, StrategyParameters};
use crate::error::{CompressionError, Result};
use crate::{info, warn};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

/// Returns `candidate` if it is a directory, otherwise asks until one is given.
pub fn resolve_input_dir(candidate: &Path, interactive: bool) -> Result<PathBuf> {
    if candidate.is_dir() {
        return Ok(candidate.to_path_buf());
    }
    if !interactive {
        return Err(CompressionError::InputNotDirectory(candidate.to_path_buf()));
    }

    let theme = ColorfulTheme::default();
    warn!("Invalid input path {:?}. Please provide a valid directory path.", candidate);
    loop {
        let entered = Input::<String>::with_theme(&theme)
            .with_prompt("Enter input images path folder")
            .interact_text()?;
        let path = PathBuf::from(entered.trim());
        if path.is_dir() {
            return Ok(path);
        }
        warn!("Invalid input path {:?}. Please provide a valid directory path.", path);
    }
}

/// Parses the mode identifier, or asks for one when none was given.
pub fn resolve_mode(mode: Option<&str>, interactive: bool) -> Result<Mode> {
    match mode {
        Some(identifier) => identifier.parse(),
        None if interactive => {
            let items: Vec<String> = Mode::ALL
                .iter()
                .map(|m| format!("[{}] {}", m.id(), m.description()))
                .collect();
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Select a mode")
                .items(&items[..])
                .default(0)
                .interact()?;
            Ok(Mode::ALL[index])
        }
        None => Err(CompressionError::MissingMode),
    }
}

/// Prompts for the parameters `mode` needs that are still unset.
pub fn fill_missing(mode: Mode, mut raw: RawParameters, interactive: bool) -> Result<RawParameters> {
    if !interactive {
        return Ok(raw);
    }

    let theme = ColorfulTheme::default();
    match mode {
        Mode::Pyramid => {
            if raw.layers.is_none() {
                raw.layers = Some(
                    Input::<u32>::with_theme(&theme)
                        .with_prompt("Enter the number of layers")
                        .interact_text()?,
                );
            }
        }
        Mode::Resize => {
            if raw.width.is_none() {
                if raw.square.is_none() {
                    raw.square = Some(
                        Confirm::with_theme(&theme)
                            .with_prompt("Resize to a square (deep learning input)?")
                            .default(false)
                            .interact()?,
                    );
                }
                raw.width = Some(
                    Input::<u32>::with_theme(&theme)
                        .with_prompt("Enter the new image width")
                        .validate_with(|w: &u32| {
                            if *w > 0 {
                                Ok(())
                            } else {
                                Err("width must be positive")
                            }
                        })
                        .interact_text()?,
                );
            }
        }
        Mode::Quality => {
            if raw.quality.is_none() {
                info!("hint >>> 1: low image quality, very high compression | 99: very high image quality, low compression");
                raw.quality = Some(
                    Input::<i32>::with_theme(&theme)
                        .with_prompt("Enter the image quality (1-99)")
                        .interact_text()?,
                );
            }
        }
        Mode::Crop => {
            if raw.crop_height.is_none() {
                raw.crop_height = Some(
                    Input::<i64>::with_theme(&theme)
                        .with_prompt("Enter the crop height (rows)")
                        .interact_text()?,
                );
            }
            if raw.crop_width.is_none() {
                raw.crop_width = Some(
                    Input::<i64>::with_theme(&theme)
                        .with_prompt("Enter the crop width (columns)")
                        .interact_text()?,
                );
            }
        }
    }
    Ok(raw)
}

/// Mode, then any missing values, then the typed parameters for the run.
pub fn resolve_parameters(
    mode: Option<&str>,
    raw: RawParameters,
    interactive: bool,
) -> Result<StrategyParameters> {
    let mode = resolve_mode(mode, interactive)?;
    let raw = fill_missing(mode, raw, interactive)?;
    StrategyParameters::from_raw(mode, &raw)
}
