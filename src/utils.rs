//! Helpers shared by the run report and the console summary.
use crate::constants::BYTES_PER_KILOBYTE;

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 KB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Decimal kilobytes, as written to the run log.
pub fn to_kilobytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_KILOBYTE
}

/// Calculate the size reduction as a percentage: `(1 - compressed / original) * 100`.
///
/// Positive means the output is smaller, negative means it grew. An empty
/// original reports 0.
pub fn percent_reduction(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
