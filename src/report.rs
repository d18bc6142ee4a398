//! Per-image records, run totals and the tabular rendering written at the end
//! of the run log.

use crate::dispatcher::Mode;
use crate::outcome::Outcome;
use crate::utils::percent_reduction;
use chrono::{DateTime, Local};

/// What happened to one input image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub timestamp: DateTime<Local>,
    pub source_name: String,
    /// `(width, height)` of the decoded source.
    pub original_dimensions: (u32, u32),
    pub original_bytes: u64,
    /// Size of the written file; `None` when nothing was persisted.
    pub output_bytes: Option<u64>,
    pub mode: Mode,
    pub outcome: Outcome,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    pub percent_reduction: f64,
    pub skipped_non_image: usize,
    pub images_processed: usize,
    pub images_not_saved: usize,
    pub not_saved_bytes: u64,
}

/// Collects records in processing order and keeps the byte totals.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    records: Vec<ImageRecord>,
    skipped_non_image: usize,
    total_original_bytes: u64,
    total_compressed_bytes: u64,
    images_not_saved: usize,
    not_saved_bytes: u64,
}

impl RunAccumulator {
    pub fn new(skipped_non_image: usize) -> Self {
        Self {
            skipped_non_image,
            ..Default::default()
        }
    }

    pub fn push(&mut self, record: ImageRecord) {
        self.total_original_bytes += record.original_bytes;
        match record.output_bytes {
            Some(bytes) if record.outcome.is_persisted() => {
                self.total_compressed_bytes += bytes;
            }
            _ => {
                self.images_not_saved += 1;
                self.not_saved_bytes += record.original_bytes;
            }
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_original_bytes: self.total_original_bytes,
            total_compressed_bytes: self.total_compressed_bytes,
            percent_reduction: percent_reduction(
                self.total_original_bytes,
                self.total_compressed_bytes,
            ),
            skipped_non_image: self.skipped_non_image,
            images_processed: self.records.len(),
            images_not_saved: self.images_not_saved,
            not_saved_bytes: self.not_saved_bytes,
        }
    }

    pub fn into_records(self) -> Vec<ImageRecord> {
        self.records
    }
}

const TABLE_HEADERS: [&str; 8] = [
    "Time",
    "Image Name",
    "Size",
    "Old file size",
    "New file size",
    "Mode",
    "Result",
    "Detail",
];

fn record_cells(record: &ImageRecord) -> [String; 8] {
    let (width, height) = record.original_dimensions;
    [
        record.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        record.source_name.clone(),
        format!("{}×{}", width, height),
        record.original_bytes.to_string(),
        record
            .output_bytes
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string()),
        record.mode.to_string(),
        record.outcome.to_string(),
        record.detail.clone(),
    ]
}

fn border(widths: &[usize], left: char, fill: char, joint: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(joint);
        }
        line.extend(std::iter::repeat(fill).take(width + 2));
    }
    line.push(right);
    line
}

fn row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.extend(std::iter::repeat(' ').take(pad + 1));
        line.push('│');
    }
    line
}

/// Renders records as a box-drawn grid, one row per image.
pub fn render_table(records: &[ImageRecord]) -> String {
    let headers: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = records.iter().map(|r| record_cells(r).to_vec()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![
        border(&widths, '╒', '═', '╤', '╕'),
        row(&headers, &widths),
        border(&widths, '╞', '═', '╪', '╡'),
    ];
    for (i, cells) in rows.iter().enumerate() {
        if i > 0 {
            lines.push(border(&widths, '├', '─', '┼', '┤'));
        }
        lines.push(row(cells, &widths));
    }
    lines.push(border(&widths, '╘', '═', '╧', '╛'));
    lines.join("\n")
}
