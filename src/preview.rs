//! CSV Preview - bounded grid built from pasted or loaded market data
//!
//! The preview is a visual aid only. Cells are split on bare commas with no
//! quoting rules, and ragged rows stay ragged. The raw text, not the grid,
//! is what gets sent to the agent.

use std::path::Path;

use crate::error::{Result, SomSovError};

/// Maximum number of rows kept in a preview
pub const MAX_PREVIEW_ROWS: usize = 10;

/// File extensions accepted by the file loader
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

/// Columns the coordinator agent expects in the header row
pub const EXPECTED_COLUMNS: &[&str] = &[
    "Brand",
    "Sales_Volume",
    "Sales_Value",
    "Media_Spend",
    "Period",
];

/// Sample rows shown as a placeholder in the input box
pub const SAMPLE_INPUT: &str = "Brand,Sales_Volume,Sales_Value,Media_Spend,Period\n\
Brand A,7500000,7500000,2000000,March 2024\n\
Brand B,5500000,5500000,1500000,March 2024";

/// Preview grid: rows of trimmed cells, at most [`MAX_PREVIEW_ROWS`] rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewGrid {
    rows: Vec<Vec<String>>,
}

impl PreviewGrid {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row, treated as the header
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Expected columns absent from the header row (case-insensitive).
    ///
    /// Empty grids report nothing missing.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        let Some(header) = self.header() else {
            return Vec::new();
        };

        EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|expected| !header.iter().any(|cell| cell.eq_ignore_ascii_case(expected)))
            .collect()
    }
}

impl From<Vec<Vec<String>>> for PreviewGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// Build a preview grid from raw delimited text
pub fn parse_preview(text: &str) -> PreviewGrid {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PreviewGrid::default();
    }

    let rows = trimmed
        .split('\n')
        .take(MAX_PREVIEW_ROWS)
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect();

    PreviewGrid { rows }
}

/// Check a path against [`ACCEPTED_EXTENSIONS`]
pub fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(SomSovError::UnsupportedFileType { extension })
    }
}

/// Read a user-selected data file as text.
///
/// Spreadsheet extensions pass the allow-list, but only UTF-8 text content
/// is accepted; binary workbooks are rejected rather than parsed.
pub fn load_input_file(path: &Path) -> Result<String> {
    check_extension(path)?;

    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| SomSovError::UnreadableInput {
        path: path.display().to_string(),
        reason: e.utf8_error().to_string(),
    })
}
