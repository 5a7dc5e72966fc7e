//! Reader for plaintext sheets

use crate::document::Sheet;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Read the rows of a plaintext sheet file.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Read a plaintext sheet file into an unprocessed [`Sheet`].
pub fn parse_sheet(path: &Path) -> Result<Sheet> {
    let lines = read_lines(path)?;
    log::debug!("read {} rows from {}", lines.len(), path.display());
    Ok(Sheet::from_lines(lines))
}

/// Build an unprocessed [`Sheet`] from plaintext content.
pub fn parse_sheet_content(content: &str) -> Sheet {
    Sheet::from_lines(content.lines())
}
