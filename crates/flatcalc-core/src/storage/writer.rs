//! Writer for plaintext sheets

use crate::document::Sheet;
use crate::error::Result;
use flatcalc_engine::engine::{Grid, format_number};
use std::fs;
use std::path::Path;

/// Write an evaluated sheet to a file.
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_sheet_content(sheet);
    fs::write(path, content)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Render a sheet to its plaintext form.
pub fn write_sheet_content(sheet: &Sheet) -> String {
    render_grid(sheet.grid())
}

/// Render a grid in key order. Every cell is followed by a comma and a new
/// line starts whenever the column wraps back to `A`.
///
/// Resolved cells print their number; cells not yet evaluated print their
/// source form.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::new();
    for (cell_ref, cell) in grid {
        if cell_ref.col == 0 && !out.is_empty() {
            out.push('\n');
        }
        match cell.as_number() {
            Some(n) => out.push_str(&format_number(n)),
            None => out.push_str(&cell.to_string()),
        }
        out.push(',');
    }
    out
}
