//! Grid construction from raw text rows.
//!
//! Each row is split on commas and every field is parsed into a
//! [`CellNode`] keyed by its position: column letters left to right,
//! 1-based row numbers top to bottom.

use super::cell::{CellNode, Grid};
use super::cell_ref::{CellRef, MAX_COLUMNS};
use crate::error::{EngineError, Result};

/// Parse one row into `grid`. `row` is zero-indexed.
///
/// The column bound is checked before any field is parsed.
pub fn parse_row(grid: &mut Grid, row: usize, line: &str) -> Result<()> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() > MAX_COLUMNS {
        return Err(EngineError::ColumnOverflow {
            row: row + 1,
            columns: fields.len(),
        });
    }

    for (col, text) in fields.into_iter().enumerate() {
        let cell_ref = CellRef::new(col, row);
        let cell = CellNode::parse(cell_ref, text)?;
        grid.insert(cell_ref, cell);
    }
    Ok(())
}

/// Parse every row into a fresh grid.
pub fn build_grid<I, S>(lines: I) -> Result<Grid>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grid = Grid::new();
    let mut rows = 0usize;
    for (row, line) in lines.into_iter().enumerate() {
        parse_row(&mut grid, row, line.as_ref())?;
        rows += 1;
    }
    log::debug!("parsed {} rows into {} cells", rows, grid.len());
    Ok(grid)
}
