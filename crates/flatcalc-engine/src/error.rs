//! Error types for the Flatcalc engine.

use thiserror::Error;

use crate::engine::CellRef;

/// Every way the parse → validate → evaluate pipeline can fail.
///
/// None of these are recoverable: the first one aborts the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Malformed cell {cell}: {text:?} is not a value, a reference or `<a> <b> <op>`")]
    MalformedCell { cell: CellRef, text: String },

    #[error("Row {row} has {columns} columns, more than the {max} supported", max = crate::engine::MAX_COLUMNS)]
    ColumnOverflow { row: usize, columns: usize },

    #[error("Cell {cell} references {target}, which does not exist")]
    InvalidReference { cell: CellRef, target: String },

    #[error("Circular dependency between cells: {}", join_cells(.cells))]
    CircularDependency { cells: Vec<CellRef> },

    #[error("Division by zero in cell {cell}")]
    DivisionByZero { cell: CellRef },
}

fn join_cells(cells: &[CellRef]) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_circular_dependency_lists_cells() {
        let err = EngineError::CircularDependency {
            cells: vec![CellRef::new(0, 0), CellRef::new(1, 0)],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency between cells: A1, B1"
        );
    }

    #[test]
    fn test_column_overflow_message() {
        let err = EngineError::ColumnOverflow { row: 3, columns: 27 };
        assert_eq!(
            err.to_string(),
            "Row 3 has 27 columns, more than the 26 supported"
        );
    }
}
