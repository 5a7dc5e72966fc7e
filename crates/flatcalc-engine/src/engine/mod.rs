//! Spreadsheet engine API.
//!
//! The pipeline, in order:
//!
//! - [`build_grid`] - Split raw rows and parse each field into a [`CellNode`]
//! - [`DependencyGraph`] - Reverse adjacency: referenced cell -> dependents
//! - [`validate`] - Reference checks plus a Kahn ordering that rejects cycles
//! - [`evaluate`] - Resolve every cell to a number via the [`ValueCache`]
//! - [`format_number`] - Render a resolved value

mod builder;
mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod format;

pub use builder::{build_grid, parse_row};
pub use cell::{CellNode, Grid, Operand, Operator};
pub use cell_ref::{CellRef, MAX_COLUMNS};
pub use cycle::{check_references, topological_order, validate};
pub use deps::DependencyGraph;
pub use eval::{Evaluator, ValueCache, evaluate};
pub use format::format_number;
