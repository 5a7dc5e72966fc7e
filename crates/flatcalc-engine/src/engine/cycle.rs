//! Reference validation and circular dependency detection.
//!
//! Before anything is evaluated we confirm that every referenced cell exists
//! and that the references form a DAG. Ordering uses Kahn's algorithm over
//! the reverse [`DependencyGraph`]: a cell becomes ready once every cell it
//! reads from has been emitted. Edges are removed as they are consumed, so
//! any edge left at the end belongs to a cycle.

use std::collections::HashMap;

use super::cell::Grid;
use super::cell_ref::CellRef;
use super::deps::DependencyGraph;
use crate::error::{EngineError, Result};

/// Fail on the first referenced cell (in key order) missing from `grid`.
pub fn check_references(grid: &Grid, graph: &DependencyGraph) -> Result<()> {
    for target in graph.referenced() {
        if grid.contains_key(target) {
            continue;
        }
        let cell = graph
            .dependents(target)
            .first()
            .copied()
            .unwrap_or(*target);
        return Err(EngineError::InvalidReference {
            cell,
            target: target.to_string(),
        });
    }
    Ok(())
}

/// Compute a processing order in which every cell follows the cells it
/// references. Consumes `graph`.
///
/// Returns [`EngineError::CircularDependency`] naming the referenced cells
/// whose edges could not be consumed.
pub fn topological_order(grid: &Grid, mut graph: DependencyGraph) -> Result<Vec<CellRef>> {
    let mut remaining: HashMap<CellRef, usize> = HashMap::with_capacity(grid.len());
    let mut ready: Vec<CellRef> = Vec::new();

    for (cell_ref, cell) in grid {
        let count = cell.dependencies().len();
        if count == 0 {
            ready.push(*cell_ref);
        } else {
            remaining.insert(*cell_ref, count);
        }
    }
    // Pop from the back, so reverse to emit in key order where possible.
    ready.reverse();

    let mut order = Vec::with_capacity(grid.len());
    while let Some(cell_ref) = ready.pop() {
        order.push(cell_ref);

        for dependent in graph.take_dependents(&cell_ref) {
            if let Some(count) = remaining.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    remaining.remove(&dependent);
                    ready.push(dependent);
                }
            }
        }
    }

    if !graph.is_empty() {
        let cells: Vec<CellRef> = graph.referenced().copied().collect();
        log::debug!("{} cells left in dependency graph after sort", cells.len());
        return Err(EngineError::CircularDependency { cells });
    }

    log::debug!("processing order covers {} cells", order.len());
    Ok(order)
}

/// Check references, then order. The usual entry point.
pub fn validate(grid: &Grid, graph: DependencyGraph) -> Result<Vec<CellRef>> {
    check_references(grid, &graph)?;
    topological_order(grid, graph)
}
