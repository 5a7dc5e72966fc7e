//! Reverse dependency graph.
//!
//! Maps each referenced cell to the cells that read from it:
//!
//! ```text
//! A1 -> [A2, C3]   means  "A2 and C3 depend on A1"
//! ```
//!
//! The graph is built once from a complete [`Grid`] and then consumed by
//! [`topological_order`](super::topological_order), which removes edges as it
//! goes. Whatever survives the sort is part of a cycle.

use std::collections::BTreeMap;

use super::cell::Grid;
use super::cell_ref::CellRef;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyGraph {
    dependents: BTreeMap<CellRef, Vec<CellRef>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every cell's references and record it under each one.
    pub fn build(grid: &Grid) -> Self {
        let mut graph = Self::new();
        for (cell_ref, cell) in grid {
            for dep in cell.dependencies() {
                graph.add_dependency(*cell_ref, dep);
            }
        }
        log::debug!(
            "dependency graph: {} referenced cells, {} edges",
            graph.dependents.len(),
            graph.edge_count()
        );
        graph
    }

    /// Record that `cell` depends on `dependency`.
    pub fn add_dependency(&mut self, cell: CellRef, dependency: CellRef) {
        self.dependents.entry(dependency).or_default().push(cell);
    }

    /// Cells that depend on `cell`.
    pub fn dependents(&self, cell: &CellRef) -> &[CellRef] {
        self.dependents.get(cell).map(Vec::as_slice).unwrap_or_default()
    }

    /// Cells referenced by at least one other cell, in key order.
    pub fn referenced(&self) -> impl Iterator<Item = &CellRef> + '_ {
        self.dependents.keys()
    }

    /// Detach and return the dependents of `cell`, dropping its entry.
    pub(crate) fn take_dependents(&mut self, cell: &CellRef) -> Vec<CellRef> {
        self.dependents.remove(cell).unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }
}
