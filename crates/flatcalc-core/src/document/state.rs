use crate::error::{FlatcalcError, Result};
use crate::storage::render_grid;
use flatcalc_engine::EngineError;
use flatcalc_engine::engine::{
    CellNode, CellRef, DependencyGraph, Grid, ValueCache, build_grid, check_references, evaluate,
    topological_order,
};

/// A plaintext sheet moving through the pipeline:
/// rows -> grid -> dependency graph -> processing order -> values.
///
/// Each step is a method so callers can stop and inspect intermediate state;
/// [`Sheet::run`] performs all of them.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Raw input rows
    lines: Vec<String>,
    /// Parsed cells, replaced by their values once evaluated
    grid: Grid,
    /// Reverse dependency map: cell -> cells that depend on it.
    /// Consumed by `validate`.
    dependency_graph: DependencyGraph,
    /// Processing order produced by `validate`
    sorted_cells: Vec<CellRef>,
    /// Resolved values, filled by `evaluate`
    values: ValueCache,
    /// Set by `build_dependency_graph`, cleared once `validate` consumes it
    graph_built: bool,
    validated: bool,
}

impl Sheet {
    /// Create a sheet over raw rows. Nothing is parsed yet.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Sheet {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse, validate and evaluate `lines` in one go.
    pub fn run<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Self::from_lines(lines);
        sheet.build_cell_graph()?;
        sheet.build_dependency_graph();
        sheet.validate()?;
        sheet.evaluate()?;
        Ok(sheet)
    }

    /// Parse every row into the grid.
    pub fn build_cell_graph(&mut self) -> Result<()> {
        self.grid = build_grid(&self.lines)?;
        self.graph_built = false;
        self.validated = false;
        Ok(())
    }

    /// Derive the reverse dependency graph from the grid.
    pub fn build_dependency_graph(&mut self) {
        self.dependency_graph = DependencyGraph::build(&self.grid);
        self.graph_built = true;
        self.validated = false;
    }

    /// Check references and compute the processing order.
    ///
    /// The dependency graph is consumed; on a cycle, the error names the
    /// cells whose edges were left over.
    ///
    /// Each built graph can be validated once; call
    /// [`Sheet::build_dependency_graph`] again before re-validating.
    pub fn validate(&mut self) -> Result<()> {
        if !self.graph_built {
            return Err(FlatcalcError::InvalidState(
                "dependency graph must be built before the sheet is validated",
            ));
        }
        check_references(&self.grid, &self.dependency_graph)?;
        let graph = std::mem::take(&mut self.dependency_graph);
        self.graph_built = false;
        self.sorted_cells = topological_order(&self.grid, graph)?;
        self.validated = true;
        Ok(())
    }

    /// Resolve every cell. Requires a successful [`Sheet::validate`].
    pub fn evaluate(&mut self) -> Result<()> {
        if !self.validated {
            return Err(FlatcalcError::InvalidState(
                "sheet must be validated before it is evaluated",
            ));
        }
        self.values = evaluate(&mut self.grid, &self.sorted_cells)?;
        Ok(())
    }

    /// Render the grid as output rows.
    pub fn to_plaintext(&self) -> String {
        render_grid(&self.grid)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependency_graph
    }

    pub fn sorted_cells(&self) -> &[CellRef] {
        &self.sorted_cells
    }

    /// Look up a cell, failing if it is not part of the sheet.
    pub fn get_cell(&self, cell_ref: &CellRef) -> Result<&CellNode> {
        self.grid.get(cell_ref).ok_or_else(|| {
            FlatcalcError::Engine(EngineError::InvalidReference {
                cell: *cell_ref,
                target: cell_ref.to_string(),
            })
        })
    }

    /// The evaluated value of a cell, if evaluation has run.
    pub fn value(&self, cell_ref: &CellRef) -> Option<f64> {
        self.values.get(cell_ref).copied()
    }
}
