//! Cell evaluation.
//!
//! Resolves every cell to a number. Parsed [`CellNode`]s are never rewritten
//! while resolving; results go into a [`ValueCache`] that later lookups hit
//! first, so a reference chain is walked at most once. Resolution runs on an
//! explicit work stack, so long chains of references do not grow the native
//! call stack.

use std::collections::{HashMap, HashSet};

use super::cell::{CellNode, Grid, Operand};
use super::cell_ref::CellRef;
use crate::error::{EngineError, Result};

/// Resolved numeric value per cell.
pub type ValueCache = HashMap<CellRef, f64>;

/// Resolves cells of a validated grid.
pub struct Evaluator<'a> {
    grid: &'a Grid,
    cache: ValueCache,
}

impl<'a> Evaluator<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self::with_cache(grid, ValueCache::new())
    }

    /// Start from previously resolved values.
    pub fn with_cache(grid: &'a Grid, cache: ValueCache) -> Self {
        Evaluator { grid, cache }
    }

    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    pub fn into_cache(self) -> ValueCache {
        self.cache
    }

    /// Resolve `cell`, pulling in whatever it references first.
    pub fn resolve(&mut self, cell: CellRef) -> Result<f64> {
        if let Some(value) = self.cache.get(&cell) {
            return Ok(*value);
        }
        if !self.grid.contains_key(&cell) {
            return Err(EngineError::InvalidReference {
                cell,
                target: cell.to_string(),
            });
        }

        let grid = self.grid;
        let mut stack = vec![cell];
        let mut on_stack: HashSet<CellRef> = HashSet::from([cell]);

        while let Some(&current) = stack.last() {
            let node = grid
                .get(&current)
                .ok_or_else(|| EngineError::InvalidReference {
                    cell: current,
                    target: current.to_string(),
                })?;

            let pending = node
                .dependencies()
                .into_iter()
                .find(|dep| !self.cache.contains_key(dep));

            match pending {
                Some(dep) => {
                    if !grid.contains_key(&dep) {
                        return Err(EngineError::InvalidReference {
                            cell: current,
                            target: dep.to_string(),
                        });
                    }
                    if !on_stack.insert(dep) {
                        return Err(cycle_error(&stack, dep));
                    }
                    stack.push(dep);
                }
                None => {
                    let value = self.compute(current, node)?;
                    log::trace!("{} = {}", current, value);
                    self.cache.insert(current, value);
                    stack.pop();
                    on_stack.remove(&current);
                }
            }
        }

        self.cache
            .get(&cell)
            .copied()
            .ok_or_else(|| EngineError::InvalidReference {
                cell,
                target: cell.to_string(),
            })
    }

    /// Compute a node whose references are all cached.
    fn compute(&self, cell: CellRef, node: &CellNode) -> Result<f64> {
        match node {
            CellNode::Operand(op) => self.operand_value(cell, op),
            CellNode::Expression { operator, lhs, rhs } => {
                let lhs = self.operand_value(cell, lhs)?;
                let rhs = self.operand_value(cell, rhs)?;
                operator
                    .apply(lhs, rhs)
                    .ok_or(EngineError::DivisionByZero { cell })
            }
        }
    }

    fn operand_value(&self, cell: CellRef, op: &Operand) -> Result<f64> {
        match op {
            Operand::Number(n) => Ok(*n),
            Operand::Reference(target) => {
                self.cache
                    .get(target)
                    .copied()
                    .ok_or_else(|| EngineError::InvalidReference {
                        cell,
                        target: target.to_string(),
                    })
            }
        }
    }
}

fn cycle_error(stack: &[CellRef], reentered: CellRef) -> EngineError {
    let start = stack.iter().position(|c| *c == reentered).unwrap_or(0);
    let mut cells = stack[start..].to_vec();
    cells.sort();
    EngineError::CircularDependency { cells }
}

/// Evaluate every cell, visiting `order` first, then overwrite each grid
/// entry with its resolved number.
///
/// Evaluating a grid that only holds numbers leaves it unchanged.
pub fn evaluate(grid: &mut Grid, order: &[CellRef]) -> Result<ValueCache> {
    let mut evaluator = Evaluator::new(grid);
    for cell in order.iter().chain(grid.keys()) {
        evaluator.resolve(*cell)?;
    }
    let cache = evaluator.into_cache();

    for (cell_ref, node) in grid.iter_mut() {
        if let Some(value) = cache.get(cell_ref) {
            *node = CellNode::new_number(*value);
        }
    }
    log::debug!("evaluated {} cells", cache.len());
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_grid;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_multi_hop_chain() {
        let grid = build_grid(["B1,C1,D1,5"]).unwrap();
        let mut evaluator = Evaluator::new(&grid);
        assert_eq!(evaluator.resolve(cell("A1")).unwrap(), 5.0);
        // Every hop along the chain was cached on the way.
        assert_eq!(evaluator.cache().len(), 4);
        assert_eq!(evaluator.cache()[&cell("B1")], 5.0);
    }

    #[test]
    fn test_expression_pulls_unvisited_cells() {
        let grid = build_grid(["A2 B2 -,2", "10,B1 3 *"]).unwrap();
        let mut evaluator = Evaluator::new(&grid);
        assert_eq!(evaluator.resolve(cell("A1")).unwrap(), 4.0);
    }

    #[test]
    fn test_operators() {
        let grid = build_grid(["6 3 +,6 3 -,6 3 *,6 3 /,1 4 /"]).unwrap();
        let mut evaluator = Evaluator::new(&grid);
        let values: Vec<f64> = ["A1", "B1", "C1", "D1", "E1"]
            .iter()
            .map(|name| evaluator.resolve(cell(name)).unwrap())
            .collect();
        assert_eq!(values, vec![9.0, 3.0, 18.0, 2.0, 0.25]);
    }

    #[test]
    fn test_division_by_zero() {
        let mut grid = build_grid(["4 0 /"]).unwrap();
        let err = evaluate(&mut grid, &[]).unwrap_err();
        assert_eq!(err, EngineError::DivisionByZero { cell: cell("A1") });
    }

    #[test]
    fn test_division_by_referenced_zero() {
        let mut grid = build_grid(["4 B1 /,"]).unwrap();
        let err = evaluate(&mut grid, &[]).unwrap_err();
        assert_eq!(err, EngineError::DivisionByZero { cell: cell("A1") });
    }

    #[test]
    fn test_evaluate_overwrites_grid() {
        let mut grid = build_grid(["5,3", "A1 B1 +,10"]).unwrap();
        let order = vec![cell("A1"), cell("B1"), cell("B2"), cell("A2")];
        evaluate(&mut grid, &order).unwrap();
        assert_eq!(grid[&cell("A2")], CellNode::new_number(8.0));
        assert!(grid.values().all(|node| node.as_number().is_some()));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut grid = build_grid(["B1 2 *,C1,7"]).unwrap();
        evaluate(&mut grid, &[]).unwrap();
        let once = grid.clone();
        evaluate(&mut grid, &[]).unwrap();
        assert_eq!(grid, once);
    }

    #[test]
    fn test_cycle_safety_net() {
        // Unvalidated grid: the evaluator refuses to loop.
        let grid = build_grid(["B1,C1,A1"]).unwrap();
        let err = Evaluator::new(&grid).resolve(cell("A1")).unwrap_err();
        assert_eq!(
            err,
            EngineError::CircularDependency {
                cells: vec![cell("A1"), cell("B1"), cell("C1")]
            }
        );
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let rows: Vec<String> = (1..=50_000)
            .map(|row| format!("A{}", row + 1))
            .chain(std::iter::once("1".to_string()))
            .collect();
        let grid = build_grid(&rows).unwrap();
        let mut evaluator = Evaluator::new(&grid);
        assert_eq!(evaluator.resolve(cell("A1")).unwrap(), 1.0);
    }
}
