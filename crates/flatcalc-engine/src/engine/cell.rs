//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`Operand`] - A numeric literal or a reference to another cell
//! - [`Operator`] - One of the four binary arithmetic operators
//! - [`CellNode`] - A parsed cell: a single operand or a two-operand expression
//! - [`Grid`] - Ordered storage for cells, keyed by [`CellRef`]

use std::collections::BTreeMap;
use std::fmt;

use super::cell_ref::CellRef;
use crate::error::{EngineError, Result};

/// A leaf value: a number, or a reference still waiting to be resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Number(f64),
    Reference(CellRef),
}

impl Operand {
    /// Parse a single token: a float literal if it is one, otherwise a
    /// reference to another cell.
    fn parse(cell: CellRef, token: &str) -> Result<Operand> {
        if let Ok(n) = token.parse::<f64>() {
            return Ok(Operand::Number(n));
        }
        CellRef::from_str(token)
            .map(Operand::Reference)
            .ok_or_else(|| EngineError::InvalidReference {
                cell,
                target: token.to_string(),
            })
    }

    pub fn reference(&self) -> Option<CellRef> {
        match self {
            Operand::Reference(r) => Some(*r),
            Operand::Number(_) => None,
        }
    }
}

/// Binary arithmetic operators allowed in an expression cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Apply the operator. Returns None when dividing by zero.
    pub fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(lhs + rhs),
            Operator::Sub => Some(lhs - rhs),
            Operator::Mul => Some(lhs * rhs),
            Operator::Div if rhs == 0.0 => None,
            Operator::Div => Some(lhs / rhs),
        }
    }
}

/// A parsed cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellNode {
    Operand(Operand),
    Expression {
        operator: Operator,
        lhs: Operand,
        rhs: Operand,
    },
}

impl CellNode {
    pub fn new_number(n: f64) -> CellNode {
        CellNode::Operand(Operand::Number(n))
    }

    pub fn new_reference(target: CellRef) -> CellNode {
        CellNode::Operand(Operand::Reference(target))
    }

    /// Parse the raw text of the cell at `cell`.
    /// - Blank -> Number(0)
    /// - One token -> Number if it parses as a float, otherwise Reference
    /// - `<a> <b> <op>` -> Expression
    /// - Anything else -> MalformedCell
    pub fn parse(cell: CellRef, text: &str) -> Result<CellNode> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(CellNode::new_number(0.0));
        }

        let tokens: Vec<&str> = trimmed.split(' ').collect();
        match tokens.as_slice() {
            [single] => Ok(CellNode::Operand(Operand::parse(cell, single)?)),
            [lhs, rhs, symbol] => {
                let operator =
                    Operator::from_symbol(symbol).ok_or_else(|| EngineError::MalformedCell {
                        cell,
                        text: trimmed.to_string(),
                    })?;
                Ok(CellNode::Expression {
                    operator,
                    lhs: Operand::parse(cell, lhs)?,
                    rhs: Operand::parse(cell, rhs)?,
                })
            }
            _ => Err(EngineError::MalformedCell {
                cell,
                text: trimmed.to_string(),
            }),
        }
    }

    /// Cells this node reads from, in operand order. Duplicates are kept.
    pub fn dependencies(&self) -> Vec<CellRef> {
        match self {
            CellNode::Operand(op) => op.reference().into_iter().collect(),
            CellNode::Expression { lhs, rhs, .. } => {
                lhs.reference().into_iter().chain(rhs.reference()).collect()
            }
        }
    }

    /// The number if this node is a fully resolved literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellNode::Operand(Operand::Number(n)) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Reference(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for CellNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellNode::Operand(op) => write!(f, "{}", op),
            CellNode::Expression { operator, lhs, rhs } => {
                write!(f, "{} {} {}", lhs, rhs, operator.symbol())
            }
        }
    }
}

/// Sheet storage. Iterates in row-major key order.
pub type Grid = BTreeMap<CellRef, CellNode>;
