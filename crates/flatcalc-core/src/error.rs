//! Error types for Flatcalc core.

use thiserror::Error;

use flatcalc_engine::EngineError;

/// Errors that can occur while processing a sheet
#[derive(Error, Debug)]
pub enum FlatcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid sheet state: {0}")]
    InvalidState(&'static str),
}

impl FlatcalcError {
    /// The engine error behind this one, if any.
    pub fn engine(&self) -> Option<&EngineError> {
        match self {
            FlatcalcError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlatcalcError>;
