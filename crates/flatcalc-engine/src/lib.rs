//! flatcalc_engine - Plaintext spreadsheet engine.

pub mod engine;
pub mod error;

pub use error::{EngineError, Result};
