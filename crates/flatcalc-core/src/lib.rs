//! flatcalc-core - Sheet orchestration and plaintext storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Sheet;
pub use error::{FlatcalcError, Result};

pub use flatcalc_engine::engine::CellRef;
