//! Sheet state and the evaluation pipeline.

mod state;

pub use state::Sheet;
