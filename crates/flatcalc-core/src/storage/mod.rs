//! Plaintext sheet storage: one row per line, cells separated by commas.

mod parser;
mod writer;

pub use parser::{parse_sheet, parse_sheet_content, read_lines};
pub use writer::{render_grid, write_sheet, write_sheet_content};
