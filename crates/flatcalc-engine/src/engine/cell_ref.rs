//! Cell keys.
//!
//! A key is one uppercase column letter `A`..=`Z` followed by a 1-based row
//! number (`A1`, `C12`). Internally both coordinates are zero-indexed.
//!
//! # Examples
//!
//! ```
//! use flatcalc_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! assert!(CellRef::from_str("b3").is_none());
//! ```

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Columns available in a row: one per letter `A`..=`Z`.
pub const MAX_COLUMNS: usize = 26;

/// A reference to a cell by column and row indices (0-indexed).
///
/// Ordered row-major so that a sorted collection of keys walks the sheet the
/// way it is rendered: `A1, B1, ..., A2, B2, ...`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a key such as `B2`. Returns None for anything else, including
    /// lowercase letters and multi-letter columns.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        let caps = key_re().captures(name)?;
        let col = (caps["letter"].as_bytes()[0] - b'A') as usize;
        let row = caps["row"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Column letter for a column index below [`MAX_COLUMNS`].
    pub fn col_letter(col: usize) -> char {
        debug_assert!(col < MAX_COLUMNS, "column {col} has no letter");
        char::from(b'A' + col as u8)
    }
}

fn key_re() -> &'static Regex {
    static KEY_RE: OnceLock<Regex> = OnceLock::new();
    KEY_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<row>[0-9]+)$").expect("cell key regex must compile")
    })
}

impl Ord for CellRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for CellRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_letter(self.col), self.row + 1)
    }
}
