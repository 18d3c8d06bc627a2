//! Plain-text and JSON rendering of grids
//!
//! The text layout writes every cell as a space followed by its symbol
//! right-aligned in two columns, one grid row per line:
//!
//! ```text
//!   +  &
//!   &  +
//! ```

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Symbol};

/// Default character for [`Symbol::Marked`]
pub const DEFAULT_MARKED: char = '&';

/// Default character for [`Symbol::Blank`]
pub const DEFAULT_BLANK: char = '+';

/// Characters used to display the two symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    pub marked: char,
    pub blank: char,
}

impl SymbolSet {
    pub fn new(marked: char, blank: char) -> Self {
        Self { marked, blank }
    }

    pub fn char_for(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Marked => self.marked,
            Symbol::Blank => self.blank,
        }
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::new(DEFAULT_MARKED, DEFAULT_BLANK)
    }
}

/// Render one grid row as text cells.
pub fn render_row(row: &[Symbol], symbols: &SymbolSet) -> String {
    let mut line = String::with_capacity(row.len() * 3);
    for &symbol in row {
        line.push_str(&format!(" {:>2}", symbols.char_for(symbol)));
    }
    line
}

/// Render a whole grid, one line per row, each line newline-terminated.
pub fn render_text(grid: &Grid, symbols: &SymbolSet) -> String {
    let mut output = String::new();
    for row in grid.rows_iter() {
        output.push_str(&render_row(row, symbols));
        output.push('\n');
    }
    output
}

/// Grid rows as compact strings of symbol characters (`"+&"`).
pub fn grid_strings(grid: &Grid, symbols: &SymbolSet) -> Vec<String> {
    grid.rows_iter()
        .map(|row| row.iter().map(|&s| symbols.char_for(s)).collect())
        .collect()
}

/// One emitted grid, as written by the JSON output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDocument {
    /// One-based record number
    pub record: usize,
    /// Step string (`"source"` for the grid as read)
    pub step: String,
    /// Heading text
    pub label: String,
    pub rows: usize,
    pub cols: usize,
    /// One string per row
    pub grid: Vec<String>,
}

impl GridDocument {
    pub fn new(
        record: usize,
        step: impl Into<String>,
        label: impl Into<String>,
        grid: &Grid,
        symbols: &SymbolSet,
    ) -> Self {
        Self {
            record,
            step: step.into(),
            label: label.into(),
            rows: grid.rows(),
            cols: grid.cols(),
            grid: grid_strings(grid, symbols),
        }
    }
}
