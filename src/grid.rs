//! Bounded two-symbol grids
//!
//! A [`Grid`] stores its active `rows x cols` area row-major and remembers the
//! [`Capacity`] it was built against. Every constructor and accessor checks
//! bounds and reports violations as [`GridError`] instead of touching memory
//! outside the active area.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum number of rows in a grid
pub const DEFAULT_MAX_ROWS: usize = 50;

/// Default maximum number of columns in a grid
pub const DEFAULT_MAX_COLS: usize = 50;

/// Largest row or column limit a configuration may ask for
pub const MAX_DIMENSION: usize = 1024;

/// Errors raised by grid construction and cell access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Requested dimensions are zero or exceed the capacity
    #[error("invalid grid dimensions {rows}x{cols} (capacity {max_rows}x{max_cols})")]
    InvalidDimension { rows: usize, cols: usize, max_rows: usize, max_cols: usize },

    /// Cell access outside the active area
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    /// Flat buffer length does not match the dimensions
    #[error("buffer holds {len} cells, expected a {rows}x{cols} grid")]
    BufferSize { len: usize, rows: usize, cols: usize },
}

/// One cell of a grid.
///
/// Input encodes `Blank` as `0` and `Marked` as any other integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Marked,
    #[default]
    Blank,
}

impl Symbol {
    /// Map an input integer to a symbol (zero is blank, anything else is marked).
    pub fn from_value(value: i64) -> Self {
        if value == 0 {
            Symbol::Blank
        } else {
            Symbol::Marked
        }
    }

    pub fn is_marked(self) -> bool {
        self == Symbol::Marked
    }
}

/// Maximum dimensions a grid may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Capacity {
    pub const fn new(max_rows: usize, max_cols: usize) -> Self {
        Self { max_rows, max_cols }
    }

    /// Check that `rows x cols` is non-empty and fits.
    pub fn check(&self, rows: usize, cols: usize) -> Result<(), GridError> {
        if rows == 0 || cols == 0 || rows > self.max_rows || cols > self.max_cols {
            return Err(GridError::InvalidDimension {
                rows,
                cols,
                max_rows: self.max_rows,
                max_cols: self.max_cols,
            });
        }
        Ok(())
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROWS, DEFAULT_MAX_COLS)
    }
}

/// A bounded 2D array of [`Symbol`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    capacity: Capacity,
    cells: Vec<Symbol>,
}

impl Grid {
    /// Create a grid filled with [`Symbol::Blank`].
    pub fn new(rows: usize, cols: usize, capacity: Capacity) -> Result<Self, GridError> {
        capacity.check(rows, cols)?;
        Ok(Self { rows, cols, capacity, cells: vec![Symbol::Blank; rows * cols] })
    }

    /// Build a grid from a row-major buffer of exactly `rows * cols` cells.
    pub fn from_flat(
        rows: usize,
        cols: usize,
        cells: Vec<Symbol>,
        capacity: Capacity,
    ) -> Result<Self, GridError> {
        capacity.check(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(GridError::BufferSize { len: cells.len(), rows, cols });
        }
        Ok(Self { rows, cols, capacity, cells })
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Symbol>>, capacity: Capacity) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(GridError::BufferSize { len: row.len(), rows: 1, cols: width });
            }
            cells.extend(row);
        }
        Self::from_flat(height, width, cells, capacity)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Active dimensions as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Symbol, GridError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, symbol: Symbol) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = symbol;
        Ok(())
    }

    /// Borrow one row of the active area.
    pub fn row(&self, row: usize) -> Option<&[Symbol]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Symbol]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Row-major view of the active cells.
    pub fn as_flat(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn count_marked(&self) -> usize {
        self.cells.iter().filter(|s| s.is_marked()).count()
    }
}
