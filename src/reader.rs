//! Streaming record reader for whitespace-delimited grid input
//!
//! Input is a sequence of records, each a `Rows Cols` header followed by
//! `Rows * Cols` integers (0 for blank, anything else for marked). Line breaks
//! carry no meaning beyond separating integers; they are tracked only for
//! diagnostics.
//!
//! A record whose declared size does not fit the capacity is consumed and
//! reported, and reading carries on with the next record. A record that runs
//! out of integers (or contains a non-integer) stops the reader, since the next
//! record boundary cannot be found.

use std::collections::VecDeque;
use std::io::BufRead;

use thiserror::Error;
use tracing::debug;

use crate::grid::{Capacity, Grid, GridError, Symbol};

/// Error type for record reading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// The underlying stream failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer integers than the header requires, or a token that is not an integer
    #[error("record {record}, line {line}: {message}")]
    Malformed { record: usize, line: usize, message: String },

    /// Declared dimensions are zero or exceed the capacity
    #[error("record {record}, line {line}: {source}")]
    Dimension { record: usize, line: usize, source: GridError },

    /// Strict mode: a cell value other than 0 or 1
    #[error("record {record}, line {line}: value {value} is not 0 or 1")]
    InvalidValue { record: usize, line: usize, value: i64 },
}

impl ReadError {
    /// Whether reading has to stop after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReadError::Io(_) | ReadError::Malformed { .. })
    }

    /// One-based index of the record the error belongs to.
    pub fn record(&self) -> Option<usize> {
        match self {
            ReadError::Io(_) => None,
            ReadError::Malformed { record, .. }
            | ReadError::Dimension { record, .. }
            | ReadError::InvalidValue { record, .. } => Some(*record),
        }
    }

    /// Line on which the problem was detected.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReadError::Io(_) => None,
            ReadError::Malformed { line, .. }
            | ReadError::Dimension { line, .. }
            | ReadError::InvalidValue { line, .. } => Some(*line),
        }
    }
}

/// A grid read from the input, with its position in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// One-based record number
    pub index: usize,
    /// Line holding the record header
    pub line: usize,
    pub grid: Grid,
}

/// Whitespace tokenizer that remembers which line each token came from.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
    buf: String,
    line: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self { reader, pending: VecDeque::new(), buf: String::new(), line: 0 }
    }

    fn next_token(&mut self) -> Result<Option<(String, usize)>, std::io::Error> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some((token, self.line)));
            }
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            self.pending.extend(self.buf.split_whitespace().map(str::to_string));
        }
    }
}

/// Reads [`Record`]s one at a time from a buffered stream.
///
/// Also usable as an iterator; the iterator ends after the first fatal error.
pub struct RecordReader<R> {
    tokens: Tokens<R>,
    capacity: Capacity,
    strict: bool,
    record: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, capacity: Capacity) -> Self {
        Self { tokens: Tokens::new(reader), capacity, strict: false, record: 0, done: false }
    }

    /// Reject cell values other than 0 and 1.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Number of record headers seen so far.
    pub fn records_seen(&self) -> usize {
        self.record
    }

    fn parse_int(&self, token: &str, record: usize, line: usize) -> Result<i64, ReadError> {
        token.parse::<i64>().map_err(|_| ReadError::Malformed {
            record,
            line,
            message: format!("'{}' is not an integer", token),
        })
    }

    /// Read the next record.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_record(&mut self) -> Result<Option<Record>, ReadError> {
        let Some((token, line)) = self.tokens.next_token()? else {
            return Ok(None);
        };
        self.record += 1;
        let record = self.record;

        let rows = self.parse_int(&token, record, line)?;
        let (token, cols_line) = self.tokens.next_token()?.ok_or_else(|| ReadError::Malformed {
            record,
            line,
            message: "missing column count".to_string(),
        })?;
        let cols = self.parse_int(&token, record, cols_line)?;

        let (Ok(rows), Ok(cols)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(ReadError::Malformed {
                record,
                line,
                message: format!("negative dimensions {}x{}", rows, cols),
            });
        };
        let expected = rows.checked_mul(cols).ok_or_else(|| ReadError::Malformed {
            record,
            line,
            message: format!("dimensions {}x{} are too large", rows, cols),
        })?;

        // Oversized records are still consumed so the next header lines up.
        // Cells grow as values arrive; the header alone never sizes an allocation.
        let fits = self.capacity.check(rows, cols);
        let mut cells = Vec::new();
        let mut rejected = None;

        for found in 0..expected {
            let Some((token, value_line)) = self.tokens.next_token()? else {
                return Err(ReadError::Malformed {
                    record,
                    line: self.tokens.line,
                    message: format!("expected {} cell values, found {}", expected, found),
                });
            };
            let value = self.parse_int(&token, record, value_line)?;
            if self.strict && value != 0 && value != 1 && rejected.is_none() {
                rejected = Some((value, value_line));
            }
            if fits.is_ok() {
                cells.push(Symbol::from_value(value));
            }
        }

        if let Err(source) = fits {
            return Err(ReadError::Dimension { record, line, source });
        }
        if let Some((value, line)) = rejected {
            return Err(ReadError::InvalidValue { record, line, value });
        }

        let grid = Grid::from_flat(rows, cols, cells, self.capacity)
            .map_err(|source| ReadError::Dimension { record, line, source })?;
        debug!(record, line, rows, cols, "read record");
        Ok(Some(Record { index: record, line, grid }))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                if e.is_fatal() {
                    self.done = true;
                }
                Some(Err(e))
            }
        }
    }
}
