//! Output sinks for processed grids
//!
//! The pipeline hands every grid it produces to one or more [`GridSink`]s:
//! text for the terminal, JSON lines for tools, PNG files on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::grid::Grid;
use crate::output::{generate_output_path, grid_to_image, save_png, scale_image, OutputError};
use crate::reader::Record;
use crate::render::{render_text, GridDocument, SymbolSet};
use crate::terminal::{render_ansi_grid, render_coordinate_grid};

/// Errors raised while writing output
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SinkError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// A grid ready to be written, with its place in the run.
#[derive(Debug, Clone, Copy)]
pub struct Emitted<'a> {
    /// One-based record number
    pub record: usize,
    /// Position within the record, 0 for the source grid
    pub index: usize,
    /// Step string, `"source"` for the source grid
    pub step: &'a str,
    /// Heading text
    pub label: &'a str,
    pub grid: &'a Grid,
}

/// Destination for processed grids.
pub trait GridSink {
    /// Called once per record before any of its grids.
    fn begin_record(&mut self, _record: &Record) -> Result<(), SinkError> {
        Ok(())
    }

    /// Write one grid.
    fn emit(&mut self, emitted: &Emitted<'_>) -> Result<(), SinkError>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Human-readable text output, optionally with ANSI colors.
pub struct TextSink<W: Write> {
    out: W,
    symbols: SymbolSet,
    color: bool,
    headings: bool,
    coordinates: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, symbols: SymbolSet) -> Self {
        Self { out, symbols, color: false, headings: true, coordinates: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_headings(mut self, headings: bool) -> Self {
        self.headings = headings;
        self
    }

    /// Draw row and column numbers around each grid. Takes precedence over color.
    pub fn with_coordinates(mut self, coordinates: bool) -> Self {
        self.coordinates = coordinates;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GridSink for TextSink<W> {
    fn begin_record(&mut self, record: &Record) -> Result<(), SinkError> {
        if self.headings {
            writeln!(self.out)?;
            writeln!(self.out, "Record {} (line {}):", record.index, record.line)?;
        }
        Ok(())
    }

    fn emit(&mut self, emitted: &Emitted<'_>) -> Result<(), SinkError> {
        let grid = emitted.grid;
        if self.headings {
            writeln!(self.out)?;
            writeln!(self.out, " {} ({}x{}):", emitted.label, grid.rows(), grid.cols())?;
        }
        let body = if self.coordinates {
            render_coordinate_grid(grid, &self.symbols)
        } else if self.color {
            render_ansi_grid(grid, &self.symbols)
        } else {
            render_text(grid, &self.symbols)
        };
        self.out.write_all(body.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per grid, one object per line.
pub struct JsonSink<W: Write> {
    out: W,
    symbols: SymbolSet,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, symbols: SymbolSet) -> Self {
        Self { out, symbols }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GridSink for JsonSink<W> {
    fn emit(&mut self, emitted: &Emitted<'_>) -> Result<(), SinkError> {
        let doc = GridDocument::new(
            emitted.record,
            emitted.step,
            emitted.label,
            emitted.grid,
            &self.symbols,
        );
        serde_json::to_writer(&mut self.out, &doc)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Writes every grid to its own PNG file.
pub struct PngSink {
    dir: PathBuf,
    input: PathBuf,
    scale: u32,
    written: Vec<PathBuf>,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>, input: &Path, scale: u32) -> Self {
        Self { dir: dir.into(), input: input.to_path_buf(), scale, written: Vec::new() }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl GridSink for PngSink {
    fn emit(&mut self, emitted: &Emitted<'_>) -> Result<(), SinkError> {
        let path = generate_output_path(
            &self.dir,
            &self.input,
            emitted.record,
            emitted.index,
            emitted.step,
        );
        let image = scale_image(grid_to_image(emitted.grid), self.scale);
        save_png(&image, &path)?;
        info!(path = %path.display(), "wrote image");
        self.written.push(path);
        Ok(())
    }
}
