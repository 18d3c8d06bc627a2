//! Configuration schema types for `glyph.toml`
//!
//! Defines the structure and validation rules for glyphgrid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::grid::{Capacity, DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS, MAX_DIMENSION};
use crate::render::{SymbolSet, DEFAULT_BLANK, DEFAULT_MARKED};
use crate::transforms::{parse_step, parse_steps, Step, TransformError, DEFAULT_STEPS};

/// Largest accepted PNG scale factor
pub const MAX_PNG_SCALE: u32 = 64;

/// Format for grids written to stdout
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Headings and padded symbol rows
    #[default]
    Text,
    /// One JSON object per grid
    Json,
}

/// When to color text output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether stdout is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Input section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// File read when no input is given on the command line
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    /// Reject cell values other than 0 and 1
    #[serde(default)]
    pub strict: bool,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("Image1.txt")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: default_input_path(), strict: false }
    }
}

/// Grid capacity section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default = "default_max_cols")]
    pub max_cols: usize,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_max_cols() -> usize {
    DEFAULT_MAX_COLS
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { max_rows: DEFAULT_MAX_ROWS, max_cols: DEFAULT_MAX_COLS }
    }
}

/// Display characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsConfig {
    #[serde(default = "default_marked")]
    pub marked: char,
    #[serde(default = "default_blank")]
    pub blank: char,
}

fn default_marked() -> char {
    DEFAULT_MARKED
}

fn default_blank() -> char {
    DEFAULT_BLANK
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self { marked: DEFAULT_MARKED, blank: DEFAULT_BLANK }
    }
}

/// Output section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub color: ColorMode,
    /// Print record and grid headings in text output
    #[serde(default = "default_true")]
    pub headings: bool,
    /// Pixels per cell for PNG output
    #[serde(default = "default_png_scale")]
    pub png_scale: u32,
    /// Also write every grid as a PNG into this directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_png_scale() -> u32 {
    8
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            headings: true,
            png_scale: default_png_scale(),
            png_dir: None,
        }
    }
}

/// Transform steps applied to each record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_steps")]
    pub steps: Vec<String>,
}

fn default_steps() -> Vec<String> {
    DEFAULT_STEPS.iter().map(|s| s.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { steps: default_steps() }
    }
}

/// Complete glyph.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GlyphConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub symbols: SymbolsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "grid.max_rows")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "glyph.toml: '{}' {}", self.field, self.message)
    }
}

impl GlyphConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        let limits = [("grid.max_rows", self.grid.max_rows), ("grid.max_cols", self.grid.max_cols)];
        for (field, limit) in limits {
            if limit == 0 || limit > MAX_DIMENSION {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("must be between 1 and {}", MAX_DIMENSION),
                });
            }
        }

        if self.symbols.marked == self.symbols.blank {
            errors.push(ConfigValidationError {
                field: "symbols".to_string(),
                message: "marked and blank must be different characters".to_string(),
            });
        }
        let symbols = [("symbols.marked", self.symbols.marked), ("symbols.blank", self.symbols.blank)];
        for (field, c) in symbols {
            if c.is_whitespace() || c.is_control() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a visible character".to_string(),
                });
            }
        }

        if self.output.png_scale == 0 || self.output.png_scale > MAX_PNG_SCALE {
            errors.push(ConfigValidationError {
                field: "output.png_scale".to_string(),
                message: format!("must be between 1 and {}", MAX_PNG_SCALE),
            });
        }

        for (i, step) in self.pipeline.steps.iter().enumerate() {
            if let Err(e) = parse_step(step) {
                errors.push(ConfigValidationError {
                    field: format!("pipeline.steps[{}]", i),
                    message: format!("'{}': {}", step, e),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn capacity(&self) -> Capacity {
        Capacity::new(self.grid.max_rows, self.grid.max_cols)
    }

    pub fn symbol_set(&self) -> SymbolSet {
        SymbolSet::new(self.symbols.marked, self.symbols.blank)
    }

    /// Parsed pipeline steps
    pub fn steps(&self) -> Result<Vec<Step>, TransformError> {
        parse_steps(&self.pipeline.steps)
    }
}
