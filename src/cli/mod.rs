//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod config;
mod process;
mod show;

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{
    check, find_config, load_config, merge_cli_overrides, resolve_path, CliOverrides, ColorMode,
    ConfigError, GlyphConfig, OutputFormat,
};
use crate::grid::MAX_DIMENSION;
use crate::pipeline::{ProcessError, ProcessSummary};
use crate::sink::{GridSink, JsonSink, TextSink};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// glyphgrid - Read two-symbol grid images, rotate and scale them
#[derive(Parser)]
#[command(name = "glyph")]
#[command(about = "glyphgrid - Read two-symbol grid images (0/1 integers), rotate and scale them")]
#[command(version)]
pub struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the commands that read grids
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input file of grid records ("-" for stdin).
    /// Defaults to input.path from glyph.toml, then Image1.txt
    pub input: Option<PathBuf>,

    /// Use this glyph.toml instead of searching for one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject cell values other than 0 and 1, and fail if any record is skipped
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Color text output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Maximum grid rows (1-1024)
    #[arg(long, value_name = "N", value_parser = dimension_limit())]
    pub max_rows: Option<usize>,

    /// Maximum grid columns (1-1024)
    #[arg(long, value_name = "N", value_parser = dimension_limit())]
    pub max_cols: Option<usize>,

    /// Omit record and grid headings from text output
    #[arg(long)]
    pub no_headings: bool,
}

fn dimension_limit() -> clap::builder::RangedU64ValueParser<usize> {
    clap::builder::RangedU64ValueParser::new().range(1..=MAX_DIMENSION as u64)
}

impl InputArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input: self.input.clone(),
            strict: self.strict.then_some(true),
            max_rows: self.max_rows,
            max_cols: self.max_cols,
            format: self.format,
            color: self.color,
            headings: self.no_headings.then_some(false),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every grid record followed by the result of each transform step
    Process {
        #[command(flatten)]
        input: InputArgs,

        /// Transform step, repeatable; replaces the configured steps.
        /// Examples: rotate, scale2x, replicate:3, interpolate:4x6, rotate+scale2x
        #[arg(short = 't', long = "transform", value_name = "STEP")]
        steps: Vec<String>,

        /// Also write every grid as a PNG into this directory
        #[arg(long, value_name = "DIR")]
        png_dir: Option<PathBuf>,

        /// Pixels per cell for PNG output (1-64)
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=64))]
        png_scale: Option<u32>,
    },

    /// Print the grid records as read, without transforms
    Show {
        #[command(flatten)]
        input: InputArgs,

        /// Number rows and columns
        #[arg(long)]
        coords: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Use this glyph.toml instead of searching for one
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// Load glyph.toml (explicit or discovered), resolve its relative paths
/// against its own directory, then apply command-line overrides.
pub(crate) fn build_config(
    explicit: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<GlyphConfig, ConfigError> {
    let path = explicit.map(Path::to_path_buf).or_else(find_config);
    let mut config = load_config(path.as_deref())?;

    if let Some(dir) = path.as_deref().and_then(Path::parent) {
        config.input.path = resolve_path(dir, &config.input.path);
        if let Some(png_dir) = config.output.png_dir.take() {
            config.output.png_dir = Some(resolve_path(dir, &png_dir));
        }
    }

    merge_cli_overrides(&mut config, overrides);
    check(config)
}

/// The sink writing to stdout for the configured format.
pub(crate) fn stdout_sink(config: &GlyphConfig, coordinates: bool) -> Box<dyn GridSink> {
    let out = BufWriter::new(io::stdout().lock());
    let symbols = config.symbol_set();
    match config.output.format {
        OutputFormat::Text => {
            let color = config.output.color.enabled(atty::is(atty::Stream::Stdout));
            Box::new(
                TextSink::new(out, symbols)
                    .with_color(color)
                    .with_headings(config.output.headings)
                    .with_coordinates(coordinates),
            )
        }
        OutputFormat::Json => Box::new(JsonSink::new(out, symbols)),
    }
}

/// Exit code for a finished run: skipped records only fail a strict run.
fn summary_code(summary: &ProcessSummary, strict: bool) -> u8 {
    if strict && !summary.is_clean() {
        EXIT_ERROR
    } else {
        EXIT_SUCCESS
    }
}

/// Print skipped records to stderr and pick the exit code.
pub(crate) fn report(summary: &ProcessSummary, strict: bool) -> ExitCode {
    for skipped in &summary.skipped {
        eprintln!("Warning: {}", skipped.message);
    }
    if summary.stopped_early {
        eprintln!("Warning: Stopped reading at a malformed record");
    }
    if !summary.is_clean() {
        eprintln!("{} record(s) processed, {} skipped", summary.records, summary.skipped.len());
    }
    ExitCode::from(summary_code(summary, strict))
}

/// Print a run failure and pick the exit code.
pub(crate) fn fail(err: &ProcessError) -> ExitCode {
    match err {
        ProcessError::FileOpen { path, source } => {
            eprintln!("Error: Cannot open input file '{}': {}", path.display(), source);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        other => {
            eprintln!("Error: {}", other);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Report a configuration problem.
pub(crate) fn config_failed(err: &ConfigError) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::from(EXIT_INVALID_ARGS)
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let code = match cli.command {
        Commands::Process { input, steps, png_dir, png_scale } => {
            process::run_process(&input, steps, png_dir, png_scale)
        }
        Commands::Show { input, coords } => show::run_show(&input, coords),
        Commands::Config { config: path } => config::run_config(path.as_deref()),
    };

    let _ = io::stderr().flush();
    code
}
