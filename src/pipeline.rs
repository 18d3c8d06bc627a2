//! Record processing pipeline
//!
//! Reads records one at a time, applies every configured step to the record's
//! source grid and hands the source plus each result to the output sinks. A
//! record is emitted only when all of its steps succeed; otherwise it is
//! skipped and reported in the [`ProcessSummary`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::grid::{Capacity, Grid};
use crate::reader::{ReadError, Record, RecordReader};
use crate::sink::{Emitted, GridSink, SinkError};
use crate::transforms::{apply_step, Step, Target, Transform, TransformError};

/// Heading and step name used for the grid as read
pub const SOURCE_LABEL: &str = "Initial image";
pub const SOURCE_STEP: &str = "source";

/// Errors that abort a whole run
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// The input file could not be opened
    #[error("cannot open input file '{}': {source}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    /// The input stream failed mid-read
    #[error("failed to read input: {0}")]
    Read(io::Error),

    /// An output sink failed
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// A record that was not emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub record: Option<usize>,
    pub line: Option<usize>,
    pub message: String,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Records emitted in full
    pub records: usize,
    /// Records skipped, in input order
    pub skipped: Vec<Skipped>,
    /// Reading stopped at a malformed record before the end of input
    pub stopped_early: bool,
}

impl ProcessSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Settings for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    pub capacity: Capacity,
    pub strict: bool,
    pub steps: Vec<Step>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self { capacity: Capacity::default(), strict: false, steps: default_steps() }
    }
}

/// Rotate, replicate 2x, interpolate 2x.
pub fn default_steps() -> Vec<Step> {
    vec![
        Step::new(vec![Transform::Rotate90]),
        Step::new(vec![Transform::ScaleReplicate { factor: 2 }]),
        Step::new(vec![Transform::ScaleInterpolate { target: Target::Factor(2) }]),
    ]
}

/// A step's result, ready for the sinks.
struct StepOutput {
    step: String,
    label: String,
    grid: Grid,
}

/// Apply every step to the source grid, failing on the first error.
fn run_steps(source: &Grid, steps: &[Step]) -> Result<Vec<StepOutput>, (String, TransformError)> {
    steps
        .iter()
        .map(|step| {
            let grid = apply_step(source, step).map_err(|e| (step.to_string(), e))?;
            Ok(StepOutput { step: step.to_string(), label: step.label(), grid })
        })
        .collect()
}

fn emit_record(
    record: &Record,
    outputs: &[StepOutput],
    sinks: &mut [&mut dyn GridSink],
) -> Result<(), SinkError> {
    for sink in sinks.iter_mut() {
        sink.begin_record(record)?;
        sink.emit(&Emitted {
            record: record.index,
            index: 0,
            step: SOURCE_STEP,
            label: SOURCE_LABEL,
            grid: &record.grid,
        })?;
        for (i, output) in outputs.iter().enumerate() {
            sink.emit(&Emitted {
                record: record.index,
                index: i + 1,
                step: &output.step,
                label: &output.label,
                grid: &output.grid,
            })?;
        }
    }
    Ok(())
}

/// Process every record of a stream.
pub fn process_records<R: BufRead>(
    input: R,
    options: &ProcessOptions,
    sinks: &mut [&mut dyn GridSink],
) -> Result<ProcessSummary, ProcessError> {
    let mut summary = ProcessSummary::default();
    let reader = RecordReader::new(input, options.capacity).strict(options.strict);

    for item in reader {
        match item {
            Ok(record) => match run_steps(&record.grid, &options.steps) {
                Ok(outputs) => {
                    emit_record(&record, &outputs, sinks)?;
                    summary.records += 1;
                    debug!(record = record.index, steps = outputs.len(), "processed record");
                }
                Err((step, e)) => {
                    debug!(record = record.index, %step, error = %e, "skipping record");
                    summary.skipped.push(Skipped {
                        record: Some(record.index),
                        line: Some(record.line),
                        message: format!(
                            "record {}, line {}: step '{}': {}",
                            record.index, record.line, step, e
                        ),
                    });
                }
            },
            Err(ReadError::Io(e)) => return Err(ProcessError::Read(e)),
            Err(e) => {
                debug!(error = %e, fatal = e.is_fatal(), "skipping record");
                summary.stopped_early |= e.is_fatal();
                summary.skipped.push(Skipped {
                    record: e.record(),
                    line: e.line(),
                    message: e.to_string(),
                });
            }
        }
    }

    for sink in sinks.iter_mut() {
        sink.finish()?;
    }

    info!(
        records = summary.records,
        skipped = summary.skipped.len(),
        "finished processing"
    );
    Ok(summary)
}

/// Open `path` (or stdin for `-`) and process it.
///
/// The file handle lives only for the duration of this call.
pub fn process_file(
    path: &Path,
    options: &ProcessOptions,
    sinks: &mut [&mut dyn GridSink],
) -> Result<ProcessSummary, ProcessError> {
    if path.as_os_str() == "-" {
        info!("processing standard input");
        let stdin = io::stdin();
        return process_records(stdin.lock(), options, sinks);
    }

    let file = File::open(path)
        .map_err(|source| ProcessError::FileOpen { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), "processing input file");
    process_records(BufReader::new(file), options, sinks)
}
