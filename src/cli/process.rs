//! Process command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::debug;

use crate::config::CliOverrides;
use crate::pipeline::{process_file, ProcessOptions};
use crate::sink::{GridSink, PngSink};

use super::{build_config, config_failed, fail, report, stdout_sink, InputArgs, EXIT_INVALID_ARGS};

/// Execute the process command - print each record and its transform steps
pub fn run_process(
    args: &InputArgs,
    steps: Vec<String>,
    png_dir: Option<PathBuf>,
    png_scale: Option<u32>,
) -> ExitCode {
    let overrides = CliOverrides {
        steps: if steps.is_empty() { None } else { Some(steps) },
        png_dir,
        png_scale,
        ..args.overrides()
    };
    let config = match build_config(args.config.as_deref(), &overrides) {
        Ok(c) => c,
        Err(e) => return config_failed(&e),
    };

    let steps = match config.steps() {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    debug!(steps = ?config.pipeline.steps, "pipeline");

    let options =
        ProcessOptions { capacity: config.capacity(), strict: config.input.strict, steps };

    let mut stdout = stdout_sink(&config, false);
    let mut png = config
        .output
        .png_dir
        .as_ref()
        .map(|dir| PngSink::new(dir, &config.input.path, config.output.png_scale));

    let result = {
        let mut sinks: Vec<&mut dyn GridSink> = Vec::new();
        sinks.push(&mut *stdout);
        if let Some(png) = png.as_mut() {
            sinks.push(png);
        }
        process_file(&config.input.path, &options, &mut sinks)
    };

    match result {
        Ok(summary) => {
            if let Some(png) = &png {
                eprintln!("Wrote {} image(s)", png.written().len());
            }
            report(&summary, config.input.strict)
        }
        Err(e) => fail(&e),
    }
}
