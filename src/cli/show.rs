//! Show command implementation (source grids only)

use std::process::ExitCode;

use crate::pipeline::{process_file, ProcessOptions};
use crate::sink::GridSink;

use super::{build_config, config_failed, fail, report, stdout_sink, InputArgs};

/// Execute the show command - print the grids as read
pub fn run_show(args: &InputArgs, coords: bool) -> ExitCode {
    let config = match build_config(args.config.as_deref(), &args.overrides()) {
        Ok(c) => c,
        Err(e) => return config_failed(&e),
    };

    let options = ProcessOptions {
        capacity: config.capacity(),
        strict: config.input.strict,
        steps: Vec::new(),
    };

    let mut stdout = stdout_sink(&config, coords);
    let result = {
        let mut sinks: [&mut dyn GridSink; 1] = [&mut *stdout];
        process_file(&config.input.path, &options, &mut sinks)
    };

    match result {
        Ok(summary) => report(&summary, config.input.strict),
        Err(e) => fail(&e),
    }
}
