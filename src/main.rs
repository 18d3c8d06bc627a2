//! glyph - Command-line tool for rotating and scaling two-symbol grid images

use std::process::ExitCode;

use glyphgrid::cli;

fn main() -> ExitCode {
    cli::run()
}
