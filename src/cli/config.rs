//! Config command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;

use super::{build_config, config_failed, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the config command - print the effective configuration
pub fn run_config(path: Option<&Path>) -> ExitCode {
    let config = match build_config(path, &CliOverrides::default()) {
        Ok(c) => c,
        Err(e) => return config_failed(&e),
    };

    match toml::to_string_pretty(&config) {
        Ok(text) => {
            print!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Cannot serialize config: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
