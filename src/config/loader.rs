//! Configuration loading and discovery for `glyph.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{ColorMode, GlyphConfig, OutputFormat};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration file name
pub const CONFIG_FILE: &str = "glyph.toml";

/// Directory under the XDG config home
pub const CONFIG_DIR: &str = "glyphgrid";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse glyph.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the input file
    pub input: Option<PathBuf>,
    /// Enable strict value checking
    pub strict: Option<bool>,
    /// Override the row capacity
    pub max_rows: Option<usize>,
    /// Override the column capacity
    pub max_cols: Option<usize>,
    /// Override the output format
    pub format: Option<OutputFormat>,
    /// Override color handling
    pub color: Option<ColorMode>,
    /// Show or hide headings
    pub headings: Option<bool>,
    /// Override the PNG scale factor
    pub png_scale: Option<u32>,
    /// Write PNGs into this directory
    pub png_dir: Option<PathBuf>,
    /// Replace the configured pipeline steps
    pub steps: Option<Vec<String>>,
}

/// Find glyph.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for glyph.toml
/// 2. Check XDG_CONFIG_HOME/glyphgrid/glyph.toml (or ~/.config/glyphgrid/glyph.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find glyph.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join(CONFIG_DIR).join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find glyph.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a glyph.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let config = load_config(None)?;
///
/// // Load from specific path
/// let config = load_config(Some(Path::new("grids/glyph.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GlyphConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => {
            debug!("no glyph.toml found, using defaults");
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GlyphConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GlyphConfig = toml::from_str(&contents)?;
    check(config)
}

/// Return the config if it validates, otherwise every problem found.
pub fn check(config: GlyphConfig) -> Result<GlyphConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Configuration used when no glyph.toml is found.
pub fn default_config() -> GlyphConfig {
    GlyphConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The result should be
/// passed through [`check`] again, since overrides can make it invalid.
pub fn merge_cli_overrides(config: &mut GlyphConfig, overrides: &CliOverrides) {
    if let Some(ref input) = overrides.input {
        config.input.path = input.clone();
    }
    if let Some(strict) = overrides.strict {
        config.input.strict = strict;
    }

    if let Some(max_rows) = overrides.max_rows {
        config.grid.max_rows = max_rows;
    }
    if let Some(max_cols) = overrides.max_cols {
        config.grid.max_cols = max_cols;
    }

    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    if let Some(color) = overrides.color {
        config.output.color = color;
    }
    if let Some(headings) = overrides.headings {
        config.output.headings = headings;
    }
    if let Some(png_scale) = overrides.png_scale {
        config.output.png_scale = png_scale;
    }
    if let Some(ref png_dir) = overrides.png_dir {
        config.output.png_dir = Some(png_dir.clone());
    }

    if let Some(ref steps) = overrides.steps {
        config.pipeline.steps = steps.clone();
    }
}

/// Resolve a path relative to the directory holding the config file.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(config_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[grid]\nmax_rows = 10");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[grid]\nmax_rows = 10");

        let subdir = temp.path().join("data").join("grids");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).expect("should create config dir");
        let config_path = write_config(&dir, b"");

        let saved = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match saved {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    #[serial]
    fn test_find_xdg_config_missing() {
        let temp = TempDir::new().expect("should create temp dir");

        let saved = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match saved {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[input]
path = "sample.txt"

[grid]
max_rows = 12
max_cols = 8

[output]
format = "json"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.input.path, PathBuf::from("sample.txt"));
        assert_eq!(config.grid.max_rows, 12);
        assert_eq!(config.grid.max_cols, 8);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.symbols.marked, '&');
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join("nonexistent.toml");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[grid]
max_rows = 0

[pipeline]
steps = ["spin"]
"#,
        );

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("grid.max_rows"));
                assert!(errors[1].contains("pipeline.steps[0]"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "Config validation failed:\n  - first\n  - second");
    }

    #[test]
    fn test_merge_cli_overrides_input_and_strict() {
        let mut config = default_config();
        let overrides = CliOverrides {
            input: Some(PathBuf::from("other.txt")),
            strict: Some(true),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.input.path, PathBuf::from("other.txt"));
        assert!(config.input.strict);
    }

    #[test]
    fn test_merge_cli_overrides_output() {
        let mut config = default_config();
        let overrides = CliOverrides {
            format: Some(OutputFormat::Json),
            color: Some(ColorMode::Never),
            headings: Some(false),
            png_scale: Some(2),
            png_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.color, ColorMode::Never);
        assert!(!config.output.headings);
        assert_eq!(config.output.png_scale, 2);
        assert_eq!(config.output.png_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_merge_cli_overrides_steps_replace() {
        let mut config = default_config();
        let overrides =
            CliOverrides { steps: Some(vec!["rotate+rotate".to_string()]), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.pipeline.steps, vec!["rotate+rotate"]);
    }

    #[test]
    fn test_merge_then_check_rejects_bad_override() {
        let mut config = default_config();
        let overrides = CliOverrides { max_cols: Some(0), ..Default::default() };

        merge_cli_overrides(&mut config, &overrides);
        assert!(matches!(check(config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = default_config();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("/other/a.txt")), PathBuf::from("/other/a.txt"));
        assert_eq!(resolve_path(root, Path::new("a.txt")), PathBuf::from("/project/a.txt"));
    }
}
