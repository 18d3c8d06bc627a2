//! PNG output and file path generation

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::grid::{Grid, Symbol};

/// Color used for marked cells in images and colored terminal output
pub const MARKED_COLOR: Rgba<u8> = Rgba([255, 176, 0, 255]);

/// Color used for blank cells (fully transparent)
pub const BLANK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Errors while writing images
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// Creating the output directory failed
    #[error("cannot create output directory: {0}")]
    Io(#[from] io::Error),
    /// Encoding or writing the PNG failed
    #[error("cannot write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Color for a symbol.
pub fn symbol_color(symbol: Symbol) -> Rgba<u8> {
    match symbol {
        Symbol::Marked => MARKED_COLOR,
        Symbol::Blank => BLANK_COLOR,
    }
}

/// Convert a grid to an image with one pixel per cell.
pub fn grid_to_image(grid: &Grid) -> RgbaImage {
    let mut image = RgbaImage::new(grid.cols() as u32, grid.rows() as u32);
    for (y, row) in grid.rows_iter().enumerate() {
        for (x, &symbol) in row.iter().enumerate() {
            image.put_pixel(x as u32, y as u32, symbol_color(symbol));
        }
    }
    image
}

/// Blow each cell up to a `factor x factor` pixel square.
///
/// Factors of 0 and 1 return the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Save an RGBA image to a PNG file.
///
/// Parent directories are created when missing.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Reduce a step string or label to a file-name-safe slug.
///
/// `"rotate+interpolate:4x6"` becomes `"rotate-interpolate-4x6"`.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Generate the output path for one emitted grid.
///
/// # Output Naming Rules
///
/// | Scenario | Output |
/// |----------|--------|
/// | Source grid of record 1 from `Image1.txt` | `dir/Image1_r1_0_source.png` |
/// | First step (`rotate`) of record 2 | `dir/Image1_r2_1_rotate.png` |
///
/// # Arguments
///
/// * `dir` - Output directory
/// * `input` - The input file path (used for the file stem)
/// * `record` - One-based record number
/// * `index` - Position of the grid within the record (0 is the source)
/// * `step` - Step string, slugified into the name
pub fn generate_output_path(
    dir: &Path,
    input: &Path,
    record: usize,
    index: usize,
    step: &str,
) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("grid");
    dir.join(format!("{}_r{}_{}_{}.png", input_stem, record, index, slugify(step)))
}
