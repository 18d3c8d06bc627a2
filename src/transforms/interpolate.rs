//! Fixed-point nearest-neighbor resampling
//!
//! Works on flattened row-major buffers with 16.16 fixed-point ratios, so no
//! floating point is involved. The ratio carries a `+1` bias to keep
//! truncation from landing one cell short; the bias can push the last sample
//! past the source edge, so source coordinates are clamped.

use crate::grid::{Grid, Symbol};

use super::types::{Target, TransformError};

/// Number of fractional bits in the scale ratios
const FRACTION_BITS: u32 = 16;

/// Compute the 16.16 ratio that maps target coordinates back onto the source.
fn fixed_ratio(source: usize, target: usize) -> u64 {
    (((source as u64) << FRACTION_BITS) / target as u64) + 1
}

/// Source coordinate for target coordinate `t`, clamped to `source_len - 1`.
fn source_coord(t: usize, ratio: u64, source_len: usize) -> usize {
    let s = ((t as u64 * ratio) >> FRACTION_BITS) as usize;
    s.min(source_len - 1)
}

/// Resample a flat row-major buffer of `rows x cols` cells to `rows2 x cols2`.
///
/// Callers guarantee `src.len() == rows * cols` and all four dimensions are
/// non-zero.
fn resample_flat(
    src: &[Symbol],
    rows: usize,
    cols: usize,
    rows2: usize,
    cols2: usize,
) -> Vec<Symbol> {
    let x_ratio = fixed_ratio(cols, cols2);
    let y_ratio = fixed_ratio(rows, rows2);

    let mut dst = vec![Symbol::Blank; rows2 * cols2];
    for i2 in 0..rows2 {
        let y2 = source_coord(i2, y_ratio, rows);
        for j2 in 0..cols2 {
            let x2 = source_coord(j2, x_ratio, cols);
            dst[i2 * cols2 + j2] = src[y2 * cols + x2];
        }
    }
    dst
}

/// Resample a grid to exactly `rows2 x cols2` cells.
///
/// # Errors
/// - [`TransformError::InvalidDimension`] when either target dimension is zero
/// - [`TransformError::Grid`] when the target exceeds the grid capacity
pub fn interpolate(grid: &Grid, rows2: usize, cols2: usize) -> Result<Grid, TransformError> {
    if rows2 == 0 || cols2 == 0 {
        return Err(TransformError::InvalidDimension {
            op: "interpolate".to_string(),
            rows: rows2,
            cols: cols2,
        });
    }
    let capacity = grid.capacity();
    capacity.check(rows2, cols2)?;

    let (rows, cols) = grid.dimensions();
    let flat = grid.as_flat().to_vec();
    let resampled = resample_flat(&flat, rows, cols, rows2, cols2);

    Ok(Grid::from_flat(rows2, cols2, resampled, capacity)?)
}

/// Resample a grid against a [`Target`].
pub fn interpolate_to(grid: &Grid, target: Target) -> Result<Grid, TransformError> {
    let (rows2, cols2) = target.resolve(grid.rows(), grid.cols())?;
    interpolate(grid, rows2, cols2)
}

/// Double a grid in both directions using the resampler.
pub fn scale_up2_interpolated(grid: &Grid) -> Result<Grid, TransformError> {
    interpolate_to(grid, Target::Factor(2))
}
