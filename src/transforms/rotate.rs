//! Quarter-turn rotation

use crate::grid::Grid;

use super::types::TransformError;

/// Rotate a grid 90 degrees clockwise.
///
/// An `R x C` grid becomes `C x R`: column `i` of the source, read top to
/// bottom, becomes row `i` of the result written right to left, i.e.
/// `out[i][R - 1 - j] = src[j][i]`.
pub fn rotate90(grid: &Grid) -> Result<Grid, TransformError> {
    let (rows, cols) = grid.dimensions();
    let mut out = Grid::new(cols, rows, grid.capacity())?;

    for i in 0..cols {
        for j in 0..rows {
            out.set(i, rows - 1 - j, grid.get(j, i)?)?;
        }
    }

    Ok(out)
}
