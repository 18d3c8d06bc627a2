//! Block replication upscaling

use crate::grid::Grid;

use super::types::{scaled_dimensions, TransformError};

/// Scale a grid up by replicating every cell into a `factor x factor` block.
///
/// The result must fit the source grid's capacity; a 30x30 grid cannot be
/// doubled under the default 50x50 capacity.
pub fn replicate(grid: &Grid, factor: usize) -> Result<Grid, TransformError> {
    let (rows, cols) = grid.dimensions();
    if factor == 0 {
        return Err(TransformError::InvalidDimension {
            op: "replicate".to_string(),
            rows: 0,
            cols: 0,
        });
    }

    let (rows2, cols2) = scaled_dimensions("replicate", rows, cols, factor)?;
    let mut out = Grid::new(rows2, cols2, grid.capacity())?;

    for i in 0..rows {
        for j in 0..cols {
            let symbol = grid.get(i, j)?;
            for a in 0..factor {
                for b in 0..factor {
                    out.set(i * factor + a, j * factor + b, symbol)?;
                }
            }
        }
    }

    Ok(out)
}

/// Double a grid in both directions.
pub fn scale_up2(grid: &Grid) -> Result<Grid, TransformError> {
    replicate(grid, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Capacity, GridError, Symbol};

    use Symbol::{Blank as B, Marked as M};

    #[test]
    fn test_scale_up2_quadrants() {
        let grid = Grid::from_rows(vec![vec![B, M], vec![M, B]], Capacity::default()).unwrap();
        let scaled = scale_up2(&grid).unwrap();
        assert_eq!(scaled.dimensions(), (4, 4));
        assert_eq!(scaled.row(0).unwrap(), &[B, B, M, M]);
        assert_eq!(scaled.row(1).unwrap(), &[B, B, M, M]);
        assert_eq!(scaled.row(2).unwrap(), &[M, M, B, B]);
        assert_eq!(scaled.row(3).unwrap(), &[M, M, B, B]);
    }

    #[test]
    fn test_replicate_every_block_matches_source() {
        let grid =
            Grid::from_rows(vec![vec![M, B, M], vec![B, B, M]], Capacity::default()).unwrap();
        let scaled = replicate(&grid, 2).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                for a in 0..2 {
                    for b in 0..2 {
                        assert_eq!(
                            scaled.get(2 * i + a, 2 * j + b).unwrap(),
                            grid.get(i, j).unwrap()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_replicate_factor_three() {
        let grid = Grid::from_rows(vec![vec![M, B]], Capacity::default()).unwrap();
        let scaled = replicate(&grid, 3).unwrap();
        assert_eq!(scaled.dimensions(), (3, 6));
        assert_eq!(scaled.count_marked(), 9);
    }

    #[test]
    fn test_replicate_factor_one_is_copy() {
        let grid = Grid::from_rows(vec![vec![M, B], vec![B, B]], Capacity::default()).unwrap();
        assert_eq!(replicate(&grid, 1).unwrap(), grid);
    }

    #[test]
    fn test_replicate_factor_zero() {
        let grid = Grid::new(1, 1, Capacity::default()).unwrap();
        let err = replicate(&grid, 0).unwrap_err();
        assert!(err.is_invalid_dimension());
    }

    #[test]
    fn test_scale_up2_exceeds_capacity() {
        let grid = Grid::new(26, 10, Capacity::default()).unwrap();
        let err = scale_up2(&grid).unwrap_err();
        assert_eq!(
            err,
            TransformError::Grid(GridError::InvalidDimension {
                rows: 52,
                cols: 20,
                max_rows: 50,
                max_cols: 50
            })
        );
    }

    #[test]
    fn test_scale_up2_at_half_capacity() {
        let grid = Grid::new(25, 25, Capacity::default()).unwrap();
        assert_eq!(scale_up2(&grid).unwrap().dimensions(), (50, 50));
    }

    #[test]
    fn test_replicate_factor_overflow() {
        let grid = Grid::new(2, 2, Capacity::default()).unwrap();
        let err = replicate(&grid, usize::MAX).unwrap_err();
        assert!(err.is_invalid_dimension());
        assert!(matches!(err, TransformError::InvalidDimension { ref op, .. } if op == "replicate"));
    }
}
