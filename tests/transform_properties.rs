//! Property checks for the grid transforms over a deterministic set of grids
//!
//! Grids are generated from a small xorshift sequence so every run sees the
//! same inputs, covering square, wide, tall and single-cell shapes.

use glyphgrid::grid::{Capacity, Grid, Symbol};
use glyphgrid::transforms::{
    apply_step, interpolate, parse_step, replicate, rotate90, scale_up2, scale_up2_interpolated,
    TransformError,
};

const SHAPES: &[(usize, usize)] =
    &[(1, 1), (1, 7), (7, 1), (2, 2), (3, 5), (5, 3), (8, 8), (13, 4), (25, 25)];

fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn generated(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let cells = (0..rows * cols)
        .map(|_| if xorshift(&mut state) & 1 == 1 { Symbol::Marked } else { Symbol::Blank })
        .collect();
    Grid::from_flat(rows, cols, cells, Capacity::default()).expect("shape fits default capacity")
}

fn all_grids() -> Vec<Grid> {
    SHAPES
        .iter()
        .enumerate()
        .flat_map(|(i, &(r, c))| (0..3).map(move |s| generated(r, c, (i * 3 + s) as u64 + 1)))
        .collect()
}

#[test]
fn test_rotation_swaps_dimensions_and_moves_cells() {
    for grid in all_grids() {
        let (r, c) = grid.dimensions();
        let rotated = rotate90(&grid).unwrap();
        assert_eq!(rotated.dimensions(), (c, r));
        for j in 0..r {
            for i in 0..c {
                assert_eq!(rotated.get(i, r - 1 - j).unwrap(), grid.get(j, i).unwrap());
            }
        }
    }
}

#[test]
fn test_four_rotations_restore_the_grid() {
    for grid in all_grids() {
        let mut g = grid.clone();
        for _ in 0..4 {
            g = rotate90(&g).unwrap();
        }
        assert_eq!(g, grid);
    }
}

#[test]
fn test_rotation_preserves_marked_count() {
    for grid in all_grids() {
        assert_eq!(rotate90(&grid).unwrap().count_marked(), grid.count_marked());
    }
}

#[test]
fn test_replication_fills_blocks() {
    for grid in all_grids() {
        let scaled = scale_up2(&grid).unwrap();
        assert_eq!(scaled.dimensions(), (grid.rows() * 2, grid.cols() * 2));
        for i in 0..grid.rows() {
            for j in 0..grid.cols() {
                let expected = grid.get(i, j).unwrap();
                for a in 0..2 {
                    for b in 0..2 {
                        assert_eq!(scaled.get(2 * i + a, 2 * j + b).unwrap(), expected);
                    }
                }
            }
        }
        assert_eq!(scaled.count_marked(), grid.count_marked() * 4);
    }
}

#[test]
fn test_interpolation_at_integer_factors_matches_replication() {
    for grid in all_grids() {
        let (r, c) = grid.dimensions();
        for k in 1..=3 {
            if r * k > 50 || c * k > 50 {
                continue;
            }
            assert_eq!(interpolate(&grid, r * k, c * k).unwrap(), replicate(&grid, k).unwrap());
        }
        assert_eq!(scale_up2_interpolated(&grid).unwrap(), scale_up2(&grid).unwrap());
    }
}

#[test]
fn test_interpolation_to_same_size_is_identity() {
    for grid in all_grids() {
        let (r, c) = grid.dimensions();
        assert_eq!(interpolate(&grid, r, c).unwrap(), grid);
    }
}

#[test]
fn test_interpolation_only_copies_source_symbols() {
    for grid in all_grids() {
        let down = interpolate(&grid, 1, 1).unwrap();
        assert_eq!(down.get(0, 0).unwrap(), grid.get(0, 0).unwrap());

        let odd = interpolate(&grid, 11, 7).unwrap();
        if grid.count_marked() == 0 {
            assert_eq!(odd.count_marked(), 0);
        }
        if grid.count_marked() == grid.rows() * grid.cols() {
            assert_eq!(odd.count_marked(), 11 * 7);
        }
    }
}

#[test]
fn test_scaling_a_full_capacity_grid_fails() {
    let grid = Grid::new(50, 50, Capacity::default()).unwrap();
    assert!(rotate90(&grid).is_ok());
    assert!(scale_up2(&grid).unwrap_err().is_invalid_dimension());
    assert!(scale_up2_interpolated(&grid).unwrap_err().is_invalid_dimension());
}

#[test]
fn test_steps_start_from_the_given_grid() {
    let step = parse_step("rotate+scale2x").unwrap();
    for grid in all_grids() {
        if grid.rows() > 25 || grid.cols() > 25 {
            continue;
        }
        let expected = scale_up2(&rotate90(&grid).unwrap()).unwrap();
        assert_eq!(apply_step(&grid, &step).unwrap(), expected);
    }
}

#[test]
fn test_zero_targets_are_rejected() {
    let grid = Grid::new(2, 2, Capacity::default()).unwrap();
    assert!(matches!(interpolate(&grid, 0, 4), Err(TransformError::InvalidDimension { .. })));
    assert!(matches!(replicate(&grid, 0), Err(TransformError::InvalidDimension { .. })));
}
