//! Transform application functions for grids
//!
//! Provides functions to apply a single transform, a chain of transforms and
//! a pipeline step to a grid.

use tracing::trace;

use crate::grid::Grid;

use super::interpolate::interpolate_to;
use super::replicate::replicate;
use super::rotate::rotate90;
use super::types::{Step, Transform, TransformError};

/// Apply a single transform to a grid.
///
/// # Arguments
/// * `grid` - The grid to transform
/// * `transform` - The transform operation to apply
///
/// # Returns
/// A freshly allocated grid, or an error if the result would not fit the
/// grid capacity or would be empty
pub fn apply_grid_transform(grid: &Grid, transform: &Transform) -> Result<Grid, TransformError> {
    let out = match transform {
        Transform::Rotate90 => rotate90(grid),
        Transform::ScaleReplicate { factor } => replicate(grid, *factor),
        Transform::ScaleInterpolate { target } => interpolate_to(grid, *target),
    }?;
    trace!(
        op = transform.op_name(),
        from = ?grid.dimensions(),
        to = ?out.dimensions(),
        "applied transform"
    );
    Ok(out)
}

/// Apply a sequence of transforms to a grid.
///
/// Transforms are applied in order from left to right. An empty sequence
/// returns a copy of the input.
pub fn apply_grid_transforms(
    grid: &Grid,
    transforms: &[Transform],
) -> Result<Grid, TransformError> {
    let mut result = grid.clone();
    for transform in transforms {
        result = apply_grid_transform(&result, transform)?;
    }
    Ok(result)
}

/// Apply a pipeline step to a grid.
pub fn apply_step(grid: &Grid, step: &Step) -> Result<Grid, TransformError> {
    apply_grid_transforms(grid, &step.transforms)
}
