//! Core transform types and error definitions
//!
//! Contains the `Transform` enum representing all supported grid operations
//! and `TransformError` for error handling during parsing and application.

use std::fmt;

use crate::grid::GridError;

/// Errors that can occur during transform parsing or application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Unknown transform operation
    #[error("unknown transform operation: {0}")]
    UnknownOperation(String),

    /// Invalid parameter value
    #[error("invalid parameter for {op}: {message}")]
    InvalidParameter { op: String, message: String },

    /// A scale target or factor that would produce an empty grid
    #[error("invalid target dimensions for {op}: {rows}x{cols}")]
    InvalidDimension { op: String, rows: usize, cols: usize },

    /// The result does not fit the grid capacity
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl TransformError {
    /// True for every flavour of dimension failure: zero-sized targets and
    /// results that exceed the grid capacity.
    pub fn is_invalid_dimension(&self) -> bool {
        matches!(
            self,
            TransformError::InvalidDimension { .. }
                | TransformError::Grid(GridError::InvalidDimension { .. })
        )
    }
}

/// Target size for the interpolating resampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Multiply both dimensions by an integer factor
    Factor(usize),
    /// Resample to exactly `rows x cols`
    Exact { rows: usize, cols: usize },
}

impl Target {
    /// Resolve the target against a source size.
    ///
    /// Fails with `InvalidDimension` when a factor overflows `usize`.
    pub fn resolve(self, rows: usize, cols: usize) -> Result<(usize, usize), TransformError> {
        match self {
            Target::Factor(k) => scaled_dimensions("interpolate", rows, cols, k),
            Target::Exact { rows, cols } => Ok((rows, cols)),
        }
    }
}

/// `rows * factor` by `cols * factor`, or `InvalidDimension` on overflow.
pub(crate) fn scaled_dimensions(
    op: &str,
    rows: usize,
    cols: usize,
    factor: usize,
) -> Result<(usize, usize), TransformError> {
    match (rows.checked_mul(factor), cols.checked_mul(factor)) {
        (Some(r), Some(c)) => Ok((r, c)),
        _ => Err(TransformError::InvalidDimension {
            op: op.to_string(),
            rows: rows.saturating_mul(factor),
            cols: cols.saturating_mul(factor),
        }),
    }
}

/// A single grid operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Quarter turn clockwise
    Rotate90,
    /// Block replication by an integer factor
    ScaleReplicate { factor: usize },
    /// Fixed-point nearest-neighbor resampling
    ScaleInterpolate { target: Target },
}

impl Transform {
    /// Short operation name, as accepted by the parser
    pub fn op_name(&self) -> &'static str {
        match self {
            Transform::Rotate90 => "rotate",
            Transform::ScaleReplicate { .. } => "replicate",
            Transform::ScaleInterpolate { .. } => "interpolate",
        }
    }

    /// Human-readable description used in output headings
    pub fn label(&self) -> String {
        match self {
            Transform::Rotate90 => "Rotated".to_string(),
            Transform::ScaleReplicate { factor } => format!("Scaled up {}x", factor),
            Transform::ScaleInterpolate { target: Target::Factor(k) } => {
                format!("Scaled up {}x (interpolated)", k)
            }
            Transform::ScaleInterpolate { target: Target::Exact { rows, cols } } => {
                format!("Resampled to {}x{} (interpolated)", rows, cols)
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Rotate90 => write!(f, "rotate"),
            Transform::ScaleReplicate { factor } => write!(f, "replicate:{}", factor),
            Transform::ScaleInterpolate { target: Target::Factor(k) } => {
                write!(f, "interpolate:{}", k)
            }
            Transform::ScaleInterpolate { target: Target::Exact { rows, cols } } => {
                write!(f, "interpolate:{}x{}", rows, cols)
            }
        }
    }
}

/// A pipeline step: transforms applied left to right to a record's source grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub transforms: Vec<Transform>,
}

impl Step {
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    pub fn label(&self) -> String {
        let parts: Vec<String> = self.transforms.iter().map(Transform::label).collect();
        format!("{} image", parts.join(", then "))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.transforms.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_resolve() {
        assert_eq!(Target::Factor(2).resolve(3, 4), Ok((6, 8)));
        assert_eq!(Target::Exact { rows: 5, cols: 7 }.resolve(3, 4), Ok((5, 7)));
    }

    #[test]
    fn test_target_resolve_overflow() {
        let err = Target::Factor(usize::MAX).resolve(2, 2).unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidDimension {
                op: "interpolate".to_string(),
                rows: usize::MAX,
                cols: usize::MAX
            }
        );
        assert!(Target::Factor(usize::MAX).resolve(1, 1).is_ok());
    }

    #[test]
    fn test_transform_display_roundtrip_names() {
        assert_eq!(Transform::Rotate90.to_string(), "rotate");
        assert_eq!(Transform::ScaleReplicate { factor: 2 }.to_string(), "replicate:2");
        assert_eq!(
            Transform::ScaleInterpolate { target: Target::Exact { rows: 4, cols: 6 } }.to_string(),
            "interpolate:4x6"
        );
    }

    #[test]
    fn test_step_label() {
        let step = Step::new(vec![Transform::Rotate90]);
        assert_eq!(step.label(), "Rotated image");

        let step = Step::new(vec![
            Transform::Rotate90,
            Transform::ScaleInterpolate { target: Target::Factor(2) },
        ]);
        assert_eq!(step.label(), "Rotated, then Scaled up 2x (interpolated) image");
        assert_eq!(step.to_string(), "rotate+interpolate:2");
    }

    #[test]
    fn test_is_invalid_dimension() {
        let zero = TransformError::InvalidDimension { op: "interpolate".into(), rows: 0, cols: 2 };
        assert!(zero.is_invalid_dimension());

        let capacity = TransformError::from(GridError::InvalidDimension {
            rows: 60,
            cols: 2,
            max_rows: 50,
            max_cols: 50,
        });
        assert!(capacity.is_invalid_dimension());

        assert!(!TransformError::UnknownOperation("spin".into()).is_invalid_dimension());
    }
}
