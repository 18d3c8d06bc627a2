//! Transform parsing from strings
//!
//! Provides functions to parse transform specifications from string syntax:
//! `"rotate"`, `"scale2x"`, `"replicate:3"`, `"interpolate:4x6"`, and pipeline
//! steps that chain several of them with `+` (`"rotate+scale2x"`).

use super::types::{Step, Target, Transform, TransformError};

/// Parse transform from string syntax: "rotate", "replicate:3", "interpolate:4x6"
///
/// # Alias Resolution
/// - `rot`, `rotate90`, `rotr` → `Rotate90`
/// - `scale2x`, `scaleup2` → `ScaleReplicate { factor: 2 }`
/// - `scale2x-interp`, `scaleup2a` → `ScaleInterpolate` doubling
pub fn parse_transform_str(s: &str) -> Result<Transform, TransformError> {
    let s = s.trim();

    // Split on colon to get operation and params
    let (op, params) =
        if let Some(idx) = s.find(':') { (&s[..idx], Some(&s[idx + 1..])) } else { (s, None) };

    let op_lower = op.to_lowercase();

    match op_lower.as_str() {
        "rotate" | "rot" | "rotate90" | "rotr" => {
            // Only quarter turns clockwise are supported; allow an explicit ":90"
            match params.map(str::trim) {
                None | Some("90") => Ok(Transform::Rotate90),
                Some(other) => Err(TransformError::InvalidParameter {
                    op: "rotate".to_string(),
                    message: format!("only 90 degree clockwise rotation is supported, got '{}'", other),
                }),
            }
        }
        "scale2x" | "scaleup2" => {
            reject_params("scale2x", params)?;
            Ok(Transform::ScaleReplicate { factor: 2 })
        }
        "replicate" => {
            let factor = match params {
                Some(p) => parse_factor("replicate", p)?,
                None => 2,
            };
            Ok(Transform::ScaleReplicate { factor })
        }
        "scale2x-interp" | "scaleup2a" => {
            reject_params("scale2x-interp", params)?;
            Ok(Transform::ScaleInterpolate { target: Target::Factor(2) })
        }
        "interpolate" | "interp" | "resample" => {
            let target = match params {
                Some(p) if p.contains('x') => {
                    let (rows, cols) = parse_dimensions("interpolate", p)?;
                    Target::Exact { rows, cols }
                }
                Some(p) => Target::Factor(parse_factor("interpolate", p)?),
                None => Target::Factor(2),
            };
            Ok(Transform::ScaleInterpolate { target })
        }
        _ => Err(TransformError::UnknownOperation(op.to_string())),
    }
}

/// Parse a pipeline step: one or more transforms joined with `+`.
pub fn parse_step(s: &str) -> Result<Step, TransformError> {
    let transforms = s
        .split('+')
        .map(parse_transform_str)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Step::new(transforms))
}

/// Parse a list of pipeline steps, stopping at the first bad one.
pub fn parse_steps<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Step>, TransformError> {
    specs.iter().map(|s| parse_step(s.as_ref())).collect()
}

fn reject_params(op: &str, params: Option<&str>) -> Result<(), TransformError> {
    match params {
        Some(p) => Err(TransformError::InvalidParameter {
            op: op.to_string(),
            message: format!("takes no parameters, got '{}'", p),
        }),
        None => Ok(()),
    }
}

fn parse_factor(op: &str, s: &str) -> Result<usize, TransformError> {
    let factor = s.trim().parse::<usize>().map_err(|_| TransformError::InvalidParameter {
        op: op.to_string(),
        message: format!("cannot parse '{}' as scale factor", s),
    })?;
    if factor == 0 {
        return Err(TransformError::InvalidParameter {
            op: op.to_string(),
            message: "scale factor must be at least 1".to_string(),
        });
    }
    Ok(factor)
}

/// Parse `ROWSxCOLS`.
fn parse_dimensions(op: &str, s: &str) -> Result<(usize, usize), TransformError> {
    let invalid = || TransformError::InvalidParameter {
        op: op.to_string(),
        message: format!("cannot parse '{}' as ROWSxCOLS", s),
    };
    let (rows, cols) = s.trim().split_once('x').ok_or_else(invalid)?;
    let rows = rows.trim().parse::<usize>().map_err(|_| invalid())?;
    let cols = cols.trim().parse::<usize>().map_err(|_| invalid())?;
    Ok((rows, cols))
}
