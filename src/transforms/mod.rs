//! Grid transforms
//!
//! Supports the rotation and upscaling operations applied to every record,
//! either through the default pipeline or through user-supplied step strings
//! (`"rotate"`, `"replicate:3"`, `"rotate+interpolate:4x6"`).
//!
//! # Module Structure
//!
//! - [`types`] - Core transform types and error definitions
//! - [`parsing`] - Transform and step parsing from strings
//! - [`rotate`] - Quarter-turn rotation
//! - [`replicate`] - Block replication upscaling
//! - [`interpolate`] - Fixed-point nearest-neighbor resampling
//! - [`apply`] - Transform application to grids

pub mod apply;
pub mod interpolate;
pub mod parsing;
pub mod replicate;
pub mod rotate;
pub mod types;

pub use apply::{apply_grid_transform, apply_grid_transforms, apply_step};
pub use interpolate::{interpolate, interpolate_to, scale_up2_interpolated};
pub use parsing::{parse_step, parse_steps, parse_transform_str};
pub use replicate::{replicate, scale_up2};
pub use rotate::rotate90;
pub use types::{Step, Target, Transform, TransformError};

/// Step strings used when no pipeline is configured
pub const DEFAULT_STEPS: [&str; 3] = ["rotate", "scale2x", "interpolate"];
