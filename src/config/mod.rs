//! Configuration for glyphgrid
//!
//! Provides types, discovery and loading for `glyph.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
