//! glyphgrid - Library for reading and transforming two-symbol grid images
//!
//! This library provides functionality to:
//! - Read records of `rows cols` followed by 0/1 cell values from a text stream
//! - Rotate grids 90 degrees clockwise
//! - Scale grids up by block replication or fixed-point nearest-neighbor resampling
//! - Write grids as padded text, ANSI-colored text, JSON lines or PNG images

pub mod cli;
pub mod config;
pub mod grid;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod sink;
pub mod terminal;
pub mod transforms;
