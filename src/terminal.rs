//! Terminal rendering utilities for colored grid display
//!
//! Provides ANSI escape sequence generation for displaying grids with
//! true-color backgrounds in terminal emulators that support 24-bit color,
//! plus a coordinate view with row and column headers.

use image::Rgba;

use crate::grid::Grid;
use crate::output::symbol_color;
use crate::render::SymbolSet;

/// Ends a colored cell
pub const ANSI_RESET: &str = "\x1b[0m";

/// Background used for cells whose color is fully transparent
pub const TRANSPARENT_BG: &str = "\x1b[48;5;236m";

/// 24-bit ANSI background sequence for a cell color.
///
/// A fully transparent color has nothing to show, so it gets the 256-color
/// dark gray [`TRANSPARENT_BG`] instead.
///
/// ```
/// use glyphgrid::output::{BLANK_COLOR, MARKED_COLOR};
/// use glyphgrid::terminal::{color_to_ansi_bg, TRANSPARENT_BG};
///
/// assert_eq!(color_to_ansi_bg(MARKED_COLOR), "\x1b[48;2;255;176;0m");
/// assert_eq!(color_to_ansi_bg(BLANK_COLOR), TRANSPARENT_BG);
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    let [r, g, b, a] = rgba.0;
    if a == 0 {
        return TRANSPARENT_BG.to_string();
    }
    format!("\x1b[48;2;{r};{g};{b}m")
}

/// Render a grid with ANSI color backgrounds.
///
/// Keeps the plain-text cell layout (a space, then the symbol right-aligned in
/// two columns) so colored and plain output line up.
pub fn render_ansi_grid(grid: &Grid, symbols: &SymbolSet) -> String {
    let mut output = String::new();
    for row in grid.rows_iter() {
        for &symbol in row {
            output.push(' ');
            output.push_str(&color_to_ansi_bg(symbol_color(symbol)));
            output.push_str(&format!("{:>2}", symbols.char_for(symbol)));
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }
    output
}

/// Render grid with row/column coordinate headers.
///
/// Displays the grid with column numbers across the top and row numbers
/// down the left side, making it easy to reference specific cells.
///
/// ```text
///      0  1  2
///    ┌─────────
///  0 │  &  +  +
///  1 │  +  &  +
/// ```
pub fn render_coordinate_grid(grid: &Grid, symbols: &SymbolSet) -> String {
    let mut output = String::new();

    // Row number width (how many digits in max row number)
    let row_num_width = (grid.rows().saturating_sub(1)).to_string().len().max(2);

    // Column header line
    output.push_str(&" ".repeat(row_num_width + 1));
    for col in 0..grid.cols() {
        output.push_str(&format!("{:>2} ", col));
    }
    output.push('\n');

    // Border line
    output.push_str(&" ".repeat(row_num_width));
    output.push_str(" \u{250C}"); // ┌
    output.push_str(&"\u{2500}".repeat(grid.cols() * 3)); // ─
    output.push('\n');

    for (row_idx, row) in grid.rows_iter().enumerate() {
        output.push_str(&format!("{:>width$} \u{2502}", row_idx, width = row_num_width)); // │
        for &symbol in row {
            output.push_str(&format!(" {:>2}", symbols.char_for(symbol)));
        }
        output.push('\n');
    }

    output
}
