// src/waveform/terminal.rs

use super::Grid;

pub const FILLED: char = '|';
pub const EMPTY: char = ' ';

/// Text lines for a grid, top row first.
pub fn render_ascii(grid: &Grid) -> Vec<String> {
    (0..grid.rows())
        .rev()
        .map(|r| {
            grid.row(r)
                .unwrap_or_default()
                .iter()
                .map(|&filled| if filled { FILLED } else { EMPTY })
                .collect()
        })
        .collect()
}
