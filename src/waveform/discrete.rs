// src/waveform/discrete.rs

use super::SampleRange;
use crate::error::{Result, WaveError};

/// Fixed `rows x columns` grid of filled cells. Row 0 is the bottom row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns, cells: vec![false; rows * columns] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.columns && self.cells[row * self.columns + column]
    }

    pub fn set(&mut self, row: usize, column: usize, filled: bool) {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column] = filled;
        }
    }

    /// Cells of one row, left to right; `None` past the top row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Filled rows of a column as a half-open `[lo, hi)` range, or `None`
    /// if the column is empty.
    pub fn column_span(&self, column: usize) -> Option<(usize, usize)> {
        let filled: Vec<usize> = (0..self.rows).filter(|&r| self.get(r, column)).collect();
        match (filled.first(), filled.last()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi + 1)),
            _ => None,
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Buckets `samples` into `columns` contiguous slices and fills, for each
/// column, the rows between the slice's minimum and maximum.
///
/// Bucket `c` covers `[c*N/columns, min((c+1)*N/columns, N))`, so every
/// sample lands in exactly one bucket and buckets may be empty when
/// `columns > N`. Empty buckets leave their column blank; a non-empty bucket
/// always fills at least one row.
pub fn rasterize_discrete(samples: &[f32], columns: usize, rows: usize) -> Result<Grid> {
    if columns == 0 || rows == 0 {
        return Err(WaveError::InvalidCanvas { width: columns as f64, height: rows as f64 });
    }

    let global = SampleRange::scan(samples);
    let n = samples.len();
    let mut grid = Grid::new(rows, columns);

    let to_row = |v: f32| -> usize {
        if global.is_flat() {
            return 0;
        }
        let normalized = (v as f64 - global.min as f64) / global.span();
        let row = (normalized * rows as f64).round();
        if row <= 0.0 { 0 } else { (row as usize).min(rows - 1) }
    };

    for c in 0..columns {
        let start = c * n / columns;
        let end = ((c + 1) * n / columns).min(n);
        let bucket = &samples[start..end];
        if bucket.is_empty() {
            continue;
        }

        let local = SampleRange::scan(bucket);
        let lo = to_row(local.min);
        let hi = to_row(local.max).max(lo + 1);
        for r in lo..hi {
            grid.set(r, c, true);
        }
    }

    log::debug!(
        "bucketed {} samples into {}x{} grid ({} cells filled)",
        n, rows, columns, grid.filled_count()
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_requested_shape_for_any_length() {
        for n in [0usize, 1, 5, 80, 1000] {
            let samples: Vec<f32> = (0..n).map(|i| (i as f32 * 0.1).sin()).collect();
            let grid = rasterize_discrete(&samples, 80, 20).unwrap();
            assert_eq!(grid.rows(), 20);
            assert_eq!(grid.columns(), 80);
        }
    }

    #[test]
    fn one_sample_per_column_fills_one_row_each() {
        let grid = rasterize_discrete(&[0.0, 1.0, -1.0, 0.0], 4, 10).unwrap();
        assert_eq!(grid.column_span(0), Some((5, 6)));
        assert_eq!(grid.column_span(1), Some((9, 10)));
        assert_eq!(grid.column_span(2), Some((0, 1)));
        assert_eq!(grid.column_span(3), Some((5, 6)));
    }

    #[test]
    fn span_runs_from_bucket_min_to_max() {
        let grid = rasterize_discrete(&[0.0, 1.0, -1.0, 0.0], 2, 10).unwrap();
        assert_eq!(grid.column_span(0), Some((5, 9)));
        assert_eq!(grid.column_span(1), Some((0, 5)));
        assert_eq!(grid.filled_count(), 9);
    }

    #[test]
    fn more_columns_than_samples_leaves_empty_columns() {
        let grid = rasterize_discrete(&[0.2, -0.4, 0.9], 8, 6).unwrap();
        let drawn = (0..8).filter(|&c| grid.column_span(c).is_some()).count();
        assert_eq!(drawn, 3);
    }

    #[test]
    fn degenerate_buffer_is_flat_row_zero() {
        let grid = rasterize_discrete(&[0.3; 50], 5, 4).unwrap();
        for c in 0..5 {
            assert_eq!(grid.column_span(c), Some((0, 1)));
        }

        let empty = rasterize_discrete(&[], 5, 4).unwrap();
        assert_eq!(empty.filled_count(), 0);
    }

    #[test]
    fn uniform_bucket_spans_exactly_one_row() {
        let mut samples = vec![0.5f32; 10];
        samples.extend_from_slice(&[-1.0, 1.0]);
        let grid = rasterize_discrete(&samples, 6, 8).unwrap();
        // first bucket is [0, 2), all 0.5
        let (lo, hi) = grid.column_span(0).unwrap();
        assert_eq!(hi - lo, 1);
    }

    #[test]
    fn row_out_of_range_is_none() {
        let grid = rasterize_discrete(&[0.0, 1.0], 2, 3).unwrap();
        assert_eq!(grid.row(2).map(<[bool]>::len), Some(2));
        assert_eq!(grid.row(3), None);
        assert!(!grid.get(3, 0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(rasterize_discrete(&[0.1], 0, 4), Err(WaveError::InvalidCanvas { .. })));
        assert!(matches!(rasterize_discrete(&[0.1], 4, 0), Err(WaveError::InvalidCanvas { .. })));
    }
}
