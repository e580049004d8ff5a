// src/waveform/mod.rs
pub mod discrete;
pub mod terminal;

use crate::error::{Result, WaveError};
use serde::{Deserialize, Serialize};

pub use discrete::{rasterize_discrete, Grid};

/// Target drawing surface, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 300.0, height: 100.0 }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Both dimensions must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(WaveError::InvalidCanvas { width: self.width, height: self.height })
        }
    }

    pub fn midline(&self) -> f64 {
        self.height / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Min/max of a sample buffer from a single scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    /// Empty buffers (and buffers holding only NaN) report `0.0 / 0.0`.
    pub fn scan(samples: &[f32]) -> Self {
        let mut cur_min = f32::INFINITY;
        let mut cur_max = f32::NEG_INFINITY;
        for &s in samples {
            if s < cur_min { cur_min = s; }
            if s > cur_max { cur_max = s; }
        }
        if cur_min > cur_max {
            return Self { min: 0.0, max: 0.0 };
        }
        Self { min: cur_min, max: cur_max }
    }

    pub fn span(&self) -> f64 {
        self.max as f64 - self.min as f64
    }

    pub fn is_flat(&self) -> bool {
        self.span() == 0.0
    }
}

/// Closed polyline ready for a fill-and-stroke renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WaveformPath {
    pub points: Vec<Point>,
}

impl WaveformPath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

/// Maps every sample to one point of a polyline spanning the canvas.
///
/// The path starts at `(0, H/2)`, visits one point per sample at
/// `x = i / N * W`, and ends at `(W, H/2)`, so it always holds `N + 2`
/// points. Amplitudes map to `(v - min) * H / (max - min) + H/2`, which puts
/// the waveform in `[H/2, 1.5 H]`. A zero range maps everything to `H/2`.
pub fn rasterize(samples: &[f32], canvas: Canvas) -> Result<WaveformPath> {
    canvas.validate()?;

    let range = SampleRange::scan(samples);
    let mid = canvas.midline();
    let scale = if range.is_flat() { 0.0 } else { canvas.height / range.span() };
    let n = samples.len() as f64;

    let mut points = Vec::with_capacity(samples.len() + 2);
    points.push(Point::new(0.0, mid));
    for (i, &v) in samples.iter().enumerate() {
        let x = i as f64 / n * canvas.width;
        let y = if scale == 0.0 {
            mid
        } else {
            (v as f64 - range.min as f64) * scale + mid
        };
        points.push(Point::new(x, y));
    }
    points.push(Point::new(canvas.width, mid));

    log::debug!(
        "rasterized {} samples onto {}x{} (min {}, max {})",
        samples.len(), canvas.width, canvas.height, range.min, range.max
    );

    Ok(WaveformPath { points })
}
