// src/render/bitmap.rs

use super::{Renderer, Rgba};
use crate::error::{Result, WaveError};
use crate::waveform::Point;
use plotters::prelude::*;

/// In-memory RGB raster drawn through plotters' `BitMapBackend`.
///
/// Pixel `(0, 0)` is the bottom-left corner, matching the y-up canvas the
/// rasterizer produces; the backing buffer itself is stored top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    scale: f64,
    buffer: Vec<u8>,
}

impl Bitmap {
    /// `scale` converts canvas units into pixels.
    pub fn new(width: usize, height: usize, scale: f64) -> Self {
        Self {
            width,
            height,
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
            buffer: vec![0u8; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((self.height - 1 - y) * self.width + x) * 3;
        Some(Rgba::new(self.buffer[i], self.buffer[i + 1], self.buffer[i + 2], 255))
    }

    /// Raw RGB bytes, rows top to bottom.
    pub fn as_rgb(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of pixels whose RGB matches `color`.
    pub fn count(&self, color: Rgba) -> usize {
        self.buffer
            .chunks_exact(3)
            .filter(|px| px[0] == color.r && px[1] == color.g && px[2] == color.b)
            .count()
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Canvas point to backend coordinates (origin top-left).
    fn to_backend(&self, p: &Point) -> (i32, i32) {
        let x = (p.x * self.scale).floor();
        let y = self.height as f64 - 1.0 - (p.y * self.scale).floor();
        (x as i32, y as i32)
    }
}

fn to_rgba_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
}

fn render_err<E: std::fmt::Display>(e: E) -> WaveError {
    WaveError::Render(e.to_string())
}

impl Renderer for Bitmap {
    fn fill_background(&mut self, fill: Rgba) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        let size = (self.width as u32, self.height as u32);
        let root = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
        root.fill(&to_rgba_color(fill)).map_err(render_err)?;
        root.present().map_err(render_err)
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: Rgba, line_width: f64) -> Result<()> {
        if self.is_empty() || points.is_empty() {
            return Ok(());
        }
        let coords: Vec<(i32, i32)> = points
            .iter()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .map(|p| self.to_backend(p))
            .collect();
        let width = (line_width * self.scale).round().max(1.0) as u32;

        let size = (self.width as u32, self.height as u32);
        let root = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
        root.draw(&PathElement::new(coords, to_rgba_color(stroke).stroke_width(width)))
            .map_err(render_err)?;
        root.present().map_err(render_err)
    }
}
