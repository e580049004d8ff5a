// src/render/mod.rs
pub mod bitmap;

use crate::config::WaveConfig;
use crate::error::Result;
use crate::waveform::{rasterize, Canvas, Point, WaveformPath};
use serde::{Deserialize, Serialize};

pub use bitmap::Bitmap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Colours and stroke width handed to a renderer along with the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { fill: Rgba::WHITE, stroke: Rgba::BLACK, line_width: 1.0 }
    }
}

/// Minimal drawing surface a waveform can be rendered onto.
pub trait Renderer {
    fn fill_background(&mut self, color: Rgba) -> Result<()>;
    fn draw_polyline(&mut self, points: &[Point], stroke: Rgba, line_width: f64) -> Result<()>;
}

/// Clears to the fill colour, then strokes the path.
pub fn render_waveform<R: Renderer + ?Sized>(
    renderer: &mut R,
    path: &WaveformPath,
    style: &RenderStyle,
) -> Result<()> {
    renderer.fill_background(style.fill)?;
    renderer.draw_polyline(&path.points, style.stroke, style.line_width)
}

/// Rasterizes `samples` onto the configured canvas and strokes the path
/// into a bitmap sized by [`bitmap_size`].
pub fn render_bitmap(samples: &[f32], config: &WaveConfig) -> Result<Bitmap> {
    config.validate()?;
    let path = rasterize(samples, config.canvas)?;
    let (width, height) = bitmap_size(config.canvas, config.scale);
    let mut bitmap = Bitmap::new(width, height, config.scale);
    render_waveform(&mut bitmap, &path, &config.style)?;
    log::debug!("rendered {} points into a {width}x{height} bitmap", path.len());
    Ok(bitmap)
}

/// Backing bitmap size in pixels for a canvas, as the sample app sized it:
/// half the canvas width and the full height, times the display scale.
pub fn bitmap_size(canvas: Canvas, scale: f64) -> (usize, usize) {
    let w = (canvas.width / 2.0 * scale).max(0.0) as usize;
    let h = (canvas.height * scale).max(0.0) as usize;
    (w, h)
}
