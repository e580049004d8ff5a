// src/config.rs

use crate::error::{Result, WaveError};
use crate::render::RenderStyle;
use crate::waveform::Canvas;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output settings shared by the bitmap and console renderings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub canvas: Canvas,
    /// Console grid width in characters.
    pub columns: usize,
    /// Console grid height in lines.
    pub rows: usize,
    /// Display backing scale factor for the bitmap.
    pub scale: f64,
    pub style: RenderStyle,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            columns: 80,
            rows: 20,
            scale: 1.0,
            style: RenderStyle::default(),
        }
    }
}

impl WaveConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| WaveError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| WaveError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        if self.columns == 0 || self.rows == 0 {
            return Err(WaveError::InvalidCanvas {
                width: self.columns as f64,
                height: self.rows as f64,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(WaveError::Config(format!("scale must be positive, got {}", self.scale)));
        }
        Ok(())
    }
}
