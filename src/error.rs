// src/error.rs

use thiserror::Error;

/// Everything the library can fail with.
///
/// Amplitude degeneracies (empty or silent buffers) are not errors; the
/// rasterizer handles them by drawing a flat line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveError {
    #[error("invalid canvas {width}x{height}: dimensions must be finite and positive")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("the path provided is invalid: {0}")]
    InvalidPath(String),

    #[error("failed to initialize audio file: {0}")]
    FileInitialization(String),

    #[error("invalid frame count or audio format")]
    InvalidFrameCountOrFormat,

    #[error("audio processing failed: {0}")]
    AudioProcessing(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WaveError>;
