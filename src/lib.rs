// src/lib.rs

pub mod config;
pub mod decoder;
pub mod error;
pub mod provider;
pub mod render;
pub mod waveform;

pub use config::WaveConfig;
pub use decoder::{SampleSource, SymphoniaSource};
pub use error::WaveError;
pub use provider::{ProviderState, SampleEvent, SampleListener, SampleProvider};
pub use render::{render_bitmap, render_waveform, Bitmap, RenderStyle, Renderer, Rgba};
pub use waveform::{rasterize, rasterize_discrete, Canvas, Grid, Point, WaveformPath};
