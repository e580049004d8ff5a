// src/decoder/mod.rs

use crate::error::{Result, WaveError};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecParameters, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Track};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::default::{get_codecs, get_probe};

/// Anything that can produce a fully materialized mono sample buffer.
///
/// Sources are shared with worker threads, so they must be `Send + Sync`.
pub trait SampleSource: Send + Sync + 'static {
    fn read_samples(&self) -> Result<Vec<f32>>;
}

impl<F> SampleSource for F
where
    F: Fn() -> Result<Vec<f32>> + Send + Sync + 'static,
{
    fn read_samples(&self) -> Result<Vec<f32>> {
        self()
    }
}

/// What the container told us about the default track when the file was opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub frames: Option<u64>,
}

/// Decodes the first channel of a file's default track through symphonia.
#[derive(Clone, Debug)]
pub struct SymphoniaSource {
    path: PathBuf,
    info: TrackInfo,
}

impl SymphoniaSource {
    /// Validates the path and probes the container once.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(WaveError::InvalidPath("empty path".into()));
        }
        if !path.is_file() {
            return Err(WaveError::InvalidPath(format!("{} is not a file", path.display())));
        }

        let (format, track_id) = open_and_probe(path)?;
        let info = format
            .tracks()
            .iter()
            .find(|t| t.id == track_id)
            .map(|t| track_info(&t.codec_params))
            .unwrap_or_default();

        log::debug!(
            "opened {}: {:?} Hz / {:?} ch / {:?} frames",
            path.display(), info.sample_rate, info.channels, info.frames
        );

        Ok(Self { path: path.to_path_buf(), info })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self) -> TrackInfo {
        self.info
    }
}

impl SampleSource for SymphoniaSource {
    fn read_samples(&self) -> Result<Vec<f32>> {
        if self.info.frames == Some(0) {
            return Err(WaveError::InvalidFrameCountOrFormat);
        }
        let samples = decode_first_channel(&self.path)?;
        log::info!("decoded {} samples from {}", samples.len(), self.path.display());
        Ok(samples)
    }
}

fn track_info(params: &CodecParameters) -> TrackInfo {
    TrackInfo {
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count()),
        frames: params.n_frames,
    }
}

fn open_and_probe(path: &Path) -> Result<(Box<dyn FormatReader>, u32)> {
    let file = File::open(path).map_err(|e| WaveError::FileInitialization(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let probed = get_probe()
        .format(&Default::default(), mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| WaveError::FileInitialization(e.to_string()))?;
    let format = probed.format;
    let track_id = default_track_id(format.default_track())?;
    Ok((format, track_id))
}

/// A container without a default track has nothing we can decode.
fn default_track_id(track: Option<&Track>) -> Result<u32> {
    track.map(|t| t.id).ok_or(WaveError::InvalidFrameCountOrFormat)
}

/// Decodes the whole default track and keeps channel 0 of every frame.
pub fn decode_first_channel(path: &Path) -> Result<Vec<f32>> {
    let (mut format, track_id) = open_and_probe(path)?;
    let codec_params = format
        .tracks()
        .iter()
        .find(|t| t.id == track_id)
        .map(|t| t.codec_params.clone())
        .ok_or(WaveError::InvalidFrameCountOrFormat)?;

    let mut decoder = get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| WaveError::FileInitialization(e.to_string()))?;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut out = Vec::<f32>::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(WaveError::AudioProcessing(e.to_string())),
        };
        if packet.track_id() != track_id { continue; }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(e)) => {
                log::debug!("skipping undecodable packet: {e}");
                continue;
            }
            Err(SymphoniaError::IoError(_)) => continue,
            Err(e) => return Err(WaveError::AudioProcessing(e.to_string())),
        };

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        if channels == 0 {
            return Err(WaveError::InvalidFrameCountOrFormat);
        }
        if decoded.frames() == 0 { continue; }

        if sample_buf.as_ref().is_none_or(|b| b.capacity() < decoded.capacity()) {
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }
        let Some(buf) = sample_buf.as_mut() else { continue };
        buf.copy_interleaved_ref(decoded);

        out.extend(buf.samples().chunks(channels).map(|frame| frame[0]));
    }

    if out.is_empty() {
        return Err(WaveError::InvalidFrameCountOrFormat);
    }
    Ok(out)
}
