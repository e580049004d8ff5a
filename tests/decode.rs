//! End-to-end: WAV on disk -> symphonia -> provider -> rasterizer / bitmap.

use audiowave::decoder::SampleSource;
use audiowave::waveform::terminal::render_ascii;
use audiowave::{
    rasterize, rasterize_discrete, render_bitmap, Canvas, ProviderState, Rgba, SampleEvent,
    SampleProvider, SymphoniaSource, WaveConfig, WaveError,
};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("audiowave-{}-{name}", std::process::id()))
}

/// Writes a 16-bit stereo WAV whose left channel is a ramp and right channel
/// is its negation.
fn write_stereo_ramp(name: &str, frames: usize) -> PathBuf {
    let path = temp_path(name);
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
    for i in 0..frames {
        let left = ((i % 64) as i16 - 32) * 512;
        writer.write_sample(left).unwrap();
        writer.write_sample(-left).unwrap();
    }
    writer.finalize().unwrap();
    path
}

#[test]
fn decodes_first_channel_only() {
    let path = write_stereo_ramp("ramp.wav", 1000);
    let source = SymphoniaSource::open(&path).expect("open");
    assert_eq!(source.info().channels, Some(2));
    assert_eq!(source.info().sample_rate, Some(8000));

    let samples = source.read_samples().expect("decode");
    assert_eq!(samples.len(), 1000);
    for (i, &s) in samples.iter().enumerate() {
        let expected = (((i % 64) as i16 - 32) * 512) as f32 / 32768.0;
        assert!((s - expected).abs() < 1e-4, "sample {i}: {s} != {expected}");
    }

    let _ = std::fs::remove_file(path);
}

#[test]
fn provider_feeds_rasterizer() {
    let path = write_stereo_ramp("provider.wav", 640);
    let mut provider = SampleProvider::open(&path).expect("open");
    provider.request_samples();

    let samples = match provider.wait() {
        Some(SampleEvent::Ready(samples)) => samples.to_vec(),
        other => panic!("unexpected event: {other:?}"),
    };
    assert_eq!(provider.state(), ProviderState::Completed);

    let canvas = Canvas::new(300.0, 100.0).unwrap();
    let path_pts = rasterize(&samples, canvas).unwrap();
    assert_eq!(path_pts.len(), samples.len() + 2);
    assert!(path_pts.iter().all(|p| (49.999..=150.001).contains(&p.y)));

    let grid = rasterize_discrete(&samples, 80, 20).unwrap();
    let lines = render_ascii(&grid);
    assert_eq!(lines.len(), 20);
    assert!(lines.iter().any(|l| l.contains('|')));

    let _ = std::fs::remove_file(path);
}

#[test]
fn decoded_audio_renders_to_bitmap() {
    let path = write_stereo_ramp("bitmap.wav", 640);
    let mut provider = SampleProvider::open(&path).expect("open");
    provider.request_samples();

    let config = WaveConfig::default();
    let bitmap = match provider.wait() {
        Some(SampleEvent::Ready(samples)) => render_bitmap(samples, &config).expect("render"),
        other => panic!("unexpected event: {other:?}"),
    };

    assert_eq!((bitmap.width(), bitmap.height()), (150, 100));
    assert_eq!(bitmap.as_rgb().len(), 150 * 100 * 3);
    assert!(bitmap.count(Rgba::BLACK) > 0);
    // every point sits at or above the midline, so the bottom rows stay clear
    for x in 0..bitmap.width() {
        assert_eq!(bitmap.pixel(x, 10), Some(Rgba::WHITE), "x = {x}");
    }

    let _ = std::fs::remove_file(path);
}

#[test]
fn rejects_paths_that_are_not_files() {
    assert!(matches!(SymphoniaSource::open(""), Err(WaveError::InvalidPath(_))));
    assert!(matches!(
        SymphoniaSource::open(temp_path("does-not-exist.mp3")),
        Err(WaveError::InvalidPath(_))
    ));
    assert!(matches!(
        SymphoniaSource::open(std::env::temp_dir()),
        Err(WaveError::InvalidPath(_))
    ));
    assert!(matches!(SampleProvider::open(""), Err(WaveError::InvalidPath(_))));
}

#[test]
fn garbage_file_fails_to_initialize() {
    let path = temp_path("garbage.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();
    assert!(matches!(SymphoniaSource::open(&path), Err(WaveError::FileInitialization(_))));
    let _ = std::fs::remove_file(path);
}

#[test]
fn zero_length_audio_is_a_typed_failure() {
    let path = write_stereo_ramp("empty.wav", 0);
    match SymphoniaSource::open(&path) {
        Ok(source) => {
            assert_eq!(source.read_samples(), Err(WaveError::InvalidFrameCountOrFormat));
        }
        Err(err) => assert!(matches!(err, WaveError::FileInitialization(_)), "{err}"),
    }
    let _ = std::fs::remove_file(path);
}
