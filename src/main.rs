// src/main.rs

use anyhow::{bail, Context};
use audiowave::waveform::terminal::render_ascii;
use audiowave::{render_bitmap, rasterize_discrete, SampleEvent, SampleProvider, WaveConfig};

const USAGE: &str = "<audio file> [columns] [rows]\n       --bitmap <audio file> [raw rgb output]";

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().collect();
    let bin = args.first().cloned().unwrap_or_else(|| "audiowave".into());
    let bitmap_mode = args.get(1).is_some_and(|a| a == "--bitmap");
    if bitmap_mode {
        args.remove(1);
    }
    let Some(path) = args.get(1) else {
        bail!("usage: {bin} {USAGE}");
    };

    let mut config = match std::env::var("AUDIOWAVE_CONFIG") {
        Ok(cfg_path) => WaveConfig::load(&cfg_path)?,
        Err(_) => WaveConfig::default(),
    };
    if !bitmap_mode {
        if let Some(columns) = args.get(2) {
            config.columns = columns.parse().context("columns must be a positive integer")?;
        }
        if let Some(rows) = args.get(3) {
            config.rows = rows.parse().context("rows must be a positive integer")?;
        }
    }
    config.validate()?;

    let mut provider = SampleProvider::open(path).with_context(|| format!("opening {path}"))?;
    provider.request_samples();

    let samples = match provider.wait() {
        Some(SampleEvent::Ready(samples)) => samples,
        Some(SampleEvent::Failed(err)) => bail!("an error occurred: {err}"),
        None => {
            println!("No sample data available.");
            return Ok(());
        }
    };

    if bitmap_mode {
        let bitmap = render_bitmap(samples, &config)?;
        println!(
            "{}x{} bitmap, {} stroke pixels",
            bitmap.width(),
            bitmap.height(),
            bitmap.count(config.style.stroke)
        );
        if let Some(out) = args.get(2) {
            std::fs::write(out, bitmap.as_rgb()).with_context(|| format!("writing {out}"))?;
            println!("Raw RGB written to {out}");
        }
    } else {
        let grid = rasterize_discrete(samples, config.columns, config.rows)?;
        for line in render_ascii(&grid) {
            println!("{line}");
        }
    }

    Ok(())
}
