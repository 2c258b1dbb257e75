//! Lagometer demo runtime
//!
//! Drives a simulated render loop with a lagometer attached, logs the
//! readouts on every repaint and can export the final chart as PNG.

mod render_loop;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use lag_metrics::{MonotonicClock, TARGET_FRAME_INTERVAL_MS};
use lag_render::{Canvas, Lagometer, LagometerConfig, PixelCanvas};
use tracing_subscriber::EnvFilter;

use crate::render_loop::{RenderLoop, Workload};

fn command() -> Command {
    Command::new("lagometer")
        .about("Runs a simulated render loop with a frame-time lagometer attached")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON widget configuration; defaults are used when omitted")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("COUNT")
                .help("Number of frame cycles to run")
                .default_value("300")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PNG")
                .help("Write the last painted chart to this file")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn load_config(matches: &ArgMatches) -> Result<LagometerConfig> {
    let Some(path) = matches.get_one::<PathBuf>("config") else {
        return Ok(LagometerConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    LagometerConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    let config = load_config(&matches)?;
    let frames = matches.get_one::<u64>("frames").copied().unwrap_or(300);

    tracing::info!("Lagometer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        capacity = config.capacity(),
        draw_frequency = config.draw_frequency,
        "Attaching lagometer"
    );

    let canvas = PixelCanvas::new(config.backing_size());
    let mut widget = Lagometer::new(config, MonotonicClock::new(), canvas)?;
    let frame_interval = Duration::from_secs_f64(TARGET_FRAME_INTERVAL_MS / 1000.0);
    let mut render_loop = RenderLoop::new(frame_interval, Workload::default());

    let mut last_redraws = 0;
    for _ in 0..frames {
        render_loop.step(&mut widget, |widget, ack| widget.render(|| ack));

        if widget.redraws() != last_redraws {
            last_redraws = widget.redraws();
            let labels: Vec<&str> = widget
                .canvas()
                .labels()
                .iter()
                .map(|label| label.text.as_str())
                .collect();
            tracing::info!(frame = render_loop.frames(), "{}", labels.join(" | "));
        }
    }

    let snapshot = widget.snapshot();
    tracing::info!(
        "Final metrics: {}",
        serde_json::to_string(&snapshot).context("failed to serialize metrics")?
    );

    if let Some(path) = matches.get_one::<PathBuf>("output") {
        let size = widget.canvas().backing_size();
        let image = image::RgbaImage::from_raw(size.x, size.y, widget.canvas().to_rgba8())
            .context("canvas buffer does not match its size")?;
        image
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Chart written to {}", path.display());
    }

    Ok(())
}
