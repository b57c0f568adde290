//! `centroid-track` CLI: track JSON-lines detection frames from a file or stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use centroid_track::{JsonLinesSink, JsonLinesSource, TrackerConfig, TrackerPipeline};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "centroid-track", about = "Centroid tracker for per-frame detections")]
struct Cli {
    /// Detection frames, one JSON array per line (defaults to stdin)
    input: Option<PathBuf>,
    /// TOML file with `max_disappeared` and `dist_thresh`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Consecutive missed frames before an object is dropped
    #[arg(long)]
    max_disappeared: Option<u32>,
    /// Largest centroid distance still matched to an existing object
    #[arg(long)]
    dist_thresh: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    info!(
        max_disappeared = config.max_disappeared,
        dist_thresh = config.dist_thresh,
        "starting tracker"
    );

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let source = JsonLinesSource::new(reader);
    let sink = JsonLinesSink::new(io::stdout().lock());
    let mut pipeline = TrackerPipeline::new(source, sink, config);
    let frames = pipeline.run().context("tracking stream failed")?;

    info!(
        frames,
        live_objects = pipeline.tracker().len(),
        "input exhausted"
    );
    Ok(())
}

/// Defaults, then the optional TOML file, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<TrackerConfig> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    if let Some(max_disappeared) = cli.max_disappeared {
        config.max_disappeared = max_disappeared;
    }
    if let Some(dist_thresh) = cli.dist_thresh {
        config.dist_thresh = dist_thresh;
    }
    config.validate()?;
    Ok(config)
}
