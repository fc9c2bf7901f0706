//! Command-line track generator.
//!
//! Run with:
//! ```
//! cargo run -p trackgen --bin trackgen -- --seed 42 --difficulty 0.8 --stats
//! ```

use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use trackgen::builders::generate;
use trackgen::config::{
    DEFAULT_DIFFICULTY, DEFAULT_LENGTH, DEFAULT_SEGMENT_COUNT, GeneratorConfig, SplitBranch,
};
use trackgen::export::{self, GeoAnchor};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "trackgen", about = "Generate a procedural race track")]
struct Args {
    /// Seed for the track; random when omitted and no config is given
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty in [0, 1]; values outside are clamped
    #[arg(long)]
    difficulty: Option<f64>,

    /// Requested total length in metres
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    length: f64,

    /// Number of segments
    #[arg(long, default_value_t = DEFAULT_SEGMENT_COUNT)]
    segments: usize,

    /// JSON generator config; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arm a split segment continues along
    #[arg(long, value_enum)]
    split_branch: Option<SplitBranch>,

    /// Write the full track as JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the editor's reduced format here
    #[arg(long)]
    editor: Option<PathBuf>,

    /// Also write the centre line as GPX here
    #[arg(long)]
    gpx: Option<PathBuf>,

    /// Log the track statistics
    #[arg(long)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::new(rand::thread_rng().r#gen(), DEFAULT_DIFFICULTY),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(difficulty) = args.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(branch) = args.split_branch {
        config = config.with_split_branch(branch);
    }

    let track = generate(&config, args.length, args.segments);
    let name = format!("Track {}", config.seed);

    match &args.output {
        Some(path) => {
            export::save_track(path, &track)?;
            tracing::info!("Wrote track to {}", path.display());
        }
        None => println!("{}", export::to_json_string(&track)?),
    }

    if let Some(path) = &args.editor {
        let editor = export::to_editor_track(&track, &name);
        std::fs::write(path, serde_json::to_string_pretty(&editor)?)?;
        tracing::info!("Wrote editor track to {}", path.display());
    }

    if let Some(path) = &args.gpx {
        export::save_gpx(path, &track, &name, &GeoAnchor::default())?;
        tracing::info!("Wrote GPX to {}", path.display());
    }

    if args.stats {
        let stats = &track.stats;
        tracing::info!("Seed: {}", config.seed);
        tracing::info!("  Segments: {}", track.segments.len());
        tracing::info!("  Checkpoints: {}", track.checkpoints.len());
        tracing::info!("  Features: {}", track.features.len());
        tracing::info!("  Straights: {}", stats.straight_segments);
        tracing::info!("  Corners: {}", stats.corner_segments);
        tracing::info!("  Hills: {}", stats.hill_segments);
        tracing::info!("  Chicanes: {}", stats.chicane_segments);
        tracing::info!("  Average corner radius: {:.1}", stats.average_corner_radius);
        tracing::info!(
            "  Elevation: {:.1} to {:.1}",
            stats.lowest_point,
            stats.highest_point
        );
        for (kind, count) in &stats.segment_counts {
            tracing::debug!("  {}: {}", kind, count);
        }
    }

    Ok(())
}
