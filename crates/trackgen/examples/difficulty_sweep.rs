//! Example: Compare segment mixes across difficulties.
//!
//! Generates tracks for the same seeds at five difficulty levels and logs how
//! often the easy and hard segment kinds appear:
//! - straights should thin out as difficulty rises
//! - hairpins, chicanes and jumps should become more common
//!
//! Run with:
//! ```
//! cargo run --example difficulty_sweep
//! ```

use trackgen::prelude::*;
use tracing_subscriber::EnvFilter;

const SEEDS: u64 = 200;
const SEGMENTS: usize = 50;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,difficulty_sweep=info")),
        )
        .init();

    for step in 0..=4 {
        let difficulty = step as f64 / 4.0;
        let mut totals = TrackStats::default();

        for seed in 0..SEEDS {
            let track = TrackBuilder::new()
                .seed(seed)
                .difficulty(difficulty)
                .length(SEGMENTS as f64 * 50.0)
                .segments(SEGMENTS)
                .build();
            for (kind, count) in track.stats.segment_counts {
                *totals.segment_counts.entry(kind).or_default() += count;
            }
        }

        let total = (SEEDS as usize * SEGMENTS) as f64;
        let share = |kind: SegmentKind| 100.0 * totals.count(kind) as f64 / total;

        tracing::info!("Difficulty {:.2}:", difficulty);
        tracing::info!("  Straight: {:5.1}%", share(SegmentKind::Straight));
        tracing::info!("  Corner:   {:5.1}%", share(SegmentKind::Corner));
        tracing::info!("  Chicane:  {:5.1}%", share(SegmentKind::Chicane));
        tracing::info!("  Hairpin:  {:5.1}%", share(SegmentKind::Hairpin));
        tracing::info!("  Jump:     {:5.1}%", share(SegmentKind::Jump));
    }

    Ok(())
}
