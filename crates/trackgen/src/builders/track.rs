//! Track assembly: selector and builders per segment, then placement and stats.

use track_model::{Pose, Track, TrackMetadata, TrackSegment};
use tracing::{debug, info};

use crate::config::{
    DEFAULT_LENGTH, DEFAULT_SEGMENT_COUNT, GeneratorConfig, SplitBranch,
};
use crate::generators::{
    SegmentBuilder, choose_segment_type, place_checkpoints, place_track_features,
};
use crate::random::Lcg;
use crate::stats::analyze;

/// Generates a track from a fresh stream seeded with `config.seed`.
///
/// Identical arguments always produce an identical track.
pub fn generate(config: &GeneratorConfig, length: f64, segment_count: usize) -> Track {
    let (track, _) = generate_with_stream(config, Lcg::new(config.seed), length, segment_count);
    track
}

/// Generates a track drawing from `stream`, returning the advanced stream.
///
/// A non-positive or non-finite `length`, or a zero `segment_count`, yields an
/// empty track without drawing from the stream.
pub fn generate_with_stream(
    config: &GeneratorConfig,
    mut stream: Lcg,
    length: f64,
    segment_count: usize,
) -> (Track, Lcg) {
    let difficulty = config.clamped_difficulty();

    if segment_count == 0 || !length.is_finite() || length <= 0.0 {
        debug!(
            "Degenerate request (length {}, {} segments), returning empty track",
            length, segment_count
        );
        return (assemble(config, difficulty, length, Vec::new(), &mut stream), stream);
    }

    let per_segment = length / segment_count as f64;
    let builder = SegmentBuilder::new().with_split_branch(config.split_branch);

    let mut pose = Pose::new(
        config.start.position,
        config.start.direction.try_normalize().unwrap_or(Pose::ORIGIN.direction),
    );
    let mut segments = Vec::with_capacity(segment_count);

    for index in 0..segment_count {
        let kind = choose_segment_type(index, difficulty, &config.selection, &mut stream);
        let segment = builder.build(kind, pose, per_segment, &mut stream);
        debug!(
            "Segment {}: {} ending at ({:.1}, {:.1}, {:.1})",
            index, kind, segment.end_pos.x, segment.end_pos.y, segment.end_pos.z
        );
        pose = segment.end_pose();
        segments.push(segment);
    }

    let track = assemble(config, difficulty, length, segments, &mut stream);
    info!(
        "Generated track: seed {}, difficulty {:.2}, {} segments, {} checkpoints, {} features",
        config.seed,
        difficulty,
        track.segments.len(),
        track.checkpoints.len(),
        track.features.len()
    );
    (track, stream)
}

fn assemble(
    config: &GeneratorConfig,
    difficulty: f64,
    length: f64,
    segments: Vec<TrackSegment>,
    stream: &mut Lcg,
) -> Track {
    let checkpoints = place_checkpoints(&segments, length, config.checkpoint_count);
    let features = place_track_features(&segments, length, stream);
    let stats = analyze(&segments);

    let metadata = TrackMetadata {
        length,
        seed: config.seed,
        difficulty,
        segment_count: segments.len(),
        checkpoint_count: checkpoints.len(),
        feature_count: features.len(),
        segment_feature_count: segments.iter().map(|s| s.features.len()).sum(),
    };

    Track {
        segments,
        checkpoints,
        features,
        metadata,
        stats,
    }
}

/// Fluent builder over [`generate`].
///
/// # Example
///
/// ```rust
/// use trackgen::builders::TrackBuilder;
///
/// let track = TrackBuilder::new()
///     .seed(42)
///     .difficulty(0.8)
///     .length(2000.0)
///     .segments(30)
///     .build();
///
/// assert_eq!(track.segments.len(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    config: GeneratorConfig,
    length: f64,
    segment_count: usize,
}

impl Default for TrackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            length: DEFAULT_LENGTH,
            segment_count: DEFAULT_SEGMENT_COUNT,
        }
    }

    /// Starts from an existing configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sets the difficulty, clamped into [0, 1].
    pub fn difficulty(mut self, difficulty: f64) -> Self {
        self.config = self.config.with_difficulty(difficulty);
        self
    }

    /// Sets the requested total length.
    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the number of segments.
    pub fn segments(mut self, count: usize) -> Self {
        self.segment_count = count;
        self
    }

    pub fn split_branch(mut self, branch: SplitBranch) -> Self {
        self.config.split_branch = branch;
        self
    }

    /// Sets the number of regular checkpoints (the finish is extra).
    pub fn checkpoints(mut self, count: usize) -> Self {
        self.config.checkpoint_count = count;
        self
    }

    pub fn start(mut self, start: Pose) -> Self {
        self.config.start = start;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn build(&self) -> Track {
        generate(&self.config, self.length, self.segment_count)
    }
}
