//! Stateful generator that remembers its seed, difficulty and stream position.

use track_model::{Track, TrackStats};

use super::track::generate_with_stream;
use crate::config::{DEFAULT_DIFFICULTY, DEFAULT_LENGTH, DEFAULT_SEGMENT_COUNT, GeneratorConfig};
use crate::random::Lcg;

/// Interactive front end over [`generate_with_stream`].
///
/// Successive [`generate_track`](Self::generate_track) calls continue the same
/// stream, so they produce different tracks until the seed is set again. One
/// instance must not be shared between callers that expect reproducible
/// output; give each its own generator.
#[derive(Debug, Clone)]
pub struct TrackGenerator {
    config: GeneratorConfig,
    stream: Lcg,
    last: Option<Track>,
}

impl Default for TrackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Creates a generator whose stream starts at `config.seed`.
    pub fn with_config(config: GeneratorConfig) -> Self {
        let stream = Lcg::new(config.seed);
        Self {
            config,
            stream,
            last: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Sets the seed and rewinds the stream to its start.
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.stream.reseed(seed);
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Sets the difficulty, clamped into [0, 1].
    pub fn set_difficulty(&mut self, difficulty: f64) {
        self.config = self.config.clone().with_difficulty(difficulty);
    }

    pub fn difficulty(&self) -> f64 {
        self.config.difficulty
    }

    /// Generates a track from the current stream position and keeps it.
    pub fn generate_track(&mut self, length: f64, segment_count: usize) -> &Track {
        let (track, stream) =
            generate_with_stream(&self.config, self.stream.clone(), length, segment_count);
        self.stream = stream;
        self.last.insert(track)
    }

    /// Sets seed and difficulty, then generates a track of default size.
    pub fn generate_track_with_seed(&mut self, seed: u64, difficulty: f64) -> &Track {
        self.set_seed(seed);
        self.set_difficulty(difficulty);
        self.generate_track(DEFAULT_LENGTH, DEFAULT_SEGMENT_COUNT)
    }

    /// Like [`generate_track_with_seed`](Self::generate_track_with_seed) at the
    /// default difficulty.
    pub fn generate_default_track(&mut self, seed: u64) -> &Track {
        self.generate_track_with_seed(seed, DEFAULT_DIFFICULTY)
    }

    /// The most recently generated track, if any.
    pub fn export_track_data(&self) -> Option<&Track> {
        self.last.as_ref()
    }

    /// Statistics of the most recently generated track.
    pub fn track_stats(&self) -> Option<&TrackStats> {
        self.last.as_ref().map(|track| &track.stats)
    }
}
