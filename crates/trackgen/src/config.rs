//! Configuration types for track generation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use track_model::{Pose, SegmentKind};

use crate::error::TrackError;

/// Track length used when the caller does not ask for one.
pub const DEFAULT_LENGTH: f64 = 1000.0;

/// Segment count used when the caller does not ask for one.
pub const DEFAULT_SEGMENT_COUNT: usize = 20;

/// Difficulty used by the convenience entry points.
pub const DEFAULT_DIFFICULTY: f64 = 0.5;

/// Upper bound on regular checkpoints per track.
pub const MAX_CHECKPOINTS: usize = 1024;

fn default_checkpoint_count() -> usize {
    8
}

/// Clamps a difficulty into [0, 1]. NaN becomes 0.
pub fn clamp_difficulty(difficulty: f64) -> f64 {
    if difficulty.is_nan() {
        0.0
    } else {
        difficulty.clamp(0.0, 1.0)
    }
}

/// Selection weight of one segment kind.
///
/// The effective probability is `max(0, base + difficulty * scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindWeight {
    pub kind: SegmentKind,
    pub base: f64,
    pub scale: f64,
}

impl KindWeight {
    pub const fn new(kind: SegmentKind, base: f64, scale: f64) -> Self {
        Self { kind, base, scale }
    }

    pub fn at(&self, difficulty: f64) -> f64 {
        (self.base + difficulty * self.scale).max(0.0)
    }
}

/// Ordered table walked by the segment selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionTable {
    pub weights: Vec<KindWeight>,
}

impl Default for SelectionTable {
    fn default() -> Self {
        use SegmentKind::*;

        // Each column sums to 1 and 0, so the total stays 1 at any difficulty.
        Self {
            weights: vec![
                KindWeight::new(Straight, 0.30, -0.20),
                KindWeight::new(Corner, 0.20, 0.05),
                KindWeight::new(Hill, 0.10, -0.04),
                KindWeight::new(Chicane, 0.05, 0.06),
                KindWeight::new(Jump, 0.03, 0.04),
                KindWeight::new(BankedCorner, 0.06, 0.00),
                KindWeight::new(Tunnel, 0.04, -0.01),
                KindWeight::new(Hairpin, 0.02, 0.05),
                KindWeight::new(Downhill, 0.05, -0.01),
                KindWeight::new(Uphill, 0.05, -0.01),
                KindWeight::new(SpeedBump, 0.04, -0.01),
                KindWeight::new(Offroad, 0.02, 0.04),
                KindWeight::new(Bridge, 0.02, 0.02),
                KindWeight::new(Split, 0.02, 0.02),
            ],
        }
    }
}

impl SelectionTable {
    /// Effective probability of `kind` at `difficulty`, 0 if the kind is absent.
    pub fn probability(&self, kind: SegmentKind, difficulty: f64) -> f64 {
        self.weights
            .iter()
            .filter(|w| w.kind == kind)
            .map(|w| w.at(difficulty))
            .sum()
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        if self.weights.is_empty() {
            return Err(TrackError::InvalidConfig(
                "selection table has no entries".to_string(),
            ));
        }
        for w in &self.weights {
            if !w.base.is_finite() || !w.scale.is_finite() {
                return Err(TrackError::InvalidConfig(format!(
                    "non-finite weight for {}",
                    w.kind
                )));
            }
            if w.base < 0.0 {
                return Err(TrackError::InvalidConfig(format!(
                    "negative base weight for {}",
                    w.kind
                )));
            }
        }
        Ok(())
    }
}

/// Which arm of a split segment the track continues along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SplitBranch {
    /// Always the left arm; matches tracks saved by earlier versions.
    #[default]
    Left,
    Right,
    /// One extra stream draw per split picks the arm.
    Random,
}

/// Everything besides length and segment count that determines a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,

    /// Clamped into [0, 1] wherever it is used.
    pub difficulty: f64,

    #[serde(default)]
    pub split_branch: SplitBranch,

    #[serde(default)]
    pub selection: SelectionTable,

    /// Regular checkpoints per track, excluding the finish.
    #[serde(default = "default_checkpoint_count")]
    pub checkpoint_count: usize,

    /// Pose the first segment starts from.
    #[serde(default)]
    pub start: Pose,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            difficulty: DEFAULT_DIFFICULTY,
            split_branch: SplitBranch::default(),
            selection: SelectionTable::default(),
            checkpoint_count: default_checkpoint_count(),
            start: Pose::ORIGIN,
        }
    }
}

impl GeneratorConfig {
    pub fn new(seed: u64, difficulty: f64) -> Self {
        Self {
            seed,
            difficulty: clamp_difficulty(difficulty),
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = clamp_difficulty(difficulty);
        self
    }

    pub fn with_split_branch(mut self, branch: SplitBranch) -> Self {
        self.split_branch = branch;
        self
    }

    pub fn with_checkpoint_count(mut self, count: usize) -> Self {
        self.checkpoint_count = count;
        self
    }

    pub fn with_start(mut self, start: Pose) -> Self {
        self.start = start;
        self
    }

    pub fn clamped_difficulty(&self) -> f64 {
        clamp_difficulty(self.difficulty)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, TrackError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        self.selection.validate()?;

        let Pose {
            position,
            direction,
        } = self.start;
        if !position.is_finite() || !direction.is_finite() {
            return Err(TrackError::InvalidConfig(
                "start pose must be finite".to_string(),
            ));
        }
        if direction.length_squared() == 0.0 {
            return Err(TrackError::InvalidConfig(
                "start direction must be non-zero".to_string(),
            ));
        }
        if self.checkpoint_count > MAX_CHECKPOINTS {
            return Err(TrackError::InvalidConfig(format!(
                "checkpoint_count {} exceeds {}",
                self.checkpoint_count, MAX_CHECKPOINTS
            )));
        }
        Ok(())
    }
}
