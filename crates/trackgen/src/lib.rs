//! Procedural race track generation.
//!
//! This crate turns a seed, a difficulty and a requested size into a complete
//! [`Track`]: a chain of segments of fourteen kinds, checkpoints sampled by arc
//! length, roadside and track-wide features, and summary statistics. The same
//! inputs always produce the same track.
//!
//! # Quick Start
//!
//! ```rust
//! use trackgen::prelude::*;
//!
//! let config = GeneratorConfig::new(42, 0.7);
//! let track = generate(&config, 1500.0, 24);
//!
//! assert_eq!(track.segments.len(), 24);
//! assert!(track.finish().is_some());
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod random;
pub mod stats;

// Re-export record types from the model crate
pub use track_model::{
    Branch, Checkpoint, DVec3, Feature, FeatureKind, HillShape, Pose, SegmentGeometry,
    SegmentKind, Side, Track, TrackFeature, TrackMetadata, TrackSegment, TrackStats, Turn,
    Warning,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{TrackBuilder, TrackGenerator, generate, generate_with_stream};
    pub use crate::config::{GeneratorConfig, SelectionTable, SplitBranch};
    pub use crate::error::TrackError;
    pub use crate::export::{EditorTrack, GeoAnchor};
    pub use crate::random::Lcg;
    pub use crate::stats::{TrackMetric, analyze};
    pub use crate::{Checkpoint, Pose, SegmentKind, Track, TrackSegment, TrackStats};
}
