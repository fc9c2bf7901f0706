//! Record types for procedurally generated race tracks.
//!
//! These types are the interchange boundary between the generator and its
//! consumers (renderers, physics, lap tracking, the track editor). They carry
//! no behaviour beyond simple geometric helpers and serialize to plain JSON
//! without cycles.

pub mod features;
pub mod models;
pub mod stats;

pub use features::{Feature, FeatureKind, Side, TrackFeature, Warning};
pub use models::{
    Branch, Checkpoint, HillShape, Pose, SegmentGeometry, SegmentKind, Track, TrackMetadata,
    TrackSegment, Turn,
};
pub use stats::TrackStats;

/// Re-exported so consumers name the same vector type the records use.
pub use glam::DVec3;
