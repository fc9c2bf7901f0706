//! Generators for the pieces of a track.
//!
//! - [`choose_segment_type`]: difficulty-weighted pick of the next segment kind
//! - [`SegmentBuilder`]: geometry of each of the fourteen segment kinds
//! - [`place_checkpoints`]: arc-length sampled progress markers
//! - [`place_track_features`]: track-wide features such as grandstands

pub mod checkpoint;
pub mod features;
pub mod placement;
pub mod segment;
pub mod selector;

pub use checkpoint::place_checkpoints;
pub use placement::{locate, place_track_features};
pub use segment::SegmentBuilder;
pub use selector::choose_segment_type;
