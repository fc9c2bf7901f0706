//! Entry points that assemble complete tracks.
//!
//! [`generate`] is the pure form: configuration in, track out. The
//! [`TrackBuilder`] wraps it in a fluent API, and [`TrackGenerator`] keeps a
//! seed, difficulty and stream position between calls for interactive use.

mod generator;
mod track;

pub use generator::TrackGenerator;
pub use track::{TrackBuilder, generate, generate_with_stream};
