//! Output formats for generated tracks.
//!
//! - [`json`]: the full [`Track`](track_model::Track) record, loadable again.
//! - [`editor`]: the reduced point list the track editor stores.
//! - [`gpx`]: the centre line as GPX 1.1 for map viewers.

pub mod editor;
pub mod gpx;
pub mod json;

pub use editor::{EditorCheckpoint, EditorNode, EditorTrack, to_editor_track};
pub use gpx::{GeoAnchor, generate_gpx, save_gpx, write_gpx};
pub use json::{load_track, save_track, to_json_string};
