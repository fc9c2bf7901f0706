//! Full-fidelity JSON persistence.

use std::fs;
use std::path::Path;

use track_model::Track;
use tracing::debug;

use crate::error::TrackError;

/// Pretty-printed JSON of the whole track.
pub fn to_json_string(track: &Track) -> Result<String, TrackError> {
    Ok(serde_json::to_string_pretty(track)?)
}

pub fn save_track(path: impl AsRef<Path>, track: &Track) -> Result<(), TrackError> {
    let path = path.as_ref();
    fs::write(path, to_json_string(track)?)?;
    debug!("Saved track with {} segments to {}", track.segments.len(), path.display());
    Ok(())
}

pub fn load_track(path: impl AsRef<Path>) -> Result<Track, TrackError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TrackBuilder;

    #[test]
    fn test_json_has_tagged_geometry() {
        let track = TrackBuilder::new().seed(12).segments(10).build();
        let json = to_json_string(&track).unwrap();

        assert!(json.contains("\"geometry\": \""));
        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"segment_count\": 10"));
    }

    #[test]
    fn test_every_kind_survives_a_round_trip() {
        let track = (0..50)
            .map(|seed| {
                TrackBuilder::new()
                    .seed(seed)
                    .difficulty(1.0)
                    .segments(150)
                    .build()
            })
            .find(|t| t.stats.segment_counts.values().all(|&n| n > 0))
            .unwrap();

        let json = to_json_string(&track).unwrap();
        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_track("/nonexistent/track.json").unwrap_err();
        assert!(matches!(err, TrackError::Io(_)));
    }

    #[test]
    fn test_load_garbage_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_track(&path).unwrap_err();
        assert!(matches!(err, TrackError::Json(_)));
    }
}
