//! Down-conversion to the track editor's reduced file format.
//!
//! The editor keeps only a centre-line point list with per-point widths and
//! checkpoint gates as node index ranges. Its ground plane is `x`/`y` with `z`
//! as elevation, so world `z` maps to editor `y` and world `y` to editor `z`.

use serde::{Deserialize, Serialize};
use track_model::{DVec3, Track};

/// Fallback width written when a track has no segments.
const FALLBACK_WIDTH: f32 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorTrack {
    pub name: String,
    pub nodes: Vec<EditorNode>,
    #[serde(default)]
    pub checkpoints: Vec<EditorCheckpoint>,
    #[serde(default)]
    pub default_width: f32,
    #[serde(default)]
    pub closed_loop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorNode {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub width: Option<f32>,
}

impl EditorNode {
    fn from_world(point: DVec3, width: f64) -> Self {
        Self {
            x: point.x as f32,
            y: point.z as f32,
            z: point.y as f32,
            width: Some(width as f32),
        }
    }
}

/// Gate spanning the nodes of the segment a checkpoint falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorCheckpoint {
    pub index_start: usize,
    pub index_end: usize,
}

/// Converts a generated track into the editor format.
///
/// Nodes come from each segment's centre line with shared endpoints merged; a
/// node takes the width of the segment that produced it.
pub fn to_editor_track(track: &Track, name: &str) -> EditorTrack {
    let mut nodes: Vec<EditorNode> = Vec::new();
    // Node index range [first, last] per segment.
    let mut spans = Vec::with_capacity(track.segments.len());

    for segment in &track.segments {
        let line = segment.centerline();
        let first = nodes.len().saturating_sub(1);
        let skip = usize::from(!nodes.is_empty());
        nodes.extend(
            line.into_iter()
                .skip(skip)
                .map(|p| EditorNode::from_world(p, segment.width)),
        );
        spans.push((first, nodes.len() - 1));
    }

    let checkpoints = track
        .checkpoints
        .iter()
        .filter_map(|c| spans.get(c.segment_index))
        .map(|&(index_start, index_end)| EditorCheckpoint {
            index_start,
            index_end,
        })
        .collect();

    let default_width = track
        .segments
        .first()
        .map(|s| s.width as f32)
        .unwrap_or(FALLBACK_WIDTH);

    EditorTrack {
        name: name.to_string(),
        nodes,
        checkpoints,
        default_width,
        closed_loop: false,
    }
}
