//! Track-wide features resolved from arc-length offsets.

use glam::DVec3;
use track_model::{Feature, FeatureKind, Side, TrackFeature, TrackSegment};
use tracing::debug;

use super::features::roadside;
use crate::random::Lcg;

const PIT_ENTRANCE_CHANCE: f64 = 0.7;
const PIT_ENTRANCE_FRACTION: f64 = 0.7;
const GRANDSTAND_SLOTS: usize = 3;
const GRANDSTAND_CHANCE: f64 = 0.4;
const GRANDSTAND_SETBACK: f64 = 20.0;

/// Resolves an arc-length offset to a segment index and world position.
///
/// Walks the segments accumulating nominal lengths until the offset falls
/// inside one, then interpolates linearly within it. Offsets past the end
/// resolve to the last segment's end; an empty list resolves to nothing.
pub fn locate(segments: &[TrackSegment], distance: f64) -> Option<(usize, DVec3)> {
    let mut cumulative = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        if distance <= cumulative + segment.length {
            let t = ((distance - cumulative) / segment.length).clamp(0.0, 1.0);
            return Some((index, segment.interpolate(t)));
        }
        cumulative += segment.length;
    }
    segments
        .last()
        .map(|segment| (segments.len() - 1, segment.end_pos))
}

/// Fraction of the way through `segments[index]` that `distance` falls.
fn fraction_within(segments: &[TrackSegment], index: usize, distance: f64) -> f64 {
    let before: f64 = segments[..index].iter().map(|s| s.length).sum();
    ((distance - before) / segments[index].length).clamp(0.0, 1.0)
}

/// Scatters a pit entrance and up to three grandstands along the track.
///
/// Draws: pit entrance gate, lane length when present, then per grandstand
/// slot a gate and, when it opens, distance and capacity.
pub fn place_track_features(
    segments: &[TrackSegment],
    length: f64,
    rng: &mut Lcg,
) -> Vec<TrackFeature> {
    let mut features = Vec::new();
    if segments.is_empty() {
        return features;
    }

    if rng.chance(PIT_ENTRANCE_CHANCE) {
        let lane_length = rng.range(40.0, 80.0);
        let distance = length * PIT_ENTRANCE_FRACTION;
        if let Some((segment_index, position)) = locate(segments, distance) {
            features.push(TrackFeature {
                feature: Feature::new(FeatureKind::PitEntrance { lane_length }, position),
                segment_index,
                distance,
            });
        }
    }

    for _ in 0..GRANDSTAND_SLOTS {
        if !rng.chance(GRANDSTAND_CHANCE) {
            continue;
        }
        let distance = rng.range(0.0, length);
        let capacity = rng.int_range(5, 50) as u32 * 100;
        if let Some((segment_index, _)) = locate(segments, distance) {
            let t = fraction_within(segments, segment_index, distance);
            let position = roadside(&segments[segment_index], t, Side::Right, GRANDSTAND_SETBACK);
            features.push(TrackFeature {
                feature: Feature::new(FeatureKind::Grandstand { capacity }, position),
                segment_index,
                distance,
            });
        }
    }

    debug!("Placed {} track features", features.len());
    features
}
