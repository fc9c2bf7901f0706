//! Per-segment feature generation.
//!
//! Features are descriptive only: they never move a segment's end pose. Every
//! function here consumes stream values in a fixed order so that a seed
//! reproduces the same decorations.

use glam::{DQuat, DVec3};
use track_model::{
    Feature, FeatureKind, HillShape, Pose, SegmentGeometry, Side, TrackSegment, Turn, Warning,
};

use crate::random::Lcg;

/// Clearance between the road edge and roadside objects.
const ROADSIDE_CLEARANCE: f64 = 3.0;

/// Spacing between tunnel lights.
const TUNNEL_LIGHT_SPACING: f64 = 20.0;

/// Long tunnels spread this many lights evenly instead.
const MAX_TUNNEL_LIGHTS: usize = 64;

fn random_side(rng: &mut Lcg) -> Side {
    if rng.chance(0.5) {
        Side::Left
    } else {
        Side::Right
    }
}

fn side_sign(side: Side) -> f64 {
    match side {
        Side::Left => 1.0,
        Side::Right => -1.0,
    }
}

/// Side on the outside of a turn.
fn outside_of(turn: Turn) -> Side {
    match turn {
        Turn::Left => Side::Right,
        Turn::Right => Side::Left,
    }
}

fn inside_of(turn: Turn) -> Side {
    match turn {
        Turn::Left => Side::Left,
        Turn::Right => Side::Right,
    }
}

/// Horizontal heading of the chord from start to end, or the start heading
/// when the chord is vertical or degenerate.
fn chord_direction(segment: &TrackSegment) -> DVec3 {
    let chord = segment.end_pos - segment.start_pos;
    DVec3::new(chord.x, 0.0, chord.z)
        .try_normalize()
        .unwrap_or(segment.start_direction)
}

/// Point beside the road at fraction `t` along the segment chord.
pub(crate) fn roadside(segment: &TrackSegment, t: f64, side: Side, clearance: f64) -> DVec3 {
    let center = segment.interpolate(t);
    let left = Pose::new(center, chord_direction(segment)).left();
    center + left * side_sign(side) * (segment.width / 2.0 + clearance)
}

/// Midpoint of an arc, or the chord midpoint for other shapes.
fn apex(segment: &TrackSegment) -> DVec3 {
    match &segment.geometry {
        SegmentGeometry::Arc {
            angle,
            turn,
            center,
            ..
        } => {
            let half_turn = DQuat::from_rotation_y(turn.sign() * angle / 2.0);
            *center + half_turn * (segment.start_pos - *center)
        }
        _ => segment.interpolate(0.5),
    }
}

/// Apex pushed sideways off the road, toward the given side.
fn apex_side(segment: &TrackSegment, side: Side, clearance: f64) -> DVec3 {
    let point = apex(segment);
    let left = Pose::new(point, chord_direction(segment)).left();
    point + left * side_sign(side) * (segment.width / 2.0 + clearance)
}

/// 30% chance of a billboard somewhere along the middle of the straight.
pub fn straight(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    if rng.chance(0.3) {
        let t = rng.range(0.2, 0.8);
        let side = random_side(rng);
        features.push(Feature::new(
            FeatureKind::Billboard { side },
            roadside(segment, t, side, ROADSIDE_CLEARANCE),
        ));
    }
    features
}

/// Sharp-turn sign for tight angles, 40% chance of tire marks at the apex.
pub fn corner(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    let SegmentGeometry::Arc { angle, turn, .. } = segment.geometry else {
        return features;
    };

    if angle > 60f64.to_radians() {
        let side = outside_of(turn);
        features.push(Feature::new(
            FeatureKind::WarningSign {
                warning: Warning::SharpTurn,
            },
            roadside(segment, 0.0, side, ROADSIDE_CLEARANCE),
        ));
    }

    if rng.chance(0.4) {
        let intensity = rng.range(0.3, 1.0);
        features.push(Feature::new(
            FeatureKind::TireMarks { intensity },
            apex(segment),
        ));
    }

    features
}

/// 50% chance of a rumble strip on the inside of the banking.
pub fn banked_corner(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    let SegmentGeometry::Arc { turn, .. } = segment.geometry else {
        return features;
    };

    if rng.chance(0.5) {
        let side = inside_of(turn);
        features.push(Feature::new(
            FeatureKind::RumbleStrip { side },
            apex_side(segment, side, 0.0),
        ));
    }
    features
}

/// Hairpin sign on the approach, 50% chance of a gravel trap on the outside.
pub fn hairpin(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    let SegmentGeometry::Arc { turn, .. } = segment.geometry else {
        return features;
    };

    features.push(Feature::new(
        FeatureKind::WarningSign {
            warning: Warning::Hairpin,
        },
        roadside(segment, 0.0, outside_of(turn), ROADSIDE_CLEARANCE),
    ));

    if rng.chance(0.5) {
        let depth = rng.range(0.2, 0.5);
        features.push(Feature::new(
            FeatureKind::GravelTrap { depth },
            apex_side(segment, outside_of(turn), ROADSIDE_CLEARANCE * 2.0),
        ));
    }
    features
}

/// Crests may get a blind-crest sign; valleys always get drainage.
pub fn hill(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    let SegmentGeometry::Hill { shape, .. } = segment.geometry else {
        return features;
    };

    match shape {
        HillShape::Crest => {
            if rng.chance(0.5) {
                features.push(Feature::new(
                    FeatureKind::WarningSign {
                        warning: Warning::BlindCrest,
                    },
                    roadside(segment, 0.3, Side::Right, ROADSIDE_CLEARANCE),
                ));
            }
        }
        HillShape::Valley => {
            let capacity = rng.range(10.0, 50.0);
            features.push(Feature::new(
                FeatureKind::Drainage { capacity },
                segment.interpolate(0.5),
            ));
        }
    }
    features
}

/// Steep-descent sign, 30% chance of a runoff area near the bottom.
pub fn downhill(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = vec![Feature::new(
        FeatureKind::WarningSign {
            warning: Warning::SteepDescent,
        },
        roadside(segment, 0.0, Side::Right, ROADSIDE_CLEARANCE),
    )];

    if rng.chance(0.3) {
        let width = rng.range(5.0, 15.0);
        let side = random_side(rng);
        features.push(Feature::new(
            FeatureKind::RunoffArea { width },
            roadside(segment, 0.9, side, width / 2.0),
        ));
    }
    features
}

/// 20% chance of a billboard facing the climb.
pub fn uphill(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let mut features = Vec::new();
    if rng.chance(0.2) {
        let side = random_side(rng);
        features.push(Feature::new(
            FeatureKind::Billboard { side },
            roadside(segment, 0.5, side, ROADSIDE_CLEARANCE),
        ));
    }
    features
}

/// A rumble strip at every other weave point.
///
/// Those points all follow a turn toward `turn_side`, so every strip sits on
/// that side.
pub fn chicane(segment: &TrackSegment, turn_side: Side) -> Vec<Feature> {
    let SegmentGeometry::Chicane { points } = &segment.geometry else {
        return Vec::new();
    };

    let kind = FeatureKind::RumbleStrip { side: turn_side };
    points
        .iter()
        .step_by(2)
        .map(|point| Feature::new(kind.clone(), *point))
        .collect()
}

/// Take-off ramp at the start, landing zone over the last quarter.
pub fn jump(segment: &TrackSegment) -> Vec<Feature> {
    let SegmentGeometry::Jump { height, .. } = segment.geometry else {
        return Vec::new();
    };

    let ramp_angle = height.atan2(segment.length / 2.0);
    vec![
        Feature::new(
            FeatureKind::JumpRamp { angle: ramp_angle },
            segment.start_pos,
        ),
        Feature::new(
            FeatureKind::LandingZone {
                length: segment.length * 0.25,
            },
            segment.interpolate(0.75),
        ),
    ]
}

/// Evenly spaced ceiling lights, at least one and at most [`MAX_TUNNEL_LIGHTS`].
pub fn tunnel(segment: &TrackSegment) -> Vec<Feature> {
    let SegmentGeometry::Tunnel { height, .. } = segment.geometry else {
        return Vec::new();
    };

    let count = ((segment.length / TUNNEL_LIGHT_SPACING).floor() as usize)
        .clamp(1, MAX_TUNNEL_LIGHTS);
    (0..count)
        .map(|i| {
            let t = (i as f64 + 0.5) / count as f64;
            Feature::new(
                FeatureKind::TunnelLight { intensity: 0.8 },
                segment.interpolate(t) + DVec3::Y * height,
            )
        })
        .collect()
}

/// Railings along both edges of the deck.
pub fn bridge(segment: &TrackSegment) -> Vec<Feature> {
    [Side::Left, Side::Right]
        .into_iter()
        .map(|side| {
            Feature::new(
                FeatureKind::Railing { side, height: 1.1 },
                roadside(segment, 0.5, side, 0.0),
            )
        })
        .collect()
}

/// Traction markers at the thirds, 40% chance of a mud puddle.
pub fn offroad(segment: &TrackSegment, rng: &mut Lcg) -> Vec<Feature> {
    let SegmentGeometry::Offroad { roughness, .. } = segment.geometry else {
        return Vec::new();
    };

    let grip = 1.0 - roughness * 0.5;
    let mut features: Vec<Feature> = [1.0 / 3.0, 2.0 / 3.0]
        .into_iter()
        .map(|t| {
            Feature::new(
                FeatureKind::TractionMarker { grip },
                segment.interpolate(t),
            )
        })
        .collect();

    if rng.chance(0.4) {
        let radius = rng.range(1.0, 4.0);
        let t = rng.range(0.2, 0.8);
        features.push(Feature::new(
            FeatureKind::MudPuddle { radius },
            segment.interpolate(t),
        ));
    }
    features
}

/// Warning sign on the approach and reflective markers at both ends of the bump.
pub fn speed_bump(segment: &TrackSegment) -> Vec<Feature> {
    let mut features = vec![Feature::new(
        FeatureKind::WarningSign {
            warning: Warning::SpeedBump,
        },
        roadside(segment, 0.0, Side::Right, ROADSIDE_CLEARANCE),
    )];
    features.extend([Side::Left, Side::Right].into_iter().map(|side| {
        Feature::new(
            FeatureKind::ReflectiveMarker { side },
            roadside(segment, 0.5, side, 0.0),
        )
    }));
    features
}

/// Junction warning before the fork and a direction sign at the fork itself.
pub fn split(segment: &TrackSegment) -> Vec<Feature> {
    let SegmentGeometry::Split { branch_point, .. } = segment.geometry else {
        return Vec::new();
    };

    vec![
        Feature::new(
            FeatureKind::WarningSign {
                warning: Warning::Junction,
            },
            roadside(segment, 0.0, Side::Right, ROADSIDE_CLEARANCE),
        ),
        Feature::new(FeatureKind::DirectionSign, branch_point),
    ]
}
