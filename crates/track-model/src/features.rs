//! Decorative and functional markers attached to segments or to a whole track.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Which side of the road a feature sits on, relative to the driving direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// What a warning sign warns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    SharpTurn,
    Hairpin,
    BlindCrest,
    SteepDescent,
    SpeedBump,
    Junction,
}

/// Typed payload of a feature, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    Billboard { side: Side },
    TireMarks { intensity: f64 },
    WarningSign { warning: Warning },
    GravelTrap { depth: f64 },
    Drainage { capacity: f64 },
    RunoffArea { width: f64 },
    RumbleStrip { side: Side },
    JumpRamp { angle: f64 },
    LandingZone { length: f64 },
    TunnelLight { intensity: f64 },
    Railing { side: Side, height: f64 },
    TractionMarker { grip: f64 },
    MudPuddle { radius: f64 },
    ReflectiveMarker { side: Side },
    DirectionSign,
    PitEntrance { lane_length: f64 },
    Grandstand { capacity: u32 },
}

impl FeatureKind {
    /// Stable snake_case name, identical to the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Billboard { .. } => "billboard",
            FeatureKind::TireMarks { .. } => "tire_marks",
            FeatureKind::WarningSign { .. } => "warning_sign",
            FeatureKind::GravelTrap { .. } => "gravel_trap",
            FeatureKind::Drainage { .. } => "drainage",
            FeatureKind::RunoffArea { .. } => "runoff_area",
            FeatureKind::RumbleStrip { .. } => "rumble_strip",
            FeatureKind::JumpRamp { .. } => "jump_ramp",
            FeatureKind::LandingZone { .. } => "landing_zone",
            FeatureKind::TunnelLight { .. } => "tunnel_light",
            FeatureKind::Railing { .. } => "railing",
            FeatureKind::TractionMarker { .. } => "traction_marker",
            FeatureKind::MudPuddle { .. } => "mud_puddle",
            FeatureKind::ReflectiveMarker { .. } => "reflective_marker",
            FeatureKind::DirectionSign => "direction_sign",
            FeatureKind::PitEntrance { .. } => "pit_entrance",
            FeatureKind::Grandstand { .. } => "grandstand",
        }
    }
}

/// A feature placed in the world.
///
/// Positions are world coordinates, which are relative to the track origin
/// since every generated track starts there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(flatten)]
    pub kind: FeatureKind,
    pub position: DVec3,
}

impl Feature {
    pub fn new(kind: FeatureKind, position: DVec3) -> Self {
        Self { kind, position }
    }
}

/// A feature belonging to the whole track rather than a single segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackFeature {
    #[serde(flatten)]
    pub feature: Feature,
    /// Index of the segment the feature was resolved into.
    pub segment_index: usize,
    /// Arc length from the start of the track.
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_serializes_with_type_tag() {
        let feature = Feature::new(
            FeatureKind::Railing {
                side: Side::Left,
                height: 1.2,
            },
            DVec3::new(1.0, 2.0, 3.0),
        );

        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "railing");
        assert_eq!(json["side"], "left");
        assert_eq!(json["position"], serde_json::json!([1.0, 2.0, 3.0]));

        let back: Feature = serde_json::from_value(json).unwrap();
        assert_eq!(back, feature);
    }

    #[test]
    fn test_name_matches_tag() {
        let kind = FeatureKind::WarningSign {
            warning: Warning::BlindCrest,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], kind.name());
        assert_eq!(json["warning"], "blind_crest");
    }

    #[test]
    fn test_track_feature_flattens() {
        let feature = TrackFeature {
            feature: Feature::new(FeatureKind::Grandstand { capacity: 2500 }, DVec3::ZERO),
            segment_index: 4,
            distance: 420.0,
        };
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "grandstand");
        assert_eq!(json["capacity"], 2500);
        assert_eq!(json["segment_index"], 4);
    }
}
