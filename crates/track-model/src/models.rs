use std::fmt;

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::features::{Feature, TrackFeature};
use crate::stats::TrackStats;

/// Maximum angular step when sampling an arc into a polyline.
const ARC_SAMPLE_STEP: f64 = std::f64::consts::PI / 18.0;

/// A position plus a horizontal forward direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub direction: DVec3,
}

impl Pose {
    /// The origin, facing +Z.
    pub const ORIGIN: Pose = Pose {
        position: DVec3::ZERO,
        direction: DVec3::Z,
    };

    pub fn new(position: DVec3, direction: DVec3) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Point reached by travelling `distance` straight ahead.
    pub fn advanced(&self, distance: f64) -> DVec3 {
        self.position + self.direction * distance
    }

    /// Unit vector pointing to the left of the forward direction.
    pub fn left(&self) -> DVec3 {
        DVec3::Y.cross(self.direction).normalize_or_zero()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// The fourteen kinds of track segment, in selector walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Straight,
    Corner,
    Hill,
    Chicane,
    Jump,
    BankedCorner,
    Tunnel,
    Hairpin,
    Downhill,
    Uphill,
    SpeedBump,
    Offroad,
    Bridge,
    Split,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 14] = [
        SegmentKind::Straight,
        SegmentKind::Corner,
        SegmentKind::Hill,
        SegmentKind::Chicane,
        SegmentKind::Jump,
        SegmentKind::BankedCorner,
        SegmentKind::Tunnel,
        SegmentKind::Hairpin,
        SegmentKind::Downhill,
        SegmentKind::Uphill,
        SegmentKind::SpeedBump,
        SegmentKind::Offroad,
        SegmentKind::Bridge,
        SegmentKind::Split,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Straight => "straight",
            SegmentKind::Corner => "corner",
            SegmentKind::Hill => "hill",
            SegmentKind::Chicane => "chicane",
            SegmentKind::Jump => "jump",
            SegmentKind::BankedCorner => "banked_corner",
            SegmentKind::Tunnel => "tunnel",
            SegmentKind::Hairpin => "hairpin",
            SegmentKind::Downhill => "downhill",
            SegmentKind::Uphill => "uphill",
            SegmentKind::SpeedBump => "speed_bump",
            SegmentKind::Offroad => "offroad",
            SegmentKind::Bridge => "bridge",
            SegmentKind::Split => "split",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn direction of an arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// +1 for left, -1 for right (positive rotation about +Y turns left).
    pub fn sign(&self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HillShape {
    Crest,
    Valley,
}

/// Arm of a split segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Left,
    Right,
}

/// Kind-specific geometric parameters of a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "geometry", rename_all = "snake_case")]
pub enum SegmentGeometry {
    Straight,
    /// Circular arc shared by corners, banked corners and hairpins.
    Arc {
        radius: f64,
        /// Turn angle in radians.
        angle: f64,
        turn: Turn,
        center: DVec3,
        /// Bank angle in radians, banked corners only. Does not affect the path.
        bank_angle: Option<f64>,
    },
    Hill {
        height: f64,
        shape: HillShape,
    },
    /// Constant grade; `height` is negative going down.
    Slope {
        slope_angle: f64,
        height: f64,
    },
    Chicane {
        points: Vec<DVec3>,
    },
    Jump {
        height: f64,
        control_point: DVec3,
    },
    Tunnel {
        height: f64,
        width: f64,
    },
    Bridge {
        elevation: f64,
        width: f64,
    },
    Offroad {
        roughness: f64,
        mud_level: f64,
    },
    SpeedBump {
        height: f64,
        width: f64,
    },
    Split {
        branch_point: DVec3,
        left: Pose,
        right: Pose,
        /// Arm used to continue the track.
        taken: Branch,
    },
}

/// One drivable piece of track.
///
/// The end pose of each segment is the start pose of the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub kind: SegmentKind,
    pub start_pos: DVec3,
    pub end_pos: DVec3,
    pub start_direction: DVec3,
    pub end_direction: DVec3,
    /// Requested nominal length; used for arc-length accounting.
    pub length: f64,
    pub width: f64,
    pub geometry: SegmentGeometry,
    pub features: Vec<Feature>,
}

impl TrackSegment {
    pub fn start_pose(&self) -> Pose {
        Pose::new(self.start_pos, self.start_direction)
    }

    pub fn end_pose(&self) -> Pose {
        Pose::new(self.end_pos, self.end_direction)
    }

    /// Linear interpolation between start and end position, `t` in [0, 1].
    pub fn interpolate(&self, t: f64) -> DVec3 {
        self.start_pos.lerp(self.end_pos, t)
    }

    /// Polyline along the drivable centre line, from `start_pos` to `end_pos`.
    pub fn centerline(&self) -> Vec<DVec3> {
        let mut points = vec![self.start_pos];

        match &self.geometry {
            SegmentGeometry::Arc {
                angle,
                turn,
                center,
                ..
            } => {
                let steps = (angle / ARC_SAMPLE_STEP).ceil().max(1.0) as usize;
                let radial = self.start_pos - *center;
                for i in 1..steps {
                    let theta = turn.sign() * angle * i as f64 / steps as f64;
                    points.push(*center + DQuat::from_rotation_y(theta) * radial);
                }
            }
            SegmentGeometry::Chicane { points: weave } => {
                if let Some((_, inner)) = weave.split_last() {
                    points.extend_from_slice(inner);
                }
            }
            SegmentGeometry::Jump { control_point, .. } => points.push(*control_point),
            SegmentGeometry::Split { branch_point, .. } => points.push(*branch_point),
            _ => {}
        }

        points.push(self.end_pos);
        points
    }
}

/// Progress marker sampled along the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: usize,
    pub position: DVec3,
    pub segment_index: usize,
    /// Cumulative arc length from the start of the track.
    pub distance: f64,
    pub is_finish: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Requested total length.
    pub length: f64,
    pub seed: u64,
    pub difficulty: f64,
    pub segment_count: usize,
    pub checkpoint_count: usize,
    /// Number of track-wide features.
    pub feature_count: usize,
    /// Number of features attached to individual segments.
    pub segment_feature_count: usize,
}

/// A finished, generated track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub segments: Vec<TrackSegment>,
    pub checkpoints: Vec<Checkpoint>,
    pub features: Vec<TrackFeature>,
    pub metadata: TrackMetadata,
    pub stats: TrackStats,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn finish(&self) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.is_finish)
    }

    /// Sum of nominal segment lengths.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Centre line of the whole track with shared segment endpoints merged.
    pub fn centerline(&self) -> Vec<DVec3> {
        let mut points: Vec<DVec3> = Vec::new();
        for segment in &self.segments {
            let line = segment.centerline();
            let skip = usize::from(!points.is_empty());
            points.extend(line.into_iter().skip(skip));
        }
        points
    }
}
