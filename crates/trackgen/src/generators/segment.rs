//! Geometry of the fourteen segment kinds.
//!
//! Every builder turns a start pose and a nominal length into a finished
//! [`TrackSegment`]. The result depends only on those inputs and the values
//! drawn from the stream, which are always drawn in the order documented on
//! each builder (geometry first, then features).

use glam::{DQuat, DVec3};
use track_model::{
    Branch, HillShape, Pose, SegmentGeometry, SegmentKind, Side, TrackSegment, Turn,
};

use super::features;
use crate::config::SplitBranch;
use crate::random::Lcg;

const DEFAULT_WIDTH: f64 = 12.0;
const NARROW_WIDTH: f64 = 10.0;
const WIDE_WIDTH: f64 = 14.0;

const BANK_ANGLE_DEG: f64 = 30.0;
const CHICANE_DEFLECTION_DEG: f64 = 30.0;
const SPLIT_BRANCH_FRACTION: f64 = 0.6;

/// Radius and angle ranges of an arc-shaped segment.
#[derive(Debug, Clone, Copy)]
struct ArcProfile {
    radius: (f64, f64),
    /// Angle range in degrees; equal bounds mean a fixed angle and no draw.
    angle_deg: (f64, f64),
    width: f64,
    bank_deg: Option<f64>,
}

const CORNER: ArcProfile = ArcProfile {
    radius: (20.0, 60.0),
    angle_deg: (30.0, 90.0),
    width: DEFAULT_WIDTH,
    bank_deg: None,
};

const BANKED_CORNER: ArcProfile = ArcProfile {
    radius: (30.0, 80.0),
    angle_deg: (45.0, 120.0),
    width: DEFAULT_WIDTH,
    bank_deg: Some(BANK_ANGLE_DEG),
};

const HAIRPIN: ArcProfile = ArcProfile {
    radius: (10.0, 20.0),
    angle_deg: (180.0, 180.0),
    width: NARROW_WIDTH,
    bank_deg: None,
};

/// Rotates a direction about +Y; positive angles turn left.
fn rotate(direction: DVec3, angle: f64) -> DVec3 {
    DQuat::from_rotation_y(angle) * direction
}

fn segment(
    kind: SegmentKind,
    start: Pose,
    end: Pose,
    length: f64,
    width: f64,
    geometry: SegmentGeometry,
) -> TrackSegment {
    TrackSegment {
        kind,
        start_pos: start.position,
        end_pos: end.position,
        start_direction: start.direction,
        end_direction: end.direction,
        length,
        width,
        geometry,
        features: Vec::new(),
    }
}

/// Builds segments of every kind.
#[derive(Debug, Clone, Default)]
pub struct SegmentBuilder {
    split_branch: SplitBranch,
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets which arm of a split the track continues along.
    pub fn with_split_branch(mut self, split_branch: SplitBranch) -> Self {
        self.split_branch = split_branch;
        self
    }

    /// Builds one segment of `kind` starting at `start`.
    pub fn build(
        &self,
        kind: SegmentKind,
        start: Pose,
        length: f64,
        rng: &mut Lcg,
    ) -> TrackSegment {
        match kind {
            SegmentKind::Straight => self.straight(start, length, rng),
            SegmentKind::Corner => self.arc(kind, CORNER, start, length, rng),
            SegmentKind::BankedCorner => self.arc(kind, BANKED_CORNER, start, length, rng),
            SegmentKind::Hairpin => self.arc(kind, HAIRPIN, start, length, rng),
            SegmentKind::Hill => self.hill(start, length, rng),
            SegmentKind::Downhill => self.slope(kind, -1.0, start, length, rng),
            SegmentKind::Uphill => self.slope(kind, 1.0, start, length, rng),
            SegmentKind::Chicane => self.chicane(start, length, rng),
            SegmentKind::Jump => self.jump(start, length, rng),
            SegmentKind::Tunnel => self.tunnel(start, length, rng),
            SegmentKind::Bridge => self.bridge(start, length, rng),
            SegmentKind::Offroad => self.offroad(start, length, rng),
            SegmentKind::SpeedBump => self.speed_bump(start, length, rng),
            SegmentKind::Split => self.split(start, length, rng),
        }
    }

    /// Draws: width jitter, then billboard features.
    fn straight(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let width = DEFAULT_WIDTH + rng.range(-1.0, 1.0);
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::Straight;
        let mut seg = segment(SegmentKind::Straight, start, end, length, width, geometry);
        seg.features = features::straight(&seg, rng);
        seg
    }

    /// Draws: radius, angle (unless fixed), turn direction, then features.
    fn arc(
        &self,
        kind: SegmentKind,
        profile: ArcProfile,
        start: Pose,
        length: f64,
        rng: &mut Lcg,
    ) -> TrackSegment {
        let radius = rng.range(profile.radius.0, profile.radius.1);
        let (lo, hi) = profile.angle_deg;
        let angle = if lo == hi {
            lo.to_radians()
        } else {
            rng.range(lo, hi).to_radians()
        };
        let turn = if rng.chance(0.5) {
            Turn::Left
        } else {
            Turn::Right
        };

        let center = start.position + start.left() * radius * turn.sign();
        let rotation = DQuat::from_rotation_y(turn.sign() * angle);
        let end = Pose::new(
            center + rotation * (start.position - center),
            rotation * start.direction,
        );

        let geometry = SegmentGeometry::Arc {
            radius,
            angle,
            turn,
            center,
            bank_angle: profile.bank_deg.map(f64::to_radians),
        };
        let mut seg = segment(kind, start, end, length, profile.width, geometry);
        seg.features = match kind {
            SegmentKind::BankedCorner => features::banked_corner(&seg, rng),
            SegmentKind::Hairpin => features::hairpin(&seg, rng),
            _ => features::corner(&seg, rng),
        };
        seg
    }

    /// Draws: height, crest/valley, then features.
    fn hill(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let height = rng.range(5.0, 20.0);
        let shape = if rng.chance(0.5) {
            HillShape::Crest
        } else {
            HillShape::Valley
        };
        let signed = match shape {
            HillShape::Crest => height,
            HillShape::Valley => -height,
        };
        let end = Pose::new(start.advanced(length) + DVec3::Y * signed, start.direction);

        let geometry = SegmentGeometry::Hill { height, shape };
        let mut seg = segment(
            SegmentKind::Hill,
            start,
            end,
            length,
            DEFAULT_WIDTH,
            geometry,
        );
        seg.features = features::hill(&seg, rng);
        seg
    }

    /// Draws: slope angle, then features. `direction` is -1 going down.
    fn slope(
        &self,
        kind: SegmentKind,
        direction: f64,
        start: Pose,
        length: f64,
        rng: &mut Lcg,
    ) -> TrackSegment {
        let slope_angle = rng.range(5.0, 15.0).to_radians();
        let height = direction * length * slope_angle.sin();
        let end = Pose::new(
            start.advanced(length * slope_angle.cos()) + DVec3::Y * height,
            start.direction,
        );

        let geometry = SegmentGeometry::Slope {
            slope_angle,
            height,
        };
        let mut seg = segment(kind, start, end, length, DEFAULT_WIDTH, geometry);
        seg.features = if direction < 0.0 {
            features::downhill(&seg, rng)
        } else {
            features::uphill(&seg, rng)
        };
        seg
    }

    /// Draws: weave count, first side. Features draw nothing.
    ///
    /// Produces `2n` points, deflecting the heading by a fixed angle to
    /// alternating sides before each step.
    fn chicane(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let weaves = rng.int_range(2, 4);
        let first = rng.sign();
        let count = weaves * 2;
        let step = length / count as f64;
        let deflection = CHICANE_DEFLECTION_DEG.to_radians();

        let mut position = start.position;
        let mut direction = start.direction;
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            let alternate = if i % 2 == 0 { 1.0 } else { -1.0 };
            direction = rotate(direction, first * alternate * deflection);
            position += direction * step;
            points.push(position);
        }

        let end = Pose::new(position, direction);
        let first_side = if first > 0.0 { Side::Left } else { Side::Right };
        let mut seg = segment(
            SegmentKind::Chicane,
            start,
            end,
            length,
            NARROW_WIDTH,
            SegmentGeometry::Chicane { points },
        );
        // Even-indexed points all follow a turn toward `first`.
        seg.features = features::chicane(&seg, first_side);
        seg
    }

    /// Draws: jump height. Lands back at the take-off elevation.
    fn jump(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let height = rng.range(2.0, 6.0);
        let control_point = start.advanced(length / 2.0) + DVec3::Y * height;
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::Jump {
            height,
            control_point,
        };
        let mut seg = segment(
            SegmentKind::Jump,
            start,
            end,
            length,
            DEFAULT_WIDTH,
            geometry,
        );
        seg.features = features::jump(&seg);
        seg
    }

    /// Draws: tunnel height, tunnel width.
    fn tunnel(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let height = rng.range(6.0, 9.0);
        let width = rng.range(14.0, 18.0);
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::Tunnel { height, width };
        let mut seg = segment(
            SegmentKind::Tunnel,
            start,
            end,
            length,
            DEFAULT_WIDTH,
            geometry,
        );
        seg.features = features::tunnel(&seg);
        seg
    }

    /// Draws: deck elevation, deck width. The road is as wide as the deck.
    fn bridge(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let elevation = rng.range(5.0, 15.0);
        let width = rng.range(10.0, 14.0);
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::Bridge { elevation, width };
        let mut seg = segment(SegmentKind::Bridge, start, end, length, width, geometry);
        seg.features = features::bridge(&seg);
        seg
    }

    /// Draws: roughness, mud level, then features.
    fn offroad(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let roughness = rng.range(0.3, 1.0);
        let mud_level = rng.range(0.0, 0.5);
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::Offroad {
            roughness,
            mud_level,
        };
        let mut seg = segment(
            SegmentKind::Offroad,
            start,
            end,
            length,
            WIDE_WIDTH,
            geometry,
        );
        seg.features = features::offroad(&seg, rng);
        seg
    }

    /// Draws: bump height, bump width.
    fn speed_bump(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let height = rng.range(0.1, 0.3);
        let width = rng.range(0.5, 1.5);
        let end = Pose::new(start.advanced(length), start.direction);

        let geometry = SegmentGeometry::SpeedBump { height, width };
        let mut seg = segment(
            SegmentKind::SpeedBump,
            start,
            end,
            length,
            DEFAULT_WIDTH,
            geometry,
        );
        seg.features = features::speed_bump(&seg);
        seg
    }

    /// Draws: deflection angle, then the arm choice when it is random.
    ///
    /// The fork sits at 60% of the length; each arm covers the remaining 40%
    /// deflected to its side. The taken arm becomes the segment's end pose.
    fn split(&self, start: Pose, length: f64, rng: &mut Lcg) -> TrackSegment {
        let deflection = rng.range(15.0, 45.0).to_radians();
        let taken = match self.split_branch {
            SplitBranch::Left => Branch::Left,
            SplitBranch::Right => Branch::Right,
            SplitBranch::Random => {
                if rng.chance(0.5) {
                    Branch::Left
                } else {
                    Branch::Right
                }
            }
        };

        let branch_point = start.advanced(length * SPLIT_BRANCH_FRACTION);
        let arm = length * (1.0 - SPLIT_BRANCH_FRACTION);
        let arm_pose = |angle: f64| {
            let direction = rotate(start.direction, angle);
            Pose::new(branch_point + direction * arm, direction)
        };
        let left = arm_pose(deflection);
        let right = arm_pose(-deflection);
        let end = match taken {
            Branch::Left => left,
            Branch::Right => right,
        };

        let geometry = SegmentGeometry::Split {
            branch_point,
            left,
            right,
            taken,
        };
        let mut seg = segment(SegmentKind::Split, start, end, length, WIDE_WIDTH, geometry);
        seg.features = features::split(&seg);
        seg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use track_model::FeatureKind;

    const EPS: f64 = 1e-9;

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < EPS
    }

    fn build(kind: SegmentKind, seed: u64) -> TrackSegment {
        SegmentBuilder::new().build(kind, Pose::ORIGIN, 100.0, &mut Lcg::new(seed))
    }

    #[test]
    fn test_straight_advances_along_direction() {
        let seg = build(SegmentKind::Straight, 1);
        assert!(close(seg.end_pos, DVec3::new(0.0, 0.0, 100.0)));
        assert_eq!(seg.end_direction, DVec3::Z);
        assert!((11.0..=13.0).contains(&seg.width));
    }

    #[test]
    fn test_every_kind_keeps_unit_direction() {
        for kind in SegmentKind::ALL {
            for seed in 0..20 {
                let seg = build(kind, seed);
                assert_eq!(seg.kind, kind);
                assert_eq!(seg.start_pos, DVec3::ZERO);
                assert!(
                    (seg.end_direction.length() - 1.0).abs() < EPS,
                    "{kind} direction not unit"
                );
                assert!(seg.end_direction.y.abs() < EPS, "{kind} direction not horizontal");
            }
        }
    }

    #[test]
    fn test_same_inputs_same_segment() {
        for kind in SegmentKind::ALL {
            assert_eq!(build(kind, 77), build(kind, 77));
        }
    }

    #[test]
    fn test_corner_end_lies_on_circle() {
        for seed in 0..50 {
            let seg = build(SegmentKind::Corner, seed);
            let SegmentGeometry::Arc {
                radius,
                angle,
                center,
                ..
            } = seg.geometry
            else {
                panic!("corner without arc geometry");
            };
            assert!((20.0..60.0).contains(&radius));
            assert!((30f64.to_radians()..90f64.to_radians()).contains(&angle));
            assert!(((seg.start_pos - center).length() - radius).abs() < EPS);
            assert!(((seg.end_pos - center).length() - radius).abs() < EPS);
            // Heading turns by exactly the arc angle.
            let turned = seg.start_direction.angle_between(seg.end_direction);
            assert!((turned - angle).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hairpin_reverses_heading() {
        for seed in 0..20 {
            let seg = build(SegmentKind::Hairpin, seed);
            assert!(close(seg.end_direction, -DVec3::Z));
            let SegmentGeometry::Arc { radius, .. } = seg.geometry else {
                panic!("hairpin without arc geometry");
            };
            // Ends two radii to the side of where it started.
            assert!((seg.end_pos.z).abs() < EPS);
            assert!((seg.end_pos.x.abs() - 2.0 * radius).abs() < EPS);
            assert!((seg.end_direction.angle_between(seg.start_direction) - PI).abs() < 1e-6);
        }
    }

    #[test]
    fn test_banked_corner_records_bank_angle() {
        let seg = build(SegmentKind::BankedCorner, 3);
        let SegmentGeometry::Arc { bank_angle, .. } = seg.geometry else {
            panic!("banked corner without arc geometry");
        };
        assert_eq!(bank_angle, Some(30f64.to_radians()));
    }

    #[test]
    fn test_hill_changes_only_elevation() {
        for seed in 0..20 {
            let seg = build(SegmentKind::Hill, seed);
            let SegmentGeometry::Hill { height, shape } = seg.geometry else {
                panic!("hill without hill geometry");
            };
            let expected = match shape {
                HillShape::Crest => height,
                HillShape::Valley => -height,
            };
            assert!((seg.end_pos.y - expected).abs() < EPS);
            assert_eq!(seg.end_direction, seg.start_direction);
        }
    }

    #[test]
    fn test_slopes_have_fixed_sign() {
        for seed in 0..20 {
            assert!(build(SegmentKind::Downhill, seed).end_pos.y < 0.0);
            assert!(build(SegmentKind::Uphill, seed).end_pos.y > 0.0);
        }
    }

    #[test]
    fn test_chicane_point_count_and_end() {
        for seed in 0..20 {
            let seg = build(SegmentKind::Chicane, seed);
            let SegmentGeometry::Chicane { points } = &seg.geometry else {
                panic!("chicane without points");
            };
            assert!(points.len() % 2 == 0);
            assert!((4..=8).contains(&points.len()));
            assert_eq!(points.last(), Some(&seg.end_pos));
            // Deflections cancel pairwise.
            assert!(close(seg.end_direction, seg.start_direction));
        }
    }

    #[test]
    fn test_chicane_strips_match_first_turn() {
        for seed in 0..20 {
            let seg = build(SegmentKind::Chicane, seed);
            let SegmentGeometry::Chicane { points } = &seg.geometry else {
                panic!("chicane without points");
            };
            // Positive when the first step veers left of the entry heading.
            let veer = seg.start_direction.cross(points[0] - seg.start_pos).y;
            let expected = if veer > 0.0 { Side::Left } else { Side::Right };

            assert_eq!(seg.features.len(), points.len() / 2);
            for feature in &seg.features {
                assert_eq!(feature.kind, FeatureKind::RumbleStrip { side: expected });
            }
        }
    }

    #[test]
    fn test_jump_lands_at_takeoff_elevation() {
        let seg = build(SegmentKind::Jump, 8);
        let SegmentGeometry::Jump {
            height,
            control_point,
        } = seg.geometry
        else {
            panic!("jump without jump geometry");
        };
        assert!(close(control_point, DVec3::new(0.0, height, 50.0)));
        assert_eq!(seg.end_pos.y, seg.start_pos.y);
    }

    #[test]
    fn test_split_continues_on_left_by_default() {
        let seg = build(SegmentKind::Split, 4);
        let SegmentGeometry::Split {
            branch_point,
            left,
            right,
            taken,
        } = seg.geometry
        else {
            panic!("split without split geometry");
        };
        assert_eq!(taken, Branch::Left);
        assert!(close(branch_point, DVec3::new(0.0, 0.0, 60.0)));
        assert_eq!(seg.end_pose(), left);
        assert!(left.position.x > 0.0);
        assert!(right.position.x < 0.0);
    }

    #[test]
    fn test_split_can_continue_right() {
        let builder = SegmentBuilder::new().with_split_branch(SplitBranch::Right);
        let seg = builder.build(SegmentKind::Split, Pose::ORIGIN, 100.0, &mut Lcg::new(4));
        let SegmentGeometry::Split { right, taken, .. } = seg.geometry else {
            panic!("split without split geometry");
        };
        assert_eq!(taken, Branch::Right);
        assert_eq!(seg.end_pose(), right);
    }

    #[test]
    fn test_random_split_draws_one_extra_value() {
        let mut fixed = Lcg::new(10);
        let mut random = Lcg::new(10);
        SegmentBuilder::new().build(SegmentKind::Split, Pose::ORIGIN, 100.0, &mut fixed);
        SegmentBuilder::new()
            .with_split_branch(SplitBranch::Random)
            .build(SegmentKind::Split, Pose::ORIGIN, 100.0, &mut random);

        fixed.next_f64();
        assert_eq!(fixed, random);
    }

    #[test]
    fn test_jump_has_ramp_and_landing_zone() {
        let names: Vec<_> = build(SegmentKind::Jump, 2)
            .features
            .iter()
            .map(|f| f.kind.name())
            .collect();
        assert_eq!(names, ["jump_ramp", "landing_zone"]);
    }
}
