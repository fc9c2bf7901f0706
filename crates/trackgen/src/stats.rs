//! Track statistics, accumulated one segment at a time.

use std::collections::BTreeMap;

use track_model::{HillShape, SegmentGeometry, SegmentKind, TrackSegment, TrackStats};

pub trait TrackMetric {
    type Score;
    fn next_segment(&mut self, segment: &TrackSegment);
    fn finish(&mut self) -> Self::Score;
}

/// Aggregates statistics over a finished segment list. Pure; draws nothing.
pub fn analyze(segments: &[TrackSegment]) -> TrackStats {
    let mut acc = Metrics::default();
    for segment in segments {
        acc.next_segment(segment);
    }
    acc.finish()
}

#[derive(Debug, Clone, Default)]
struct Metrics {
    kinds: KindCountMetric,
    corners: CornerRadiusMetric,
    hills: HillElevationMetric,
    extent: VerticalExtentMetric,
    length: LengthMetric,
}

impl TrackMetric for Metrics {
    type Score = TrackStats;

    fn next_segment(&mut self, segment: &TrackSegment) {
        self.kinds.next_segment(segment);
        self.corners.next_segment(segment);
        self.hills.next_segment(segment);
        self.extent.next_segment(segment);
        self.length.next_segment(segment);
    }

    fn finish(&mut self) -> TrackStats {
        let segment_counts = self.kinds.finish();
        let count = |kind: SegmentKind| segment_counts.get(&kind).copied().unwrap_or(0);
        let (min_elevation, max_elevation) = self.hills.finish();
        let (lowest_point, highest_point) = self.extent.finish();

        TrackStats {
            straight_segments: count(SegmentKind::Straight),
            corner_segments: count(SegmentKind::Corner),
            hill_segments: count(SegmentKind::Hill),
            chicane_segments: count(SegmentKind::Chicane),
            average_corner_radius: self.corners.finish(),
            min_elevation,
            max_elevation,
            lowest_point,
            highest_point,
            total_length: self.length.finish(),
            segment_counts,
        }
    }
}

#[derive(Debug, Clone)]
struct KindCountMetric {
    counts: BTreeMap<SegmentKind, usize>,
}

impl Default for KindCountMetric {
    fn default() -> Self {
        Self {
            counts: SegmentKind::ALL.into_iter().map(|kind| (kind, 0)).collect(),
        }
    }
}

impl TrackMetric for KindCountMetric {
    type Score = BTreeMap<SegmentKind, usize>;

    fn next_segment(&mut self, segment: &TrackSegment) {
        *self.counts.entry(segment.kind).or_insert(0) += 1;
    }

    fn finish(&mut self) -> Self::Score {
        self.counts.clone()
    }
}

/// Mean radius of plain corners.
#[derive(Debug, Clone, Default)]
struct CornerRadiusMetric {
    total_radius: f64,
    corners: usize,
}

impl TrackMetric for CornerRadiusMetric {
    type Score = f64;

    fn next_segment(&mut self, segment: &TrackSegment) {
        if segment.kind != SegmentKind::Corner {
            return;
        }
        if let SegmentGeometry::Arc { radius, .. } = segment.geometry {
            self.total_radius += radius;
            self.corners += 1;
        }
    }

    fn finish(&mut self) -> f64 {
        if self.corners == 0 {
            0.0
        } else {
            self.total_radius / self.corners as f64
        }
    }
}

/// Extremes of signed hill heights, both starting at 0.
#[derive(Debug, Clone, Default)]
struct HillElevationMetric {
    min: f64,
    max: f64,
}

impl TrackMetric for HillElevationMetric {
    type Score = (f64, f64);

    fn next_segment(&mut self, segment: &TrackSegment) {
        if let SegmentGeometry::Hill { height, shape } = segment.geometry {
            let signed = match shape {
                HillShape::Crest => height,
                HillShape::Valley => -height,
            };
            self.min = self.min.min(signed);
            self.max = self.max.max(signed);
        }
    }

    fn finish(&mut self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Lowest and highest y over every segment endpoint.
#[derive(Debug, Clone, Default)]
struct VerticalExtentMetric {
    bounds: Option<(f64, f64)>,
}

impl TrackMetric for VerticalExtentMetric {
    type Score = (f64, f64);

    fn next_segment(&mut self, segment: &TrackSegment) {
        for y in [segment.start_pos.y, segment.end_pos.y] {
            self.bounds = Some(match self.bounds {
                Some((low, high)) => (low.min(y), high.max(y)),
                None => (y, y),
            });
        }
    }

    fn finish(&mut self) -> (f64, f64) {
        self.bounds.unwrap_or((0.0, 0.0))
    }
}

#[derive(Debug, Clone, Default)]
struct LengthMetric {
    total: f64,
}

impl TrackMetric for LengthMetric {
    type Score = f64;

    fn next_segment(&mut self, segment: &TrackSegment) {
        self.total += segment.length;
    }

    fn finish(&mut self) -> f64 {
        self.total
    }
}
