//! Summary statistics derived from a finished segment chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::SegmentKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStats {
    pub straight_segments: usize,
    /// Plain corners only; banked corners and hairpins are counted in `segment_counts`.
    pub corner_segments: usize,
    pub hill_segments: usize,
    pub chicane_segments: usize,
    /// Mean radius over plain corners, 0 when there are none.
    pub average_corner_radius: f64,
    /// Lowest signed hill height (valleys are negative), never above 0.
    pub min_elevation: f64,
    /// Highest signed hill height, never below 0.
    pub max_elevation: f64,
    /// Lowest y over every segment endpoint.
    pub lowest_point: f64,
    /// Highest y over every segment endpoint.
    pub highest_point: f64,
    /// Sum of nominal segment lengths.
    pub total_length: f64,
    pub segment_counts: BTreeMap<SegmentKind, usize>,
}

impl TrackStats {
    /// Number of segments of the given kind.
    pub fn count(&self, kind: SegmentKind) -> usize {
        self.segment_counts.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_counts_round_trip_as_json_object() {
        let mut stats = TrackStats::default();
        stats.segment_counts.insert(SegmentKind::Hairpin, 3);
        stats.segment_counts.insert(SegmentKind::Straight, 7);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["segment_counts"]["hairpin"], 3);

        let back: TrackStats = serde_json::from_value(json).unwrap();
        assert_eq!(back.count(SegmentKind::Straight), 7);
        assert_eq!(back.count(SegmentKind::Bridge), 0);
    }
}
