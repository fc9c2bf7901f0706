//! Arc-length sampled checkpoints.

use track_model::{Checkpoint, TrackSegment};
use tracing::debug;

use crate::config::MAX_CHECKPOINTS;

/// Places `regular_count` evenly spaced checkpoints plus a finish checkpoint.
///
/// Regular checkpoints sit at `k * length / regular_count` for
/// `k = 0..regular_count`, each interpolated inside the segment whose
/// `[start, end)` distance range contains it. The finish checkpoint is the last
/// segment's end position at distance `length`. An empty segment list yields
/// no checkpoints. Counts above [`MAX_CHECKPOINTS`] are capped.
pub fn place_checkpoints(
    segments: &[TrackSegment],
    length: f64,
    regular_count: usize,
) -> Vec<Checkpoint> {
    let Some(last) = segments.last() else {
        return Vec::new();
    };

    let regular_count = regular_count.min(MAX_CHECKPOINTS);
    let mut checkpoints = Vec::with_capacity(regular_count);

    if regular_count > 0 {
        let interval = length / regular_count as f64;
        let mut next = 0;
        let mut cumulative = 0.0;

        for (index, segment) in segments.iter().enumerate() {
            let end = cumulative + segment.length;

            while next < regular_count {
                let target = next as f64 * interval;
                if target >= end {
                    break;
                }

                let t = ((target - cumulative) / segment.length).clamp(0.0, 1.0);
                checkpoints.push(Checkpoint {
                    id: checkpoints.len(),
                    position: segment.interpolate(t),
                    segment_index: index,
                    distance: target,
                    is_finish: false,
                });
                next += 1;
            }

            cumulative = end;
        }
    }

    if checkpoints.is_empty() {
        checkpoints.push(Checkpoint {
            id: 0,
            position: segments[0].start_pos,
            segment_index: 0,
            distance: 0.0,
            is_finish: false,
        });
    }

    checkpoints.push(Checkpoint {
        id: checkpoints.len(),
        position: last.end_pos,
        segment_index: segments.len() - 1,
        distance: length,
        is_finish: true,
    });

    debug!("Placed {} checkpoints over {:.1}m", checkpoints.len(), length);
    checkpoints
}
