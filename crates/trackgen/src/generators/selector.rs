//! Difficulty-weighted segment kind selection.

use track_model::SegmentKind;

use crate::config::SelectionTable;
use crate::random::Lcg;

/// Picks the kind of segment `index` from one stream draw.
///
/// Walks the table in order accumulating effective probabilities and returns
/// the first kind whose cumulative sum exceeds the draw. If rounding leaves
/// the draw unmatched the result is `Straight`.
///
/// `index` does not influence the weights yet; it is reserved for positional
/// bias such as harder segments late in a lap.
pub fn choose_segment_type(
    _index: usize,
    difficulty: f64,
    table: &SelectionTable,
    rng: &mut Lcg,
) -> SegmentKind {
    let r = rng.next_f64();
    let mut cumulative = 0.0;

    for weight in &table.weights {
        cumulative += weight.at(difficulty);
        if r < cumulative {
            return weight.kind;
        }
    }

    SegmentKind::Straight
}
