use tracing::trace;

use crate::config::Tolerance;
use crate::error::Result;
use crate::geometry::Segment;
use crate::math::intersect_2d::{intersect_lines_param, LineMode};
use crate::math::Point2;
use crate::spatial::GridIndex;

/// Crossing points of `segment` with everything in `index`, ordered from the
/// segment's start to its end.
///
/// A hit on an endpoint of both segments is a joint and is ignored. A hit on
/// an endpoint of only one of them is a vertex of one curve lying on the
/// other's edge, which is a crossing. Parameters are accepted within the
/// point tolerance past either end, so such vertex hits are found from both
/// sides. The index yields candidates as a multiset, so hits are
/// deduplicated by point here.
pub(super) fn find(segment: &Segment, index: &GridIndex, tol: Tolerance) -> Result<Vec<Point2>> {
    let (a, b) = (segment.start(), segment.end());
    let mut hits: Vec<(f64, Point2)> = Vec::new();

    for candidate in index.query(segment)? {
        let Some(hit) =
            intersect_lines_param(&a, &b, &candidate.start(), &candidate.end(), LineMode::Line, tol)
        else {
            continue;
        };
        if !on_segment(hit.s, segment, tol) || !on_segment(hit.t, candidate, tol) {
            continue;
        }
        if segment.has_endpoint(&hit.point, tol) && candidate.has_endpoint(&hit.point, tol) {
            continue;
        }
        hits.push((hit.s, hit.point));
    }

    hits.sort_by(|x, y| x.0.total_cmp(&y.0));
    hits.dedup_by(|later, earlier| tol.points_eq(&later.1, &earlier.1));

    if !hits.is_empty() {
        trace!(start = ?a, end = ?b, crossings = hits.len(), "segment crossed");
    }
    Ok(hits.into_iter().map(|(_, p)| p).collect())
}

/// Parameter within `[0, 1]`, widened by the tolerance measured along `segment`.
fn on_segment(param: f64, segment: &Segment, tol: Tolerance) -> bool {
    let slack = tol.epsilon / segment.length();
    (-slack..=1.0 + slack).contains(&param)
}
