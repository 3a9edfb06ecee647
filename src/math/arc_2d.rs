//! Angular interval tests and arc-arc intersection.
//!
//! Angles are radians and never assumed to be pre-normalized. An interval
//! `(lo, hi)` sweeps counter-clockwise from `lo` to `hi` modulo a full turn.

use crate::config::Tolerance;
use crate::geometry::Arc;

use super::intersect_2d::intersect_circles;
use super::vector_2d::heading;
use super::{Point2, TAU};

/// Returns `true` if `theta` lies strictly inside the counter-clockwise
/// interval from `lo` to `hi`.
///
/// Both endpoints are excluded: they are join points shared with the
/// neighbouring arcs, not interior crossings.
#[must_use]
pub fn is_angle_between(theta: f64, lo: f64, hi: f64, tol: Tolerance) -> bool {
    let theta = theta.rem_euclid(TAU);
    let lo = lo.rem_euclid(TAU);
    let hi = hi.rem_euclid(TAU);
    if angles_eq(theta, lo, tol) || angles_eq(theta, hi, tol) {
        return false;
    }
    (theta - lo).rem_euclid(TAU) < (hi - lo).rem_euclid(TAU)
}

/// Equality of two angles already reduced to `[0, τ)`, across the seam.
fn angles_eq(a: f64, b: f64, tol: Tolerance) -> bool {
    let d = (a - b).abs();
    tol.is_zero(d) || tol.approx_eq(d, TAU)
}

/// Points where two arcs cross.
///
/// Candidates come from the underlying circles; a point is kept only when its
/// heading from each center lies strictly inside that arc's interval. Arcs on
/// concentric or identical circles have no points.
#[must_use]
pub fn intersect_arcs(arc1: &Arc, arc2: &Arc, tol: Tolerance) -> Vec<Point2> {
    intersect_circles(&arc1.center, arc1.radius, &arc2.center, arc2.radius, tol)
        .into_iter()
        .filter(|p| arc_contains_heading(arc1, p, tol) && arc_contains_heading(arc2, p, tol))
        .collect()
}

fn arc_contains_heading(arc: &Arc, p: &Point2, tol: Tolerance) -> bool {
    is_angle_between(heading(&(p - arc.center)), arc.angle1, arc.angle2, tol)
}
