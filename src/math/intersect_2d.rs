use crate::config::Tolerance;

use super::vector_2d::{normalize, perp};
use super::{Point2, Vector2};

/// How `intersect_lines` treats its two point pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Infinite lines through the point pairs.
    Line,
    /// Bounded segments between the point pairs.
    Segment,
}

/// Parametric solution of a line-line intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHit {
    pub point: Point2,
    /// Parameter along `a -> b`.
    pub s: f64,
    /// Parameter along `c -> d`.
    pub t: f64,
}

/// Intersection of lines `a-b` and `c-d`, with both parameters.
///
/// Uses the perp-dot formulation. Parallel or collinear lines yield `None`;
/// overlapping collinear segments are never reported as a point. In
/// [`LineMode::Segment`] a parameter outside `[0, 1]` also yields `None`.
#[must_use]
pub fn intersect_lines_param(
    a: &Point2,
    b: &Point2,
    c: &Point2,
    d: &Point2,
    mode: LineMode,
    tol: Tolerance,
) -> Option<LineHit> {
    let u = b - a;
    let v = d - c;
    let w = a - c;

    let u_perp_dot_v = perp(&u).dot(&v);
    if tol.is_zero(u_perp_dot_v) {
        return None;
    }

    let s = perp(&v).dot(&w) / u_perp_dot_v;
    let t = perp(&u).dot(&w) / u_perp_dot_v;
    if mode == LineMode::Segment && !((0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)) {
        return None;
    }

    Some(LineHit {
        point: a + u * s,
        s,
        t,
    })
}

/// Intersection point of lines `a-b` and `c-d`.
///
/// See [`intersect_lines_param`].
#[must_use]
pub fn intersect_lines(
    a: &Point2,
    b: &Point2,
    c: &Point2,
    d: &Point2,
    mode: LineMode,
    tol: Tolerance,
) -> Option<Point2> {
    intersect_lines_param(a, b, c, d, mode, tol).map(|hit| hit.point)
}

/// Intersection points of two circles.
///
/// Radii are taken by absolute value. Concentric (or identical) circles
/// give no points, tangent circles give one, crossing circles give two.
#[must_use]
pub fn intersect_circles(
    center1: &Point2,
    radius1: f64,
    center2: &Point2,
    radius2: f64,
    tol: Tolerance,
) -> Vec<Point2> {
    let (mut c1, mut r1) = (*center1, radius1.abs());
    let (mut c2, mut r2) = (*center2, radius2.abs());
    if r2 > r1 {
        std::mem::swap(&mut c1, &mut c2);
        std::mem::swap(&mut r1, &mut r2);
    }

    if tol.points_eq(&c1, &c2) {
        return Vec::new();
    }

    let transverse: Vector2 = c2 - c1;
    let dist = transverse.norm();
    let axis = normalize(&transverse, tol);

    let radius_sum = r1 + r2;
    let radius_difference = r1 - r2;
    if tol.approx_eq(dist, radius_sum) || tol.approx_eq(dist, radius_difference) {
        return vec![c1 + axis * r1];
    }

    if dist > radius_sum || dist < radius_difference {
        return Vec::new();
    }

    // Lay the centers along the x-axis: `x` is the chord's offset from c1,
    // `chord` its full length.
    let x = (dist * dist - r2 * r2 + r1 * r1) / (2.0 * dist);
    let product = (-dist + r1 - r2) * (-dist - r1 + r2) * (-dist + r1 + r2) * (dist + r1 + r2);
    let chord = product.max(0.0).sqrt() / dist;

    let chord_middle = c1 + axis * x;
    let offset = perp(&axis) * (chord / 2.0);
    vec![chord_middle + offset, chord_middle - offset]
}
