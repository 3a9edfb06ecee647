//! Small vector helpers on top of `nalgebra`.
//!
//! Addition, subtraction and scaling are the `nalgebra` operators; the
//! functions here cover what the operators don't.

use crate::config::Tolerance;

use super::{Point2, Vector2, TAU};

/// Rotates `v` by 90° counter-clockwise: `(x, y) -> (-y, x)`.
#[must_use]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Scales `v` by `k`.
#[must_use]
pub fn scale(v: &Vector2, k: f64) -> Vector2 {
    v * k
}

/// Euclidean length of `v`.
#[must_use]
pub fn magnitude(v: &Vector2) -> f64 {
    v.norm()
}

/// Unit vector in the direction of `v`.
///
/// A vector whose length is within tolerance of zero normalizes to the zero
/// vector instead of producing NaNs.
#[must_use]
pub fn normalize(v: &Vector2, tol: Tolerance) -> Vector2 {
    let len = v.norm();
    if tol.is_zero(len) {
        return Vector2::zeros();
    }
    v / len
}

/// Unsigned angle between `u` and `v`, in `[0, π]`.
///
/// Returns `0` when either vector is zero.
#[must_use]
pub fn angle_between(u: &Vector2, v: &Vector2) -> f64 {
    let cross = u.perp(v);
    let dot = u.dot(v);
    cross.abs().atan2(dot)
}

/// Signed angle from `u` to `v`, in `(-π, π]`. Positive is counter-clockwise.
#[must_use]
pub fn signed_angle_between(u: &Vector2, v: &Vector2) -> f64 {
    u.perp(v).atan2(u.dot(v))
}

/// Distance between two points.
#[must_use]
pub fn dist(a: &Point2, b: &Point2) -> f64 {
    nalgebra::distance(a, b)
}

/// Tolerance-based point equality.
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2, tol: Tolerance) -> bool {
    tol.points_eq(a, b)
}

/// Direction of `v` as an angle in `[0, τ)`.
#[must_use]
pub fn heading(v: &Vector2) -> f64 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

/// Point halfway between `a` and `b`.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn perp_rotates_counter_clockwise() {
        let v = perp(&Vector2::new(1.0, 0.0));
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, 1.0);
    }

    #[test]
    fn normalize_unit_length() {
        let n = normalize(&Vector2::new(3.0, 4.0), Tolerance::default());
        assert_relative_eq!(magnitude(&n), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn normalize_zero_is_zero() {
        let n = normalize(&Vector2::new(1e-12, 0.0), Tolerance::default());
        assert_eq!(n, Vector2::zeros());
    }

    #[test]
    fn normalize_respects_tightened_tolerance() {
        let v = Vector2::new(1e-12, 0.0);
        let n = normalize(&v, Tolerance::new(1e-15));
        assert_relative_eq!(n.x, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn angles() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 2.0);
        assert_relative_eq!(angle_between(&x, &y), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(angle_between(&y, &x), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(signed_angle_between(&x, &y), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(signed_angle_between(&y, &x), -FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(angle_between(&x, &-x), PI, epsilon = 1e-12);
    }

    #[test]
    fn heading_is_non_negative() {
        assert_relative_eq!(heading(&Vector2::new(0.0, -1.0)), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(heading(&Vector2::new(-1.0, 0.0)), PI, epsilon = 1e-12);
        assert_relative_eq!(heading(&Vector2::new(1.0, 0.0)), 0.0);
    }

    #[test]
    fn distance_and_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_relative_eq!(dist(&a, &b), 5.0);
        let m = midpoint(&a, &b);
        assert_relative_eq!(m.x, 1.5);
        assert_relative_eq!(m.y, 2.0);
        assert!(points_equal(&a, &Point2::new(1e-11, 0.0), Tolerance::default()));
    }
}
