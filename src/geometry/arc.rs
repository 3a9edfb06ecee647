use crate::config::Tolerance;
use crate::error::{GeometryError, Result};
use crate::math::arc_2d::is_angle_between;
use crate::math::vector_2d::heading;
use crate::math::{Point2, Vector2, TAU};

/// A circular arc in the plane.
///
/// Sweeps counter-clockwise from `angle1` to `angle2` modulo a full turn.
/// Angles are radians and not normalized. `angle1 == angle2` is a
/// zero-length arc, not a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    pub angle1: f64,
    pub angle2: f64,
}

impl Arc {
    /// Creates a new arc. A negative radius is taken by absolute value.
    #[must_use]
    pub fn new(center: Point2, radius: f64, angle1: f64, angle2: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
            angle1,
            angle2,
        }
    }

    /// Arc around `center` from the heading of `a` to the heading of `b`.
    ///
    /// The radius is `|a - center|`; `b` only fixes the end angle.
    #[must_use]
    pub fn through(center: Point2, a: &Point2, b: &Point2) -> Self {
        let radius = (a - center).norm();
        Self::new(center, radius, heading(&(a - center)), heading(&(b - center)))
    }

    /// Angular length in `[0, τ)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        (self.angle2 - self.angle1).rem_euclid(TAU)
    }

    /// Returns `true` for a zero-length arc.
    #[must_use]
    pub fn is_degenerate(&self, tol: Tolerance) -> bool {
        let sweep = self.sweep();
        tol.is_zero(sweep) || tol.approx_eq(sweep, TAU) || tol.is_zero(self.radius)
    }

    /// Point on the underlying circle at `angle`.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point2 {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.point_at(self.angle1)
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.point_at(self.angle2)
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    /// The two ribbon edges of this arc: `(outer, inner)` at `radius ± width / 2`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the inner edge would have a
    /// non-positive radius.
    pub fn ribbon(&self, width: f64) -> Result<(Arc, Arc)> {
        let half = width.abs() / 2.0;
        let inner_radius = self.radius - half;
        if inner_radius <= 0.0 {
            return Err(GeometryError::Degenerate(format!(
                "ribbon width {width} exceeds arc diameter {}",
                2.0 * self.radius
            ))
            .into());
        }
        Ok((
            Arc::new(self.center, self.radius + half, self.angle1, self.angle2),
            Arc::new(self.center, inner_radius, self.angle1, self.angle2),
        ))
    }

    /// Breaks the arc at two interior points, giving three consecutive arcs.
    ///
    /// The points may be given in either order; they are sorted along the
    /// sweep. Only their headings from the center are used.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if either heading is not strictly
    /// inside the arc, or both headings coincide.
    pub fn split_at(&self, points: [Point2; 2], tol: Tolerance) -> Result<[Arc; 3]> {
        let mut breaks = points.map(|p| heading(&(p - self.center)));
        for theta in breaks {
            if !is_angle_between(theta, self.angle1, self.angle2, tol) {
                return Err(GeometryError::Degenerate(format!(
                    "break angle {theta} is not inside arc [{}, {}]",
                    self.angle1, self.angle2
                ))
                .into());
            }
        }
        let offset = |theta: f64| (theta - self.angle1).rem_euclid(TAU);
        if offset(breaks[1]) < offset(breaks[0]) {
            breaks.swap(0, 1);
        }
        if tol.approx_eq(offset(breaks[0]), offset(breaks[1])) {
            return Err(GeometryError::Degenerate("arc break points coincide".to_owned()).into());
        }

        Ok([
            Arc::new(self.center, self.radius, self.angle1, breaks[0]),
            Arc::new(self.center, self.radius, breaks[0], breaks[1]),
            Arc::new(self.center, self.radius, breaks[1], self.angle2),
        ])
    }
}
