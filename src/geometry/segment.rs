use crate::config::Tolerance;
use crate::math::{Point2, Vector2};

/// A directed straight segment with distinct endpoints.
///
/// Reversing the endpoints gives a different segment that covers the same
/// line. A zero-length segment cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment, or `None` if the endpoints are tolerance-equal.
    #[must_use]
    pub fn new(start: Point2, end: Point2, tol: Tolerance) -> Option<Self> {
        if tol.points_eq(&start, &end) {
            return None;
        }
        Some(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Vector from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Point at parameter `t`, where `0` is the start and `1` the end.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    /// Minimum and maximum corners of the axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> (Point2, Point2) {
        (self.start.inf(&self.end), self.start.sup(&self.end))
    }

    /// Returns `true` if `p` is tolerance-equal to either endpoint.
    #[must_use]
    pub fn has_endpoint(&self, p: &Point2, tol: Tolerance) -> bool {
        tol.points_eq(p, &self.start) || tol.points_eq(p, &self.end)
    }

    /// Tolerance-equal endpoints in matching order.
    #[must_use]
    pub fn same_as(&self, other: &Segment, tol: Tolerance) -> bool {
        tol.points_eq(&self.start, &other.start) && tol.points_eq(&self.end, &other.end)
    }

    /// The same segment walked the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Splits at `p` into the part before and the part after.
    ///
    /// Either part is `None` when `p` coincides with the matching endpoint.
    /// `p` is used as-is for both the new end and the new start, so the two
    /// parts always join exactly.
    #[must_use]
    pub fn split_at(&self, p: Point2, tol: Tolerance) -> (Option<Segment>, Option<Segment>) {
        (Segment::new(self.start, p, tol), Segment::new(p, self.end, tol))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn zero_length_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(Segment::new(p, p, tol()).is_none());
        assert!(Segment::new(p, Point2::new(1.0, 1.0 + 1e-12), tol()).is_none());
    }

    #[test]
    fn bounds_are_ordered() {
        let s = Segment::new(Point2::new(2.0, -1.0), Point2::new(-3.0, 4.0), tol()).unwrap();
        let (lo, hi) = s.bounds();
        assert_eq!(lo, Point2::new(-3.0, -1.0));
        assert_eq!(hi, Point2::new(2.0, 4.0));
    }

    #[test]
    fn split_in_the_middle() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), tol()).unwrap();
        let (before, after) = s.split_at(Point2::new(1.0, 0.0), tol());
        let (before, after) = (before.unwrap(), after.unwrap());
        assert_eq!(before.end(), after.start());
        assert_relative_eq!(before.length() + after.length(), s.length());
    }

    #[test]
    fn split_at_endpoint_yields_one_part() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), tol()).unwrap();
        let (before, after) = s.split_at(s.start(), tol());
        assert!(before.is_none());
        assert!(after.unwrap().same_as(&s, tol()));
    }

    #[test]
    fn reversed_is_a_different_segment() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), tol()).unwrap();
        assert!(!s.same_as(&s.reversed(), tol()));
        assert!(s.same_as(&s.reversed().reversed(), tol()));
    }

    #[test]
    fn point_at_parameter() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0), tol()).unwrap();
        let p = s.point_at(0.25);
        assert_relative_eq!(p.x, 0.5);
        assert!(s.has_endpoint(&Point2::new(2.0, 2.0), tol()));
        assert!(!s.has_endpoint(&p, tol()));
    }
}
