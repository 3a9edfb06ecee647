use tracing::warn;

use crate::config::Tolerance;
use crate::math::Point2;

use super::segment::Segment;

/// An ordered point sequence, either closed or open.
///
/// A closed curve connects its last point back to the first; the closing
/// point is not repeated. Open curves are the sections produced by breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Point2>,
    closed: bool,
}

impl Curve {
    /// Creates a closed curve.
    #[must_use]
    pub fn closed(points: Vec<Point2>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Creates an open curve.
    #[must_use]
    pub fn open(points: Vec<Point2>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Previous and next point of `index`, wrapping around for closed curves.
    ///
    /// Returns `None` for out-of-range indices and for the ends of an open curve.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> Option<(Point2, Point2)> {
        let n = self.points.len();
        if index >= n || n < 2 {
            return None;
        }
        if self.closed {
            Some((self.points[(index + n - 1) % n], self.points[(index + 1) % n]))
        } else if index == 0 || index == n - 1 {
            None
        } else {
            Some((self.points[index - 1], self.points[index + 1]))
        }
    }

    /// Number of edges, including the closing edge of a closed curve.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// The curve's directed edges in order, wrap-around included.
    ///
    /// Zero-length edges (repeated points) carry no geometry and are skipped.
    #[must_use]
    pub fn segments(&self, tol: Tolerance) -> Vec<Segment> {
        let n = self.points.len();
        (0..self.segment_count())
            .filter_map(|i| {
                let segment = Segment::new(self.points[i], self.points[(i + 1) % n], tol);
                if segment.is_none() {
                    warn!(index = i, "skipping zero-length edge");
                }
                segment
            })
            .collect()
    }

    /// Total length of all edges.
    #[must_use]
    pub fn length(&self) -> f64 {
        let n = self.points.len();
        (0..self.segment_count())
            .map(|i| nalgebra::distance(&self.points[i], &self.points[(i + 1) % n]))
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn square() -> Curve {
        Curve::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn closed_segments_wrap() {
        let segments = square().segments(Tolerance::default());
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].start(), Point2::new(0.0, 1.0));
        assert_eq!(segments[3].end(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn open_segments_do_not_wrap() {
        let curve = Curve::open(square().into_points());
        assert_eq!(curve.segment_count(), 3);
        assert_eq!(curve.segments(Tolerance::default()).len(), 3);
        assert_relative_eq!(curve.length(), 3.0);
    }

    #[test]
    fn repeated_points_skipped() {
        let curve = Curve::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert_eq!(curve.segments(Tolerance::default()).len(), 3);
    }

    #[test]
    fn neighbors_wrap_on_closed() {
        let (prev, next) = square().neighbors(0).unwrap();
        assert_eq!(prev, Point2::new(0.0, 1.0));
        assert_eq!(next, Point2::new(1.0, 0.0));
        assert!(square().neighbors(4).is_none());
    }

    #[test]
    fn neighbors_at_open_ends() {
        let curve = Curve::open(square().into_points());
        assert!(curve.neighbors(0).is_none());
        assert!(curve.neighbors(3).is_none());
        assert!(curve.neighbors(1).is_some());
    }

    #[test]
    fn closed_length_includes_closing_edge() {
        assert_relative_eq!(square().length(), 4.0);
    }
}
