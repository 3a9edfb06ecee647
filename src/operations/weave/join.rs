use crate::config::Tolerance;
use crate::error::{OperationError, Result};
use crate::geometry::{Curve, Segment};

/// Concatenates consecutive segments into one open polyline.
///
/// Each segment must start where the previous one ended. A gap means the
/// splitting upstream produced inconsistent geometry.
///
/// # Errors
///
/// Returns `OperationError::InvariantViolation` for an empty run or a gap
/// between consecutive segments.
pub fn join_segments(segments: &[Segment], tol: Tolerance) -> Result<Curve> {
    let Some(first) = segments.first() else {
        return Err(OperationError::InvariantViolation("cannot join an empty section".to_owned()).into());
    };

    let mut points = Vec::with_capacity(segments.len() + 1);
    points.push(first.start());
    let mut last_end = first.start();
    for (i, segment) in segments.iter().enumerate() {
        if !tol.points_eq(&segment.start(), &last_end) {
            return Err(OperationError::InvariantViolation(format!(
                "segment {i} starts at {:?} but the previous one ends at {last_end:?}",
                segment.start()
            ))
            .into());
        }
        points.push(segment.end());
        last_end = segment.end();
    }

    Ok(Curve::open(points))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BraidError;
    use crate::math::Point2;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2::new(x0, y0), Point2::new(x1, y1), Tolerance::default()).unwrap()
    }

    #[test]
    fn joins_chain() {
        let curve = join_segments(
            &[seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0)],
            Tolerance::default(),
        )
        .unwrap();
        assert!(!curve.is_closed());
        assert_eq!(
            curve.points(),
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)]
        );
    }

    #[test]
    fn tolerates_tiny_gaps() {
        let curve = join_segments(
            &[seg(0.0, 0.0, 1.0, 0.0), seg(1.0 + 1e-12, 0.0, 1.0, 1.0)],
            Tolerance::default(),
        )
        .unwrap();
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn gap_is_invariant_violation() {
        let err = join_segments(
            &[seg(0.0, 0.0, 1.0, 0.0), seg(2.0, 0.0, 2.0, 1.0)],
            Tolerance::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BraidError::Operation(OperationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn empty_is_invariant_violation() {
        assert!(join_segments(&[], Tolerance::default()).is_err());
    }
}
