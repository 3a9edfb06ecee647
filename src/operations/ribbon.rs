use tracing::{debug, instrument};

use crate::config::{Tolerance, DEFAULT_MITER_LIMIT};
use crate::error::{OperationError, Result};
use crate::geometry::Curve;
use crate::math::vector_2d::{angle_between, normalize, perp};
use crate::math::Vector2;

/// The two edges of a ribbon around a closed source curve.
///
/// Point `i` of either edge corresponds to point `i` of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon {
    /// Edge on the left of the walking direction.
    pub left: Curve,
    /// Edge on the right of the walking direction.
    pub right: Curve,
}

impl Ribbon {
    /// Both edges in `[left, right]` order.
    #[must_use]
    pub fn into_curves(self) -> [Curve; 2] {
        [self.left, self.right]
    }
}

/// Offsets a closed polyline to both sides by half of `width`.
///
/// Each vertex moves along the bisector of its two incident edges. The
/// bisector is the sum of the edges' half-width normals, stretched to
/// `half_width / sin(angle(next_edge, bisector))` so both adjacent edges end
/// up exactly `half_width` away.
///
/// Joints that fold back on themselves (cusps) have no stable bisector, and
/// joints sharp enough that the offset exceeds `miter_limit · half_width`
/// would spike far off the curve. Both are rejected; callers must filter such
/// points out of the source first.
#[derive(Debug)]
pub struct Ribbonize<'a> {
    curve: &'a Curve,
    width: f64,
    miter_limit: f64,
    tol: Tolerance,
}

impl<'a> Ribbonize<'a> {
    /// Creates a new ribbon operation with [`DEFAULT_MITER_LIMIT`].
    #[must_use]
    pub fn new(curve: &'a Curve, width: f64, tol: Tolerance) -> Self {
        Self {
            curve,
            width,
            miter_limit: DEFAULT_MITER_LIMIT,
            tol,
        }
    }

    /// Sets the longest allowed offset as a multiple of the half width.
    #[must_use]
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if the curve is open, has fewer than
    ///   3 points or a zero-length edge, the width is not positive, or the
    ///   miter limit is below 1
    /// - `OperationError::NumericalInstability` at a cusp joint or one whose
    ///   offset exceeds the miter limit
    #[instrument(skip(self), fields(points = self.curve.len(), width = self.width))]
    pub fn execute(&self) -> Result<Ribbon> {
        if !self.curve.is_closed() {
            return Err(OperationError::InvalidInput("ribbon source must be closed".to_owned()).into());
        }
        if self.curve.len() < 3 {
            return Err(OperationError::InvalidInput(
                "at least 3 points are required for a ribbon".to_owned(),
            )
            .into());
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "ribbon width must be positive, got {}",
                self.width
            ))
            .into());
        }

        if !self.miter_limit.is_finite() || self.miter_limit < 1.0 {
            return Err(OperationError::InvalidInput(format!(
                "miter limit must be at least 1, got {}",
                self.miter_limit
            ))
            .into());
        }

        let half_width = self.width / 2.0;
        let mut left = Vec::with_capacity(self.curve.len());
        let mut right = Vec::with_capacity(self.curve.len());

        for (index, point) in self.curve.points().iter().enumerate() {
            let (prev, next) = self.curve.neighbors(index).ok_or_else(|| {
                OperationError::InvariantViolation(format!("closed curve has no neighbors at {index}"))
            })?;
            let offset = self.bisector(index, point - prev, next - point, half_width)?;
            left.push(point + offset);
            right.push(point - offset);
        }

        debug!(points = left.len(), "built ribbon edges");
        Ok(Ribbon {
            left: Curve::closed(left),
            right: Curve::closed(right),
        })
    }

    /// Corrected offset vector for one joint, pointing to the left side.
    fn bisector(&self, index: usize, incoming: Vector2, outgoing: Vector2, half_width: f64) -> Result<Vector2> {
        let tol = self.tol;
        let in_dir = normalize(&incoming, tol);
        let out_dir = normalize(&outgoing, tol);
        if in_dir == Vector2::zeros() || out_dir == Vector2::zeros() {
            return Err(OperationError::InvalidInput(format!("zero-length edge at point {index}")).into());
        }

        let bisector = perp(&in_dir) * half_width + perp(&out_dir) * half_width;
        let direction = normalize(&bisector, tol);
        if direction == Vector2::zeros() {
            return Err(OperationError::NumericalInstability {
                index,
                detail: "curve reverses direction".to_owned(),
            }
            .into());
        }

        // The offset is `half_width / sine`; the limit caps `1 / sine`.
        let sine = angle_between(&outgoing, &bisector).sin();
        if sine <= tol.epsilon || sine * self.miter_limit < 1.0 {
            return Err(OperationError::NumericalInstability {
                index,
                detail: format!(
                    "joint angle too sharp (sin = {sine:e}, miter limit {})",
                    self.miter_limit
                ),
            }
            .into());
        }

        Ok(direction * (half_width / sine))
    }
}
