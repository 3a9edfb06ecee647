mod crossings;
mod join;
mod sections;

pub use join::join_segments;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::Tolerance;
use crate::error::{OperationError, Result};
use crate::geometry::{Curve, Segment};
use crate::spatial::GridIndex;

/// Breaks closed curves into open sections at every crossing.
///
/// All curves share one [`GridIndex`], so crossings between different curves
/// are found as well as self-crossings. Sections of one input curve are
/// contiguous in the output and follow that curve's traversal order. The
/// first section of each curve is the one passing through its start point.
///
/// With the `parallel` feature the per-curve walks run on the rayon pool
/// once the index is complete; the output is identical.
#[derive(Debug)]
pub struct BreakCurves<'a> {
    curves: &'a [Curve],
    cell_size: f64,
    tol: Tolerance,
}

impl<'a> BreakCurves<'a> {
    /// Creates a new break operation.
    #[must_use]
    pub fn new(curves: &'a [Curve], cell_size: f64, tol: Tolerance) -> Self {
        Self {
            curves,
            cell_size,
            tol,
        }
    }

    /// Executes the break, returning all sections as one flat list.
    ///
    /// # Errors
    ///
    /// See [`BreakCurves::execute_grouped`].
    pub fn execute(&self) -> Result<Vec<Curve>> {
        Ok(self.execute_grouped()?.into_iter().flatten().collect())
    }

    /// Executes the break, returning the sections of each input curve separately.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if a curve is open
    /// - `ConfigError::InvalidValue` for a bad cell size
    /// - `OperationError::InvariantViolation` if split sections fail to join
    #[instrument(skip(self), fields(curves = self.curves.len(), cell_size = self.cell_size))]
    pub fn execute_grouped(&self) -> Result<Vec<Vec<Curve>>> {
        if let Some(i) = self.curves.iter().position(|c| !c.is_closed()) {
            return Err(OperationError::InvalidInput(format!("curve {i} is open")).into());
        }

        let segments: Vec<Vec<Segment>> = self.curves.iter().map(|c| c.segments(self.tol)).collect();

        let mut index = GridIndex::new(self.cell_size)?;
        for segment in segments.iter().flatten() {
            index.add(*segment)?;
        }
        debug!(segments = index.len(), cells = index.cell_count(), "built grid index");

        let grouped = self.break_all(&segments, &index)?;
        debug!(
            sections = grouped.iter().map(Vec::len).sum::<usize>(),
            "broke curves into sections"
        );
        Ok(grouped)
    }

    #[cfg(not(feature = "parallel"))]
    fn break_all(&self, segments: &[Vec<Segment>], index: &GridIndex) -> Result<Vec<Vec<Curve>>> {
        segments
            .iter()
            .map(|curve| break_one(curve, index, self.tol))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn break_all(&self, segments: &[Vec<Segment>], index: &GridIndex) -> Result<Vec<Vec<Curve>>> {
        segments
            .par_iter()
            .map(|curve| break_one(curve, index, self.tol))
            .collect()
    }
}

fn break_one(segments: &[Segment], index: &GridIndex, tol: Tolerance) -> Result<Vec<Curve>> {
    sections::split(segments, index, tol)?
        .iter()
        .map(|run| join_segments(run, tol))
        .collect()
}
