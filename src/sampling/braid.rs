use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, OperationError, Result};
use crate::geometry::Curve;
use crate::math::TAU;

use super::polar::sample_polar;

/// Samples per lobe per turn used by [`BraidShape::default_samples`].
const SAMPLES_PER_LOBE: usize = 64;

/// Closed-form outline of a circular braid.
///
/// The radius follows `r(θ) = 1 + thickness · shape(cos(ratio · θ))` where
/// `ratio = lobes / turns` and `shape` is a sine arc through `(-1, -1)` and
/// `(1, 1)`:
///
/// ```text
/// shape(x) = a · sin(w · (x - x0)) + y0
/// a        = 1 / (sin w · cos(w · x0))
/// y0       = tan(w · x0) / tan w
/// ```
///
/// `x0` moves the steepest part of the arc off center and `w` sets how much of
/// a sine period is used, so the strands flatten at the rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraidShape {
    pub lobes: u32,
    pub turns: u32,
    pub thickness: f64,
    pub x0: f64,
    pub w: f64,
}

impl Default for BraidShape {
    fn default() -> Self {
        Self {
            lobes: 7,
            turns: 3,
            thickness: 1.0 / 3.0,
            x0: 1.0 / 7.0,
            w: 6.0 / 7.0,
        }
    }
}

impl BraidShape {
    /// Angular frequency of the radial wave.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.lobes) / f64::from(self.turns)
    }

    /// The shaping sine arc; maps `[-1, 1]` onto `[-1, 1]` with fixed ends.
    #[must_use]
    pub fn shape(&self, x: f64) -> f64 {
        let a = 1.0 / (self.w.sin() * (self.w * self.x0).cos());
        let y0 = (self.w * self.x0).tan() / self.w.tan();
        a * (self.w * (x - self.x0)).sin() + y0
    }

    /// Radius at polar angle `theta`.
    #[must_use]
    pub fn radius(&self, theta: f64) -> f64 {
        1.0 + self.thickness * self.shape((self.ratio() * theta).cos())
    }

    /// Sample count giving 64 points per lobe on every turn.
    #[must_use]
    pub fn default_samples(&self) -> usize {
        (self.turns as usize)
            .saturating_mul(self.lobes as usize)
            .saturating_mul(SAMPLES_PER_LOBE)
    }

    /// Parameters `θ` in `[0, turns · τ)` at which the outline passes through
    /// a crossing. Every crossing is listed once for each of its two strands.
    ///
    /// Candidates sit every `τ / (2 · lobes)`; on every `turns`-th step the
    /// strand is at a lobe tip instead.
    #[must_use]
    pub fn crossing_angles(&self) -> Vec<f64> {
        let Some(steps) = self.half_lobe_steps() else {
            return Vec::new();
        };
        let step = TAU / (2.0 * f64::from(self.lobes));
        (0..steps)
            .filter(|i| i % self.turns != 0)
            .map(|i| f64::from(i) * step)
            .collect()
    }

    /// Half-lobe steps over all turns, `turns · 2 · lobes`, if it fits `u32`.
    fn half_lobe_steps(&self) -> Option<u32> {
        self.turns.checked_mul(2)?.checked_mul(self.lobes)
    }

    /// Checks that the shape parameters describe a finite outline.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.lobes == 0 {
            return Err(invalid("lobes", 0.0));
        }
        if self.turns == 0 {
            return Err(invalid("turns", 0.0));
        }
        if self.half_lobe_steps().is_none() {
            return Err(invalid("lobes", f64::from(self.lobes)));
        }
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(invalid("thickness", self.thickness));
        }
        if !self.x0.is_finite() {
            return Err(invalid("x0", self.x0));
        }
        let ends = [self.shape(-1.0), self.shape(1.0)];
        if !self.w.is_finite() || ends.iter().any(|y| !y.is_finite()) {
            return Err(invalid("w", self.w));
        }
        Ok(())
    }

    /// Samples the outline at `samples` evenly spaced angles over all turns.
    ///
    /// The angle `turns · τ` is left out since it repeats the first point; the
    /// curve is closed instead.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` if the shape does not validate
    /// - `OperationError::InvalidInput` for fewer than 3 samples
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, samples: usize) -> Result<Curve> {
        self.validate()?;
        if samples < 3 {
            return Err(OperationError::InvalidInput(format!(
                "at least 3 samples are required, got {samples}"
            ))
            .into());
        }

        let span = f64::from(self.turns) * TAU;
        let step = span / samples as f64;
        let points = sample_polar(|theta| self.radius(theta), (0..samples).map(|k| k as f64 * step));
        debug!(samples, lobes = self.lobes, turns = self.turns, "sampled braid outline");
        Ok(Curve::closed(points))
    }
}

fn invalid(field: &'static str, value: f64) -> crate::error::BraidError {
    ConfigError::InvalidValue { field, value }.into()
}
