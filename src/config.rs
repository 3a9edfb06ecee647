use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::math::{Point2, TOLERANCE};

/// Default cap on a ribbon joint's offset, in multiples of the half width.
pub const DEFAULT_MITER_LIMIT: f64 = 10.0;

/// Tolerance used for every "effectively zero / equal / parallel" decision.
///
/// Passed by value through all comparison functions so callers can tighten
/// or loosen it per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute epsilon for scalar and point comparisons.
    pub epsilon: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { epsilon: TOLERANCE }
    }
}

impl Tolerance {
    /// Creates a tolerance with the given absolute epsilon.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Returns `true` if `value` is within epsilon of zero.
    #[must_use]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }

    /// Returns `true` if `a` and `b` differ by at most epsilon.
    #[must_use]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }

    /// Returns `true` if the two points are within epsilon of each other.
    #[must_use]
    pub fn points_eq(&self, a: &Point2, b: &Point2) -> bool {
        nalgebra::distance(a, b) <= self.epsilon
    }
}

/// Parameters of a braid weave run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaveConfig {
    /// Full width of the ribbon; each side is offset by half of it.
    pub ribbon_width: f64,
    /// Edge length of one grid index cell. Pick it near the typical segment length.
    pub cell_size: f64,
    /// Stroke width. Only consumed by renderers.
    pub line_width: f64,
    /// Longest allowed joint offset as a multiple of half the ribbon width.
    /// Sharper joints are rejected instead of producing spikes.
    pub miter_limit: f64,
    pub tolerance: Tolerance,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            ribbon_width: 0.1,
            cell_size: 0.05,
            line_width: 0.01,
            miter_limit: DEFAULT_MITER_LIMIT,
            tolerance: Tolerance::default(),
        }
    }
}

impl WeaveConfig {
    /// Checks that all lengths are finite and strictly positive, and that the
    /// miter limit is at least 1.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.miter_limit.is_finite() || self.miter_limit < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "miter_limit",
                value: self.miter_limit,
            }
            .into());
        }
        let fields = [
            ("ribbon_width", self.ribbon_width),
            ("cell_size", self.cell_size),
            ("line_width", self.line_width),
            ("tolerance.epsilon", self.tolerance.epsilon),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value }.into());
            }
        }
        Ok(())
    }
}
