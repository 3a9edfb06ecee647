use tracing::{info, instrument};

use crate::config::WeaveConfig;
use crate::error::Result;
use crate::geometry::Curve;

use super::ribbon::Ribbonize;
use super::weave::BreakCurves;

/// Full weave pipeline: ribbon every source curve, then break all ribbon
/// edges against each other.
///
/// The output lists, per source curve, the sections of its left edge
/// followed by the sections of its right edge.
#[derive(Debug)]
pub struct BraidWeave {
    config: WeaveConfig,
}

impl BraidWeave {
    /// Creates a new pipeline with the given configuration.
    #[must_use]
    pub fn new(config: WeaveConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &WeaveConfig {
        &self.config
    }

    /// Weaves a single closed source curve.
    ///
    /// # Errors
    ///
    /// See [`BraidWeave::execute_many`].
    pub fn execute(&self, source: &Curve) -> Result<Vec<Curve>> {
        self.execute_many(std::slice::from_ref(source))
    }

    /// Weaves several closed source curves together, so crossings between
    /// different sources are split as well.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidValue` if the configuration does not validate
    /// - any error from ribbonizing or breaking
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn execute_many(&self, sources: &[Curve]) -> Result<Vec<Curve>> {
        self.config.validate()?;
        let tol = self.config.tolerance;

        let mut edges = Vec::with_capacity(sources.len() * 2);
        for source in sources {
            let ribbon = Ribbonize::new(source, self.config.ribbon_width, tol)
                .with_miter_limit(self.config.miter_limit)
                .execute()?;
            edges.extend(ribbon.into_curves());
        }

        let sections = BreakCurves::new(&edges, self.config.cell_size, tol).execute()?;
        info!(edges = edges.len(), sections = sections.len(), "woven");
        Ok(sections)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{BraidError, ConfigError};
    use crate::math::Point2;

    fn figure_eight() -> Curve {
        Curve::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ])
    }

    #[test]
    fn figure_eight_edges_cross_each_other() {
        let config = WeaveConfig {
            ribbon_width: 0.4,
            cell_size: 0.5,
            ..WeaveConfig::default()
        };
        let source = figure_eight();
        let sections = BraidWeave::new(config).execute(&source).unwrap();

        // Four crossings in the middle; each edge runs through them four times.
        assert_eq!(sections.len(), 8);
        for section in &sections {
            assert!(!section.is_closed());
            assert!(section.len() >= 2);
        }
    }

    #[test]
    fn sections_conserve_ribbon_length() {
        let config = WeaveConfig {
            ribbon_width: 0.4,
            cell_size: 0.5,
            ..WeaveConfig::default()
        };
        let source = figure_eight();
        let ribbon = Ribbonize::new(&source, config.ribbon_width, config.tolerance)
            .execute()
            .unwrap();
        let expected = ribbon.left.length() + ribbon.right.length();
        let sections = BraidWeave::new(config).execute(&source).unwrap();
        let total: f64 = sections.iter().map(Curve::length).sum();
        assert_relative_eq!(total, expected, epsilon = 1e-9);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = WeaveConfig {
            cell_size: 0.0,
            ..WeaveConfig::default()
        };
        let err = BraidWeave::new(config).execute(&figure_eight()).unwrap_err();
        assert!(matches!(err, BraidError::Config(ConfigError::InvalidValue { .. })));
    }
}
