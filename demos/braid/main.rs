//! Braid weave demo: samples the default braid outline, ribbons it, and
//! breaks the ribbon edges at every crossing.
//!
//! Usage:
//! ```text
//! cargo run --example braid                 # default ribbon width
//! cargo run --example braid -- 0.08         # custom ribbon width
//! RUST_LOG=braidweave=debug cargo run --example braid
//! ```

use braidweave::geometry::Curve;
use braidweave::operations::BraidWeave;
use braidweave::sampling::BraidShape;
use braidweave::{BraidError, WeaveConfig};
use tracing::info;

fn main() -> Result<(), BraidError> {
    // Default: WARN for everything, INFO for the demo and the library.
    // Override with RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("braid=info".parse().unwrap_or_default())
        .add_directive("braidweave=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut config = WeaveConfig::default();
    if let Some(width) = std::env::args().nth(1).and_then(|arg| arg.parse().ok()) {
        config.ribbon_width = width;
    }

    let shape = BraidShape::default();
    let outline = shape.sample(shape.default_samples())?;
    info!(
        points = outline.len(),
        crossings = shape.crossing_angles().len(),
        "sampled outline"
    );

    let sections = BraidWeave::new(config).execute(&outline)?;
    let total: f64 = sections.iter().map(Curve::length).sum();
    let longest = sections.iter().map(Curve::len).max().unwrap_or(0);
    info!(
        sections = sections.len(),
        total_length = total,
        longest_section_points = longest,
        line_width = config.line_width,
        "weave complete"
    );
    Ok(())
}
