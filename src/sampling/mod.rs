//! Point sampling of closed source outlines.

mod braid;
mod polar;

pub use braid::BraidShape;
pub use polar::{polar_to_cartesian, sample_polar};
