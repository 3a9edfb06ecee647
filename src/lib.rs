pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod sampling;
pub mod spatial;

pub use config::{Tolerance, WeaveConfig};
pub use error::{BraidError, Result};
