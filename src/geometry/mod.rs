pub mod arc;
pub mod curve;
pub mod segment;

pub use arc::Arc;
pub use curve::Curve;
pub use segment::Segment;
