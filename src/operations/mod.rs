mod braid_weave;
mod ribbon;
pub mod weave;

pub use braid_weave::BraidWeave;
pub use ribbon::{Ribbon, Ribbonize};
pub use weave::BreakCurves;
